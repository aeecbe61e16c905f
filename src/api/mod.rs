// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use std::sync::Arc;

use crate::config::Settings;
use crate::domain::repositories::RosterRepository;

/// Shared handler state: the persistence port plus the service settings
///
/// Handlers only see the repository trait, so the integration suite can run
/// the full HTTP stack against the in-memory adapter.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn RosterRepository>,
    pub settings: Arc<Settings>,
}
