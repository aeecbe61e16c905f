// Repository interfaces (ports) the domain depends on

pub mod roster_repository;

pub use roster_repository::{RosterRepository, StoreError};
