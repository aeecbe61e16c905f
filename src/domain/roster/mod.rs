// Roster domain module
// Contains the board aggregate, row record, value objects and domain events

pub mod board;
pub mod events;
pub mod reset;
pub mod row;
pub mod value_objects;

// Re-export main types for convenience
pub use board::{Board, BoardError, StatusUpdate};
pub use events::{ResetScope, RosterEvent};
pub use row::RosterRow;
pub use value_objects::Status;
