use super::value_objects::Status;

/// Scope of a reset operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetScope {
    /// Every row on the board
    All,
    /// Only rows whose team matches the label
    Team(String),
}

/// Domain events emitted by board mutations
///
/// Handlers log these; the automatic daily reset also uses `BoardReset` to
/// signal that cached reads must be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// A member reported a new status
    StatusUpdated {
        name: String,
        status: Status,
    },
    /// Eligible rows were cleared back to their defaults
    BoardReset {
        scope: ResetScope,
        /// Number of rows actually cleared (long-term rows never count)
        cleared: usize,
    },
}
