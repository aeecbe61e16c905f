use serde::{Deserialize, Serialize};

use super::value_objects::Status;

/// One team member's availability record
///
/// Rows are provisioned once (seed list or pre-existing store) and never
/// created or removed by board operations; only the mutable fields below
/// change. `name` is the primary key within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Unique member name; blank names are not valid members
    pub name: String,
    /// Grouping label; empty string means ungrouped
    pub team: String,
    pub status: Status,
    pub comment: String,
    /// `YYYY-MM-DD HH:MM` in the board time zone, or empty if never updated
    pub last_updated: String,
    /// Exempts the row from every reset operation
    pub is_long_term: bool,
}

impl RosterRow {
    /// Creates a fresh row for a newly provisioned member
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: String::new(),
            status: Status::NotUpdated,
            comment: String::new(),
            last_updated: String::new(),
            is_long_term: false,
        }
    }

    /// A row is a valid member only if its name is non-blank
    pub fn is_valid_member(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Applies the reset rule: status, comment and timestamp go back to
    /// their defaults; `name`, `team` and `is_long_term` are untouched
    pub fn clear(&mut self) {
        self.status = Status::NotUpdated;
        self.comment.clear();
        self.last_updated.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_has_empty_defaults() {
        let row = RosterRow::new("Anna");
        assert_eq!(row.name, "Anna");
        assert_eq!(row.team, "");
        assert_eq!(row.status, Status::NotUpdated);
        assert_eq!(row.comment, "");
        assert_eq!(row.last_updated, "");
        assert!(!row.is_long_term);
    }

    #[test]
    fn blank_names_are_not_valid_members() {
        assert!(!RosterRow::new("").is_valid_member());
        assert!(!RosterRow::new("   ").is_valid_member());
        assert!(!RosterRow::new("\t\n").is_valid_member());
        assert!(RosterRow::new("Tony").is_valid_member());
    }

    #[test]
    fn clear_resets_only_daily_fields() {
        let mut row = RosterRow {
            name: "Ting".to_string(),
            team: "Platform".to_string(),
            status: Status::Wfh,
            comment: "waiting for delivery".to_string(),
            last_updated: "2025-03-10 08:12".to_string(),
            is_long_term: true,
        };

        row.clear();

        assert_eq!(row.status, Status::NotUpdated);
        assert_eq!(row.comment, "");
        assert_eq!(row.last_updated, "");
        // Identity and grouping survive a clear
        assert_eq!(row.name, "Ting");
        assert_eq!(row.team, "Platform");
        assert!(row.is_long_term);
    }
}
