use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

use super::events::{ResetScope, RosterEvent};
use super::row::RosterRow;
use super::value_objects::Status;

/// Format of every `last_updated` cell
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Errors produced by board operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("unknown member: {0}")]
    UnknownMember(String),
}

/// A member's status submission
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub name: String,
    pub status: Status,
    pub comment: Option<String>,
    /// Used only to backfill a row whose team is still empty
    pub team: Option<String>,
    pub is_long_term: bool,
}

/// The availability board, a transient in-memory copy of the roster store
///
/// Owns the state-transition rules between one `load` and the next `save`.
/// Rows with blank names are not valid members and are dropped on
/// construction, so they never appear in any view or survive a write-back.
///
/// # Invariants
/// - Every row has a non-blank name
/// - No reset ever touches a row with `is_long_term` set
/// - Row order is store order; nothing here re-sorts
#[derive(Debug, Clone)]
pub struct Board {
    rows: Vec<RosterRow>,
}

impl Board {
    /// Builds a board from rows read out of the store
    pub fn new(rows: Vec<RosterRow>) -> Self {
        Self {
            rows: rows.into_iter().filter(RosterRow::is_valid_member).collect(),
        }
    }

    /// All valid member rows, in store order
    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a member by exact name
    pub fn find(&self, name: &str) -> Option<&RosterRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Distinct non-empty team labels, in store order
    pub fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.team.is_empty() && !teams.contains(&row.team) {
                teams.push(row.team.clone());
            }
        }
        teams
    }

    /// View projection: rows whose team equals the selection, store order
    ///
    /// A selection matching nothing yields an empty slice of rows; the
    /// projection never mutates anything.
    pub fn rows_for_team(&self, team: &str) -> Vec<&RosterRow> {
        self.rows.iter().filter(|r| r.team == team).collect()
    }

    /// Applies a member's status submission
    ///
    /// Sets status, comment, the long-term flag and a fresh `last_updated`
    /// timestamp in the board time zone. The submitted team label only
    /// backfills a row whose team is still empty; it never overwrites an
    /// existing grouping.
    ///
    /// Fails with `UnknownMember` (leaving every row untouched) when the
    /// name matches no row.
    pub fn update_status(
        &mut self,
        update: StatusUpdate,
        now: DateTime<Tz>,
    ) -> Result<RosterEvent, BoardError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.name == update.name)
            .ok_or_else(|| BoardError::UnknownMember(update.name.clone()))?;

        row.status = update.status;
        row.comment = update.comment.unwrap_or_default();
        row.is_long_term = update.is_long_term;
        row.last_updated = now.format(TIMESTAMP_FORMAT).to_string();
        if row.team.is_empty() {
            if let Some(team) = update.team {
                row.team = team;
            }
        }

        Ok(RosterEvent::StatusUpdated {
            name: update.name,
            status: update.status,
        })
    }

    /// Clears every eligible row back to its defaults
    ///
    /// `team = None` applies to the whole board. Rows with `is_long_term`
    /// set are never modified, whatever the scope.
    pub fn reset(&mut self, team: Option<&str>) -> RosterEvent {
        let mut cleared = 0;
        for row in &mut self.rows {
            if row.is_long_term {
                continue;
            }
            if let Some(team) = team {
                if row.team != team {
                    continue;
                }
            }
            row.clear();
            cleared += 1;
        }

        RosterEvent::BoardReset {
            scope: match team {
                Some(t) => ResetScope::Team(t.to_string()),
                None => ResetScope::All,
            },
            cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stockholm_noon() -> DateTime<Tz> {
        chrono_tz::Europe::Stockholm
            .with_ymd_and_hms(2025, 3, 10, 12, 30, 0)
            .unwrap()
    }

    fn member(name: &str, team: &str) -> RosterRow {
        RosterRow {
            team: team.to_string(),
            ..RosterRow::new(name)
        }
    }

    fn submission(name: &str, status: Status) -> StatusUpdate {
        StatusUpdate {
            name: name.to_string(),
            status,
            comment: None,
            team: None,
            is_long_term: false,
        }
    }

    #[test]
    fn blank_name_rows_are_dropped() {
        let board = Board::new(vec![
            member("Anna", "X"),
            member("", "X"),
            member("   ", "Y"),
            member("Tony", ""),
        ]);

        let names: Vec<&str> = board.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Tony"]);
    }

    #[test]
    fn update_sets_all_submitted_fields() {
        let mut board = Board::new(vec![member("Anna", "X")]);

        let event = board
            .update_status(
                StatusUpdate {
                    name: "Anna".to_string(),
                    status: Status::Wfh,
                    comment: Some("home".to_string()),
                    team: None,
                    is_long_term: false,
                },
                stockholm_noon(),
            )
            .unwrap();

        assert_eq!(
            event,
            RosterEvent::StatusUpdated {
                name: "Anna".to_string(),
                status: Status::Wfh,
            }
        );

        let row = board.find("Anna").unwrap();
        assert_eq!(row.status, Status::Wfh);
        assert_eq!(row.comment, "home");
        assert_eq!(row.last_updated, "2025-03-10 12:30");
    }

    #[test]
    fn update_unknown_member_fails_and_mutates_nothing() {
        let mut board = Board::new(vec![member("Anna", "X")]);
        let before = board.rows().to_vec();

        let err = board
            .update_status(submission("Nobody", Status::Office), stockholm_noon())
            .unwrap_err();

        assert!(matches!(err, BoardError::UnknownMember(name) if name == "Nobody"));
        assert_eq!(board.rows(), before.as_slice());
    }

    #[test]
    fn update_is_idempotent_apart_from_timestamp() {
        let mut board = Board::new(vec![member("Anna", "X")]);
        let update = StatusUpdate {
            name: "Anna".to_string(),
            status: Status::Sick,
            comment: Some("mild fever".to_string()),
            team: None,
            is_long_term: false,
        };

        board.update_status(update.clone(), stockholm_noon()).unwrap();
        let first = board.find("Anna").unwrap().clone();

        board.update_status(update, stockholm_noon()).unwrap();
        let second = board.find("Anna").unwrap().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn update_backfills_only_empty_team() {
        let mut board = Board::new(vec![member("Anna", ""), member("Tony", "Platform")]);

        let mut update = submission("Anna", Status::Office);
        update.team = Some("Radio".to_string());
        board.update_status(update, stockholm_noon()).unwrap();
        assert_eq!(board.find("Anna").unwrap().team, "Radio");

        let mut update = submission("Tony", Status::Office);
        update.team = Some("Radio".to_string());
        board.update_status(update, stockholm_noon()).unwrap();
        // Existing grouping is never overwritten
        assert_eq!(board.find("Tony").unwrap().team, "Platform");
    }

    #[test]
    fn update_can_mark_member_long_term() {
        let mut board = Board::new(vec![member("Anna", "X")]);

        let mut update = submission("Anna", Status::Vacation);
        update.is_long_term = true;
        board.update_status(update, stockholm_noon()).unwrap();

        assert!(board.find("Anna").unwrap().is_long_term);
    }

    #[test]
    fn reset_clears_eligible_rows_only() {
        let mut updated = member("Anna", "X");
        updated.status = Status::Office;
        updated.comment = "early".to_string();
        updated.last_updated = "2025-03-10 08:00".to_string();

        let mut protected = member("Bo", "X");
        protected.status = Status::Vacation;
        protected.comment = "parental leave".to_string();
        protected.last_updated = "2025-02-01 09:00".to_string();
        protected.is_long_term = true;

        let mut board = Board::new(vec![updated, protected.clone()]);
        let event = board.reset(None);

        assert_eq!(
            event,
            RosterEvent::BoardReset {
                scope: ResetScope::All,
                cleared: 1,
            }
        );

        let anna = board.find("Anna").unwrap();
        assert_eq!(anna.status, Status::NotUpdated);
        assert_eq!(anna.comment, "");
        assert_eq!(anna.last_updated, "");

        // Long-term row is byte-for-byte unchanged
        assert_eq!(board.find("Bo").unwrap(), &protected);
    }

    #[test]
    fn reset_with_team_filter_spares_other_teams() {
        let mut a = member("Anna", "X");
        a.status = Status::Office;
        let mut b = member("Tony", "Y");
        b.status = Status::Wfh;

        let mut board = Board::new(vec![a, b]);
        let event = board.reset(Some("X"));

        assert_eq!(
            event,
            RosterEvent::BoardReset {
                scope: ResetScope::Team("X".to_string()),
                cleared: 1,
            }
        );
        assert_eq!(board.find("Anna").unwrap().status, Status::NotUpdated);
        assert_eq!(board.find("Tony").unwrap().status, Status::Wfh);
    }

    #[test]
    fn teams_are_distinct_in_store_order() {
        let board = Board::new(vec![
            member("Anna", "Radio"),
            member("Tony", "Platform"),
            member("Ting", "Radio"),
            member("Bo", ""),
        ]);

        assert_eq!(board.teams(), vec!["Radio", "Platform"]);
    }

    #[test]
    fn no_teams_means_empty_list() {
        let board = Board::new(vec![member("Anna", ""), member("Tony", "")]);
        assert!(board.teams().is_empty());
    }

    #[test]
    fn unmatched_team_filter_yields_zero_rows() {
        let board = Board::new(vec![member("Anna", "X")]);
        assert!(board.rows_for_team("does-not-exist").is_empty());
    }

    #[test]
    fn team_filter_keeps_store_order() {
        let board = Board::new(vec![
            member("Anna", "X"),
            member("Tony", "Y"),
            member("Ting", "X"),
        ]);

        let names: Vec<&str> = board
            .rows_for_team("X")
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Anna", "Ting"]);
    }

    #[test]
    fn manager_reset_then_update_scenario() {
        // Store: A not updated, B in office and long-term, both team X
        let a = member("A", "X");
        let mut b = member("B", "X");
        b.status = Status::Office;
        b.is_long_term = true;
        let b_before = b.clone();

        let mut board = Board::new(vec![a, b]);

        board.reset(Some("X"));
        assert_eq!(board.find("A").unwrap().status, Status::NotUpdated);
        assert_eq!(board.find("B").unwrap(), &b_before);

        let mut update = submission("A", Status::Wfh);
        update.comment = Some("home".to_string());
        board.update_status(update, stockholm_noon()).unwrap();

        let a = board.find("A").unwrap();
        assert_eq!(a.status, Status::Wfh);
        assert_eq!(a.comment, "home");
        assert!(!a.last_updated.is_empty());
    }
}
