use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability status of a team member for the current day
///
/// Stored as its canonical label. Text read back from the store is matched
/// against the canonical labels only; anything unrecognized normalizes to
/// `NotUpdated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Member has not reported anything today
    #[default]
    #[serde(rename = "Not Updated")]
    NotUpdated,
    /// Working from the office
    Office,
    /// Working from home
    #[serde(rename = "WFH")]
    Wfh,
    /// Sick or otherwise away
    Sick,
    /// Attending a workshop
    Workshop,
    /// On vacation
    Vacation,
}

impl Status {
    /// All statuses a member can choose from, in display order
    pub const ALL: [Status; 6] = [
        Status::NotUpdated,
        Status::Office,
        Status::Wfh,
        Status::Sick,
        Status::Workshop,
        Status::Vacation,
    ];

    /// Parses status text coming back from the store
    ///
    /// Matching is exact against the canonical labels (modulo surrounding
    /// whitespace and ASCII case). Unrecognized or empty text yields
    /// `NotUpdated`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Status::ALL
            .into_iter()
            .find(|s| raw.eq_ignore_ascii_case(s.as_str()))
            .unwrap_or(Status::NotUpdated)
    }

    /// Returns the canonical label used in storage and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotUpdated => "Not Updated",
            Status::Office => "Office",
            Status::Wfh => "WFH",
            Status::Sick => "Sick",
            Status::Workshop => "Workshop",
            Status::Vacation => "Vacation",
        }
    }

    /// Background color the dashboard paints this status with
    ///
    /// `None` means the row is left unstyled (only `NotUpdated`).
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Status::NotUpdated => None,
            Status::Office => Some("#cff4fc"),
            Status::Wfh => Some("#d1e7dd"),
            Status::Sick => Some("#f8d7da"),
            Status::Workshop => Some("#fff3cd"),
            Status::Vacation => Some("#e2d9f3"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
