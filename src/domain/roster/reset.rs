use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// Decides whether the automatic daily reset fires for this evaluation
///
/// The transition is evaluated at the start of every board read and fires
/// when all three gates hold:
/// - the local time has reached the configured cutoff,
/// - the checkpoint does not already record today,
/// - the board has at least one valid member.
///
/// Once fired, the caller persists today's date as the new checkpoint, so a
/// second evaluation on the same day is a no-op and the checkpoint advances
/// at most once per calendar day.
pub fn daily_reset_due(
    last_reset: Option<NaiveDate>,
    now: DateTime<Tz>,
    cutoff: NaiveTime,
    board_empty: bool,
) -> bool {
    if board_empty {
        return false;
    }
    if now.time() < cutoff {
        return false;
    }
    last_reset != Some(now.date_naive())
}
