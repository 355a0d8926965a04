//! Deadline provider port.
//!
//! Submission deadlines are informational; they never block a turn.

use async_trait::async_trait;
use std::fmt;

use crate::domain::form::FormIdentifier;
use crate::domain::foundation::Timestamp;

/// Where a deadline stands relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Passed { days_ago: i64 },
    Today,
    Soon { days: i64, deadline: Timestamp },
    Upcoming { days: i64, deadline: Timestamp },
}

/// Deadlines at most this many days out are reported as "soon".
pub const SOON_THRESHOLD_DAYS: i64 = 7;

impl DeadlineStatus {
    pub fn evaluate(deadline: Timestamp, now: Timestamp) -> Self {
        let days = deadline.days_until_ceil(&now);
        if days < 0 {
            DeadlineStatus::Passed { days_ago: -days }
        } else if days == 0 {
            DeadlineStatus::Today
        } else if days <= SOON_THRESHOLD_DAYS {
            DeadlineStatus::Soon { days, deadline }
        } else {
            DeadlineStatus::Upcoming { days, deadline }
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineStatus::Passed { days_ago } => {
                write!(f, "Deadline passed ({} days ago)", days_ago)
            }
            DeadlineStatus::Today => write!(f, "Deadline is TODAY!"),
            DeadlineStatus::Soon { days, deadline } => {
                write!(f, "Deadline in {} days ({})", days, deadline.date_string())
            }
            DeadlineStatus::Upcoming { days, deadline } => write!(
                f,
                "Deadline: {} ({} days remaining)",
                deadline.date_string(),
                days
            ),
        }
    }
}

#[async_trait]
pub trait DeadlineProvider: Send + Sync {
    /// Submission deadline for a form, if one is set.
    async fn deadline(&self, form: &FormIdentifier) -> Option<Timestamp>;

    /// True if the deadline is between now and `days_ahead` days out.
    async fn warning(&self, form: &FormIdentifier, days_ahead: u32) -> bool;

    /// True once the deadline instant is behind us, even on the same day.
    async fn is_passed(&self, form: &FormIdentifier) -> bool;

    /// Human-readable status line, if a deadline is set.
    async fn status(&self, form: &FormIdentifier) -> Option<DeadlineStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn deadline_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn DeadlineProvider) {}
    }

    #[test]
    fn status_lines_follow_distance() {
        let now = at("2026-04-01T09:00:00Z");

        let passed = DeadlineStatus::evaluate(at("2026-03-29T09:00:00Z"), now);
        assert_eq!(passed.to_string(), "Deadline passed (3 days ago)");

        let today = DeadlineStatus::evaluate(at("2026-04-01T08:00:00Z"), now);
        assert_eq!(today.to_string(), "Deadline is TODAY!");

        let soon = DeadlineStatus::evaluate(at("2026-04-04T09:00:00Z"), now);
        assert_eq!(soon.to_string(), "Deadline in 3 days (2026-04-04)");

        let later = DeadlineStatus::evaluate(at("2026-05-01T09:00:00Z"), now);
        assert_eq!(later.to_string(), "Deadline: 2026-05-01 (30 days remaining)");
    }
}
