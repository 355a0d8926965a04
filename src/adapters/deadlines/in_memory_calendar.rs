//! Per-form deadline calendar.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::form::FormIdentifier;
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::ports::{DeadlineProvider, DeadlineStatus};

/// Parses a configured deadline, either RFC 3339 or a bare `YYYY-MM-DD`
/// date taken as midnight UTC.
pub fn parse_deadline(raw: &str) -> Result<Timestamp, ValidationError> {
    let raw = raw.trim();
    if let Some(ts) = Timestamp::parse_rfc3339(raw) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Timestamp::from_datetime(Utc.from_utc_datetime(&dt)))
        .ok_or_else(|| ValidationError::invalid_format("deadline", format!("'{}' is not a date", raw)))
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDeadlineCalendar {
    deadlines: Arc<RwLock<HashMap<FormIdentifier, Timestamp>>>,
}

impl InMemoryDeadlineCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadlines<I>(deadlines: I) -> Self
    where
        I: IntoIterator<Item = (FormIdentifier, Timestamp)>,
    {
        Self {
            deadlines: Arc::new(RwLock::new(deadlines.into_iter().collect())),
        }
    }

    pub async fn set_deadline(&self, form: FormIdentifier, deadline: Timestamp) {
        self.deadlines.write().await.insert(form, deadline);
    }

    pub async fn clear_deadline(&self, form: &FormIdentifier) -> bool {
        self.deadlines.write().await.remove(form).is_some()
    }

    async fn days_until(&self, form: &FormIdentifier) -> Option<i64> {
        self.deadline(form)
            .await
            .map(|d| d.days_until_ceil(&Timestamp::now()))
    }
}

#[async_trait]
impl DeadlineProvider for InMemoryDeadlineCalendar {
    async fn deadline(&self, form: &FormIdentifier) -> Option<Timestamp> {
        self.deadlines.read().await.get(form).copied()
    }

    async fn warning(&self, form: &FormIdentifier, days_ahead: u32) -> bool {
        matches!(self.days_until(form).await, Some(days) if (0..=i64::from(days_ahead)).contains(&days))
    }

    async fn is_passed(&self, form: &FormIdentifier) -> bool {
        matches!(self.deadline(form).await, Some(deadline) if Timestamp::now() > deadline)
    }

    async fn status(&self, form: &FormIdentifier) -> Option<DeadlineStatus> {
        self.deadline(form)
            .await
            .map(|d| DeadlineStatus::evaluate(d, Timestamp::now()))
    }
}
