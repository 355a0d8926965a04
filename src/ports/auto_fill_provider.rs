//! Auto-fill provider port.
//!
//! Supplies known values about a student, only with explicit consent.

use async_trait::async_trait;

use crate::domain::form::{FieldValues, FormIdentifier};
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AutoFillProvider: Send + Sync {
    /// Values for fields that are blank in `existing`.
    ///
    /// Must return an empty map when `consent_given` is false or the
    /// subject is unknown.
    async fn auto_fill(
        &self,
        form: &FormIdentifier,
        subject_id: &str,
        consent_given: bool,
        existing: &FieldValues,
    ) -> Result<FieldValues, DomainError>;
}
