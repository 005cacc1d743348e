//! `CreateInvalidation` output shapes.

use chrono::{DateTime, Utc};

use crate::input::InvalidationBatch;

/// Status CloudFront reports while an invalidation is running.
pub const STATUS_IN_PROGRESS: &str = "InProgress";

/// Status CloudFront reports once an invalidation has finished.
pub const STATUS_COMPLETED: &str = "Completed";

/// An invalidation as echoed back by the service.
///
/// Every member is optional: a member missing from the response body, or one
/// that could not be read, is left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    /// Invalidation identifier, e.g. `I2J0I21PCUYOIK`.
    pub id: Option<String>,
    /// `InProgress` or `Completed`.
    pub status: Option<String>,
    /// When the invalidation was created.
    pub create_time: Option<DateTime<Utc>>,
    /// The batch as the service recorded it.
    pub invalidation_batch: Option<InvalidationBatch>,
}

impl Invalidation {
    /// Whether the service reported the invalidation as finished.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some(STATUS_COMPLETED)
    }
}
