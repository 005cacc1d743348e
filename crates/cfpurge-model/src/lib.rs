//! Input, output, and error types for CloudFront `CreateInvalidation`.
//!
//! - [`input`] holds [`CreateInvalidationInput`] and the [`InvalidationBatch`]
//!   it carries, together with normalization of loose JSON-shaped input.
//! - [`output`] holds the decoded [`Invalidation`] shape.
//! - [`error`] holds the service error codes and the local validation error.

pub mod error;
pub mod input;
pub mod output;

pub use error::{CloudFrontErrorCode, ServiceError, ValidationError};
pub use input::{CreateInvalidationInput, InputSource, InvalidationBatch, Paths};
pub use output::Invalidation;
