//! `CreateInvalidation` input types.
//!
//! Callers either build a [`CreateInvalidationInput`] directly or hand over a
//! loose JSON map using the service's member names. Both go through
//! [`CreateInvalidationInput::create`], which produces one validated value.

use cfpurge_core::AwsRegion;
use serde::Deserialize;

use crate::error::ValidationError;

/// The paths to invalidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paths {
    /// Declared number of paths. Sent as-is; the service rejects a value that
    /// disagrees with `items` as `InconsistentQuantities`.
    pub quantity: i32,
    /// Path patterns, e.g. `/images/*`.
    pub items: Vec<String>,
}

impl Paths {
    /// Create a path list whose quantity matches its length.
    #[must_use]
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        Self {
            quantity: i32::try_from(items.len()).unwrap_or(i32::MAX),
            items,
        }
    }
}

/// A batch of paths plus the idempotency token that scopes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationBatch {
    /// Paths to invalidate.
    pub paths: Paths,
    /// Unique per logical batch. Resending the same reference with the same
    /// paths is treated by the service as a retry of the same request.
    pub caller_reference: String,
}

impl InvalidationBatch {
    /// Create a batch.
    #[must_use]
    pub fn new<I, S>(caller_reference: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: Paths::new(paths),
            caller_reference: caller_reference.into(),
        }
    }

    /// Check the batch invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.caller_reference.is_empty() {
            return Err(ValidationError::EmptyField("InvalidationBatch.CallerReference"));
        }
        if let Some(index) = self.paths.items.iter().position(String::is_empty) {
            return Err(ValidationError::EmptyPath { index });
        }
        Ok(())
    }
}

/// Input for `CreateInvalidation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvalidationInput {
    /// The distribution to invalidate.
    pub distribution_id: String,
    /// The batch to submit.
    pub invalidation_batch: InvalidationBatch,
    /// Region override. `None` means the configured default applies.
    pub region: Option<AwsRegion>,
}

/// Either shape accepted by [`CreateInvalidationInput::create`].
#[derive(Debug, Clone)]
pub enum InputSource {
    /// A typed input.
    Typed(CreateInvalidationInput),
    /// A loose map keyed by the service's member names.
    Loose(serde_json::Value),
}

impl From<CreateInvalidationInput> for InputSource {
    fn from(input: CreateInvalidationInput) -> Self {
        Self::Typed(input)
    }
}

impl From<serde_json::Value> for InputSource {
    fn from(value: serde_json::Value) -> Self {
        Self::Loose(value)
    }
}

impl CreateInvalidationInput {
    /// Create an input without validating it; see [`Self::validate`].
    #[must_use]
    pub fn new(distribution_id: impl Into<String>, invalidation_batch: InvalidationBatch) -> Self {
        Self {
            distribution_id: distribution_id.into(),
            invalidation_batch,
            region: None,
        }
    }

    /// Set the region override.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<AwsRegion>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Normalize either input shape into a validated input.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfpurge_model::CreateInvalidationInput;
    ///
    /// let input = CreateInvalidationInput::create(serde_json::json!({
    ///     "DistributionId": "EDFDVBD6EXAMPLE",
    ///     "InvalidationBatch": {
    ///         "Paths": { "Quantity": 1, "Items": ["/index.html"] },
    ///         "CallerReference": "deploy-42"
    ///     }
    /// }))
    /// .unwrap();
    /// assert_eq!(input.invalidation_batch.paths.items, ["/index.html"]);
    /// ```
    pub fn create(source: impl Into<InputSource>) -> Result<Self, ValidationError> {
        let input = match source.into() {
            InputSource::Typed(input) => input,
            InputSource::Loose(value) => Self::from_value(value)?,
        };
        input.validate()?;
        Ok(input)
    }

    /// Check that the required members are present and non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.distribution_id.is_empty() {
            return Err(ValidationError::EmptyField("DistributionId"));
        }
        self.invalidation_batch.validate()
    }

    /// Read a loose map keyed by the service's member names.
    ///
    /// Missing members are reported; values are not validated, see
    /// [`Self::create`] for the validating entry point.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        let loose: LooseInput =
            serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;

        let distribution_id = loose
            .distribution_id
            .ok_or(ValidationError::MissingField("DistributionId"))?;
        let batch = loose
            .invalidation_batch
            .ok_or(ValidationError::MissingField("InvalidationBatch"))?;
        let paths = batch
            .paths
            .ok_or(ValidationError::MissingField("InvalidationBatch.Paths"))?;
        let caller_reference = batch
            .caller_reference
            .ok_or(ValidationError::MissingField("InvalidationBatch.CallerReference"))?;

        let items = paths.items.unwrap_or_default();
        let quantity = match paths.quantity {
            Some(q) => q,
            None => i32::try_from(items.len()).unwrap_or(i32::MAX),
        };

        Ok(Self {
            distribution_id,
            invalidation_batch: InvalidationBatch {
                paths: Paths { quantity, items },
                caller_reference,
            },
            region: loose.region.map(AwsRegion::new),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LooseInput {
    distribution_id: Option<String>,
    invalidation_batch: Option<LooseBatch>,
    #[serde(rename = "@region")]
    region: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LooseBatch {
    paths: Option<LoosePaths>,
    caller_reference: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoosePaths {
    quantity: Option<i32>,
    items: Option<Vec<String>>,
}
