//! CloudFront XML serialization/deserialization for cfpurge.
//!
//! CloudFront speaks the RestXml protocol. This crate converts between the
//! model types and that wire format.
//!
//! # Key components
//!
//! - [`XmlSerialize`] and [`to_xml`] for writing request bodies
//! - [`XmlDeserialize`] and [`from_xml`] for reading response bodies, plus the
//!   tolerant [`decode_invalidation`]
//! - [`parse_error_envelope`] for reading error bodies in either envelope shape
//!
//! # CloudFront XML conventions
//!
//! - Namespace: `http://cloudfront.amazonaws.com/doc/2019-03-26/`
//! - Lists: a `Quantity` sibling next to an `Items` wrapper
//! - Timestamps: ISO 8601 (`2019-03-26T16:45:09.123Z`)
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`

pub mod deserialize;
pub mod envelope;
pub mod error;
pub mod serialize;

pub use deserialize::{XmlDeserialize, decode_invalidation, from_xml};
pub use envelope::{ErrorEnvelope, parse_error_envelope};
pub use error::XmlError;
pub use serialize::{CLOUDFRONT_NAMESPACE, XmlSerialize, to_xml};
