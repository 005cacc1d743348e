//! Core types, endpoint resolution, and configuration for cfpurge.
//!
//! This crate holds the pieces shared by the model, codec and client crates:
//! the [`AwsRegion`] identifier, the process-wide CloudFront endpoint table
//! consulted by [`resolve`], and [`ClientConfig`].

mod config;
pub mod endpoint;
mod types;

pub use config::{ClientConfig, DEFAULT_USER_AGENT};
pub use endpoint::{EndpointInfo, SignatureVersion, resolve};
pub use types::AwsRegion;
