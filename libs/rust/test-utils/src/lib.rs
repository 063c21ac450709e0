//! Shared test utilities for the Secrets Manager SDK.
//!
//! This crate provides:
//! - Proptest generators for the polymorphic resource families
//! - Canned response bodies shaped like the service's
//! - Wiremock helpers that answer like a Secrets Manager instance

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
