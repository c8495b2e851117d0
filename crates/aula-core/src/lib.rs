//! # aula-core
//!
//! Foundation types for the Aula presence service:
//!
//! - [`UserRole`] / [`UserIdentity`]: the optional identity snapshot attached
//!   to a tracked connection
//! - [`ApiError`]: API-facing error type with machine-readable codes

#![deny(unsafe_code)]

pub mod errors;
pub mod identity;

pub use errors::ApiError;
pub use identity::{UserIdentity, UserRole};
