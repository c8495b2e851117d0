//! # aula-auth
//!
//! Bearer-credential verification for the Aula presence service.
//!
//! The LMS issues HS256 JWTs at login; this crate only **verifies** them.
//! Tokens arrive either in an `Authorization: Bearer ...` header or in the
//! auth cookie, and verify to a [`aula_core::UserIdentity`] snapshot.
//!
//! Verification failure is not always an error: registration tracks
//! connections anonymously when the credential is absent or invalid, while
//! privileged routes refuse the request.

#![deny(unsafe_code)]

pub mod errors;
pub mod token;

pub use errors::AuthError;
pub use token::{Claims, TokenVerifier, bearer_from_cookie, bearer_from_headers};
