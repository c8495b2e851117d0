//! User identity snapshot types.
//!
//! A tracked connection is either anonymous or carries a [`UserIdentity`]
//! captured from the caller's credential at registration time. The identity
//! is a denormalized snapshot: it reflects the user at the last upsert and is
//! not refreshed independently of the owning record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of an authenticated LMS user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Enrolled student.
    Student,
    /// Course instructor.
    Instructor,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Whether this role may perform privileged bulk operations.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Instructor => write!(f, "instructor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Identity snapshot of an authenticated user.
///
/// "Anonymous vs identified" is modeled as `Option<UserIdentity>` on the
/// connection record rather than independently-nullable fields, so the two
/// states cannot drift apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Numeric user ID from the LMS user table.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Display name at the time of capture.
    pub name: String,
    /// Email at the time of capture.
    pub email: String,
    /// Role at the time of capture.
    pub role: UserRole,
}
