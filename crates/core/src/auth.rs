//! Identity service wire types.
//!
//! Request and response payloads for the remote identity endpoints
//! (`POST /auth/signin`, `POST /auth/signup`). The service speaks
//! camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// An authenticated storefront user.
///
/// Identity snapshot as returned by the identity service. The session
/// manager persists this verbatim so the session can be restored across
/// process restarts without a network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// User's email address.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Service-assigned role (e.g., `ROLE_USER`).
    pub role: String,
}

impl User {
    /// Full display name, `"First Last"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Credentials for `POST /auth/signin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration payload for `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: Email,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Successful signin response: bearer token plus identity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    /// Opaque bearer credential.
    pub token: String,
    /// Token scheme, always `"Bearer"`.
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl JwtResponse {
    /// Extract the identity snapshot, discarding the token.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
        }
    }
}

/// Generic `{ message }` response body (signup confirmation, errors).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
