//! Identity endpoint wrappers.

use tracing::instrument;

use shopfront_core::auth::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Exchange credentials for a bearer token and identity snapshot.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn signin(&self, credentials: &LoginRequest) -> Result<JwtResponse, ApiError> {
        self.post_json("/auth/signin", credentials, false).await
    }

    /// Register a new account. The caller must still sign in afterwards.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn signup(&self, new_user: &SignupRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/auth/signup", new_user, false).await
    }
}
