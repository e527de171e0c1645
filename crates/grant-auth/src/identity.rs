//! Identity resolver seam.

use async_trait::async_trait;

use crate::error::AuthResult;

/// Maps an opaque access token to the identity of its holder.
///
/// Implementations return [`AuthError::Unauthenticated`](crate::AuthError::Unauthenticated)
/// when the token does not resolve to any user.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve an access token to a user ID.
    async fn resolve(&self, access_token: &str) -> AuthResult<String>;
}
