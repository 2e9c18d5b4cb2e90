use async_trait::async_trait;

use super::UpstreamResult;

/// Identity provider port (user pool administration).
///
/// `username` is the identity id stored on the core user. A missing account
/// must be reported as `UpstreamError::NotFound` so callers can tell it apart
/// from other failures.
#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    async fn delete_user(&self, username: &str) -> UpstreamResult<()>;

    /// Replaces the email attribute and marks it verified.
    async fn update_email(&self, username: &str, email: &str) -> UpstreamResult<()>;
}
