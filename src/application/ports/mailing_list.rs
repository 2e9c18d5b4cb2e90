use async_trait::async_trait;

use super::UpstreamResult;

/// Email-marketing subscriber list.
#[async_trait]
pub trait MailingListPort: Send + Sync {
    async fn unsubscribe(&self, email: &str) -> UpstreamResult<()>;
}
