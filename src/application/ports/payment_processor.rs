use async_trait::async_trait;

use super::UpstreamResult;

/// How the processor answered a cancel command that it accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    AlreadyCancelled,
}

/// Payment/membership processor port.
#[async_trait]
pub trait PaymentProcessorPort: Send + Sync {
    /// Cancels the membership billed under `member_id` (the membership's
    /// external payment-method key).
    async fn cancel_membership(&self, member_id: &str) -> UpstreamResult<CancelOutcome>;

    /// Signed signup link for an existing core user. Pure; no request is made.
    fn join_link(&self, user_id: &str, email: &str) -> UpstreamResult<String>;
}
