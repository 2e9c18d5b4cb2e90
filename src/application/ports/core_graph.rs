use async_trait::async_trait;

use super::UpstreamResult;
use crate::domain::entities::{
    customer::{CustomerFilter, CustomerPage, ProfileUpdate},
    user::User,
};

/// Row counts reported by the cascading delete, one per erased collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErasureCounts {
    pub users: u64,
    pub subscribers: u64,
    pub memberships: u64,
    pub profiles: u64,
    pub devices: u64,
    pub notifications: u64,
}

/// Core graph service port - the authoritative store of profiles, users,
/// memberships, subscribers and devices.
///
/// Every call must observe fresh state; implementations must not cache.
#[async_trait]
pub trait CoreGraphPort: Send + Sync {
    /// Active profiles matching `filter`, windowed by `skip`/`take`.
    async fn find_profiles(
        &self,
        filter: &CustomerFilter,
        skip: u32,
        take: u32,
    ) -> UpstreamResult<CustomerPage>;

    /// The user with its identity id, profile summary, subscriber link and
    /// recent membership. `None` when the graph has no such user.
    async fn get_user(&self, user_id: &str) -> UpstreamResult<Option<User>>;

    /// Sets the account email on the user's profile.
    async fn update_account_email(&self, user_id: &str, email: &str) -> UpstreamResult<()>;

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> UpstreamResult<()>;

    async fn set_user_deactivated(&self, user_id: &str, deactivated: bool) -> UpstreamResult<()>;

    /// Deletes the user and everything hanging off it in one request. The
    /// graph does not cascade on its own, so every collection is named.
    async fn erase_user(&self, user_id: &str) -> UpstreamResult<ErasureCounts>;
}
