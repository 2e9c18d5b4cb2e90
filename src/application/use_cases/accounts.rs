use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        action_result::{ActionResult, SearchResult},
        ports::{
            CoreGraphPort, IdentityProviderPort, MailingListPort, PaymentProcessorPort,
            payment_processor::CancelOutcome,
        },
        validators::is_valid_email,
    },
    domain::entities::{
        customer::{CustomerFilter, ProfileUpdate},
        user::User,
    },
};

/// Fixed page size of the customer search.
pub const PAGE_SIZE: u32 = 10;

/// Zero-based window offset for a 1-based page. Pages below 1 read as 1.
pub fn page_to_skip(page: Option<u32>) -> u32 {
    let page = page.unwrap_or(1).max(1);
    (page - 1).saturating_mul(PAGE_SIZE)
}

fn core_user_not_found(user_id: &str) -> ActionResult {
    ActionResult::failed(format!("Core User Not Found: {user_id}"))
}

/// Account lifecycle operations behind the admin dashboard.
///
/// Each operation is one sequential chain of calls into the four systems of
/// record. Nothing is retried and nothing is rolled back: a step either gates
/// the next one or is explicitly best-effort.
#[derive(Clone)]
pub struct AccountUseCases {
    core: Arc<dyn CoreGraphPort>,
    identity: Arc<dyn IdentityProviderPort>,
    processor: Arc<dyn PaymentProcessorPort>,
    mailing_list: Arc<dyn MailingListPort>,
}

impl AccountUseCases {
    pub fn new(
        core: Arc<dyn CoreGraphPort>,
        identity: Arc<dyn IdentityProviderPort>,
        processor: Arc<dyn PaymentProcessorPort>,
        mailing_list: Arc<dyn MailingListPort>,
    ) -> Self {
        Self {
            core,
            identity,
            processor,
            mailing_list,
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Active customers matching `filter`. Never fails: any upstream problem
    /// degrades to an empty result.
    #[instrument(skip(self))]
    pub async fn search_users(&self, filter: CustomerFilter, page: Option<u32>) -> SearchResult {
        let skip = page_to_skip(page);
        match self
            .core
            .find_profiles(&filter.normalized(), skip, PAGE_SIZE)
            .await
        {
            Ok(page) => SearchResult {
                customers: Some(page.customers),
                total: page.total,
            },
            Err(err) => {
                error!(error = %err, "Error fetching customers");
                SearchResult::empty()
            }
        }
    }

    // ========================================================================
    // Email change
    // ========================================================================

    /// Moves the account to `new_email` at the identity provider first and
    /// then in the core graph.
    ///
    /// The two writes are not atomic. If the core graph update fails after
    /// the identity provider accepted the change, the systems stay diverged
    /// until someone repeats the action.
    #[instrument(skip(self))]
    pub async fn update_user_email(&self, user_id: &str, new_email: &str) -> ActionResult {
        let new_email = new_email.trim();
        if !is_valid_email(new_email) {
            return ActionResult::failed("Invalid email address");
        }

        let user = match self.core.get_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return core_user_not_found(user_id),
            Err(err) => {
                error!(error = %err, "Error fetching user");
                return ActionResult::failed(err.to_string());
            }
        };

        let Some(identity_id) = user.identity_id() else {
            return ActionResult::failed("User has no identity provider account");
        };

        if let Err(err) = self.identity.update_email(identity_id, new_email).await {
            error!(error = %err, "Identity provider rejected email update");
            return ActionResult::failed(err.to_string());
        }

        match self.core.update_account_email(user_id, new_email).await {
            Ok(()) => {
                info!(user_id, "Email updated");
                ActionResult::ok("Email updated successfully")
            }
            Err(err) => {
                warn!(
                    user_id,
                    identity_id,
                    error = %err,
                    "Email changed at identity provider but not in core graph"
                );
                ActionResult::failed(err.to_string())
            }
        }
    }

    // ========================================================================
    // Profile editing
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> ActionResult {
        let result = self.core.update_profile(user_id, &update).await;
        if let Err(err) = &result {
            error!(error = %err, "Error updating profile");
        }
        ActionResult::from_upstream(result, "User Successfully Updated!")
    }

    #[instrument(skip(self))]
    pub async fn set_user_deactivated(&self, user_id: &str, deactivated: bool) -> ActionResult {
        let result = self.core.set_user_deactivated(user_id, deactivated).await;
        if let Err(err) = &result {
            error!(error = %err, "Error updating user");
        }
        ActionResult::from_upstream(result, "User Successfully Updated!")
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Cancels the customer's current membership at the processor. The core
    /// graph is not touched; the status change shows up once the processor
    /// syncs it back.
    #[instrument(skip(self))]
    pub async fn cancel_membership(&self, customer_id: &str) -> ActionResult {
        let user = match self.core.get_user(customer_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return core_user_not_found(customer_id),
            Err(err) => {
                error!(error = %err, "Error fetching user");
                return ActionResult::failed(err.to_string());
            }
        };

        self.cancel_recent_membership(&user).await
    }

    async fn cancel_recent_membership(&self, user: &User) -> ActionResult {
        let Some(member_id) = user
            .recent_membership
            .as_ref()
            .and_then(|m| m.external_key())
        else {
            return ActionResult::failed("No active membership to cancel");
        };

        match self.processor.cancel_membership(member_id).await {
            Ok(outcome) => {
                if outcome == CancelOutcome::AlreadyCancelled {
                    info!(user_id = %user.id, "Membership was already cancelled at processor");
                } else {
                    info!(user_id = %user.id, "Membership cancelled at processor");
                }
                ActionResult::ok("SUCCESS")
            }
            Err(err) => {
                error!(user_id = %user.id, error = %err, "Error cancelling processor membership");
                ActionResult::failed(err.to_string())
            }
        }
    }

    /// Signed processor signup link for the user.
    #[instrument(skip(self))]
    pub async fn membership_join_link(&self, user_id: &str) -> AppResult<String> {
        let user = self.core.get_user(user_id).await?.ok_or(AppError::NotFound)?;
        let email = user
            .email()
            .ok_or_else(|| AppError::InvalidInput("User has no email address".to_string()))?;
        Ok(self.processor.join_link(&user.id, email)?)
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Tears the account down across every system, in an order that never
    /// leaves a live billing subscription behind a deleted account:
    ///
    /// 1. fetch the user
    /// 2. unsubscribe from the mailing list (best-effort)
    /// 3. cancel the recent membership at the processor (gating)
    /// 4. delete the identity-provider account (gating, "not found" is fine)
    /// 5. erase the user's graph in one cascading request
    #[instrument(skip(self))]
    pub async fn delete_user(&self, customer_id: &str) -> ActionResult {
        let user = match self.core.get_user(customer_id).await {
            Ok(user) => user,
            Err(err) => {
                error!(error = %err, "Error fetching user");
                return ActionResult::failed(err.to_string());
            }
        };

        let Some(user) = user else {
            // Nothing left outside the graph; let the erase report what it finds.
            warn!(customer_id, "User missing from core graph, skipping external teardown");
            return self.erase_core_user(customer_id).await;
        };

        if let Some(email) = user.active_subscriber_email() {
            match self.mailing_list.unsubscribe(email).await {
                Ok(()) => info!(user_id = %user.id, "Unsubscribed from mailing list"),
                Err(err) => {
                    warn!(user_id = %user.id, error = %err, "Mailing list unsubscribe failed")
                }
            }
        }

        if user.recent_membership.is_some() {
            let cancelled = self.cancel_recent_membership(&user).await;
            if !cancelled.success {
                return cancelled;
            }
        }

        let mut erase_id = user.id.clone();
        if let Some(identity_id) = user.identity_id() {
            match self.identity.delete_user(identity_id).await {
                Ok(()) => info!(user_id = %user.id, "Identity provider account deleted"),
                Err(err) if err.is_not_found() => {
                    warn!(user_id = %user.id, error = %err, "Identity provider account already gone");
                    match self.core.get_user(customer_id).await {
                        Ok(Some(refetched)) => erase_id = refetched.id,
                        Ok(None) => {
                            warn!(customer_id, "User vanished from core graph before erase")
                        }
                        Err(err) => {
                            warn!(customer_id, error = %err, "Re-fetch failed, erasing by original id")
                        }
                    }
                }
                Err(err) => {
                    error!(user_id = %user.id, error = %err, "Error deleting identity provider account");
                    return ActionResult::failed(err.to_string());
                }
            }
        }

        self.erase_core_user(&erase_id).await
    }

    async fn erase_core_user(&self, user_id: &str) -> ActionResult {
        match self.core.erase_user(user_id).await {
            Ok(counts) if counts.users == 0 => core_user_not_found(user_id),
            Ok(counts) => {
                info!(
                    user_id,
                    users = counts.users,
                    memberships = counts.memberships,
                    devices = counts.devices,
                    "Deleted customer"
                );
                ActionResult::ok(format!("{} Customers deleted successfully", counts.users))
            }
            Err(err) => {
                error!(user_id, error = %err, "Error erasing core user");
                ActionResult::failed(err.to_string())
            }
        }
    }
}
