//! In-memory fakes for the external-system ports.
//!
//! Each fake records the calls it receives so tests can assert on ordering
//! and call counts, and can be scripted to fail with a given `UpstreamError`.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::{
    application::ports::{
        CoreGraphPort, IdentityProviderPort, MailingListPort, PaymentProcessorPort,
        UpstreamError, UpstreamResult, core_graph::ErasureCounts,
        payment_processor::CancelOutcome,
    },
    domain::entities::{
        customer::{Customer, CustomerFilter, CustomerPage, ProfileUpdate},
        user::User,
    },
};

fn matches_filter(value: Option<&str>, pattern: Option<&str>) -> bool {
    match pattern {
        None => true,
        Some(pattern) => value
            .map(|v| v.to_lowercase().contains(&pattern.to_lowercase()))
            .unwrap_or(false),
    }
}

// ============================================================================
// FakeCoreGraph
// ============================================================================

#[derive(Default)]
pub struct FakeCoreGraph {
    pub users: Mutex<HashMap<String, User>>,
    pub customers: Vec<Customer>,
    erase_counts_override: Option<ErasureCounts>,
    find_error: Option<UpstreamError>,
    get_user_error: Option<UpstreamError>,
    queued_get_user: Mutex<VecDeque<UpstreamResult<Option<User>>>>,
    update_email_error: Option<UpstreamError>,
    find_windows: Mutex<Vec<(u32, u32)>>,
    get_user_calls: Mutex<usize>,
    email_updates: Mutex<Vec<(String, String)>>,
    profile_updates: Mutex<Vec<(String, ProfileUpdate)>>,
    erased: Mutex<Vec<String>>,
}

impl FakeCoreGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().insert(user.id.clone(), user);
        self
    }

    pub fn with_customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers = customers;
        self
    }

    pub fn with_erase_counts(mut self, counts: ErasureCounts) -> Self {
        self.erase_counts_override = Some(counts);
        self
    }

    pub fn fail_find(mut self, err: UpstreamError) -> Self {
        self.find_error = Some(err);
        self
    }

    pub fn fail_get_user(mut self, err: UpstreamError) -> Self {
        self.get_user_error = Some(err);
        self
    }

    pub fn fail_update_email(mut self, err: UpstreamError) -> Self {
        self.update_email_error = Some(err);
        self
    }

    /// Answers the next `get_user` calls with `responses`, in order, before
    /// falling back to the stored users.
    pub fn then_get_user(self, responses: Vec<UpstreamResult<Option<User>>>) -> Self {
        self.queued_get_user.lock().unwrap().extend(responses);
        self
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }

    /// `(skip, take)` of every search request.
    pub fn find_windows(&self) -> Vec<(u32, u32)> {
        self.find_windows.lock().unwrap().clone()
    }

    pub fn get_user_calls(&self) -> usize {
        *self.get_user_calls.lock().unwrap()
    }

    pub fn email_updates(&self) -> Vec<(String, String)> {
        self.email_updates.lock().unwrap().clone()
    }

    pub fn email_update_calls(&self) -> usize {
        self.email_updates.lock().unwrap().len()
    }

    pub fn profile_updates(&self) -> Vec<(String, ProfileUpdate)> {
        self.profile_updates.lock().unwrap().clone()
    }

    pub fn erased_users(&self) -> Vec<String> {
        self.erased.lock().unwrap().clone()
    }

    pub fn erase_calls(&self) -> usize {
        self.erased.lock().unwrap().len()
    }
}

#[async_trait]
impl CoreGraphPort for FakeCoreGraph {
    async fn find_profiles(
        &self,
        filter: &CustomerFilter,
        skip: u32,
        take: u32,
    ) -> UpstreamResult<CustomerPage> {
        self.find_windows.lock().unwrap().push((skip, take));
        if let Some(err) = &self.find_error {
            return Err(err.clone());
        }

        let matching: Vec<Customer> = self
            .customers
            .iter()
            .filter(|c| {
                matches_filter(c.username.as_deref(), filter.username.as_deref())
                    && matches_filter(c.first_name.as_deref(), filter.first_name.as_deref())
                    && matches_filter(c.last_name.as_deref(), filter.last_name.as_deref())
                    && matches_filter(c.email.as_deref(), filter.email.as_deref())
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let customers = matching
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect();

        Ok(CustomerPage { customers, total })
    }

    async fn get_user(&self, user_id: &str) -> UpstreamResult<Option<User>> {
        *self.get_user_calls.lock().unwrap() += 1;
        if let Some(queued) = self.queued_get_user.lock().unwrap().pop_front() {
            return queued;
        }
        if let Some(err) = &self.get_user_error {
            return Err(err.clone());
        }
        Ok(self.user(user_id))
    }

    async fn update_account_email(&self, user_id: &str, email: &str) -> UpstreamResult<()> {
        self.email_updates
            .lock()
            .unwrap()
            .push((user_id.to_string(), email.to_string()));
        if let Some(err) = &self.update_email_error {
            return Err(err.clone());
        }

        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| UpstreamError::not_found("User not found"))?;
        user.profile.get_or_insert_with(Default::default).email = Some(email.to_string());
        Ok(())
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> UpstreamResult<()> {
        self.profile_updates
            .lock()
            .unwrap()
            .push((user_id.to_string(), update.clone()));

        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| UpstreamError::not_found("User not found"))?;
        let profile = user.profile.get_or_insert_with(Default::default);
        if let Some(first_name) = &update.first_name {
            profile.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &update.last_name {
            profile.last_name = Some(last_name.clone());
        }
        if let Some(username) = &update.username {
            profile.username = Some(username.clone());
        }
        Ok(())
    }

    async fn set_user_deactivated(&self, user_id: &str, deactivated: bool) -> UpstreamResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| UpstreamError::not_found("User not found"))?;
        user.is_deactivated = deactivated;
        Ok(())
    }

    async fn erase_user(&self, user_id: &str) -> UpstreamResult<ErasureCounts> {
        self.erased.lock().unwrap().push(user_id.to_string());
        let removed = self.users.lock().unwrap().remove(user_id);
        if let Some(counts) = self.erase_counts_override {
            return Ok(counts);
        }

        Ok(match removed {
            Some(user) => ErasureCounts {
                users: 1,
                subscribers: u64::from(user.subscriber.is_some()),
                memberships: user.memberships.len().max(usize::from(user.recent_membership.is_some()))
                    as u64,
                profiles: u64::from(user.profile.is_some()),
                devices: user.devices.len() as u64,
                notifications: 0,
            },
            None => ErasureCounts::default(),
        })
    }
}

// ============================================================================
// FakeIdentityProvider
// ============================================================================

#[derive(Default)]
pub struct FakeIdentityProvider {
    delete_error: Mutex<Option<UpstreamError>>,
    update_email_error: Mutex<Option<UpstreamError>>,
    deleted: Mutex<Vec<String>>,
    email_updates: Mutex<Vec<(String, String)>>,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_delete(&self, err: UpstreamError) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    pub fn fail_update_email(&self, err: UpstreamError) {
        *self.update_email_error.lock().unwrap() = Some(err);
    }

    pub fn deleted_users(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn email_updates(&self) -> Vec<(String, String)> {
        self.email_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProviderPort for FakeIdentityProvider {
    async fn delete_user(&self, username: &str) -> UpstreamResult<()> {
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.deleted.lock().unwrap().push(username.to_string());
        Ok(())
    }

    async fn update_email(&self, username: &str, email: &str) -> UpstreamResult<()> {
        if let Some(err) = self.update_email_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.email_updates
            .lock()
            .unwrap()
            .push((username.to_string(), email.to_string()));
        Ok(())
    }
}

// ============================================================================
// FakePaymentProcessor
// ============================================================================

#[derive(Default)]
pub struct FakePaymentProcessor {
    cancel_error: Mutex<Option<UpstreamError>>,
    cancelled: Mutex<Vec<String>>,
}

impl FakePaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_cancel(&self, err: UpstreamError) {
        *self.cancel_error.lock().unwrap() = Some(err);
    }

    pub fn cancelled_members(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessorPort for FakePaymentProcessor {
    async fn cancel_membership(&self, member_id: &str) -> UpstreamResult<CancelOutcome> {
        if let Some(err) = self.cancel_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut cancelled = self.cancelled.lock().unwrap();
        let outcome = if cancelled.iter().any(|m| m == member_id) {
            CancelOutcome::AlreadyCancelled
        } else {
            CancelOutcome::Cancelled
        };
        cancelled.push(member_id.to_string());
        Ok(outcome)
    }

    fn join_link(&self, user_id: &str, email: &str) -> UpstreamResult<String> {
        Ok(format!("https://join.test/?user={user_id}&email={email}"))
    }
}

// ============================================================================
// FakeMailingList
// ============================================================================

#[derive(Default)]
pub struct FakeMailingList {
    unsubscribe_error: Mutex<Option<UpstreamError>>,
    unsubscribed: Mutex<Vec<String>>,
}

impl FakeMailingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_unsubscribe(&self, err: UpstreamError) {
        *self.unsubscribe_error.lock().unwrap() = Some(err);
    }

    /// Every email an unsubscribe was attempted for, failed or not.
    pub fn unsubscribed(&self) -> Vec<String> {
        self.unsubscribed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailingListPort for FakeMailingList {
    async fn unsubscribe(&self, email: &str) -> UpstreamResult<()> {
        self.unsubscribed.lock().unwrap().push(email.to_string());
        match self.unsubscribe_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_customer, create_test_user};

    #[tokio::test]
    async fn core_graph_search_filters_and_windows() {
        let graph = FakeCoreGraph::new().with_customers(vec![
            create_test_customer("p1", |c| c.email = Some("jane@example.com".to_string())),
            create_test_customer("p2", |c| c.email = Some("JOHN@example.com".to_string())),
            create_test_customer("p3", |c| c.email = Some("amy@other.org".to_string())),
        ]);
        let filter = CustomerFilter {
            email: Some("example".to_string()),
            ..Default::default()
        };

        let page = graph.find_profiles(&filter, 1, 10).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.customers.len(), 1);
        assert_eq!(page.customers[0].id, "p2");
    }

    #[tokio::test]
    async fn core_graph_erase_removes_user() {
        let graph = FakeCoreGraph::new().with_user(create_test_user("u1", |_| {}));

        let counts = graph.erase_user("u1").await.unwrap();
        let again = graph.erase_user("u1").await.unwrap();

        assert_eq!(counts.users, 1);
        assert_eq!(counts.profiles, 1);
        assert_eq!(again, ErasureCounts::default());
        assert_eq!(graph.erase_calls(), 2);
    }

    #[tokio::test]
    async fn processor_reports_already_cancelled_on_repeat() {
        let processor = FakePaymentProcessor::new();

        assert_eq!(
            processor.cancel_membership("EPOCH123").await.unwrap(),
            CancelOutcome::Cancelled
        );
        assert_eq!(
            processor.cancel_membership("EPOCH123").await.unwrap(),
            CancelOutcome::AlreadyCancelled
        );
    }
}
