//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` wires an `AppState` to the recording port fakes so
//! route tests can drive the real use cases without any network.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    domain::entities::user::User,
    infra::config::{AppConfig, CognitoConfig, ConvertKitConfig, CoreGraphConfig, EpochConfig},
    test_utils::{FakeCoreGraph, FakeIdentityProvider, FakeMailingList, FakePaymentProcessor},
    use_cases::accounts::AccountUseCases,
};

/// Config pointing every upstream at an unroutable test host.
pub fn create_test_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        core_graph: CoreGraphConfig {
            url: Url::parse("http://core.test/graphql").unwrap(),
            api_key: SecretString::from("test-core-key".to_string()),
        },
        cognito: CognitoConfig {
            user_pool_id: "test-pool".to_string(),
            region: Some("us-east-1".to_string()),
        },
        epoch: EpochConfig {
            api_url: Url::parse("http://epoch.test/services/customer_search").unwrap(),
            join_url: "http://join.test/".to_string(),
            auth_user: "test-user".to_string(),
            auth_pass: SecretString::from("test-pass".to_string()),
            digest_key: SecretString::from("test_digest_key".to_string()),
            pi_code: "PI-TEST".to_string(),
        },
        convertkit: ConvertKitConfig {
            api_url: Url::parse("http://kit.test/v3").unwrap(),
            api_secret: SecretString::from("test-kit-secret".to_string()),
        },
        upstream_connect_timeout: Duration::from_secs(1),
        upstream_request_timeout: None,
    }
}

/// Handles to the fakes behind a built `AppState`.
pub struct TestFakes {
    pub core: Arc<FakeCoreGraph>,
    pub identity: Arc<FakeIdentityProvider>,
    pub processor: Arc<FakePaymentProcessor>,
    pub mailing_list: Arc<FakeMailingList>,
}

/// Builder for creating `AppState` with in-memory fakes for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, fakes) = TestAppStateBuilder::new()
///     .with_user(create_test_user("u1", |_| {}))
///     .build_with_fakes();
/// ```
pub struct TestAppStateBuilder {
    core: FakeCoreGraph,
    identity: FakeIdentityProvider,
    processor: FakePaymentProcessor,
    mailing_list: FakeMailingList,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            core: FakeCoreGraph::new(),
            identity: FakeIdentityProvider::new(),
            processor: FakePaymentProcessor::new(),
            mailing_list: FakeMailingList::new(),
        }
    }

    /// Replace the core graph fake, e.g. one scripted to fail.
    pub fn with_core(mut self, core: FakeCoreGraph) -> Self {
        self.core = core;
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.core = self.core.with_user(user);
        self
    }

    pub fn with_identity(mut self, identity: FakeIdentityProvider) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_processor(mut self, processor: FakePaymentProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn with_mailing_list(mut self, mailing_list: FakeMailingList) -> Self {
        self.mailing_list = mailing_list;
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_fakes().0
    }

    pub fn build_with_fakes(self) -> (AppState, TestFakes) {
        let fakes = TestFakes {
            core: Arc::new(self.core),
            identity: Arc::new(self.identity),
            processor: Arc::new(self.processor),
            mailing_list: Arc::new(self.mailing_list),
        };

        let account_use_cases = AccountUseCases::new(
            fakes.core.clone(),
            fakes.identity.clone(),
            fakes.processor.clone(),
            fakes.mailing_list.clone(),
        );

        let app_state = AppState {
            config: Arc::new(create_test_config()),
            account_use_cases: Arc::new(account_use_cases),
        };

        (app_state, fakes)
    }
}
