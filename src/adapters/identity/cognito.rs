use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_sdk_cognitoidentityprovider::{
    Client,
    config::http::HttpResponse,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::AttributeType,
};
use tracing::{info, instrument, warn};

use crate::application::ports::{IdentityProviderPort, UpstreamError, UpstreamResult};
use crate::infra::config::CognitoConfig;

const USER_NOT_FOUND: &str = "User does not exist.";

/// User pool administration through the Cognito admin API.
#[derive(Clone)]
pub struct CognitoIdentityProvider {
    client: Client,
    user_pool_id: String,
}

impl CognitoIdentityProvider {
    pub fn new(client: Client, user_pool_id: String) -> Self {
        Self {
            client,
            user_pool_id,
        }
    }

    /// Loads AWS credentials from the default provider chain. The configured
    /// region wins over the environment's.
    pub async fn from_config(config: &CognitoConfig) -> Self {
        let region_provider = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider();
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        info!(user_pool_id = %config.user_pool_id, "Identity provider client initialized");
        Self::new(Client::new(&sdk_config), config.user_pool_id.clone())
    }
}

#[async_trait]
impl IdentityProviderPort for CognitoIdentityProvider {
    #[instrument(skip(self))]
    async fn delete_user(&self, username: &str) -> UpstreamResult<()> {
        self.client
            .admin_delete_user()
            .user_pool_id(&self.user_pool_id)
            .username(username)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, |se| se.is_user_not_found_exception()))?;

        info!("Identity provider account deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_email(&self, username: &str, email: &str) -> UpstreamResult<()> {
        let email_attr = attribute("email", email)?;
        let verified_attr = attribute("email_verified", "true")?;

        self.client
            .admin_update_user_attributes()
            .user_pool_id(&self.user_pool_id)
            .username(username)
            .user_attributes(email_attr)
            .user_attributes(verified_attr)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, |se| se.is_user_not_found_exception()))?;

        info!("Identity provider email updated");
        Ok(())
    }
}

fn attribute(name: &str, value: &str) -> UpstreamResult<AttributeType> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .map_err(|e| UpstreamError::Rejected(e.to_string()))
}

/// Named "user not found" exceptions become `NotFound`, other service
/// exceptions are rejections, and anything that never reached the service
/// (dispatch, timeout, unreadable response) is a transport failure.
fn map_sdk_error<E>(err: SdkError<E, HttpResponse>, is_not_found: impl Fn(&E) -> bool) -> UpstreamError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err.as_service_error() {
        Some(service) => {
            let not_found = is_not_found(service);
            classify_service_error(not_found, service.message(), service.code())
        }
        None => {
            let message = DisplayErrorContext(&err).to_string();
            warn!(error = %message, "Identity provider unreachable");
            UpstreamError::Transport(message)
        }
    }
}

fn classify_service_error(not_found: bool, message: Option<&str>, code: Option<&str>) -> UpstreamError {
    if not_found {
        return UpstreamError::not_found(message.unwrap_or(USER_NOT_FOUND));
    }
    let message = message
        .or(code)
        .unwrap_or("Identity provider rejected the request");
    warn!(error = %message, "Identity provider rejected request");
    UpstreamError::Rejected(message.to_string())
}
