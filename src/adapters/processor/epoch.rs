use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{instrument, warn};
use url::Url;

use super::digest::SignedParams;
use super::response::{ResultCode, parse_result_code};
use crate::application::ports::payment_processor::{CancelOutcome, PaymentProcessorPort};
use crate::application::ports::{UpstreamError, UpstreamResult};
use crate::infra::config::EpochConfig;

const CANCEL_REASON: &str = "movn";
const RESELLER: &str = "a";

#[derive(Clone)]
pub struct EpochClient {
    client: Client,
    api_url: Url,
    join_url: String,
    auth_user: String,
    auth_pass: SecretString,
    digest_key: SecretString,
    pi_code: String,
}

impl EpochClient {
    pub fn new(config: &EpochConfig, client: Client) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            join_url: config.join_url.clone(),
            auth_user: config.auth_user.clone(),
            auth_pass: config.auth_pass.clone(),
            digest_key: config.digest_key.clone(),
            pi_code: config.pi_code.clone(),
        }
    }

    fn cancel_params(&self, member_id: &str) -> SignedParams {
        SignedParams::new()
            .with("api_action", "cancel")
            .with("auth_pass", self.auth_pass.expose_secret())
            .with("auth_user", self.auth_user.as_str())
            .with("cancel_reason", CANCEL_REASON)
            .with("member_id", member_id)
    }

    fn join_params(&self, user_id: &str, email: &str) -> SignedParams {
        SignedParams::new()
            .with("api", "join")
            .with("email", email)
            .with("no_userpass", "true")
            .with("pi_code", self.pi_code.as_str())
            .with("reseller", RESELLER)
            .with("x_btid", user_id)
    }
}

#[async_trait]
impl PaymentProcessorPort for EpochClient {
    #[instrument(skip(self))]
    async fn cancel_membership(&self, member_id: &str) -> UpstreamResult<CancelOutcome> {
        let query = self
            .cancel_params(member_id)
            .to_signed_query(self.digest_key.expose_secret());
        let mut url = self.api_url.clone();
        url.set_query(Some(&query));

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Processor cancel request failed");
            UpstreamError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Processor rejected cancel call");
            return Err(UpstreamError::Transport(
                "Cancellation call to processor failed".to_string(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        match parse_result_code(&body)? {
            ResultCode::Success => Ok(CancelOutcome::Cancelled),
            ResultCode::AlreadyCancelled => Ok(CancelOutcome::AlreadyCancelled),
            ResultCode::Other(code) => {
                warn!(code = %code, "Processor returned unexpected result code");
                Err(UpstreamError::Rejected("FAILED".to_string()))
            }
        }
    }

    fn join_link(&self, user_id: &str, email: &str) -> UpstreamResult<String> {
        if email.trim().is_empty() {
            return Err(UpstreamError::Rejected(
                "Email is required for a join link".to_string(),
            ));
        }

        let separator = if self.join_url.contains('?') { '&' } else { '?' };
        let query = self
            .join_params(user_id, email)
            .to_signed_query(self.digest_key.expose_secret());
        Ok(format!("{}{separator}{query}", self.join_url))
    }
}
