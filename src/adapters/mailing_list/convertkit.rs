use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::ports::{MailingListPort, UpstreamError, UpstreamResult};
use crate::infra::config::ConvertKitConfig;

#[derive(Serialize)]
struct UnsubscribeRequest<'a> {
    email: &'a str,
    api_secret: &'a str,
}

#[derive(Clone)]
pub struct ConvertKitClient {
    client: Client,
    unsubscribe_url: String,
    api_secret: SecretString,
}

impl ConvertKitClient {
    pub fn new(config: &ConvertKitConfig, client: Client) -> Self {
        Self {
            client,
            unsubscribe_url: format!(
                "{}/unsubscribe",
                config.api_url.as_str().trim_end_matches('/')
            ),
            api_secret: config.api_secret.clone(),
        }
    }
}

#[async_trait]
impl MailingListPort for ConvertKitClient {
    /// Only `204 No Content` means the address was removed.
    #[instrument(skip(self))]
    async fn unsubscribe(&self, email: &str) -> UpstreamResult<()> {
        let secret = self.api_secret.expose_secret();
        let response = self
            .client
            .put(&self.unsubscribe_url)
            .bearer_auth(secret)
            .json(&UnsubscribeRequest {
                email,
                api_secret: secret,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Mailing list request failed");
                UpstreamError::Transport(e.to_string())
            })?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                info!("Subscriber removed from mailing list");
                Ok(())
            }
            status => {
                warn!(status = %status, "Mailing list did not confirm unsubscribe");
                Err(UpstreamError::Rejected(format!(
                    "Mailing list unsubscribe returned status {status}"
                )))
            }
        }
    }
}
