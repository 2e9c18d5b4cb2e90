//! Core graph service client.
//!
//! Every request is a fresh POST with the bearer API key and
//! `Cache-Control: no-cache`; nothing is cached between calls.

mod queries;

use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, error, instrument};
use url::Url;

use crate::application::ports::core_graph::{CoreGraphPort, ErasureCounts};
use crate::application::ports::{UpstreamError, UpstreamResult};
use crate::domain::entities::customer::{Customer, CustomerFilter, CustomerPage, ProfileUpdate};
use crate::domain::entities::user::User;
use crate::infra::config::CoreGraphConfig;

const NOT_FOUND_CODE: &str = "NOT_FOUND";

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQLErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProfilesData {
    profiles: ProfileConnection,
}

#[derive(Debug, Deserialize)]
struct ProfileConnection {
    count: u64,
    #[serde(default)]
    result: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct NodeId {
    #[allow(dead_code)]
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAccountData {
    update_account: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserData {
    update_user: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
struct Count {
    count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAccountData {
    erase_subscribers: Count,
    erase_memberships: Count,
    erase_profiles: Count,
    erase_user_devices: Count,
    erase_notifications: Count,
    erase_users: Count,
}

impl From<DeleteAccountData> for ErasureCounts {
    fn from(data: DeleteAccountData) -> Self {
        Self {
            users: data.erase_users.count,
            subscribers: data.erase_subscribers.count,
            memberships: data.erase_memberships.count,
            profiles: data.erase_profiles.count,
            devices: data.erase_user_devices.count,
            notifications: data.erase_notifications.count,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct CoreGraphClient {
    client: Client,
    url: Url,
    api_key: SecretString,
}

impl CoreGraphClient {
    pub fn new(config: &CoreGraphConfig, client: Client) -> Self {
        Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Runs one operation and unwraps the GraphQL envelope.
    ///
    /// The first reported error becomes the failure; all of them are logged.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> UpstreamResult<T> {
        debug!(operation, "Core graph request");

        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .header(header::CACHE_CONTROL, "no-cache")
            .json(&json!({
                "operationName": operation,
                "query": query,
                "variables": variables,
            }))
            .send()
            .await
            .map_err(|e| {
                error!(operation, error = %e, "Core graph request failed");
                UpstreamError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(operation, status = %status, "Core graph returned an error status");
            return Err(UpstreamError::Transport(format!(
                "Core graph request failed with status {status}"
            )));
        }

        let body: GraphQLResponse<T> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Invalid core graph response: {e}")))?;

        if let Some(errors) = body.errors
            && let Some(first) = errors.first()
        {
            for e in &errors {
                error!(operation, message = %e.message, "Core graph error");
            }
            let is_not_found = first
                .extensions
                .as_ref()
                .and_then(|ext| ext.code.as_deref())
                == Some(NOT_FOUND_CODE);
            return Err(if is_not_found {
                UpstreamError::NotFound {
                    message: first.message.clone(),
                    code: Some(404),
                }
            } else {
                UpstreamError::Rejected(first.message.clone())
            });
        }

        body.data
            .ok_or_else(|| UpstreamError::Rejected("No data in response".to_string()))
    }
}

#[async_trait]
impl CoreGraphPort for CoreGraphClient {
    #[instrument(skip(self))]
    async fn find_profiles(
        &self,
        filter: &CustomerFilter,
        skip: u32,
        take: u32,
    ) -> UpstreamResult<CustomerPage> {
        let data: ProfilesData = self
            .execute(
                "FindUser",
                queries::FIND_PROFILES,
                json!({
                    "firstName": filter.first_name,
                    "lastName": filter.last_name,
                    "email": filter.email,
                    "username": filter.username,
                    "skip": skip,
                    "take": take,
                }),
            )
            .await?;

        Ok(CustomerPage {
            customers: data.profiles.result,
            total: data.profiles.count,
        })
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> UpstreamResult<Option<User>> {
        let data: UserData = self
            .execute("UserByID", queries::USER_BY_ID, json!({ "userId": user_id }))
            .await?;
        Ok(data.user)
    }

    #[instrument(skip(self))]
    async fn update_account_email(&self, user_id: &str, email: &str) -> UpstreamResult<()> {
        let data: UpdateAccountData = self
            .execute(
                "UpdateAccount",
                queries::UPDATE_ACCOUNT_EMAIL,
                json!({ "id": user_id, "email": email }),
            )
            .await?;
        data.update_account
            .map(|_| ())
            .ok_or_else(|| UpstreamError::not_found("User not found"))
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> UpstreamResult<()> {
        let data: UpdateAccountData = self
            .execute(
                "UpdateProfile",
                queries::UPDATE_PROFILE,
                json!({
                    "user": user_id,
                    "firstName": update.first_name,
                    "lastName": update.last_name,
                    "username": update.username,
                }),
            )
            .await?;
        data.update_account
            .map(|_| ())
            .ok_or_else(|| UpstreamError::not_found("User not found"))
    }

    #[instrument(skip(self))]
    async fn set_user_deactivated(&self, user_id: &str, deactivated: bool) -> UpstreamResult<()> {
        let data: UpdateUserData = self
            .execute(
                "UpdateUser",
                queries::UPDATE_USER_DEACTIVATED,
                json!({ "id": user_id, "deactivated": deactivated }),
            )
            .await?;
        data.update_user
            .map(|_| ())
            .ok_or_else(|| UpstreamError::not_found("User not found"))
    }

    #[instrument(skip(self))]
    async fn erase_user(&self, user_id: &str) -> UpstreamResult<ErasureCounts> {
        let data: DeleteAccountData = self
            .execute(
                "DeleteAccount",
                queries::DELETE_ACCOUNT,
                json!({ "userId": user_id }),
            )
            .await?;
        Ok(data.into())
    }
}
