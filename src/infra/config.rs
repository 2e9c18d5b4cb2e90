use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default, get_env_opt};
use secrecy::SecretString;
use url::Url;

use super::http_client::HttpTimeouts;

const DEFAULT_EPOCH_API_URL: &str = "https://epoch.com/services/customer_search";
const DEFAULT_CONVERTKIT_API_URL: &str = "https://api.kit.com/v3";

/// Core graph (GraphQL) service credentials.
#[derive(Clone)]
pub struct CoreGraphConfig {
    pub url: Url,
    pub api_key: SecretString,
}

/// Identity provider user pool.
#[derive(Clone)]
pub struct CognitoConfig {
    pub user_pool_id: String,
    /// Falls back to the AWS default region chain when unset.
    pub region: Option<String>,
}

/// Payment processor credentials and endpoints.
#[derive(Clone)]
pub struct EpochConfig {
    /// Endpoint for member commands (cancel).
    pub api_url: Url,
    /// Base of the signup link handed to customers.
    pub join_url: String,
    pub auth_user: String,
    pub auth_pass: SecretString,
    pub digest_key: SecretString,
    pub pi_code: String,
}

/// Mailing list credentials.
#[derive(Clone)]
pub struct ConvertKitConfig {
    pub api_url: Url,
    pub api_secret: SecretString,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub core_graph: CoreGraphConfig,
    pub cognito: CognitoConfig,
    pub epoch: EpochConfig,
    pub convertkit: ConvertKitConfig,
    /// TCP connect timeout for upstream calls.
    pub upstream_connect_timeout: Duration,
    /// Overall per-request timeout. Unset means upstream calls may block
    /// for as long as the remote keeps the connection open.
    pub upstream_request_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3001)),
        );
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let core_graph = CoreGraphConfig {
            url: get_env("CORE_API_URL"),
            api_key: SecretString::new(get_env::<String>("CORE_API_KEY").into()),
        };

        let cognito = CognitoConfig {
            user_pool_id: get_env("AWS_USER_POOL_ID"),
            region: get_env_opt("AWS_REGION").filter(|r| !r.trim().is_empty()),
        };

        let epoch = EpochConfig {
            api_url: get_env_default(
                "EPOCH_API_URL",
                Url::parse(DEFAULT_EPOCH_API_URL).expect("default Epoch API URL is valid"),
            ),
            join_url: get_env("EPOCH_URL"),
            auth_user: get_env("EPOCH_USER"),
            auth_pass: SecretString::new(get_env::<String>("EPOCH_USER_PASS").into()),
            digest_key: SecretString::new(get_env::<String>("EPOCH_DIGEST_KEY").into()),
            pi_code: get_env("EPOCH_PI_CODE"),
        };

        let convertkit = ConvertKitConfig {
            api_url: get_env_default(
                "CONVERTKIT_API_URL",
                Url::parse(DEFAULT_CONVERTKIT_API_URL).expect("default ConvertKit URL is valid"),
            ),
            api_secret: SecretString::new(get_env::<String>("CONVERTKIT_API_SECRET").into()),
        };

        let connect_timeout_secs: u64 = get_env_default("UPSTREAM_CONNECT_TIMEOUT_SECS", 5);
        let upstream_request_timeout =
            parse_request_timeout(get_env_opt("UPSTREAM_REQUEST_TIMEOUT_SECS"));

        Self {
            bind_addr,
            cors_origin,
            core_graph,
            cognito,
            epoch,
            convertkit,
            upstream_connect_timeout: Duration::from_secs(connect_timeout_secs),
            upstream_request_timeout,
        }
    }

    pub fn http_timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: self.upstream_connect_timeout,
            request: self.upstream_request_timeout,
        }
    }
}

/// An unset or blank value means no overall request timeout; anything else
/// must be a whole number of seconds.
fn parse_request_timeout(raw: Option<String>) -> Option<Duration> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    let secs: u64 = raw
        .trim()
        .parse()
        .unwrap_or_else(|_| panic!("Unable to parse env variable UPSTREAM_REQUEST_TIMEOUT_SECS"));
    Some(Duration::from_secs(secs))
}
