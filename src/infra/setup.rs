use crate::{
    adapters::{
        core_graph::CoreGraphClient, http::app_state::AppState,
        identity::CognitoIdentityProvider, mailing_list::ConvertKitClient,
        processor::EpochClient,
    },
    infra::{config::AppConfig, error::InfraError, http_client::try_build_client},
    use_cases::accounts::AccountUseCases,
};
use std::fs::File;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds every upstream client once and hands them to the use cases.
pub async fn init_app_state() -> Result<AppState, InfraError> {
    let config = AppConfig::from_env();

    let http = try_build_client(config.http_timeouts())?;

    let core = Arc::new(CoreGraphClient::new(&config.core_graph, http.clone()));
    let identity = Arc::new(CognitoIdentityProvider::from_config(&config.cognito).await);
    let processor = Arc::new(EpochClient::new(&config.epoch, http.clone()));
    let mailing_list = Arc::new(ConvertKitClient::new(&config.convertkit, http));

    let account_use_cases = AccountUseCases::new(core, identity, processor, mailing_list);

    info!(
        core_graph = %config.core_graph.url,
        processor = %config.epoch.api_url,
        "Upstream clients ready"
    );

    Ok(AppState {
        config: Arc::new(config),
        account_use_cases: Arc::new(account_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "customer_admin=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs); skipped when the file can't be created.
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
