use std::sync::Arc;

use axum::extract::FromRef;

use crate::{infra::config::AppConfig, use_cases::accounts::AccountUseCases};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub account_use_cases: Arc<AccountUseCases>,
}

impl FromRef<AppState> for Arc<AccountUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.account_use_cases.clone()
    }
}
