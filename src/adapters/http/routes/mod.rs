pub mod customers;
pub mod health;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/customers", customers::router())
        .merge(health::router())
}
