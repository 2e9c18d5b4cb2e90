use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    action_result::{ActionResult, SearchResult},
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::validators::is_valid_entity_id,
    domain::entities::customer::{CustomerFilter, ProfileUpdate},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_customers))
        .route("/{user_id}", delete(delete_customer))
        .route("/{user_id}/email", put(update_email))
        .route("/{user_id}/profile", patch(update_profile))
        .route("/{user_id}/deactivated", put(set_deactivated))
        .route("/{user_id}/membership/cancel", post(cancel_membership))
        .route("/{user_id}/membership/join-link", get(join_link))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct UpdateEmailPayload {
    new_email: String,
}

#[derive(Debug, Deserialize)]
struct DeactivatedPayload {
    deactivated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct JoinLinkResponse {
    url: String,
}

fn checked_id(user_id: &str) -> AppResult<&str> {
    if is_valid_entity_id(user_id) {
        Ok(user_id)
    } else {
        Err(AppError::InvalidInput("Invalid user id".to_string()))
    }
}

async fn search_customers(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResult> {
    let filter = CustomerFilter {
        username: params.username,
        first_name: params.first_name,
        last_name: params.last_name,
        email: params.email,
    };
    Json(
        app_state
            .account_use_cases
            .search_users(filter, params.page)
            .await,
    )
}

async fn update_email(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateEmailPayload>,
) -> AppResult<Json<ActionResult>> {
    let user_id = checked_id(&user_id)?;
    Ok(Json(
        app_state
            .account_use_cases
            .update_user_email(user_id, &payload.new_email)
            .await,
    ))
}

async fn update_profile(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<ActionResult>> {
    let user_id = checked_id(&user_id)?;
    Ok(Json(
        app_state
            .account_use_cases
            .update_profile(user_id, payload)
            .await,
    ))
}

async fn set_deactivated(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<DeactivatedPayload>,
) -> AppResult<Json<ActionResult>> {
    let user_id = checked_id(&user_id)?;
    Ok(Json(
        app_state
            .account_use_cases
            .set_user_deactivated(user_id, payload.deactivated)
            .await,
    ))
}

async fn cancel_membership(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ActionResult>> {
    let user_id = checked_id(&user_id)?;
    Ok(Json(
        app_state.account_use_cases.cancel_membership(user_id).await,
    ))
}

async fn join_link(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<JoinLinkResponse>> {
    let user_id = checked_id(&user_id)?;
    let url = app_state
        .account_use_cases
        .membership_join_link(user_id)
        .await?;
    Ok(Json(JoinLinkResponse { url }))
}

async fn delete_customer(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ActionResult>> {
    let user_id = checked_id(&user_id)?;
    Ok(Json(app_state.account_use_cases.delete_user(user_id).await))
}
