use axum::{
    Json, Router, extract::State, middleware::from_fn_with_state, routing::get,
};

use crate::{
    dto::account::{AccountListings, UpdateAccountRequest},
    error::AppResult,
    middleware::{
        auth::{AuthUser, require_auth},
        extract::ValidJson,
    },
    models::User,
    response::{ApiResponse, Deleted},
    services::account_service,
    state::AppState,
};

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_account).patch(update_account).delete(delete_account),
        )
        .route("/listings", get(account_listings))
        .route_layer(from_fn_with_state(state, require_auth))
}

#[utoipa::path(
    get,
    path = "/api/v1/account",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = account_service::get_account(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/account",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = ApiResponse<User>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email is already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn update_account(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<UpdateAccountRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = account_service::update_account(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/account",
    responses(
        (status = 200, description = "Deleted account with its listings and favorites", body = ApiResponse<Deleted>)
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = account_service::delete_account(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/listings",
    responses(
        (status = 200, description = "Listings owned by the caller", body = ApiResponse<AccountListings>)
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn account_listings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AccountListings>>> {
    let resp = account_service::list_account_listings(&state, &user).await?;
    Ok(Json(resp))
}
