use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
};

use crate::{
    dto::favorites::{AddFavoriteRequest, FavoriteList},
    error::AppResult,
    middleware::{
        auth::{AuthUser, require_auth},
        extract::{ResourceId, ValidJson},
    },
    models::{Favorite, FavoriteWithListing},
    response::{ApiResponse, Deleted},
    services::favorite_service,
    state::AppState,
};

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/{id}", get(get_favorite).delete(remove_favorite))
        .route_layer(from_fn_with_state(state, require_auth))
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Caller's favorites", body = ApiResponse<FavoriteList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FavoriteList>>> {
    let resp = favorite_service::list_favorites(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Added to favorites", body = ApiResponse<Favorite>),
        (status = 200, description = "Listing was already a favorite", body = ApiResponse<Favorite>),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<AddFavoriteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Favorite>>)> {
    let (resp, created) = favorite_service::add_favorite(&state, &user, payload).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites/{id}",
    params(
        ("id" = Uuid, Path, description = "Favorite ID")
    ),
    responses(
        (status = 200, description = "Favorite with its listing", body = ApiResponse<FavoriteWithListing>),
        (status = 403, description = "Caller does not own the favorite"),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn get_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    ResourceId(id): ResourceId,
) -> AppResult<Json<ApiResponse<FavoriteWithListing>>> {
    let resp = favorite_service::get_favorite(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{id}",
    params(
        ("id" = Uuid, Path, description = "Favorite ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = ApiResponse<Deleted>),
        (status = 403, description = "Caller does not own the favorite"),
        (status = 404, description = "Favorite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    ResourceId(id): ResourceId,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = favorite_service::remove_favorite(&state, &user, id).await?;
    Ok(Json(resp))
}
