use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::{
    dto::listings::{CreateListingRequest, ListingList, ListingQuery, UpdateListingRequest},
    error::{AppError, AppResult},
    middleware::{
        auth::{AuthUser, require_auth},
        extract::{ResourceId, ValidJson},
    },
    models::Listing,
    response::{ApiResponse, Deleted},
    services::listing_service,
    state::AppState,
};

pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_listing))
        .route(
            "/{id}",
            get(get_listing).patch(update_listing).delete(delete_listing),
        )
        .route_layer(from_fn_with_state(state, require_auth));

    Router::new()
        .route("/", get(list_listings))
        .merge(protected)
}

#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(ListingQuery),
    responses(
        (status = 200, description = "List listings", body = ApiResponse<ListingList>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "Listings"
)]
pub async fn list_listings(
    State(state): State<AppState>,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<ListingList>>> {
    let Query(query) = query.map_err(|rejection| AppError::validation(rejection.body_text()))?;
    let resp = listing_service::list_listings(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Get listing", body = ApiResponse<Listing>),
        (status = 400, description = "Malformed listing ID"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Listing not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Listings"
)]
pub async fn get_listing(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<ApiResponse<Listing>>> {
    let resp = listing_service::get_listing(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Create listing", body = ApiResponse<Listing>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Listings"
)]
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<CreateListingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Listing>>)> {
    let resp = listing_service::create_listing(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    request_body = UpdateListingRequest,
    responses(
        (status = 200, description = "Updated listing", body = ApiResponse<Listing>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller does not own the listing"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Listings"
)]
pub async fn update_listing(
    State(state): State<AppState>,
    user: AuthUser,
    ResourceId(id): ResourceId,
    ValidJson(payload): ValidJson<UpdateListingRequest>,
) -> AppResult<Json<ApiResponse<Listing>>> {
    let resp = listing_service::update_listing(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Deleted listing", body = ApiResponse<Deleted>),
        (status = 403, description = "Caller does not own the listing"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Listings"
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    user: AuthUser,
    ResourceId(id): ResourceId,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = listing_service::delete_listing(&state, &user, id).await?;
    Ok(Json(resp))
}
