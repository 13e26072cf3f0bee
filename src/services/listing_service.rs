use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::listings::{CreateListingRequest, ListingList, ListingQuery, UpdateListingRequest},
    entity::{
        Favorites, favorites,
        listings::{self, ActiveModel, Column, Entity as Listings},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Listing,
    response::{ApiResponse, Deleted},
    services::ownership::{find_or_not_found, find_owned},
    state::AppState,
};

pub async fn list_listings(
    state: &AppState,
    query: ListingQuery,
) -> AppResult<ApiResponse<ListingList>> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price)
        && min > max
    {
        return Err(AppError::validation(
            "min_price must not be greater than max_price",
        ));
    }

    let mut condition = Condition::all();
    if let Some(q) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Title.contains(q));
    }
    if let Some(category) = query.category {
        condition = condition.add(Column::Category.eq(category));
    }
    if let Some(item_condition) = query.condition {
        condition = condition.add(Column::Condition.eq(item_condition));
    }
    if let Some(status) = query.status {
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(owner_id) = query.owner_id {
        condition = condition.add(Column::OwnerId.eq(owner_id));
    }
    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let items = Listings::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Listing::from)
        .collect();

    Ok(ApiResponse::success("Listings", ListingList { items }))
}

pub async fn list_owned_by(state: &AppState, owner_id: Uuid) -> AppResult<Vec<Listing>> {
    let items = Listings::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Listing::from)
        .collect();
    Ok(items)
}

pub async fn get_listing(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Listing>> {
    let listing = find_or_not_found::<Listings, _>(&state.orm, id).await?;
    Ok(ApiResponse::success("Listing", Listing::from(listing)))
}

pub async fn create_listing(
    state: &AppState,
    user: &AuthUser,
    payload: CreateListingRequest,
) -> AppResult<ApiResponse<Listing>> {
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        price: Set(payload.price),
        condition: Set(payload.condition),
        category: Set(payload.category),
        status: Set(payload.status.unwrap_or_default()),
        pictures: Set(json!(payload.pictures)),
        owner_id: Set(user.user_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let listing = active.insert(&state.orm).await?;

    tracing::info!(listing_id = %listing.id, owner_id = %user.user_id, "listing created");

    Ok(ApiResponse::success("Listing created", Listing::from(listing)))
}

pub async fn update_listing(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateListingRequest,
) -> AppResult<ApiResponse<Listing>> {
    let existing = find_owned::<Listings, _>(&state.orm, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(condition) = payload.condition {
        active.condition = Set(condition);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(pictures) = payload.pictures {
        active.pictures = Set(json!(pictures));
    }
    active.updated_at = Set(Utc::now().into());

    let listing = active.update(&state.orm).await?;

    tracing::info!(listing_id = %listing.id, owner_id = %user.user_id, "listing updated");

    Ok(ApiResponse::success("Listing updated", Listing::from(listing)))
}

/// Delete a listing together with every favorite that references it.
pub async fn delete_listing(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Deleted>> {
    let listing = find_owned::<Listings, _>(&state.orm, user, id).await?;

    let txn = state.orm.begin().await?;
    let favorites_removed = Favorites::delete_many()
        .filter(favorites::Column::ListingId.eq(listing.id))
        .exec(&txn)
        .await?
        .rows_affected;
    listings::Entity::delete_by_id(listing.id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        listing_id = %listing.id,
        owner_id = %user.user_id,
        favorites_removed,
        "listing deleted"
    );

    Ok(ApiResponse::success("Listing deleted", Deleted { id: listing.id }))
}
