use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use crate::{
    dto::favorites::{AddFavoriteRequest, FavoriteList},
    entity::{
        Listings,
        favorites::{self, ActiveModel, Column, Entity as Favorites},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Favorite, FavoriteWithListing, Listing},
    response::{ApiResponse, Deleted},
    services::ownership::{find_or_not_found, find_owned},
    state::AppState,
};

async fn find_pair(
    state: &AppState,
    user_id: Uuid,
    listing_id: Uuid,
) -> AppResult<Option<favorites::Model>> {
    let favorite = Favorites::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ListingId.eq(listing_id))
        .one(&state.orm)
        .await?;
    Ok(favorite)
}

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<FavoriteList>> {
    let items = Favorites::find()
        .filter(Column::UserId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .find_also_related(Listings)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(favorite, listing)| FavoriteWithListing {
            favorite: Favorite::from(favorite),
            listing: listing.map(Listing::from),
        })
        .collect();

    Ok(ApiResponse::success("Favorites", FavoriteList { items }))
}

pub async fn get_favorite(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<FavoriteWithListing>> {
    let favorite = find_owned::<Favorites, _>(&state.orm, user, id).await?;
    let listing = Listings::find_by_id(favorite.listing_id)
        .one(&state.orm)
        .await?
        .map(Listing::from);

    Ok(ApiResponse::success(
        "Favorite",
        FavoriteWithListing {
            favorite: Favorite::from(favorite),
            listing,
        },
    ))
}

/// Add a listing to the caller's favorites.
///
/// Returns `true` alongside the response when a new favorite was stored and
/// `false` when the pair already existed.
pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    payload: AddFavoriteRequest,
) -> AppResult<(ApiResponse<Favorite>, bool)> {
    find_or_not_found::<Listings, _>(&state.orm, payload.listing_id).await?;

    if let Some(existing) = find_pair(state, user.user_id, payload.listing_id).await? {
        return Ok((
            ApiResponse::success("Already in favorites", Favorite::from(existing)),
            false,
        ));
    }

    let inserted = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        listing_id: Set(payload.listing_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await;

    let favorite = match inserted {
        Ok(favorite) => favorite,
        // Lost a race with a concurrent insert of the same pair.
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            let existing = find_pair(state, user.user_id, payload.listing_id)
                .await?
                .ok_or(AppError::OrmError(err))?;
            return Ok((
                ApiResponse::success("Already in favorites", Favorite::from(existing)),
                false,
            ));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        favorite_id = %favorite.id,
        listing_id = %favorite.listing_id,
        user_id = %user.user_id,
        "favorite added"
    );

    Ok((
        ApiResponse::success("Added to favorites", Favorite::from(favorite)),
        true,
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Deleted>> {
    let favorite = find_owned::<Favorites, _>(&state.orm, user, id).await?;
    Favorites::delete_by_id(favorite.id).exec(&state.orm).await?;

    tracing::info!(favorite_id = %favorite.id, user_id = %user.user_id, "favorite removed");

    Ok(ApiResponse::success(
        "Removed from favorites",
        Deleted { id: favorite.id },
    ))
}
