use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::account::{AccountListings, UpdateAccountRequest},
    entity::{
        Favorites, Listings, favorites, listings,
        users::{self, ActiveModel, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Deleted},
    services::{
        auth_service::{email_conflict, hash_password, normalize_email},
        listing_service,
    },
    state::AppState,
};

async fn load_account(state: &AppState, user: &AuthUser) -> AppResult<users::Model> {
    Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))
}

pub async fn get_account(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let account = load_account(state, user).await?;
    Ok(ApiResponse::success("Account", User::from(account)))
}

pub async fn update_account(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateAccountRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = load_account(state, user).await?;

    let email = payload.email.as_deref().map(normalize_email);
    if let Some(email) = email.as_deref().filter(|e| *e != existing.email) {
        let taken = Users::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Id.ne(user.user_id))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict("Email is already taken".into()));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(password) = payload.password {
        active.password_hash = Set(hash_password(&password)?);
    }
    active.updated_at = Set(Utc::now().into());

    let account = active.update(&state.orm).await.map_err(email_conflict)?;

    tracing::info!(user_id = %account.id, "account updated");

    Ok(ApiResponse::success("Account updated", User::from(account)))
}

/// Delete the caller's account along with their listings and every favorite
/// that points at them or at those listings.
pub async fn delete_account(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Deleted>> {
    let account = load_account(state, user).await?;

    let txn = state.orm.begin().await?;
    let listing_ids: Vec<Uuid> = Listings::find()
        .select_only()
        .column(listings::Column::Id)
        .filter(listings::Column::OwnerId.eq(account.id))
        .into_tuple()
        .all(&txn)
        .await?;

    Favorites::delete_many()
        .filter(
            Condition::any()
                .add(favorites::Column::UserId.eq(account.id))
                .add(favorites::Column::ListingId.is_in(listing_ids.clone())),
        )
        .exec(&txn)
        .await?;
    Listings::delete_many()
        .filter(listings::Column::OwnerId.eq(account.id))
        .exec(&txn)
        .await?;
    Users::delete_by_id(account.id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        user_id = %account.id,
        listings_removed = listing_ids.len(),
        "account deleted"
    );

    Ok(ApiResponse::success("Account deleted", Deleted { id: account.id }))
}

pub async fn list_account_listings(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AccountListings>> {
    let items = listing_service::list_owned_by(state, user.user_id).await?;
    Ok(ApiResponse::success("Your listings", AccountListings { items }))
}
