use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};
use uuid::Uuid;

use crate::{
    entity::{favorites, listings},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
};

/// A stored resource with a single owning user.
pub trait Owned {
    /// Name used in not-found messages.
    const KIND: &'static str;

    fn owner_id(&self) -> Uuid;
}

impl Owned for listings::Model {
    const KIND: &'static str = "Listing";

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

impl Owned for favorites::Model {
    const KIND: &'static str = "Favorite";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

pub fn ensure_owner<M: Owned>(user: &AuthUser, resource: &M) -> AppResult<()> {
    if resource.owner_id() != user.user_id {
        return Err(AppError::Forbidden(format!(
            "You are not the owner of this {}",
            M::KIND.to_lowercase()
        )));
    }
    Ok(())
}

pub async fn find_or_not_found<E, C>(db: &C, id: Uuid) -> AppResult<E::Model>
where
    E: EntityTrait,
    E::Model: Owned,
    C: ConnectionTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", <E::Model as Owned>::KIND)))
}

/// Load a resource for mutation: `NotFound` when absent, `Forbidden` when the
/// caller is not its owner.
pub async fn find_owned<E, C>(db: &C, user: &AuthUser, id: Uuid) -> AppResult<E::Model>
where
    E: EntityTrait,
    E::Model: Owned,
    C: ConnectionTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let model = find_or_not_found::<E, C>(db, id).await?;
    ensure_owner(user, &model)?;
    Ok(model)
}
