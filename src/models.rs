use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    enums::{Category, ItemCondition, ListingStatus},
    favorites, listings, users,
};

/// Public view of an account. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub condition: ItemCondition,
    pub category: Category,
    pub status: ListingStatus,
    pub pictures: Vec<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteWithListing {
    #[serde(flatten)]
    pub favorite: Favorite,
    pub listing: Option<Listing>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<listings::Model> for Listing {
    fn from(model: listings::Model) -> Self {
        // Rows always hold an array of strings; anything else reads as no pictures.
        let pictures = serde_json::from_value(model.pictures).unwrap_or_default();
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            condition: model.condition,
            category: model.category,
            status: model.status,
            pictures,
            owner_id: model.owner_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<favorites::Model> for Favorite {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            listing_id: model.listing_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
