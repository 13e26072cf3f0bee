use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::FavoriteWithListing;

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct AddFavoriteRequest {
    pub listing_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteList {
    #[schema(value_type = Vec<FavoriteWithListing>)]
    pub items: Vec<FavoriteWithListing>,
}
