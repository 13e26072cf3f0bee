use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entity::enums::{Category, ItemCondition, ListingStatus},
    models::Listing,
};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    #[serde(deserialize_with = "crate::dto::trimmed")]
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[serde(deserialize_with = "crate::dto::trimmed")]
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    pub condition: ItemCondition,
    pub category: Category,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    #[validate(
        length(max = 10, message = "A listing can have at most 10 pictures"),
        custom(function = "validate_pictures")
    )]
    pub pictures: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateListingRequest {
    #[serde(default, deserialize_with = "crate::dto::trimmed_opt")]
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::trimmed_opt")]
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    pub condition: Option<ItemCondition>,
    pub category: Option<Category>,
    pub status: Option<ListingStatus>,
    #[validate(
        length(max = 10, message = "A listing can have at most 10 pictures"),
        custom(function = "validate_pictures")
    )]
    pub pictures: Option<Vec<String>>,
}

fn validate_pictures(pictures: &[String]) -> Result<(), validator::ValidationError> {
    let invalid = pictures
        .iter()
        .any(|p| p.trim().is_empty() || p.len() > 2048);
    if invalid {
        let mut err = validator::ValidationError::new("picture");
        err.message = Some("Picture references must be 1-2048 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Optional filters for the listing index. Every filter is ANDed.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Substring match on the title.
    pub q: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<ItemCondition>,
    pub status: Option<ListingStatus>,
    pub owner_id: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(transparent)]
pub struct ListingList {
    #[schema(value_type = Vec<Listing>)]
    pub items: Vec<Listing>,
}
