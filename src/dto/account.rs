use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Listing;

#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[serde(default, deserialize_with = "crate::dto::trimmed_opt")]
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::trimmed_opt")]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountListings {
    #[schema(value_type = Vec<Listing>)]
    pub items: Vec<Listing>,
}
