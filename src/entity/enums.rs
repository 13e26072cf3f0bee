use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ItemCondition {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "used")]
    Used,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Category {
    #[sea_orm(string_value = "Electronics")]
    Electronics,
    #[sea_orm(string_value = "Furniture")]
    Furniture,
    #[sea_orm(string_value = "Clothing")]
    Clothing,
    #[sea_orm(string_value = "Books")]
    Books,
    #[sea_orm(string_value = "Sports")]
    Sports,
    #[sea_orm(string_value = "Home")]
    Home,
    #[sea_orm(string_value = "Toys")]
    Toys,
    #[sea_orm(string_value = "Vehicles")]
    Vehicles,
    #[sea_orm(string_value = "Other")]
    Other,
}
