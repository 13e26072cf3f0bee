pub mod account_service;
pub mod auth_service;
pub mod favorite_service;
pub mod listing_service;
pub mod ownership;
