use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        account::{AccountListings, UpdateAccountRequest},
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        favorites::{AddFavoriteRequest, FavoriteList},
        listings::{CreateListingRequest, ListingList, ListingQuery, UpdateListingRequest},
    },
    entity::enums::{Category, ItemCondition, ListingStatus},
    models::{Favorite, FavoriteWithListing, Listing, User},
    response::{ApiResponse, Deleted},
    routes::{account, auth, favorites, health, listings},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        account::get_account,
        account::update_account,
        account::delete_account,
        account::account_listings,
        listings::list_listings,
        listings::create_listing,
        listings::get_listing,
        listings::update_listing,
        listings::delete_listing,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::get_favorite,
        favorites::remove_favorite
    ),
    components(
        schemas(
            User,
            Listing,
            Favorite,
            FavoriteWithListing,
            ItemCondition,
            ListingStatus,
            Category,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateAccountRequest,
            AccountListings,
            CreateListingRequest,
            UpdateListingRequest,
            ListingQuery,
            ListingList,
            AddFavoriteRequest,
            FavoriteList,
            Deleted,
            ApiResponse<User>,
            ApiResponse<Listing>,
            ApiResponse<ListingList>,
            ApiResponse<Favorite>,
            ApiResponse<FavoriteList>,
            ApiResponse<AuthResponse>,
            ApiResponse<Deleted>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Account", description = "Self-account endpoints"),
        (name = "Listings", description = "Listing endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
