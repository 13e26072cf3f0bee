//! Typed HTTP client for the marketplace API.
//!
//! Front ends go through [`MarketplaceClient`] instead of building requests
//! themselves. Failed calls return [`ClientError::Api`] carrying the envelope
//! message so it can be shown to the user as-is.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dto::{
        account::UpdateAccountRequest,
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        favorites::AddFavoriteRequest,
        listings::{CreateListingRequest, ListingQuery, UpdateListingRequest},
    },
    models::{Favorite, FavoriteWithListing, Listing, User},
    response::{ApiResponse, Deleted},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a failure envelope.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        errors: Option<Value>,
    },

    #[error("response carried no data")]
    EmptyResponse,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone)]
pub struct MarketplaceClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl MarketplaceClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/v1{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope = match serde_json::from_slice::<ApiResponse<T>>(&bytes) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => return Err(err.into()),
            // Proxies in front of the server answer without an envelope.
            Err(_) => {
                return Err(ClientError::Api {
                    status,
                    message: status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string(),
                    errors: None,
                });
            }
        };

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status,
                message: envelope.message,
                errors: envelope.errors,
            });
        }
        envelope.data.ok_or(ClientError::EmptyResponse)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    // Auth

    /// Register and keep the issued token for later calls.
    pub async fn register(&mut self, payload: &RegisterRequest) -> ClientResult<AuthResponse> {
        let resp: AuthResponse = self
            .send_json(Method::POST, "/auth/register", payload)
            .await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    /// Log in and keep the issued token for later calls.
    pub async fn login(&mut self, payload: &LoginRequest) -> ClientResult<AuthResponse> {
        let resp: AuthResponse = self.send_json(Method::POST, "/auth/login", payload).await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    // Account

    pub async fn account(&self) -> ClientResult<User> {
        self.send(self.request(Method::GET, "/account")).await
    }

    pub async fn update_account(&self, payload: &UpdateAccountRequest) -> ClientResult<User> {
        self.send_json(Method::PATCH, "/account", payload).await
    }

    pub async fn delete_account(&mut self) -> ClientResult<Deleted> {
        let deleted = self.send(self.request(Method::DELETE, "/account")).await?;
        self.token = None;
        Ok(deleted)
    }

    pub async fn my_listings(&self) -> ClientResult<Vec<Listing>> {
        self.send(self.request(Method::GET, "/account/listings"))
            .await
    }

    // Listings

    pub async fn listings(&self, query: &ListingQuery) -> ClientResult<Vec<Listing>> {
        self.send(self.request(Method::GET, "/listings").query(query))
            .await
    }

    pub async fn listing(&self, id: Uuid) -> ClientResult<Listing> {
        self.send(self.request(Method::GET, &format!("/listings/{id}")))
            .await
    }

    pub async fn create_listing(&self, payload: &CreateListingRequest) -> ClientResult<Listing> {
        self.send_json(Method::POST, "/listings", payload).await
    }

    pub async fn update_listing(
        &self,
        id: Uuid,
        payload: &UpdateListingRequest,
    ) -> ClientResult<Listing> {
        self.send_json(Method::PATCH, &format!("/listings/{id}"), payload)
            .await
    }

    pub async fn delete_listing(&self, id: Uuid) -> ClientResult<Deleted> {
        self.send(self.request(Method::DELETE, &format!("/listings/{id}")))
            .await
    }

    // Favorites

    pub async fn favorites(&self) -> ClientResult<Vec<FavoriteWithListing>> {
        self.send(self.request(Method::GET, "/favorites")).await
    }

    pub async fn favorite(&self, id: Uuid) -> ClientResult<FavoriteWithListing> {
        self.send(self.request(Method::GET, &format!("/favorites/{id}")))
            .await
    }

    pub async fn add_favorite(&self, listing_id: Uuid) -> ClientResult<Favorite> {
        self.send_json(
            Method::POST,
            "/favorites",
            &AddFavoriteRequest { listing_id },
        )
        .await
    }

    pub async fn remove_favorite(&self, id: Uuid) -> ClientResult<Deleted> {
        self.send(self.request(Method::DELETE, &format!("/favorites/{id}")))
            .await
    }
}
