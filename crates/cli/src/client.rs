//! HTTP client for the Atelier API.
//!
//! Thin typed wrapper over `reqwest`. Response shapes mirror the API's
//! camelCase JSON; API-level failures surface as [`ClientError::Api`] with
//! the server's message and status.

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use atelier_core::ProductId;

/// Errors from talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("{message} (status {status})")]
    Api { status: StatusCode, message: String },
}

/// A catalogue product as served by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub designer_notes: String,
}

/// A server cart line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
}

/// The server cart (or its `{"items": []}` zero state).
#[derive(Debug, Clone, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
}

/// The logged-in user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct RemoveItemBody {
    #[allow(dead_code)]
    message: String,
    cart: CartView,
}

/// Typed API client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`, optionally authenticated.
    #[must_use]
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Base URL from `ATELIER_API_URL`, default `http://localhost:5000`.
    #[must_use]
    pub fn base_url_from_env() -> String {
        std::env::var("ATELIER_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Register a new account; returns the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` for validation failures and duplicate emails.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/auth/register")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let body: MessageBody = decode(response).await?;
        Ok(body.message)
    }

    /// Login; returns the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with a generic message on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let body: TokenBody = decode(response).await?;
        Ok(body.token)
    }

    /// Fetch the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` (401) without a valid token.
    pub async fn profile(&self) -> Result<ProfileView, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/auth/user")
            .send()
            .await?;

        decode(response).await
    }

    /// List the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport or API failure.
    pub async fn products(&self) -> Result<Vec<ProductView>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/products")
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` (404) for an unknown product.
    pub async fn product(&self, id: ProductId) -> Result<ProductView, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/api/products/{id}"))
            .send()
            .await?;

        decode(response).await
    }

    /// Add a product to the server cart.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` for unknown products or a missing token.
    pub async fn cart_add(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartView, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/api/cart")
            .json(&serde_json::json!({
                "productId": product_id,
                "quantity": quantity,
            }))
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch the server cart (zero state included).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` (401) without a valid token.
    pub async fn cart_fetch(&self) -> Result<CartView, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/api/cart/user-cart")
            .send()
            .await?;

        decode(response).await
    }

    /// Remove a product from the server cart.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` (404) when the user has no cart.
    pub async fn cart_remove(&self, product_id: ProductId) -> Result<CartView, ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/api/cart/item/{product_id}"))
            .send()
            .await?;

        let body: RemoveItemBody = decode(response).await?;
        Ok(body.cart)
    }
}

/// Decode a success body, or surface the API's error message.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = response
        .json::<MessageBody>()
        .await
        .map_or_else(|_| "request failed".to_owned(), |body| body.message);

    Err(ClientError::Api { status, message })
}
