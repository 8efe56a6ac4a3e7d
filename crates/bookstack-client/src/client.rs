//! HTTP client for the gateway API.
//!
//! The client holds the session token and replays it as the `TOKEN`
//! cookie on every request, mirroring what a browser does with the
//! gateway's `Set-Cookie` response.

use parking_lot::RwLock;
use reqwest::header::COOKIE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use bookstack_auth::{Identity, TOKEN_COOKIE};
use bookstack_core::{BookId, CategoryId, Role, UserId};

use crate::types::{BookRecord, CategoryRecord, Totals, UserRecord};

/// Errors returned by [`ApiClient`] calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure reaching the gateway.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with an error envelope.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Message from the error envelope.
        message: String,
    },

    /// The response body did not match the expected envelope shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Convenience result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Where the session token lives between requests.
///
/// [`ApiClient`] is the production implementation; the auth gate only
/// sees this trait so its tests can use an in-memory stand-in.
pub trait TokenTransport: Send + Sync {
    /// The token currently held, if any.
    fn current_token(&self) -> Option<String>;
    /// Hold a new token.
    fn store_token(&self, token: &str);
    /// Drop the held token.
    fn clear_token(&self);
}

/// Response envelope as the gateway emits it.
#[derive(Debug, Deserialize)]
struct WireEnvelope<T> {
    status: String,
    data: Option<T>,
    message: Option<String>,
}

/// HTTP client for the gateway API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the gateway at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.http.request(method, &url);

        if let Some(token) = self.current_token() {
            builder = builder.header(COOKIE, format!("{TOKEN_COOKIE}={token}"));
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let envelope: WireEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !status.is_success() || envelope.status != "Success" {
            return Err(ClientError::Api {
                status,
                message: envelope
                    .message
                    .unwrap_or_else(|| "no message".to_string()),
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Decode("missing data field".to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in and hold the returned session token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 403 when credentials are
    /// rejected.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserRecord> {
        let record: UserRecord = self
            .request(
                Method::POST,
                "/api/login",
                Some(&json!({"username": username, "password": password})),
            )
            .await?;

        // The session token is the user's primary key.
        self.store_token(&record.id.to_string());
        tracing::debug!(user_id = %record.id, "Logged in");

        Ok(record)
    }

    /// Log out and drop the held token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the gateway is unreachable; the
    /// local token is dropped regardless.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .request::<serde_json::Value, ()>(Method::POST, "/api/logout", None)
            .await;
        self.clear_token();
        result.map(|_| ())
    }

    /// Resolve the held token to an identity.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 401 when the token is
    /// missing or stale.
    pub async fn whoami(&self) -> Result<Identity> {
        self.get("/api/whoami").await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List all users. ADMIN only.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 403 for non-admin callers.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.get("/api/users").await
    }

    /// Create a user account. ADMIN only.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 409 on a username conflict.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        role: Role,
    ) -> Result<UserRecord> {
        self.request(
            Method::POST,
            "/api/users",
            Some(&json!({
                "username": username,
                "password": password,
                "firstName": first_name,
                "lastName": last_name,
                "role": role,
            })),
        )
        .await
    }

    /// Update a user and set its complete category link set. ADMIN only.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown users or
    /// categories.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_user(
        &self,
        user_id: UserId,
        username: &str,
        password: Option<&str>,
        first_name: &str,
        last_name: &str,
        role: Role,
        category_ids: &[CategoryId],
    ) -> Result<UserRecord> {
        self.request(
            Method::PUT,
            &format!("/api/users/{user_id}"),
            Some(&json!({
                "username": username,
                "password": password,
                "firstName": first_name,
                "lastName": last_name,
                "role": role,
                "categoryIds": category_ids,
            })),
        )
        .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 401 without a session.
    pub async fn list_categories(&self) -> Result<Vec<CategoryRecord>> {
        self.get("/api/categories").await
    }

    /// Create a category. ADMIN only.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 403 for non-admin callers.
    pub async fn create_category(&self, name: &str) -> Result<CategoryRecord> {
        self.request(
            Method::POST,
            "/api/categories",
            Some(&json!({"name": name})),
        )
        .await
    }

    /// Rename a category. ADMIN only.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown categories.
    pub async fn update_category(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> Result<CategoryRecord> {
        self.request(
            Method::PUT,
            &format!("/api/categories/{category_id}"),
            Some(&json!({"name": name})),
        )
        .await
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// List active books visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 401 without a session.
    pub async fn list_books(&self) -> Result<Vec<BookRecord>> {
        self.get("/api/books").await
    }

    /// Create a book.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown categories.
    pub async fn create_book(
        &self,
        title: &str,
        author: &str,
        description: &str,
        category_id: CategoryId,
    ) -> Result<BookRecord> {
        self.request(
            Method::POST,
            "/api/books",
            Some(&json!({
                "title": title,
                "author": author,
                "description": description,
                "categoryId": category_id,
            })),
        )
        .await
    }

    /// Update a book.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown books.
    pub async fn update_book(
        &self,
        book_id: BookId,
        title: &str,
        author: &str,
        description: &str,
        category_id: CategoryId,
    ) -> Result<BookRecord> {
        self.request(
            Method::PUT,
            &format!("/api/books/{book_id}"),
            Some(&json!({
                "title": title,
                "author": author,
                "description": description,
                "categoryId": category_id,
            })),
        )
        .await
    }

    /// Soft-delete a book.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown books.
    pub async fn delete_book(&self, book_id: BookId) -> Result<BookRecord> {
        self.request::<BookRecord, ()>(Method::DELETE, &format!("/api/books/{book_id}"), None)
            .await
    }

    /// Fetch the dashboard totals. ADMIN only.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 403 for non-admin callers.
    pub async fn book_totals(&self) -> Result<Totals> {
        self.get("/api/books/totals").await
    }
}

impl TokenTransport for ApiClient {
    fn current_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn store_token(&self, token: &str) {
        *self.token.write() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.write() = None;
    }
}
