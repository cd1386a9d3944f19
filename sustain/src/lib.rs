pub mod activities;
pub mod dashboard;
pub mod session;
pub mod types;

use crate::types::{
    Activity, CreateActivity, DashboardStats, RecommendationList, RegisterUser, TokenResponse,
    User,
};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("{}", detail.as_deref().unwrap_or("authentication required"))]
    Auth { detail: Option<String> },
    #[error("{}", detail.clone().unwrap_or_else(|| format!("request failed with status {status}")))]
    Server { status: u16, detail: Option<String> },
    #[error("{0}")]
    Validation(String),
    #[error("malformed response: {0}")]
    Malformed(#[source] reqwest::Error),
    #[error("failed to persist session token: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl Error {
    /// Backend-supplied error detail, if the response carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Auth { detail } | Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Fills in `fallback` as the detail when the backend supplied none,
    /// so callers see a message suited to the operation that failed.
    #[must_use]
    pub fn with_detail_fallback(self, fallback: &str) -> Self {
        match self {
            Self::Auth { detail: None } => Self::Auth {
                detail: Some(fallback.to_string()),
            },
            Self::Server {
                status,
                detail: None,
            } => Self::Server {
                status,
                detail: Some(fallback.to_string()),
            },
            other => other,
        }
    }
}

/// Error body shape used by the backend. Anything beyond the optional
/// `detail` field is treated as opaque.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct SustainClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl Default for SustainClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SustainClient {
    /// Creates a new `SustainClient` pointed at a local backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "http://localhost:8000/api/".to_string(),
            token: RwLock::new(None),
        }
    }

    /// Sets the API base URL for this client.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the bearer token attached to subsequent requests.
    /// `None` makes subsequent requests unauthenticated.
    pub fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T>(&self, endpoint: &str) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self
            .authorized(self.client.get(format!("{}{}", self.base_url, endpoint)));
        let response = request.send().await.map_err(Error::Network)?;
        Self::decode(response).await
    }

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
        B: serde::ser::Serialize,
    {
        let request = self
            .authorized(self.client.post(format!("{}{}", self.base_url, endpoint)))
            .json(body);
        let response = request.send().await.map_err(Error::Network)?;
        Self::decode(response).await
    }

    async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        let request = self
            .authorized(self.client.delete(format!("{}{}", self.base_url, endpoint)));
        let response = request.send().await.map_err(Error::Network)?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::error_for(response).await)
    }

    async fn decode<T>(response: Response) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            return response.json().await.map_err(Error::Malformed);
        }
        Err(Self::error_for(response).await)
    }

    async fn error_for(response: Response) -> Error {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Error::Auth { detail }
        } else {
            Error::Server {
                status: status.as_u16(),
                detail,
            }
        }
    }

    /// Registers a new user account. Registration alone does not
    /// authenticate; callers sign in afterwards.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn register(&self, user: &RegisterUser) -> Result<User, Error> {
        self.post("register", user).await
    }

    /// Exchanges credentials for a session token. This is the one endpoint
    /// the backend expects form-encoded credentials on, not JSON.
    ///
    /// # Errors
    /// Returns an error if the credentials are rejected, the HTTP request
    /// fails, or the response cannot be parsed.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, Error> {
        let response = self
            .client
            .post(format!("{}login", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(Error::Network)?;
        Self::decode(response).await
    }

    /// Retrieves the profile of the user the current token belongs to.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn current_user(&self) -> Result<User, Error> {
        self.get("users/me").await
    }

    /// Retrieves the signed-in user's activities, freshest first.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn activities(&self) -> Result<Vec<Activity>, Error> {
        self.get("activities").await
    }

    /// Retrieves a single activity by id.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn activity(&self, id: i64) -> Result<Activity, Error> {
        self.get(&format!("activities/{id}")).await
    }

    /// Logs a new activity. Identity is assigned by the backend.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn create_activity(&self, activity: &CreateActivity) -> Result<Activity, Error> {
        self.post("activities", activity).await
    }

    /// Deletes an activity by id. The backend responds with no content.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn delete_activity(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("activities/{id}")).await
    }

    /// Retrieves server-computed dashboard statistics.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        self.get("dashboard").await
    }

    /// Retrieves server-suggested recommendations.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn recommendations(&self) -> Result<RecommendationList, Error> {
        self.get("recommendations").await
    }
}
