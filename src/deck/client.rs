use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::db::DbPool;
use crate::errors::{ApiErrorResponse, AppError};
use crate::models::slide::{self, NewSlide, Slide, SlidePatch};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Failure of a round-trip to the slide store, as seen by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The store could not be reached or answered with something unreadable.
    Transport(String),
    NotFound,
    Validation(String),
    Server { status: u16, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Transport error: {e}"),
            ApiError::NotFound => write!(f, "Slide not found"),
            ApiError::Validation(e) => write!(f, "Validation failed: {e}"),
            ApiError::Server { status, message } => write!(f, "Server error {status}: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound => ApiError::NotFound,
            AppError::Validation(details) => ApiError::Validation(details),
            other => ApiError::Server {
                status: 500,
                message: other.to_string(),
            },
        }
    }
}

/// The slide store operations the deck controller depends on.
#[async_trait]
pub trait SlideApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Slide>, ApiError>;
    async fn create(&self, input: &NewSlide) -> Result<Slide, ApiError>;
    async fn update(&self, id: i64, patch: &SlidePatch) -> Result<Slide, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// Talks to the JSON API under `{base_url}/api/slides`.
#[derive(Debug, Clone)]
pub struct HttpSlideApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSlideApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpSlideApi {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL from `SLIDES_API_URL`, falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let base_url = std::env::var("SLIDES_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn slides_url(&self) -> String {
        format!("{}/api/slides", self.base_url)
    }

    fn slide_url(&self, id: i64) -> String {
        format!("{}/api/slides/{id}", self.base_url)
    }
}

/// Turn a non-success status into the matching [`ApiError`], reading the
/// `{error, details}` body when there is one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Option<ApiErrorResponse> = response.json().await.ok();
    let err = match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::BAD_REQUEST => ApiError::Validation(
            body.map(|b| b.details.unwrap_or(b.error))
                .unwrap_or_else(|| "Bad request".to_string()),
        ),
        _ => ApiError::Server {
            status: status.as_u16(),
            message: body.map(|b| b.error).unwrap_or_else(|| status.to_string()),
        },
    };
    Err(err)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Transport(format!("Unreadable response: {e}")))
}

#[async_trait]
impl SlideApi for HttpSlideApi {
    async fn list(&self) -> Result<Vec<Slide>, ApiError> {
        let response = self.client.get(self.slides_url()).send().await?;
        read_json(response).await
    }

    async fn create(&self, input: &NewSlide) -> Result<Slide, ApiError> {
        let response = self.client.post(self.slides_url()).json(input).send().await?;
        read_json(response).await
    }

    async fn update(&self, id: i64, patch: &SlidePatch) -> Result<Slide, ApiError> {
        let response = self.client.put(self.slide_url(id)).json(patch).send().await?;
        read_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.client.delete(self.slide_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Runs the store operations in-process against a pool.
#[derive(Debug, Clone)]
pub struct StoreSlideApi {
    pool: DbPool,
}

impl StoreSlideApi {
    pub fn new(pool: DbPool) -> Self {
        StoreSlideApi { pool }
    }
}

#[async_trait]
impl SlideApi for StoreSlideApi {
    async fn list(&self) -> Result<Vec<Slide>, ApiError> {
        Ok(slide::list(&self.pool).await?)
    }

    async fn create(&self, input: &NewSlide) -> Result<Slide, ApiError> {
        Ok(slide::create(&self.pool, input).await?)
    }

    async fn update(&self, id: i64, patch: &SlidePatch) -> Result<Slide, ApiError> {
        Ok(slide::update(&self.pool, id, patch).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        Ok(slide::delete(&self.pool, id).await?)
    }
}
