//! REST adapter for the game backend

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use nanotour_shared::{
    BattleResultResponse, CreateSessionRequest, CreateUserRequest, ErrorResponse,
    GenerateCharacterRequest, HealthResponse, JoinSessionRequest, SessionResponse,
    StartRoundResponse, UpdateSessionRequest, UserResponse,
};

use crate::config::PlayerConfig;
use crate::ports::outbound::{ApiError, ApiPort, GeneratedImage};

const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

/// `ApiPort` backed by `reqwest`
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: Url,
}

impl ApiAdapter {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.http_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Route URL under the base path. Each segment is percent-encoded, so
    /// ids cannot add path, query or fragment parts. An empty last segment
    /// yields a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Build an `ApiError::Status`, preferring the backend's `detail` text
fn status_error(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.message())
        .unwrap_or_else(|_| body.trim().to_string());
    ApiError::Status { status, detail }
}

fn content_type_or_png(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
        .to_string()
}

#[async_trait]
impl ApiPort for ApiAdapter {
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, ApiError> {
        let url = self.endpoint(&["users", ""])?;
        self.json(self.client.post(url).json(&request)).await
    }

    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionResponse, ApiError> {
        let url = self.endpoint(&["session", ""])?;
        self.json(self.client.post(url).json(&request)).await
    }

    async fn join_session(
        &self,
        session_id: String,
        request: JoinSessionRequest,
    ) -> Result<SessionResponse, ApiError> {
        let url = self.endpoint(&["session", "join", &session_id])?;
        self.json(self.client.post(url).json(&request)).await
    }

    async fn update_session(
        &self,
        session_id: String,
        request: UpdateSessionRequest,
    ) -> Result<SessionResponse, ApiError> {
        let url = self.endpoint(&["session", &session_id])?;
        self.json(self.client.put(url).json(&request)).await
    }

    async fn get_session(&self, session_id: String) -> Result<SessionResponse, ApiError> {
        let url = self.endpoint(&["session", &session_id])?;
        self.json(self.client.get(url)).await
    }

    async fn start_round(&self, session_id: String) -> Result<StartRoundResponse, ApiError> {
        let url = self.endpoint(&["session", "start-round", &session_id])?;
        self.json(self.client.post(url)).await
    }

    async fn generate_character(
        &self,
        request: GenerateCharacterRequest,
    ) -> Result<GeneratedImage, ApiError> {
        let url = self.endpoint(&["generate", ""])?;
        let response = self.send(self.client.post(url).json(&request)).await?;

        let content_type = content_type_or_png(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ApiError::Decode("Empty image body".to_string()));
        }

        Ok(GeneratedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    async fn get_battle_result(
        &self,
        session_id: String,
    ) -> Result<BattleResultResponse, ApiError> {
        let url = self.endpoint(&["session", "result", &session_id])?;
        self.json(self.client.get(url)).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.endpoint(&["api", "health"])?;
        self.json(self.client.get(url)).await
    }
}
