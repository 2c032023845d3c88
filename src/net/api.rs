//! REST API client for the file-sharing server.
//!
//! DESIGN
//! ======
//! `DashboardApi` is the seam the controller talks through; `HttpApi` is the
//! reqwest implementation and tests substitute a scripted mock. Each method
//! returns exactly what its flow needs: signup and upload read the JSON
//! `{message}` whatever the status, login discards rejected bodies, listing
//! and download turn non-2xx into `ApiError::Status`.
//!
//! Body parsing lives in pure functions so it can be tested without a socket.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::config::ClientConfig;
use super::types::{
    ApiError, FileListing, LoginBody, LoginReply, LoginRequest, MessageBody, Reply, SelectedFile, SignupRequest,
};

pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const LIST_FILES_PATH: &str = "/list_files";
pub const UPLOAD_PATH: &str = "/upload";
pub const DOWNLOAD_PREFIX: &str = "/download/";

/// Multipart field the server reads the upload from.
pub const UPLOAD_FIELD: &str = "file";

/// Relative download URL for a listing token.
#[must_use]
pub fn download_path(download_link: &str) -> String {
    format!("{DOWNLOAD_PREFIX}{download_link}")
}

// =============================================================================
// TRAIT
// =============================================================================

/// Async transport for the dashboard endpoints. Enables mocking in tests.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// `POST /signup` with a JSON body.
    async fn signup(&self, request: &SignupRequest) -> Result<Reply<MessageBody>, ApiError>;

    /// `POST /login` with a JSON body.
    async fn login(&self, request: &LoginRequest) -> Result<LoginReply, ApiError>;

    /// `GET /list_files`.
    async fn list_files(&self) -> Result<FileListing, ApiError>;

    /// `POST /upload` as multipart with the file under [`UPLOAD_FIELD`].
    async fn upload(&self, file: &SelectedFile) -> Result<Reply<MessageBody>, ApiError>;

    /// `GET /download/{download_link}`, returning the raw file bytes.
    async fn download(&self, download_link: &str) -> Result<Vec<u8>, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpApi {
    /// Build a client for `config.base_url` with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config: config.clone() })
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        request.send().await.map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpApi {
    async fn signup(&self, request: &SignupRequest) -> Result<Reply<MessageBody>, ApiError> {
        let response = self.send(self.http.post(self.url(SIGNUP_PATH)).json(request)).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(%status, "signup response");
        Ok(Reply { status, body: parse_json(&text)? })
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginReply, ApiError> {
        let response = self.send(self.http.post(self.url(LOGIN_PATH)).json(request)).await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "login response");
        if !status.is_success() {
            return Ok(LoginReply::Rejected { status: status.as_u16() });
        }
        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let body: LoginBody = parse_json(&text)?;
        Ok(LoginReply::Accepted(body))
    }

    async fn list_files(&self) -> Result<FileListing, ApiError> {
        let response = self.send(self.http.get(self.url(LIST_FILES_PATH))).await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "list_files response");
        if !status.is_success() {
            return Err(status_error(status));
        }
        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        parse_json(&text)
    }

    async fn upload(&self, file: &SelectedFile) -> Result<Reply<MessageBody>, ApiError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);
        let response = self.send(self.http.post(self.url(UPLOAD_PATH)).multipart(form)).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(%status, filename = %file.name, "upload response");
        Ok(Reply { status, body: parse_json(&text)? })
    }

    async fn download(&self, download_link: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.send(self.http.get(self.url(&download_path(download_link)))).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// reqwest does not expose the reason phrase the server sent, so the
/// canonical phrase for the status code stands in for it.
fn status_error(status: StatusCode) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_owned(),
    }
}
