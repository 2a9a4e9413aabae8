use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::{Echo, Encoding, Form, RawRecord};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into().trim_end_matches('/').to_string(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn json_request(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> ReqwestResult {
        let request = self
            .inner_client
            .request(method, self.format_url(path))
            .json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Fetch a whole collection as raw rows.
    pub async fn list(
        &self,
        path: &str,
    ) -> Result<Vec<RawRecord>, ClientError> {
        tracing::debug!(path, "GET collection");
        let response = self.empty_get(path).await?;
        let body: Value = ok_body(response).await?;
        RawRecord::list_from(body).ok_or_else(|| {
            ClientError::Malformed(format!(
                "{path}: expected a list of records"
            ))
        })
    }

    /// Send a create or update form, picking JSON or multipart from its
    /// contents.
    pub async fn send_form(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<Echo, ClientError> {
        let encoding = form.encoding();
        tracing::debug!(%method, path, ?encoding, "sending form");
        let request = self.inner_client.request(method, self.format_url(path));
        let request = match encoding {
            Encoding::Json => request.json(&form.to_json()),
            Encoding::Multipart => request.multipart(form.to_multipart()?),
        };

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await?;
        ok_echo(response).await
    }

    /// `POST` a JSON body to an action endpoint (delete, push send).
    pub async fn post(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(), ClientError> {
        tracing::debug!(path, "POST action");
        let response = self.json_request(Method::POST, path, body).await?;
        ok_empty(response).await
    }

    /// `POST` a JSON body and keep whatever the server answered.
    pub async fn post_for_echo(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Echo, ClientError> {
        let response = self.json_request(Method::POST, path, body).await?;
        ok_echo(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{}", display_api_error(.0, .1))]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    /// The server answered 2xx with a body we could not understand.
    #[error("Unexpected response from server: {0}")]
    Malformed(String),
    #[error("Invalid upload {0}")]
    Upload(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }
}

fn display_api_error(status: &StatusCode, text: &str) -> String {
    if text.trim().is_empty() {
        format!("Request failed with status {status}")
    } else {
        text.to_string()
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ClientError::Malformed(e.to_string()))
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}

/// Accept any successful body. Mutation endpoints often answer with a bare
/// message, which is not an error.
pub async fn ok_echo(response: reqwest::Response) -> Result<Echo, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    let text = response.text().await?;
    Ok(Echo::new(serde_json::from_str(&text).unwrap_or(Value::Null)))
}
