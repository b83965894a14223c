//! Responses API LLM Gateway implementation

use super::protocol::{ErrorBody, ResponsesRequest, ResponsesResponse};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use reviewer_application::ports::llm_gateway::{GatewayError, LlmGateway, StructuredRequest};
use reviewer_domain::core::string::truncate;
use tracing::{debug, info, warn};

/// Longest error body excerpt carried in a [`GatewayError`]
const MAX_ERROR_BODY: usize = 300;

/// LLM Gateway for OpenAI-compatible `/responses` endpoints (OpenRouter by default)
pub struct ResponsesGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl ResponsesGateway {
    /// Create a gateway for `base_url` with an already resolved key.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            api_key_env: crate::config::DEFAULT_API_KEY_ENV.to_string(),
        }
    }

    /// Create from the `[provider]` config section, reading the key from
    /// the configured environment variable.
    pub fn from_config(config: &FileProviderConfig) -> Self {
        let mut gateway = Self::new(config.base_url.clone(), config.resolve_api_key());
        gateway.api_key_env = config.api_key_env.clone();
        gateway
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Map a transport-level failure
fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Map a non-2xx response
fn status_error(status: StatusCode, body: &str, model: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| truncate(body.trim(), MAX_ERROR_BODY));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::MissingCredentials(
            format!("provider rejected the API key ({}): {}", status.as_u16(), message),
        ),
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(format!("{}: {}", model, message)),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

/// Pull the structured payload out of a successful body
fn extract_payload(body: &str) -> Result<String, GatewayError> {
    let response: ResponsesResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::RequestFailed(format!("invalid response body: {}", e)))?;

    if let Some(error) = &response.error {
        return Err(GatewayError::RequestFailed(error.message.clone()));
    }

    match response.payload() {
        Some(payload) => Ok(payload.to_string()),
        None => match response.refusal() {
            Some(refusal) => Err(GatewayError::RequestFailed(format!(
                "model refused: {}",
                refusal
            ))),
            None => Err(GatewayError::EmptyResponse),
        },
    }
}

#[async_trait]
impl LlmGateway for ResponsesGateway {
    async fn respond(&self, request: &StructuredRequest) -> Result<String, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GatewayError::MissingCredentials(format!(
                "set {} or provider.api_key",
                self.api_key_env
            )));
        };

        let model = request.model.to_string();
        let body = ResponsesRequest::from(request);
        info!("Responses API call to {} ({})", model, request.schema.name);
        debug!("Prompt: {} bytes", request.prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let error = status_error(status, &text, &model);
            warn!("Responses API call to {} failed: {}", model, error);
            return Err(error);
        }

        let payload = extract_payload(&text)?;
        debug!("{} returned {} bytes", model, payload.len());
        Ok(payload)
    }
}
