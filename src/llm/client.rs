use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::RecapError;
use crate::llm::{LlmConfig, SummarizationRequest, SummaryMode, SummaryRequestBuilder};

/// Raw HTTP reply from the completion endpoint
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body to the completion endpoint
///
/// Implementations report connection failures and timeouts as
/// `RecapError::Network`; any HTTP status is returned as a reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpReply, RecapError>;
}

/// Production transport backed by reqwest
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpReply, RecapError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .header("content-type", "application/json")
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| describe_transport_error(&e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| describe_transport_error(&e, timeout))?;

        Ok(HttpReply { status, body })
    }
}

fn describe_transport_error(error: &reqwest::Error, timeout: Duration) -> RecapError {
    if error.is_timeout() {
        RecapError::Network(format!(
            "request timed out after {}s: {}",
            timeout.as_secs(),
            error
        ))
    } else {
        RecapError::Network(format!("failed to reach completion endpoint: {}", error))
    }
}

/// Sends summarization requests and unwraps the completion text
pub struct SummaryClient<T: ChatTransport = ReqwestTransport> {
    transport: T,
    config: LlmConfig,
}

impl SummaryClient<ReqwestTransport> {
    pub fn new(config: LlmConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: ChatTransport> SummaryClient<T> {
    pub fn with_transport(config: LlmConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Build the request for `mode` and send it
    pub async fn summarize(
        &self,
        mode: &SummaryMode<'_>,
        transcript: &str,
    ) -> Result<String, RecapError> {
        let request = SummaryRequestBuilder::new(&self.config).build(mode, transcript)?;
        info!(
            "Requesting {} summary from {} (timeout {}s)",
            mode.name(),
            self.config.endpoint,
            request.timeout.as_secs()
        );
        self.send(&request).await
    }

    /// Send a built request and return the completion content unmodified
    ///
    /// Failures are returned as-is; there is no retry.
    pub async fn send(&self, request: &SummarizationRequest) -> Result<String, RecapError> {
        let bearer = self.config.credential().ok_or_else(|| {
            RecapError::Config("API key is not configured; set OPENAI_API_KEY".to_string())
        })?;

        let body = request_body(request);

        let reply = self
            .transport
            .post_json(&self.config.endpoint, bearer, &body, request.timeout)
            .await?;

        if !reply.is_success() {
            warn!("Completion endpoint returned status {}", reply.status);
            return Err(RecapError::Network(format!(
                "completion endpoint returned {}: {}",
                reply.status, reply.body
            )));
        }

        extract_content(&reply.body)
    }
}

/// Pull `choices[0].message.content` out of a completion response body
pub fn extract_content(body: &str) -> Result<String, RecapError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        RecapError::ResponseFormat(format!("unexpected response body: {}", e))
    })?;

    let choices = response.choices.ok_or_else(|| {
        RecapError::ResponseFormat("response is missing the `choices` field".to_string())
    })?;

    choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| {
            RecapError::ResponseFormat(
                "response is missing `choices[0].message.content`".to_string(),
            )
        })
}

/// Chat completion body: model, system + user messages, sampling parameters
fn request_body(request: &SummarizationRequest) -> serde_json::Value {
    serde_json::json!({
        "model": request.model,
        "messages": [
            {"role": "system", "content": request.system_prompt},
            {"role": "user", "content": request.user_prompt},
        ],
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
