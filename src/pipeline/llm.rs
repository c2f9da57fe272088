//! Vision-model interaction: build the chat request and call the endpoint.
//!
//! The wire format is the OpenAI-style `/chat/completions` shape: one user
//! message carrying two content parts, the fixed instruction prompt and the
//! page image as a base64 data URL. The response's first choice is the
//! extracted text.
//!
//! There is deliberately no retry, backoff, or timeout here: a failed or
//! stalled call surfaces (or blocks) exactly as-is and the run terminates
//! with whatever pages were already emitted.

use crate::config::ExtractionConfig;
use crate::error::Pdf2TextError;
use crate::pipeline::encode::EncodedPage;
use crate::prompts::PAGE_PROMPT;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The seam between the pipeline and the remote model.
///
/// Production uses [`VisionClient`]; tests inject a stub via
/// [`ExtractionConfig::extractor`] to exercise the pipeline without a
/// network.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text of one page image. `page_num` is 1-based and is
    /// only used to label errors.
    async fn extract_page(
        &self,
        page_num: usize,
        image: &EncodedPage,
    ) -> Result<String, Pdf2TextError>;
}

// ── Wire format ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Build the one-page request body: a single user message with the fixed
/// prompt and the image data URL.
fn build_request<'a>(model: &'a str, data_url: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![Message {
            role: "user",
            content: vec![
                ContentPart::Text { text: PAGE_PROMPT },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: data_url },
                },
            ],
        }],
    }
}

/// Pull the extracted text out of a parsed response.
fn first_choice_text(response: ChatResponse, page_num: usize) -> Result<String, Pdf2TextError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| Pdf2TextError::MalformedResponse {
            page: page_num,
            detail: "response contained no choices with message content".to_string(),
        })
}

// ── Client ───────────────────────────────────────────────────────────────

/// reqwest-based [`TextExtractor`] talking to a chat-completions endpoint.
///
/// Construction resolves the API key, base URL, and model once (explicit >
/// environment > default per field) and fails with
/// [`Pdf2TextError::MissingApiKey`] when no key is available — before any
/// rendering or network call is made.
#[derive(Debug)]
pub struct VisionClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl VisionClient {
    /// Build a client from the configuration, resolving credentials now.
    pub fn new(config: &ExtractionConfig) -> Result<Self, Pdf2TextError> {
        let api_key = config.resolved_api_key()?;
        let base_url = config.resolved_base_url();
        let model = config.resolved_model();

        debug!("Vision client: model={}, base_url={}", model, base_url);

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model,
        })
    }

    /// The model identifier this client sends with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextExtractor for VisionClient {
    async fn extract_page(
        &self,
        page_num: usize,
        image: &EncodedPage,
    ) -> Result<String, Pdf2TextError> {
        let request = build_request(&self.model, &image.data_url);
        debug!("Page {}: requesting extraction from {}", page_num, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Pdf2TextError::ApiRequestFailed {
                page: page_num,
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Pdf2TextError::ApiStatus {
                page: page_num,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| Pdf2TextError::MalformedResponse {
                    page: page_num,
                    detail: e.to_string(),
                })?;

        first_choice_text(parsed, page_num)
    }
}
