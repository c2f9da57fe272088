//! Configuration for a PDF-to-text extraction run.
//!
//! All behaviour is controlled through [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. The three remote-endpoint fields (API key,
//! base URL, model) each resolve independently with the same precedence:
//!
//! 1. explicit value set on the config,
//! 2. the corresponding `OPENAI_*` environment variable,
//! 3. the built-in default (the API key has none — a missing key is an
//!    error at client construction, never at first use).
//!
//! Precedence is implemented by the small pure function [`resolve_field`]
//! rather than hidden fallback chaining, so it can be unit-tested without
//! mutating process environment variables.

use crate::error::Pdf2TextError;
use crate::pipeline::llm::TextExtractor;
use std::fmt;
use std::sync::Arc;

/// Environment variable consulted when no explicit API key is set.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable consulted when no explicit base URL is set.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Environment variable consulted when no explicit model is set.
pub const MODEL_ENV: &str = "OPENAI_MODEL";

/// Default chat-completions endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default vision-capable model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for a PDF-to-text extraction.
///
/// Built via [`ExtractionConfig::builder()`] or [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use vision_pdf2text::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .api_key("sk-test")
///     .model("gpt-4o")
///     .build();
/// ```
#[derive(Clone, Default)]
pub struct ExtractionConfig {
    /// Explicit API key. Falls back to `OPENAI_API_KEY`; no default.
    pub api_key: Option<String>,

    /// Explicit endpoint root, e.g. `https://api.openai.com/v1`.
    /// Falls back to `OPENAI_BASE_URL`, then [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,

    /// Explicit model identifier, e.g. `gpt-4o-mini`.
    /// Falls back to `OPENAI_MODEL`, then [`DEFAULT_MODEL`].
    pub model: Option<String>,

    /// Pre-constructed extractor. Takes precedence over the reqwest-based
    /// client, in which case no API key is needed. Used by tests to stub
    /// out the remote call.
    pub extractor: Option<Arc<dyn TextExtractor>>,
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("extractor", &self.extractor.as_ref().map(|_| "<dyn TextExtractor>"))
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the API key: explicit > `OPENAI_API_KEY`.
    ///
    /// There is deliberately no default; a run without a key must fail
    /// before any rendering or network work starts.
    pub fn resolved_api_key(&self) -> Result<String, Pdf2TextError> {
        resolve_field(self.api_key.as_deref(), env_var(API_KEY_ENV).as_deref(), None)
            .ok_or(Pdf2TextError::MissingApiKey)
    }

    /// Resolve the endpoint root: explicit > `OPENAI_BASE_URL` > default.
    pub fn resolved_base_url(&self) -> String {
        resolve_field(
            self.base_url.as_deref(),
            env_var(BASE_URL_ENV).as_deref(),
            Some(DEFAULT_BASE_URL),
        )
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Resolve the model identifier: explicit > `OPENAI_MODEL` > default.
    pub fn resolved_model(&self) -> String {
        resolve_field(
            self.model.as_deref(),
            env_var(MODEL_ENV).as_deref(),
            Some(DEFAULT_MODEL),
        )
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.config.extractor = Some(extractor);
        self
    }

    /// Build the configuration. Credential resolution happens later, when
    /// the extraction client is constructed, so a key-less config is fine
    /// for image-saving runs and stubbed extractors.
    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

/// Pick the first usable value: explicit > environment > default.
///
/// Empty strings count as unset at every level, matching shell usage like
/// `OPENAI_BASE_URL= pdf2text doc.pdf`.
pub fn resolve_field(
    explicit: Option<&str>,
    env: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    explicit
        .filter(|s| !s.is_empty())
        .or(env.filter(|s| !s.is_empty()))
        .or(default)
        .map(str::to_owned)
}

/// Read an environment variable, treating absence and non-UTF-8 alike.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
