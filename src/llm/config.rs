/// Default OpenAI-compatible chat completion endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-4o";
/// Default language summaries are written in
pub const DEFAULT_LANGUAGE: &str = "English";

/// Configuration for the summarization endpoint
///
/// Read once at start-up and passed by reference; nothing below this layer
/// looks at the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential (from OPENAI_API_KEY). Absence is reported when a request is built.
    pub api_key: Option<String>,
    /// Chat completion URL (from OPENAI_API_URL)
    pub endpoint: String,
    /// Model id sent with every request (from RECAP_MODEL)
    pub model: String,
    /// Output language for generated summaries (from RECAP_LANGUAGE)
    pub language: String,
}

impl LlmConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("OPENAI_API_KEY"),
            endpoint: non_empty("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: non_empty("RECAP_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            language: non_empty("RECAP_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        }
    }

    /// Create with an explicit credential and endpoint
    pub fn new(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key,
            endpoint: endpoint.into(),
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// The credential, if one is set and not blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
