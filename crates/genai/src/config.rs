/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default REST base URL (v1beta, where image output is available).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default bound on a single provider call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Connection settings for the Gemini API.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model identifier, e.g. `gemini-2.5-flash-image`.
    pub model: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Upper bound on one `generateContent` call.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                                             |
    /// |-----------------------|----------|-----------------------------------------------------|
    /// | `GEMINI_API_KEY`      | **yes**  | --                                                  |
    /// | `GEMINI_MODEL`        | no       | `gemini-2.5-flash-image`                            |
    /// | `GEMINI_BASE_URL`     | no       | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `GEMINI_TIMEOUT_SECS` | no       | `90`                                                |
    ///
    /// # Panics
    ///
    /// Panics if `GEMINI_API_KEY` is missing or empty, or if the timeout is
    /// not a positive integer.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "GEMINI_API_KEY must not be empty");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GEMINI_TIMEOUT_SECS must be a valid u64");
        assert!(timeout_secs > 0, "GEMINI_TIMEOUT_SECS must be positive");

        Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }
}
