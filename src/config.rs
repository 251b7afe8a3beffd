/// Process-level configuration for the generation provider.
#[derive(Clone, Debug)]
pub struct Config {
    /// API key for the generation endpoint
    pub api_key: String,
    /// Base URL of the generation API
    pub api_base_url: String,
    /// Model name used for exam generation
    pub model_name: String,
    /// HTTP timeout for the single outbound call, in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model_name: "gemini-2.0-flash".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or(default.api_key),
            api_base_url: std::env::var("GEMINI_API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: std::env::var("GEMINI_MODEL_NAME").unwrap_or(default.model_name),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
        }
    }
}
