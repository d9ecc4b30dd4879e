use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// S3 bucket holding the todo document (default: "todovault")
    /// Note: Only used when the `s3` feature is enabled.
    #[allow(dead_code)]
    pub bucket: String,
    /// Storage key of the todo document (default: "todos.json")
    pub object_key: String,
    /// Todos per page on list responses (default: 10)
    pub page_size: usize,
    /// OpenAI API key for the assist endpoints (default: empty)
    pub openai_api_key: String,
    /// OpenAI chat-completions endpoint
    pub openai_api_url: String,
    /// Model used for assist completions (default: "gpt-3.5-turbo")
    pub openai_model: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TODO_BUCKET` - S3 bucket name (default: "todovault")
    /// - `TODO_OBJECT_KEY` - Key of the todo document (default: "todos.json")
    /// - `PAGE_SIZE` - Todos per page (default: 10)
    /// - `OPENAI_API_KEY` - API key for assist endpoints (default: empty)
    /// - `OPENAI_API_URL` - Chat-completions endpoint
    /// - `OPENAI_MODEL` - Completion model (default: "gpt-3.5-turbo")
    pub fn from_env() -> Self {
        Self {
            bucket: env::var("TODO_BUCKET").unwrap_or_else(|_| "todovault".to_string()),
            object_key: env::var("TODO_OBJECT_KEY").unwrap_or_else(|_| "todos.json".to_string()),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(10),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
