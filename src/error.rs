use async_openai::error::OpenAIError;
use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to generate code")]
    EmptyGeneration,

    #[error("API quota exceeded. Please check your OpenAI billing.")]
    QuotaExceeded,

    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error("Model not available. Please check your OpenAI account access.")]
    ModelUnavailable,

    #[error("Invalid API key. Please check your OpenAI API key.")]
    InvalidCredential,

    #[error("OpenAI API error: {0}")]
    Upstream(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] OpenAIError),

    #[error("HTTP error: {0}")]
    Http(#[from] axum::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Maps a raw upstream failure to its typed variant. Structured error
    /// codes are checked first; the substring fallback on the stringified
    /// error keeps the quota -> rate limit -> model -> key -> generic
    /// precedence, which callers depend on.
    pub fn classify_upstream(self) -> Self {
        let Self::OpenAi(err) = self else {
            return self;
        };

        if let OpenAIError::ApiError(api) = &err {
            match api.code.as_deref() {
                Some("insufficient_quota") => return Self::QuotaExceeded,
                Some("rate_limit_exceeded") => return Self::RateLimited,
                Some("model_not_found") => return Self::ModelUnavailable,
                Some("invalid_api_key") => return Self::InvalidCredential,
                _ => {}
            }
        }

        let text = err.to_string();
        if text.contains("insufficient_quota") {
            Self::QuotaExceeded
        } else if text.contains("429") {
            Self::RateLimited
        } else if text.contains("model_not_found") {
            Self::ModelUnavailable
        } else if text.contains("invalid_api_key") {
            Self::InvalidCredential
        } else {
            Self::Upstream(text)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ModelUnavailable => StatusCode::BAD_REQUEST,
            Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
