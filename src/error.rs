use thiserror::Error;

/// Structured error hierarchy for `easyreply`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide how to respond; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),

    // Generic fallthrough (wraps anyhow for interop)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("home directory not found")]
    NoHome,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} API key not set")]
    Auth { provider: String },

    #[error("provider {provider} returned no usable text")]
    EmptyCompletion { provider: String },
}

/// Validation failures caught before any provider call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("email text must not be empty")]
    EmptyEmail,

    #[error("previous response must not be empty")]
    EmptyReply,

    #[error("target sentence must not be empty")]
    EmptySentence,

    #[error("unknown tone: {0} (expected casual, formal, friendly or professional)")]
    UnknownTone(String),
}

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ReplyError>;
