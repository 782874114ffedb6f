use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Failed to serialize request payload: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Response body is not valid JSON: {0}")]
    DecodeError(#[source] serde_json::Error),

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Serialization,
    Transport,
    Decode,
    Authentication,
    Configuration,
    System,
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::SerializationError(_) => ErrorCategory::Serialization,
            ChatError::TransportError(_) | ChatError::InvalidUrl { .. } => {
                ErrorCategory::Transport
            }
            ChatError::DecodeError(_) => ErrorCategory::Decode,
            ChatError::AuthenticationError { .. } => ErrorCategory::Authentication,
            ChatError::ConfigError { .. }
            | ChatError::InvalidConfigValueError { .. }
            | ChatError::MissingConfigError { .. }
            | ChatError::TomlError(_) => ErrorCategory::Configuration,
            ChatError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Process exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Authentication => 3,
            ErrorCategory::Transport | ErrorCategory::Decode => 4,
            ErrorCategory::Serialization | ErrorCategory::System => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChatError::TransportError(e) if e.is_connect() => {
                "Could not reach the chat server".to_string()
            }
            ChatError::TransportError(_) | ChatError::InvalidUrl { .. } => {
                format!("Request could not be completed: {}", self)
            }
            ChatError::DecodeError(_) => {
                "The server answered with something that is not JSON".to_string()
            }
            ChatError::AuthenticationError { message } => message.clone(),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Serialization => "Check that the payload only contains JSON-representable values",
            ErrorCategory::Transport => "Check that the server is running and --base-url points at it",
            ErrorCategory::Decode => "Make sure you are logged in; the server may have answered with an HTML page",
            ErrorCategory::Authentication => "Check the username and password, or pass --signup to create the account",
            ErrorCategory::Configuration => "Fix the command line flags or the config file",
            ErrorCategory::System => "Check file permissions and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
