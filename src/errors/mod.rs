/// Error taxonomy for the homework bot
///
/// Every failure the bot can observe is one of these variants. The poll loop
/// turns any of them into display text exactly once, at its outer boundary.
use serde_json::Value;

// =============================================================================
// ERROR KINDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Startup-only: credentials or settings unusable
    Fatal,
    /// Network failure talking to the homework API
    Transport,
    /// Non-success HTTP status
    Protocol,
    /// Payload does not have the documented shape
    Shape,
    /// Payload is well-formed but carries an unknown value
    Domain,
    /// Outbound message could not be delivered
    Delivery,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Fatal => "fatal",
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Shape => "shape",
            ErrorKind::Domain => "domain",
            ErrorKind::Delivery => "delivery",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BotError {
    #[error("Missing or empty environment variables: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Endpoint {endpoint} unavailable (headers: {headers}, from_date: {timestamp}): {reason}")]
    EndpointUnavailable {
        endpoint: String,
        headers: String,
        timestamp: i64,
        reason: String,
    },

    #[error("Endpoint {endpoint} returned HTTP {status} (headers: {headers}, from_date: {timestamp})")]
    HttpStatus {
        endpoint: String,
        headers: String,
        timestamp: i64,
        status: u16,
    },

    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Unexpected type for {context}: expected {expected}, got {actual}")]
    UnexpectedType {
        context: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Missing key \"{key}\" in {context}")]
    MissingKey { key: String, context: String },

    #[error("Unknown homework status \"{status}\"")]
    UnknownStatus { status: String },

    #[error("Failed to deliver Telegram message: {0}")]
    Delivery(String),
}

pub type BotResult<T> = std::result::Result<T, BotError>;

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::MissingCredentials { .. } | BotError::Config(_) => ErrorKind::Fatal,
            BotError::EndpointUnavailable { .. } => ErrorKind::Transport,
            BotError::HttpStatus { .. } => ErrorKind::Protocol,
            BotError::InvalidJson(_)
            | BotError::UnexpectedType { .. }
            | BotError::MissingKey { .. } => ErrorKind::Shape,
            BotError::UnknownStatus { .. } => ErrorKind::Domain,
            BotError::Delivery(_) => ErrorKind::Delivery,
        }
    }

    pub fn missing_key(key: impl Into<String>, context: impl Into<String>) -> Self {
        BotError::MissingKey {
            key: key.into(),
            context: context.into(),
        }
    }

    pub fn unexpected_type(
        context: impl Into<String>,
        expected: &'static str,
        actual: &Value,
    ) -> Self {
        BotError::UnexpectedType {
            context: context.into(),
            expected,
            actual: json_type_name(actual),
        }
    }
}

/// JSON type name used in shape errors
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
