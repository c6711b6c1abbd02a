//! Error types for homework-bot-core.
//!
//! `BotError` is the closed set of failures a poll cycle can run into. Every
//! variant's message starts with the kind name, so the failure notification
//! sent to the user says which kind of failure happened.

use std::fmt;
use thiserror::Error;

/// Request details attached to transport failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDiagnostics {
    pub endpoint: String,
    /// Header pairs as sent, with credentials redacted.
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

impl fmt::Display for RequestDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = |items: &[(String, String)]| {
            items
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "url={}, headers=[{}], params=[{}]",
            self.endpoint,
            pairs(&self.headers),
            pairs(&self.params)
        )
    }
}

/// Failures that can occur during one poll cycle.
#[derive(Error, Debug)]
pub enum BotError {
    /// One or more required keys are absent.
    #[error("MissingField: required keys missing: {}", .keys.join(", "))]
    MissingField { keys: Vec<String> },

    /// The payload does not have the expected shape.
    #[error("MalformedResponse: {0}")]
    MalformedResponse(String),

    /// Homework status is not in the verdict table.
    #[error("UnknownStatus: unexpected homework status '{0}'")]
    UnknownStatus(String),

    /// The API endpoint could not be reached at all.
    ///
    /// The message leaves out the request params, which change every cycle.
    #[error("EndpointUnavailable: {} is not reachable: {source}", .diagnostics.endpoint)]
    EndpointUnavailable {
        diagnostics: RequestDiagnostics,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport-level failure.
    #[error("RequestFailed: request to {} failed: {source}", .diagnostics.endpoint)]
    RequestFailed {
        diagnostics: RequestDiagnostics,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with something other than 200.
    #[error("UnexpectedStatusCode: API returned HTTP {code} instead of 200")]
    UnexpectedStatusCode { code: u16 },

    /// The messaging channel itself failed.
    #[error("MessagingChannelError: {0}")]
    Messaging(#[from] MessagingError),

    #[error("Unclassified: {0}")]
    Unclassified(String),
}

impl BotError {
    /// Build a `MissingField` error from key names.
    pub fn missing<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BotError::MissingField {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Stable kind name, as used in the taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::MissingField { .. } => "MissingField",
            BotError::MalformedResponse(_) => "MalformedResponse",
            BotError::UnknownStatus(_) => "UnknownStatus",
            BotError::EndpointUnavailable { .. } => "EndpointUnavailable",
            BotError::RequestFailed { .. } => "RequestFailed",
            BotError::UnexpectedStatusCode { .. } => "UnexpectedStatusCode",
            BotError::Messaging(_) => "MessagingChannelError",
            BotError::Unclassified(_) => "Unclassified",
        }
    }
}

/// Errors raised by the messaging channel.
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The Bot API accepted the request but refused to deliver.
    #[error("Telegram API error (HTTP {status}): {description}")]
    Api { status: u16, description: String },
}

/// Fatal startup errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
}

/// Result type alias for BotError
pub type Result<T, E = BotError> = std::result::Result<T, E>;
