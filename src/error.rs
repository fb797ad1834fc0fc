use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
///
/// Any of these at startup is fatal: the poll loop is never entered.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure retrieving data from the slot provider.
///
/// Transport errors, timeouts, non-success statuses and malformed payloads
/// all collapse into this one kind. Callers retry after a delay and never
/// branch on the cause; the reason is kept for logging only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("provider fetch failed: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(format!("request timed out: {err}"))
        } else if err.is_status() {
            Self::new(format!("unexpected status: {err}"))
        } else if err.is_decode() {
            Self::new(format!("malformed payload: {err}"))
        } else {
            Self::new(format!("transport error: {err}"))
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("malformed payload: {err}"))
    }
}

/// Subscription store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("warehouse not found: {name}")]
    NotFound { name: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("corrupt stored value: {0}")]
    Parse(String),
}

/// Outbound message delivery errors.
#[derive(Error, Debug, Clone)]
#[error("failed to deliver message to {owner}: {reason}")]
pub struct NotifyError {
    pub owner: i64,
    pub reason: String,
}

/// Rejections raised while creating or removing a subscription.
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("no warehouse resembles \"{input}\"")]
    UnknownWarehouse { input: String },

    #[error("\"{input}\" is too far from \"{closest}\" (score {score})")]
    AmbiguousWarehouse {
        input: String,
        closest: String,
        score: u8,
    },

    #[error("unknown box type \"{input}\"; expected one of: {accepted}")]
    UnknownBoxType { input: String, accepted: String },

    #[error("max coefficient {value} is outside 0..={limit}")]
    CoefficientOutOfRange { value: i32, limit: i32 },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;
