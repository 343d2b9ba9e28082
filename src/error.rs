use thiserror::Error;

/// Failure reported by a remote collaborator (market service or list store).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("server unavailable (HTTP 500)")]
    ServerUnavailable,

    /// The service answered with an `{ "error": ... }` payload.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("request failed with HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success HTTP response. 429 and 500 win over any error
    /// payload the server may have attached.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            429 => Self::RateLimited,
            500 => Self::ServerUnavailable,
            _ => match server_error_message(body) {
                Some(message) => Self::Rejected { status, message },
                None => Self::Status { status },
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::ServerUnavailable => Some(500),
            Self::Rejected { status, .. } | Self::Status { status } => Some(*status),
            Self::Timeout | Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

fn server_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// User-facing strings a search surface shows for each class of transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureMessages {
    pub rate_limited: &'static str,
    pub server: &'static str,
    pub generic: &'static str,
}

impl FailureMessages {
    pub fn describe(&self, err: &ApiError) -> String {
        match err {
            ApiError::RateLimited => self.rate_limited.to_string(),
            ApiError::ServerUnavailable => self.server.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Status { .. }
            | ApiError::Timeout
            | ApiError::Transport(_)
            | ApiError::Decode(_) => self.generic.to_string(),
        }
    }
}

pub const RATE_LIMITED_MESSAGE: &str = "API rate limited. Please wait a minute and try again.";

pub const SCANNER_MESSAGES: FailureMessages = FailureMessages {
    rate_limited: RATE_LIMITED_MESSAGE,
    server: "Server is loading data. Please wait a moment and try again.",
    generic: "Scan failed",
};

pub const INTRADAY_MESSAGES: FailureMessages = FailureMessages {
    rate_limited: RATE_LIMITED_MESSAGE,
    server: "Server error loading intraday data. Please try again.",
    generic: "Failed to fetch intraday data",
};

/// Rejected filter or key input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown day group '{0}': expected one of gd/pd/d2/d3")]
    UnknownDayGroup(String),

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("unknown bound '{0}': expected min or max")]
    UnknownBound(String),

    #[error("unknown close direction '{0}': expected '', green or red")]
    UnknownCloseDirection(String),
}
