use serde::{Deserialize, Serialize};

/// API error codes returned by the dues service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    PaymentNotAllowed,
    AlreadyPaid,
    CheckInProgress,
    NoPendingPayment,
    Unauthorized,
    Forbidden,
    UpstreamError,
    UpstreamUnavailable,
    UpstreamContract,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::PaymentNotAllowed => "PAYMENT_NOT_ALLOWED",
            Self::AlreadyPaid => "ALREADY_PAID",
            Self::CheckInProgress => "CHECK_IN_PROGRESS",
            Self::NoPendingPayment => "NO_PENDING_PAYMENT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamContract => "UPSTREAM_CONTRACT",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
