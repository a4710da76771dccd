use thiserror::Error;

pub use dues_types::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,

    #[error("Payment not allowed: {0}")]
    PaymentNotAllowed(String),

    #[error("Subscription already fully paid")]
    AlreadyPaid,

    #[error("Status check already in progress")]
    CheckInProgress,

    #[error("No pending payment for this session")]
    NoPendingPayment,

    #[error("Backend rejected the credentials")]
    Unauthorized,

    #[error("Backend denied access")]
    Forbidden,

    #[error("Backend error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Backend unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unexpected backend response: {0}")]
    UpstreamContract(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::PaymentNotAllowed(_) => ErrorCode::PaymentNotAllowed,
            AppError::AlreadyPaid => ErrorCode::AlreadyPaid,
            AppError::CheckInProgress => ErrorCode::CheckInProgress,
            AppError::NoPendingPayment => ErrorCode::NoPendingPayment,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::Forbidden => ErrorCode::Forbidden,
            AppError::Upstream { .. } => ErrorCode::UpstreamError,
            AppError::UpstreamUnavailable(_) => ErrorCode::UpstreamUnavailable,
            AppError::UpstreamContract(_) => ErrorCode::UpstreamContract,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
