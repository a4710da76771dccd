use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::display::{StatusDescriptor, Tone};

/// Status of a single payment attempt, driven by the payment gateway.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Initiated,
    Pending,
    Success,
    Failed,
    Expired,
    Cancelled,
    Refunded,
}

impl TransactionStatus {
    pub fn descriptor(&self) -> StatusDescriptor {
        match self {
            Self::Initiated => StatusDescriptor::new("Initiated", Tone::Neutral),
            Self::Pending => StatusDescriptor::new("Pending", Tone::Warning),
            Self::Success => StatusDescriptor::new("Successful", Tone::Success),
            Self::Failed => StatusDescriptor::new("Failed", Tone::Danger),
            Self::Expired => StatusDescriptor::new("Expired", Tone::Neutral),
            Self::Cancelled => StatusDescriptor::new("Cancelled", Tone::Neutral),
            Self::Refunded => StatusDescriptor::new("Refunded", Tone::Info),
        }
    }

    /// Initiated and pending transactions can still change at the gateway.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Initiated | Self::Pending)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn all() -> &'static [TransactionStatus] {
        &[
            Self::Initiated,
            Self::Pending,
            Self::Success,
            Self::Failed,
            Self::Expired,
            Self::Cancelled,
            Self::Refunded,
        ]
    }
}
