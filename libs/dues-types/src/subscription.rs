use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::display::{StatusDescriptor, Tone};

/// Payment status of a member's subscription, as assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubscriptionPaymentStatus {
    NotPaid,
    PartiallyPaid,
    FullyPaid,
    Overdue,
    Refunded,
}

impl SubscriptionPaymentStatus {
    pub fn descriptor(&self) -> StatusDescriptor {
        match self {
            Self::NotPaid => StatusDescriptor::new("Not Paid", Tone::Neutral),
            Self::PartiallyPaid => StatusDescriptor::new("Partially Paid", Tone::Warning),
            Self::FullyPaid => StatusDescriptor::new("Fully Paid", Tone::Success),
            Self::Overdue => StatusDescriptor::new("Overdue", Tone::Danger),
            Self::Refunded => StatusDescriptor::new("Refunded", Tone::Info),
        }
    }

    /// Returns true for states that no payment can move forward.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::FullyPaid | Self::Refunded)
    }

    pub fn all() -> &'static [SubscriptionPaymentStatus] {
        &[
            Self::NotPaid,
            Self::PartiallyPaid,
            Self::FullyPaid,
            Self::Overdue,
            Self::Refunded,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_snake_case_serialization() {
        let json = serde_json::to_string(&SubscriptionPaymentStatus::PartiallyPaid).unwrap();
        assert_eq!(json, r#""partially_paid""#);

        let parsed: SubscriptionPaymentStatus = serde_json::from_str(r#""fully_paid""#).unwrap();
        assert_eq!(parsed, SubscriptionPaymentStatus::FullyPaid);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<SubscriptionPaymentStatus>(r#""in_arrears""#).is_err());
        assert!(SubscriptionPaymentStatus::from_str("in_arrears").is_err());
    }

    #[test]
    fn test_from_str_matches_wire_name() {
        for status in SubscriptionPaymentStatus::all() {
            let parsed = SubscriptionPaymentStatus::from_str(status.as_ref()).unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn test_descriptor_labels() {
        assert_eq!(SubscriptionPaymentStatus::NotPaid.descriptor().label, "Not Paid");
        assert_eq!(
            SubscriptionPaymentStatus::Overdue.descriptor().tone,
            Tone::Danger
        );
        assert_eq!(
            SubscriptionPaymentStatus::FullyPaid.descriptor().tone,
            Tone::Success
        );
    }

    #[test]
    fn test_is_settled() {
        assert!(SubscriptionPaymentStatus::FullyPaid.is_settled());
        assert!(SubscriptionPaymentStatus::Refunded.is_settled());
        assert!(!SubscriptionPaymentStatus::Overdue.is_settled());
        assert!(!SubscriptionPaymentStatus::NotPaid.is_settled());
    }
}
