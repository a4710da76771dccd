use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::display::{StatusDescriptor, Tone};

/// Which part of the choir a plan is assigned to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AssignmentTarget {
    #[serde(alias = "Executive")]
    Executive,
    #[serde(alias = "Members")]
    Members,
    #[serde(alias = "Both")]
    Both,
}

impl AssignmentTarget {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentTarget::Executive => "Executive",
            AssignmentTarget::Members => "Members",
            AssignmentTarget::Both => "Executive & Members",
        }
    }
}

/// Lifecycle of a plan relative to the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanStatus {
    Active,
    Upcoming,
    Expired,
}

impl PlanStatus {
    pub fn descriptor(&self) -> StatusDescriptor {
        match self {
            PlanStatus::Active => StatusDescriptor::new("Active", Tone::Success),
            PlanStatus::Upcoming => StatusDescriptor::new("Upcoming", Tone::Info),
            PlanStatus::Expired => StatusDescriptor::new("Expired", Tone::Neutral),
        }
    }
}
