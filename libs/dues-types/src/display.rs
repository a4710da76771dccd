use serde::Serialize;

/// Visual treatment for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    /// CSS class the dashboard applies to the badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Neutral => "badge-neutral",
            Tone::Info => "badge-info",
            Tone::Success => "badge-success",
            Tone::Warning => "badge-warning",
            Tone::Danger => "badge-danger",
        }
    }
}

/// Fixed label and tone for one status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    pub label: &'static str,
    pub tone: Tone,
}

impl StatusDescriptor {
    pub const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }

    pub fn css_class(&self) -> &'static str {
        self.tone.css_class()
    }
}
