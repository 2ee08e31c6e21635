use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ViewGranularity {
    Day,
    Week,
    Month,
}

impl fmt::Display for ViewGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewGranularity::Day => write!(f, "day"),
            ViewGranularity::Week => write!(f, "week"),
            ViewGranularity::Month => write!(f, "month"),
        }
    }
}

/// View settings that survive across sessions. The pivot date and the
/// window cache are deliberately session-only and reset on reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewPreferences {
    pub granularity: ViewGranularity,
    pub show_cancelled: bool,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            granularity: ViewGranularity::Week,
            show_cancelled: false,
        }
    }
}
