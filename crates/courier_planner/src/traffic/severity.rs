use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Severe,
}

impl Severity {
    pub fn from_delay_minutes(delay_minutes: i64) -> Self {
        if delay_minutes > 15 {
            Severity::Severe
        } else if delay_minutes > 10 {
            Severity::High
        } else if delay_minutes > 5 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Low => "low",
                Severity::Medium => "medium",
                Severity::High => "high",
                Severity::Severe => "severe",
            }
        )
    }
}
