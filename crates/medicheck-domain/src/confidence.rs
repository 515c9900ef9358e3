//! Confidence module - how certain the evidence behind a record is

use serde::{Deserialize, Serialize};

/// Confidence in the evidence behind an interaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Curated or registry-confirmed evidence
    High,
    /// Plausible, partially supported evidence
    Medium,
    /// Theoretical or weakly supported
    Low,
}

impl Confidence {
    /// Get the confidence name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// Parse one of the three closed tokens (trimmed, case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }

    /// Total mapping from a free-text token; unknown or missing becomes `Medium`
    pub fn coerce(token: Option<&str>) -> Self {
        token.and_then(Self::parse).unwrap_or_default()
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::Medium
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
