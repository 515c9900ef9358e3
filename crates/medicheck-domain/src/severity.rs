//! Severity module - the closed ranking of interaction danger

use serde::{Deserialize, Serialize};

/// Severity of a drug interaction
///
/// Variants are declared most dangerous first, so the derived `Ord`
/// sorts `Critical < Major < Moderate < Minor`. Sorting ascending puts the
/// most dangerous records at the top of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Life-threatening; combination is contraindicated
    Critical,

    /// Serious harm likely; avoid or monitor strictly
    Major,

    /// Clinically relevant; adjust or monitor
    Moderate,

    /// Limited clinical relevance
    Minor,
}

impl Severity {
    /// All severities, most dangerous first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Major,
        Severity::Moderate,
        Severity::Minor,
    ];

    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Moderate => "moderate",
            Severity::Minor => "minor",
        }
    }

    /// Parse one of the four closed tokens (trimmed, case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "major" => Some(Severity::Major),
            "moderate" => Some(Severity::Moderate),
            "minor" => Some(Severity::Minor),
            _ => None,
        }
    }

    /// Total mapping from a free-text token: anything outside the closed
    /// vocabulary, including a missing token, becomes `Moderate`.
    pub fn coerce(token: Option<&str>) -> Self {
        token.and_then(Self::parse).unwrap_or_default()
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Moderate
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_most_dangerous_first() {
        assert!(Severity::Critical < Severity::Major);
        assert!(Severity::Major < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Minor);
    }

    #[test]
    fn test_parse_closed_tokens() {
        for severity in Severity::ALL {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
        assert_eq!(Severity::parse("  MAJOR "), Some(Severity::Major));
        assert_eq!(Severity::parse("severe"), None);
    }

    #[test]
    fn test_coerce_defaults_to_moderate() {
        assert_eq!(Severity::coerce(Some("catastrophic")), Severity::Moderate);
        assert_eq!(Severity::coerce(Some("")), Severity::Moderate);
        assert_eq!(Severity::coerce(None), Severity::Moderate);
        assert_eq!(Severity::coerce(Some("critical")), Severity::Critical);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
