//! Provider-scoped support status for device/band pairs

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Whether a device/band pairing is certified for use on a carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    #[default]
    Supported,
    Unsupported,
    Partial,
}

impl SupportStatus {
    /// Parse a status string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "supported" => Ok(Self::Supported),
            "unsupported" => Ok(Self::Unsupported),
            "partial" => Ok(Self::Partial),
            _ => Err(ValidationError::InvalidVariant {
                field: "support status",
                value: s.to_owned(),
            }),
        }
    }

    /// Database / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values() {
        assert_eq!(SupportStatus::parse("supported").unwrap(), SupportStatus::Supported);
        assert_eq!(SupportStatus::parse("Unsupported").unwrap(), SupportStatus::Unsupported);
        assert_eq!(SupportStatus::parse(" PARTIAL ").unwrap(), SupportStatus::Partial);
    }

    #[test]
    fn rejects_unknown() {
        let err = SupportStatus::parse("certified").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidVariant { value, .. } if value == "certified"
        ));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&SupportStatus::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
    }

    #[test]
    fn defaults_to_supported() {
        assert_eq!(SupportStatus::default(), SupportStatus::Supported);
    }
}
