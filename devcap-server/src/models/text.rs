//! Validated text fields
//!
//! Free-text names are trimmed and length-checked. Technology and country
//! codes are normalised to uppercase and checked against a token pattern.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for free-text names (vendor, model, feature name, ...)
const MAX_LABEL_LEN: usize = 128;

/// Maximum length for technology tokens
const MAX_TECHNOLOGY_LEN: usize = 16;

/// Technology token: uppercase alphanumeric with optional dashes ("NR", "LTE", "EN-DC")
static TECHNOLOGY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9][A-Z0-9-]{0,15}$").expect("invalid technology regex")
});

/// ISO 3166 alpha-2 or alpha-3 country code
static COUNTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,3}$").expect("invalid country regex"));

/// Non-empty, trimmed, length-bounded text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Validate a required text field.
    ///
    /// # Example
    /// ```
    /// use devcap_server::models::Label;
    ///
    /// assert_eq!(Label::new("vendor", "  Samsung ").unwrap().as_str(), "Samsung");
    /// assert!(Label::new("vendor", "   ").is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if trimmed.chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_LABEL_LEN,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate an optional text field. Blank input becomes `None`.
    pub fn optional(field: &'static str, s: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::new(field, value).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Radio access technology ("NR", "LTE", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Technology(String);

impl Technology {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::Empty { field: "technology" });
        }
        if normalized.len() > MAX_TECHNOLOGY_LEN {
            return Err(ValidationError::TooLong {
                field: "technology",
                max: MAX_TECHNOLOGY_LEN,
            });
        }
        if !TECHNOLOGY_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidFormat {
                field: "technology",
                reason: "must be alphanumeric with dashes, starting with alphanumeric",
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Uppercase ISO country code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::Empty { field: "country" });
        }
        if !COUNTRY_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidFormat {
                field: "country",
                reason: "must be an ISO 3166 alpha-2 or alpha-3 code",
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_trims() {
        let label = Label::new("vendor", "  Google  ").unwrap();
        assert_eq!(label.as_str(), "Google");
    }

    #[test]
    fn label_rejects_blank() {
        let err = Label::new("model number", " \t ").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "model number" });
    }

    #[test]
    fn label_max_length() {
        assert!(Label::new("name", &"a".repeat(128)).is_ok());
        let err = Label::new("name", &"a".repeat(129)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }

    #[test]
    fn optional_label_blank_is_none() {
        assert_eq!(Label::optional("market name", None).unwrap(), None);
        assert_eq!(Label::optional("market name", Some("  ")).unwrap(), None);
        assert_eq!(
            Label::optional("market name", Some("Pixel 8")).unwrap(),
            Some(Label("Pixel 8".into()))
        );
    }

    #[test]
    fn technology_uppercases() {
        assert_eq!(Technology::new("nr").unwrap().as_str(), "NR");
        assert_eq!(Technology::new(" en-dc ").unwrap().as_str(), "EN-DC");
    }

    #[test]
    fn technology_rejects_symbols() {
        let err = Technology::new("LTE/NR").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        let err = Technology::new("-NR").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn country_codes() {
        assert_eq!(CountryCode::new("us").unwrap().as_str(), "US");
        assert_eq!(CountryCode::new("DEU").unwrap().as_str(), "DEU");
        assert!(CountryCode::new("U").is_err());
        assert!(CountryCode::new("USA1").is_err());
        assert!(matches!(
            CountryCode::new("").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }
}
