//! Validation errors raised while turning request payloads into domain values

/// Why a field was rejected; rendered verbatim in 400 responses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong {
        field: &'static str,
        max: usize,
    },

    /// e.g. a technology token with spaces, a lowercase country code
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid {field} value: '{value}'")]
    InvalidVariant {
        field: &'static str,
        value: String,
    },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let cases = [
            (
                ValidationError::Empty { field: "vendor" },
                "vendor cannot be empty",
            ),
            (
                ValidationError::TooLong {
                    field: "model number",
                    max: 128,
                },
                "model number exceeds maximum length of 128 characters",
            ),
            (
                ValidationError::InvalidVariant {
                    field: "support status",
                    value: "maybe".into(),
                },
                "invalid support status value: 'maybe'",
            ),
            (
                ValidationError::OutOfRange {
                    field: "band number",
                    min: 1,
                    max: 1024,
                },
                "band number must be between 1 and 1024",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
