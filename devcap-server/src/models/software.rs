//! Software version payloads

use serde::Deserialize;

use super::{Label, ValidationError};

/// Software create/update body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareInput {
    pub name: String,
    pub platform: String,
    pub svn: i32,
    pub ptcrb: Option<i32>,
}

/// Validated software fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSoftware {
    pub name: Label,
    pub platform: Label,
    pub svn: i32,
    pub ptcrb: Option<i32>,
}

impl TryFrom<SoftwareInput> for NewSoftware {
    type Error = ValidationError;

    fn try_from(input: SoftwareInput) -> Result<Self, Self::Error> {
        if input.svn < 0 {
            return Err(ValidationError::OutOfRange {
                field: "svn",
                min: 0,
                max: i32::MAX as i64,
            });
        }
        if matches!(input.ptcrb, Some(id) if id <= 0) {
            return Err(ValidationError::OutOfRange {
                field: "ptcrb",
                min: 1,
                max: i32::MAX as i64,
            });
        }

        Ok(Self {
            name: Label::new("name", &input.name)?,
            platform: Label::new("platform", &input.platform)?,
            svn: input.svn,
            ptcrb: input.ptcrb,
        })
    }
}
