//! Combo, feature and provider payloads

use serde::Deserialize;

use super::{CountryCode, Label, Technology, ValidationError};

/// Combo create/update body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboInput {
    pub name: String,
    pub technology: Option<String>,
}

/// Validated combo fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCombo {
    pub name: Label,
    pub technology: Option<Technology>,
}

impl TryFrom<ComboInput> for NewCombo {
    type Error = ValidationError;

    fn try_from(input: ComboInput) -> Result<Self, Self::Error> {
        let technology = match input.technology.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) => Some(Technology::new(t)?),
        };
        Ok(Self {
            name: Label::new("combo name", &input.name)?,
            technology,
        })
    }
}

/// Combo search criteria (`GET /combos?name=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComboSearch {
    pub name: Option<String>,
}

/// Feature create/update body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    pub description: Option<String>,
}

/// Validated feature fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    pub name: Label,
    pub description: Option<String>,
}

impl TryFrom<FeatureInput> for NewFeature {
    type Error = ValidationError;

    fn try_from(input: FeatureInput) -> Result<Self, Self::Error> {
        let description = input
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        Ok(Self {
            name: Label::new("feature name", &input.name)?,
            description,
        })
    }
}

/// Provider create/update body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInput {
    pub name: String,
    pub country: String,
}

/// Validated provider fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProvider {
    pub name: Label,
    pub country: CountryCode,
}

impl TryFrom<ProviderInput> for NewProvider {
    type Error = ValidationError;

    fn try_from(input: ProviderInput) -> Result<Self, Self::Error> {
        Ok(Self {
            name: Label::new("provider name", &input.name)?,
            country: CountryCode::new(&input.country)?,
        })
    }
}
