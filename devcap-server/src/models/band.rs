//! Band payloads and search criteria

use serde::Deserialize;
use uuid::Uuid;

use super::search::blank_as_none;
use super::{Technology, ValidationError};

/// Highest band number accepted (3GPP allocations stay well below this)
const MAX_BAND_NUMBER: i32 = 1024;

/// Band create/update body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandInput {
    pub technology: String,
    pub band_number: i32,
}

/// Validated band fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBand {
    pub technology: Technology,
    pub band_number: i32,
}

impl TryFrom<BandInput> for NewBand {
    type Error = ValidationError;

    fn try_from(input: BandInput) -> Result<Self, Self::Error> {
        Ok(Self {
            technology: Technology::new(&input.technology)?,
            band_number: validate_band_number(input.band_number)?,
        })
    }
}

fn validate_band_number(n: i32) -> Result<i32, ValidationError> {
    if (1..=MAX_BAND_NUMBER).contains(&n) {
        Ok(n)
    } else {
        Err(ValidationError::OutOfRange {
            field: "band number",
            min: 1,
            max: MAX_BAND_NUMBER as i64,
        })
    }
}

/// Band search criteria (`GET /bands?technology=&bandNumber=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSearch {
    pub technology: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub band_number: Option<i32>,
}

impl BandSearch {
    /// Normalised technology filter; blank means unconstrained.
    pub fn technology(&self) -> Option<String> {
        self.technology
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_uppercase)
    }
}

/// Query for devices supporting a band, optionally scoped to a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSupportQuery {
    pub band_id: Uuid,
    pub provider_id: Option<Uuid>,
}

/// Query string for `GET /bands/{id}/devices`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderScope {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub provider_id: Option<Uuid>,
}
