//! Device request payloads and search criteria

use serde::Deserialize;
use uuid::Uuid;

use super::{Label, SupportStatus, ValidationError};

/// Device create/update body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInput {
    pub vendor: String,
    pub model_num: String,
    pub market_name: Option<String>,
}

/// Validated device fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub vendor: Label,
    pub model_num: Label,
    pub market_name: Option<Label>,
}

impl TryFrom<DeviceInput> for NewDevice {
    type Error = ValidationError;

    fn try_from(input: DeviceInput) -> Result<Self, Self::Error> {
        Ok(Self {
            vendor: Label::new("vendor", &input.vendor)?,
            model_num: Label::new("model number", &input.model_num)?,
            market_name: Label::optional("market name", input.market_name.as_deref())?,
        })
    }
}

/// Device search criteria (`GET /devices?vendor=&model=&marketName=`)
///
/// Every field is an optional case-insensitive substring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSearch {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub market_name: Option<String>,
}

/// Body for attaching a band to a device
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBandInput {
    pub band_id: Uuid,
    pub provider_id: Option<Uuid>,
    pub support_status: Option<String>,
}

impl DeviceBandInput {
    /// Resolve the support status, defaulting to `supported`.
    pub fn status(&self) -> Result<SupportStatus, ValidationError> {
        self.support_status
            .as_deref()
            .map(SupportStatus::parse)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Body for attaching a combo to a device
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComboInput {
    pub combo_id: Uuid,
}

/// Body for attaching a feature to a device
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFeatureInput {
    pub feature_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_device_input() {
        let input: DeviceInput = serde_json::from_value(serde_json::json!({
            "vendor": " Google ",
            "modelNum": "GKWS6",
            "marketName": ""
        }))
        .unwrap();

        let device = NewDevice::try_from(input).unwrap();
        assert_eq!(device.vendor.as_str(), "Google");
        assert_eq!(device.model_num.as_str(), "GKWS6");
        assert!(device.market_name.is_none());
    }

    #[test]
    fn rejects_blank_model() {
        let input = DeviceInput {
            vendor: "Apple".into(),
            model_num: "".into(),
            market_name: None,
        };
        let err = NewDevice::try_from(input).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "model number" });
    }

    #[test]
    fn band_status_defaults_to_supported() {
        let input = DeviceBandInput {
            band_id: Uuid::new_v4(),
            provider_id: None,
            support_status: None,
        };
        assert_eq!(input.status().unwrap(), SupportStatus::Supported);
    }

    #[test]
    fn band_status_rejects_unknown() {
        let input = DeviceBandInput {
            band_id: Uuid::new_v4(),
            provider_id: Some(Uuid::new_v4()),
            support_status: Some("maybe".into()),
        };
        assert!(input.status().is_err());
    }
}
