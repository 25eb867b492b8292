//! Domain models with validation at construction
//!
//! Request bodies deserialize into `*Input` types and are converted into
//! validated `New*` types before reaching a repository.
//! Invalid input returns ValidationError, not panic.

pub mod band;
pub mod catalog;
pub mod device;
pub mod search;
pub mod software;
pub mod support;
pub mod text;
pub mod validation;

pub use band::{BandInput, BandSearch, BandSupportQuery, NewBand, ProviderScope};
pub use catalog::{
    ComboInput, ComboSearch, FeatureInput, NewCombo, NewFeature, NewProvider, ProviderInput,
};
pub use device::{
    DeviceBandInput, DeviceComboInput, DeviceFeatureInput, DeviceInput, DeviceSearch, NewDevice,
};
pub use search::contains_pattern;
pub use software::{NewSoftware, SoftwareInput};
pub use support::SupportStatus;
pub use text::{CountryCode, Label, Technology};
pub use validation::ValidationError;
