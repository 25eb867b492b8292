//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Optional filters are bound as NULL-able parameters (static SQL)
//! - Constraint violations are mapped to typed errors (no check-then-insert)
//! - Junction inserts are upserts

pub mod bands;
pub mod combos;
pub mod devices;
pub mod features;
pub mod providers;
pub mod software;

pub use bands::{Band, BandRepo, DeviceBand, SupportingDevice};
pub use combos::{Combo, ComboRepo};
pub use devices::{Device, DeviceRepo};
pub use features::{Feature, FeatureRepo};
pub use providers::{Provider, ProviderRepo};
pub use software::{Software, SoftwareRepo};

use sqlx::postgres::PgDatabaseError;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Foreign key hit a missing row and the server did not report its id
    #[error("not found: referenced {resource}")]
    MissingReference { resource: &'static str },

    #[error("conflict: {0}")]
    Conflict(String),
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        let code = e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|c| c.into_owned());

        match code.as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let constraint = e
                    .as_database_error()
                    .and_then(|db| db.constraint())
                    .unwrap_or("unique constraint")
                    .to_owned();
                Self::Conflict(format!("record already exists ({})", constraint))
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                let db = e.as_database_error();
                let resource = referenced_resource(
                    db.and_then(|db| db.constraint()).unwrap_or_default(),
                );
                let detail = db
                    .and_then(|db| db.try_downcast_ref::<PgDatabaseError>())
                    .and_then(|pg| pg.detail());

                match detail.and_then(referenced_key) {
                    Some(id) => Self::not_found(resource, id),
                    None => Self::MissingReference { resource },
                }
            }
            _ => Self::Sqlx(e),
        }
    }
}

/// Name the referenced table from a default Postgres FK constraint name
/// (`<table>_<column>_fkey`).
fn referenced_resource(constraint: &str) -> &'static str {
    if constraint.ends_with("device_id_fkey") {
        "device"
    } else if constraint.ends_with("band_id_fkey") {
        "band"
    } else if constraint.ends_with("combo_id_fkey") {
        "combo"
    } else if constraint.ends_with("feature_id_fkey") {
        "feature"
    } else if constraint.ends_with("provider_id_fkey") {
        "provider"
    } else {
        "record"
    }
}

/// Pull the key value out of a foreign key violation detail, e.g.
/// `Key (band_id)=(8d1c...) is not present in table "bands".`
fn referenced_key(detail: &str) -> Option<&str> {
    let start = detail.find(")=(")? + 3;
    let len = detail[start..].find(')')?;
    Some(&detail[start..start + len]).filter(|id| !id.is_empty())
}
