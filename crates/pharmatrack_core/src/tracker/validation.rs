//! Field validation for lifecycle requests.
//!
//! The asset id is always checked: an empty id cannot be told apart from the
//! zero-valued record the ledger yields for unknown keys. Strict validation,
//! enabled with `with_field_validation(true)`, additionally requires every
//! classification field and every trace event field to be non-empty. Information
//! and child reference fields stay free-form in both modes.
//!
//! Field contents are never interpreted: dates, sizes and coordinates are kept as
//! plain text.

use crate::tracker::{
    error::TrackerError,
    infrastructure::{arguments::NewAsset, asset::TraceEvent},
};

/// Validator for lifecycle request fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator {
    strict: bool,
}

impl FieldValidator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn check_asset_id(&self, asset_id: &str) -> Result<(), TrackerError> {
        non_empty("assetId", asset_id)
    }

    pub fn check_new_asset(&self, asset: &NewAsset) -> Result<(), TrackerError> {
        self.check_asset_id(&asset.asset_id)?;
        if self.strict {
            non_empty("assetType", &asset.asset_type)?;
            non_empty("category", &asset.category)?;
            non_empty("assetClass", &asset.asset_class)?;
            self.check_trace_event(&asset.trace)?;
        }
        Ok(())
    }

    pub fn check_trace_event(&self, event: &TraceEvent) -> Result<(), TrackerError> {
        if self.strict {
            non_empty("owner", &event.owner)?;
            non_empty("status", &event.status)?;
            non_empty("moveDateTime", &event.move_date_time)?;
            non_empty("location", &event.location)?;
            non_empty("geoLocation", &event.geo_location)?;
        }
        Ok(())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), TrackerError> {
    if value.is_empty() { Err(TrackerError::EmptyField(field)) } else { Ok(()) }
}
