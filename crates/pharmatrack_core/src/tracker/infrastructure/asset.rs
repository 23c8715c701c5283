//! Asset record model and its ledger encoding.
//!
//! An [`AssetRecord`] is the unit of storage: one JSON document per asset id.
//! The JSON field names are part of the ledger contract and must not change:
//!
//! ```json
//! {
//!   "assetId": "A1", "assetType": "box", "category": "drug", "assetClass": "classA",
//!   "assetTraceData": [
//!     { "owner": "alice", "status": "shipped", "moveDateTime": "2024-01-01T00:00Z",
//!       "location": "NY", "geoLocation": "40.7,-74.0" }
//!   ],
//!   "assetData": {
//!     "information": { "assetName": "Aspirin", "company": "Acme", "packingType": "blister",
//!                      "packageSize": "100ct", "mfgDate": "2024-01-01", "lotNumber": "LOT1",
//!                      "expiryDate": "2026-01-01" },
//!     "children": [ { "childAssetId": "B7", "childAssetType": "pallet" } ]
//!   }
//! }
//! ```
//!
//! The ledger returns empty content for unknown keys, so decoding empty bytes is not
//! an error: it yields the zero-valued record, whose empty `asset_id` never matches a
//! requested id. Absence is always inferred that way, see [`AssetRecord::is_record_of`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::tracker::error::TrackerError;

/// One immutable chain-of-custody entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraceEvent {
    pub owner: String,
    pub status: String,
    pub move_date_time: String,
    pub location: String,
    pub geo_location: String,
}

impl TraceEvent {
    pub fn new(
        owner: String,
        status: String,
        move_date_time: String,
        location: String,
        geo_location: String,
    ) -> Self {
        Self { owner, status, move_date_time, location, geo_location }
    }
}

/// Descriptive metadata captured once at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetInformation {
    pub asset_name: String,
    pub company: String,
    pub packing_type: String,
    pub package_size: String,
    pub mfg_date: String,
    pub lot_number: String,
    pub expiry_date: String,
}

/// Weak reference from a parent asset to a contained asset.
///
/// Nothing guarantees that the referenced asset exists in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildRef {
    // Records written by earlier deployments use the parent's key names.
    #[serde(rename = "childAssetId", alias = "assetId")]
    pub child_asset_id: String,
    #[serde(rename = "childAssetType", alias = "assetType")]
    pub child_asset_type: String,
}

impl ChildRef {
    pub fn new(child_asset_id: String, child_asset_type: String) -> Self {
        Self { child_asset_id, child_asset_type }
    }
}

/// Information and composition of an asset, nested under `assetData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetData {
    pub information: AssetInformation,
    #[serde(deserialize_with = "null_as_empty")]
    pub children: Vec<ChildRef>,
}

/// Root ledger entity, keyed by `asset_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetRecord {
    pub asset_id: String,
    pub asset_type: String,
    pub category: String,
    pub asset_class: String,
    /// Ordered oldest first, never reordered or truncated.
    #[serde(rename = "assetTraceData", deserialize_with = "null_as_empty")]
    pub trace_history: Vec<TraceEvent>,
    #[serde(rename = "assetData")]
    pub data: AssetData,
}

impl AssetRecord {
    /// Decode a ledger value.
    ///
    /// Empty content decodes to the zero-valued record. Any other content must be a
    /// well-formed JSON object of the expected shape; absent containers and `null`
    /// arrays are accepted and decode to empty values.
    pub fn decode(bytes: &[u8]) -> Result<Self, TrackerError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|e| TrackerError::DecodeError(e.to_string()))
    }

    /// Encode the record as compact JSON.
    pub fn encode(&self) -> Result<Vec<u8>, TrackerError> {
        serde_json::to_vec(self).map_err(|e| TrackerError::EncodeError(e.to_string()))
    }

    /// Whether this decoded value is the record stored under `id`.
    ///
    /// This is the only absence test: unknown keys decode to a record with an empty id.
    pub fn is_record_of(&self, id: &str) -> bool {
        !id.is_empty() && self.asset_id == id
    }

    pub fn information(&self) -> &AssetInformation {
        &self.data.information
    }

    pub fn children(&self) -> &[ChildRef] {
        &self.data.children
    }

    /// Append one event at the end of the history, leaving every other field untouched.
    pub fn append_trace_event(&mut self, event: TraceEvent) {
        self.trace_history.push(event);
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
