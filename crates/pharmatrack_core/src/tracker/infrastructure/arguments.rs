//! Named-field views of positional invocation arguments.
//!
//! Invocations arrive as a function name and a flat list of strings. The positions
//! are a compatibility contract, so they are decoded exactly once here and the rest
//! of the crate only sees named fields.
//!
//! `write`: `id, assetType, category, assetClass, owner, status, moveDateTime, location,
//! geoLocation, assetName, company, packingType, packageSize, mfgDate, lotNumber,
//! expiryDate` then any number of `(childAssetId, childAssetType)` pairs.
//!
//! `update`: `id, owner, status, moveDateTime, location, geoLocation`.
//!
//! `delete`, `fetch`: `id`.

use crate::tracker::{
    error::{Arity, TrackerError},
    infrastructure::asset::{AssetData, AssetInformation, AssetRecord, ChildRef, TraceEvent},
};

pub const CREATE_FIELD_COUNT: usize = 16;
pub const UPDATE_FIELD_COUNT: usize = 6;

/// Everything needed to create a new asset record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub asset_id: String,
    pub asset_type: String,
    pub category: String,
    pub asset_class: String,
    /// Seed event of the trace history.
    pub trace: TraceEvent,
    pub information: AssetInformation,
    pub children: Vec<ChildRef>,
}

impl NewAsset {
    pub fn from_args(function: &str, args: Vec<String>) -> Result<Self, TrackerError> {
        let got = args.len();
        if got < CREATE_FIELD_COUNT || (got - CREATE_FIELD_COUNT) % 2 != 0 {
            return Err(TrackerError::InvalidArgumentCount {
                function: function.to_string(),
                expected: Arity::AtLeastThenPairs(CREATE_FIELD_COUNT),
                got,
            });
        }

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();
        let asset_id = next();
        let asset_type = next();
        let category = next();
        let asset_class = next();
        let trace = TraceEvent::new(next(), next(), next(), next(), next());
        let information = AssetInformation {
            asset_name: next(),
            company: next(),
            packing_type: next(),
            package_size: next(),
            mfg_date: next(),
            lot_number: next(),
            expiry_date: next(),
        };
        let children = (0..(got - CREATE_FIELD_COUNT) / 2)
            .map(|_| ChildRef::new(next(), next()))
            .collect();

        Ok(Self { asset_id, asset_type, category, asset_class, trace, information, children })
    }
}

impl From<NewAsset> for AssetRecord {
    fn from(asset: NewAsset) -> Self {
        AssetRecord {
            asset_id: asset.asset_id,
            asset_type: asset.asset_type,
            category: asset.category,
            asset_class: asset.asset_class,
            trace_history: vec![asset.trace],
            data: AssetData { information: asset.information, children: asset.children },
        }
    }
}

/// A new trace event for an existing asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceUpdate {
    pub asset_id: String,
    pub event: TraceEvent,
}

impl TraceUpdate {
    pub fn from_args(function: &str, args: Vec<String>) -> Result<Self, TrackerError> {
        let fields: [String; UPDATE_FIELD_COUNT] =
            args.try_into().map_err(|args: Vec<String>| TrackerError::InvalidArgumentCount {
                function: function.to_string(),
                expected: Arity::Exactly(UPDATE_FIELD_COUNT),
                got: args.len(),
            })?;
        let [asset_id, owner, status, move_date_time, location, geo_location] = fields;
        Ok(Self {
            asset_id,
            event: TraceEvent::new(owner, status, move_date_time, location, geo_location),
        })
    }
}

/// Extract the single id argument of `delete` and `fetch`.
pub fn single_id(function: &str, args: Vec<String>) -> Result<String, TrackerError> {
    let [id]: [String; 1] = args.try_into().map_err(|args: Vec<String>| {
        TrackerError::InvalidArgumentCount {
            function: function.to_string(),
            expected: Arity::Exactly(1),
            got: args.len(),
        }
    })?;
    Ok(id)
}
