use super::Operation;
use crate::Value;

use indexmap::IndexMap;

/// Reconcile a pivot table against a new association set.
///
/// Full-replace semantics: after the operation, the owner's pivot rows
/// are exactly `rows`: ids not listed are detached, new ids attached,
/// and extra pivot attributes overwritten. Running the same sync twice
/// leaves the table unchanged.
#[derive(Debug)]
pub struct SyncPivot {
    /// Join table holding the associations
    pub table: String,

    /// Pivot column referencing the owner
    pub owner_key: String,

    /// Primary key of the owner row
    pub owner_id: Value,

    /// Pivot column referencing the related model
    pub related_key: String,

    /// The new association set
    pub rows: Vec<PivotRow>,
}

/// One pivot association: the related id plus extra pivot attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub id: Value,
    pub attrs: IndexMap<String, Value>,
}

impl PivotRow {
    pub fn new(id: Value) -> Self {
        Self {
            id,
            attrs: IndexMap::new(),
        }
    }
}

impl From<SyncPivot> for Operation {
    fn from(value: SyncPivot) -> Self {
        Self::SyncPivot(value)
    }
}
