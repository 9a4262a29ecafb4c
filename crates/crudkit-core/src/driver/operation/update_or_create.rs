use super::Operation;
use crate::{schema::ModelId, Value};

use indexmap::IndexMap;

/// The one-to-one commit primitive.
///
/// The relation tree commits each node with an empty filter, so during a
/// create this always inserts; the filter exists so the same operation
/// can back the update pathway.
#[derive(Debug)]
pub struct UpdateOrCreate {
    /// Model whose table is targeted
    pub model: ModelId,

    /// Primary key column; drivers return its value with the record
    pub primary_key: String,

    /// Match conditions; empty means "match nothing, always create"
    pub filter: IndexMap<String, Value>,

    /// Column values to write
    pub values: IndexMap<String, Value>,
}

impl From<UpdateOrCreate> for Operation {
    fn from(value: UpdateOrCreate) -> Self {
        Self::UpdateOrCreate(value)
    }
}
