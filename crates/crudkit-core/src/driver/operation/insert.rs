use super::Operation;
use crate::{schema::ModelId, Value};

use indexmap::IndexMap;

#[derive(Debug)]
pub struct Insert {
    /// Model whose table receives the row
    pub model: ModelId,

    /// Primary key column; drivers generate and return its value
    pub primary_key: String,

    /// Column values for the new row
    pub values: IndexMap<String, Value>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
