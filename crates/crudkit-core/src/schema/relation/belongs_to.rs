use super::super::{FieldTy, Model, ModelId, Schema};

#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Model that owns the relation
    pub target: ModelId,

    /// The foreign-key column on the *owning* model's own row. It must be
    /// populated before that row is inserted.
    pub foreign_key: String,
}

impl BelongsTo {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }
}

impl From<BelongsTo> for FieldTy {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}
