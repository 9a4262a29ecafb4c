use super::super::{FieldTy, Model, ModelId, Schema};

#[derive(Debug, Clone)]
pub struct HasMany {
    /// Associated model
    pub target: ModelId,

    /// The foreign-key column on the target model referencing this model
    pub foreign_key: String,
}

impl HasMany {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}
