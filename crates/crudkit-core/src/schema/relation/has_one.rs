use super::super::{FieldTy, Model, ModelId, Schema};

#[derive(Debug, Clone)]
pub struct HasOne {
    /// Associated model
    pub target: ModelId,

    /// The foreign-key column on the target model referencing this model.
    /// The target row cannot exist before its parent has a primary key.
    pub foreign_key: String,
}

impl HasOne {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }
}

impl From<HasOne> for FieldTy {
    fn from(value: HasOne) -> Self {
        Self::HasOne(value)
    }
}
