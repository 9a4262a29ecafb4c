use super::super::{FieldTy, Model, ModelId, Schema};

#[derive(Debug, Clone)]
pub struct ManyToMany {
    /// Associated model
    pub target: ModelId,

    /// Join table recording the association
    pub pivot_table: String,

    /// Pivot column referencing the owning model
    pub owner_key: String,

    /// Pivot column referencing the target model
    pub related_key: String,
}

impl ManyToMany {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }
}

impl From<ManyToMany> for FieldTy {
    fn from(value: ManyToMany) -> Self {
        Self::ManyToMany(value)
    }
}
