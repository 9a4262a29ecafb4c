mod builder;
pub use builder::Builder;

mod field;
pub use field::{Field, FieldId, FieldPrimitive, FieldTy};

mod model;
pub use model::{Model, ModelId};

mod relation;
pub use relation::{BelongsTo, HasMany, HasOne, ManyToMany};

/// The model-layer schema: every entity type the panel can persist,
/// with its columns and relations resolved up front.
///
/// Relation existence and kinds are checked once when the schema is
/// built; the engine never probes for relation accessors per request.
#[derive(Debug, Default)]
pub struct Schema {
    pub models: Vec<Model>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    #[track_caller]
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        &self.models[id.into().0]
    }

    #[track_caller]
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model).field(id)
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }
}
