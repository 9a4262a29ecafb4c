use super::{Field, FieldId};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Backing table
    pub table: String,

    /// Primary key column. Create flows read the generated value back
    /// from this column after the insert.
    pub primary_key: String,

    /// Fields contained by the model
    pub fields: Vec<Field>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    #[track_caller]
    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolve a relation accessor by name.
    ///
    /// This is the capability interface behind entity-path resolution: a
    /// purely structural check, no store access.
    pub fn relation(&self, name: &str) -> Option<&Field> {
        self.field_by_name(name).filter(|field| field.ty.is_relation())
    }

    pub fn has_relation(&self, name: &str) -> bool {
        self.relation(name).is_some()
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.ty.is_primitive())
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl From<&Self> for ModelId {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
