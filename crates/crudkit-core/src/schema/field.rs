use super::{BelongsTo, HasMany, HasOne, ManyToMany, Model, ModelId, Schema};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name
    pub name: String,

    /// Primitive column or relation
    pub ty: FieldTy,

    /// True if the column can hold null
    pub nullable: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Clone)]
pub enum FieldTy {
    Primitive(FieldPrimitive),
    BelongsTo(BelongsTo),
    HasOne(HasOne),
    HasMany(HasMany),
    ManyToMany(ManyToMany),
}

/// A plain column.
#[derive(Debug, Clone)]
pub struct FieldPrimitive {
    /// Storage column name; defaults to the field name.
    pub column: String,
}

impl Field {
    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// If the field is a relation, return the relation's target ModelId.
    pub fn relation_target_id(&self) -> Option<ModelId> {
        match &self.ty {
            FieldTy::Primitive(_) => None,
            FieldTy::BelongsTo(belongs_to) => Some(belongs_to.target),
            FieldTy::HasOne(has_one) => Some(has_one.target),
            FieldTy::HasMany(has_many) => Some(has_many.target),
            FieldTy::ManyToMany(many_to_many) => Some(many_to_many.target),
        }
    }

    /// If the field is a relation, return the target of the relation.
    pub fn relation_target<'a>(&self, schema: &'a Schema) -> Option<&'a Model> {
        self.relation_target_id().map(|id| schema.model(id))
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&FieldPrimitive> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        !self.is_primitive()
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(self, Self::BelongsTo(..))
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Self::BelongsTo(belongs_to) => Some(belongs_to),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_belongs_to(&self) -> &BelongsTo {
        match self {
            Self::BelongsTo(belongs_to) => belongs_to,
            _ => panic!("expected field to be `BelongsTo`, but was {self:?}"),
        }
    }

    pub fn is_has_one(&self) -> bool {
        matches!(self, Self::HasOne(..))
    }

    pub fn as_has_one(&self) -> Option<&HasOne> {
        match self {
            Self::HasOne(has_one) => Some(has_one),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_has_one(&self) -> &HasOne {
        match self {
            Self::HasOne(has_one) => has_one,
            _ => panic!("expected field to be `HasOne`, but it was {self:?}"),
        }
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self, Self::HasMany(..))
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Self::HasMany(has_many) => Some(has_many),
            _ => None,
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        matches!(self, Self::ManyToMany(..))
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Self::ManyToMany(many_to_many) => Some(many_to_many),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_many_to_many(&self) -> &ManyToMany {
        match self {
            Self::ManyToMany(many_to_many) => many_to_many,
            _ => panic!("expected field to be `ManyToMany`, but was {self:?}"),
        }
    }

    /// A short human name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::BelongsTo(_) => "belongs-to",
            Self::HasOne(_) => "has-one",
            Self::HasMany(_) => "has-many",
            Self::ManyToMany(_) => "many-to-many",
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(fmt),
            Self::BelongsTo(ty) => ty.fmt(fmt),
            Self::HasOne(ty) => ty.fmt(fmt),
            Self::HasMany(ty) => ty.fmt(fmt),
            Self::ManyToMany(ty) => ty.fmt(fmt),
        }
    }
}

impl From<FieldPrimitive> for FieldTy {
    fn from(value: FieldPrimitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<&Field> for FieldId {
    fn from(value: &Field) -> Self {
        value.id
    }
}

impl From<&Self> for FieldId {
    fn from(value: &Self) -> Self {
        *value
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
