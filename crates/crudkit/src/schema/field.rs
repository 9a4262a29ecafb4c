use crudkit_core::schema::FieldTy;

use serde::{Deserialize, Serialize};

/// A form field definition.
///
/// This is the panel-facing schema: what the form submits and how each
/// submitted key relates to the model layer. Definitions are declarative
/// and serializable so field lists can be loaded from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Submitted key; dotted (`address.line_1`) or bracketed
    /// (`address[line_1]`) for nested attributes.
    pub name: String,

    /// Dotted relation path; defaults to `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Declared relation kind. When absent it is inferred from the model
    /// schema while validating the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationKind>,

    /// True for many-to-many fields committed through the pivot table
    #[serde(default)]
    pub pivot: bool,

    /// Extra per-association pivot attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_fields: Option<PivotFields>,

    /// Child field definitions of a composite field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subfields: Vec<FieldDef>,

    /// True for polymorphic pivot relations
    #[serde(default)]
    pub morph: bool,

    /// True when the column is JSON-casted and string submissions must be
    /// decoded before the insert
    #[serde(default)]
    pub json_cast: bool,

    /// Virtual field: the value is not a column of its own but is packed
    /// into this JSON storage column together with its sibling fakes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fake_store: Option<String>,
}

/// The closed set of relation kinds a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    ManyToMany,
    MorphMany,
}

/// How extra pivot attributes arrive in the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PivotFields {
    /// Each attribute is submitted as its own `data[attr][pivot_id]`
    /// matrix.
    Matrix(Vec<String>),

    /// Attributes arrive inline, one JSON row per association inside the
    /// pivot field's own value.
    Inline(Vec<String>),
}

impl FieldDef {
    /// A plain column field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity: None,
            relation: None,
            pivot: false,
            pivot_fields: None,
            subfields: vec![],
            morph: false,
            json_cast: false,
            fake_store: None,
        }
    }

    /// A relation field of the given kind; the entity path defaults to
    /// the field name.
    pub fn relation(name: impl Into<String>, kind: RelationKind) -> Self {
        let mut def = Self::new(name);
        def.relation = Some(kind);
        def
    }

    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn pivot(mut self) -> Self {
        self.pivot = true;
        self
    }

    pub fn pivot_fields(mut self, pivot_fields: PivotFields) -> Self {
        self.pivot_fields = Some(pivot_fields);
        self
    }

    pub fn subfield(mut self, subfield: FieldDef) -> Self {
        self.subfields.push(subfield);
        self
    }

    pub fn morph(mut self) -> Self {
        self.morph = true;
        self
    }

    pub fn json_cast(mut self) -> Self {
        self.json_cast = true;
        self
    }

    pub fn fake(mut self, store_in: impl Into<String>) -> Self {
        self.fake_store = Some(store_in.into());
        self
    }

    /// True if the field maps to a relation rather than a plain column.
    pub fn is_relation(&self) -> bool {
        self.relation.is_some() || self.entity.is_some() || self.pivot
    }

    /// The declared entity path, falling back to the field name.
    pub fn entity_path(&self) -> &str {
        self.entity.as_deref().unwrap_or(&self.name)
    }
}

impl RelationKind {
    pub fn is_belongs_to(self) -> bool {
        matches!(self, Self::BelongsTo)
    }

    pub fn is_has_one(self) -> bool {
        matches!(self, Self::HasOne)
    }

    /// Kinds that can carry a pivot table.
    pub fn is_pivot_capable(self) -> bool {
        matches!(self, Self::ManyToMany | Self::MorphMany)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BelongsTo => "belongs-to",
            Self::HasOne => "has-one",
            Self::HasMany => "has-many",
            Self::ManyToMany => "many-to-many",
            Self::MorphMany => "morph-many",
        }
    }

    /// The kind a model-layer field resolves to.
    pub(crate) fn of(ty: &FieldTy) -> Option<Self> {
        match ty {
            FieldTy::Primitive(_) => None,
            FieldTy::BelongsTo(_) => Some(Self::BelongsTo),
            FieldTy::HasOne(_) => Some(Self::HasOne),
            FieldTy::HasMany(_) => Some(Self::HasMany),
            FieldTy::ManyToMany(_) => Some(Self::ManyToMany),
        }
    }

    /// True if a field declaring `self` is consistent with the model
    /// schema defining `ty`.
    pub(crate) fn matches(self, ty: &FieldTy) -> bool {
        match self {
            // Morph pivots are recorded in a many-to-many join table.
            Self::MorphMany => ty.is_many_to_many(),
            kind => RelationKind::of(ty) == Some(kind),
        }
    }
}
