/// Error when a field definition disagrees with the model schema.
#[derive(Debug)]
pub(super) struct SchemaError {
    kind: SchemaErrorKind,
}

#[derive(Debug)]
enum SchemaErrorKind {
    /// A relation target names a model the schema does not contain
    UnknownModel { name: String },

    /// The resolved model has no relation with the given name
    UnknownRelation { model: String, relation: String },

    /// An intermediate entity path segment is not a relation
    UnresolvedPath { path: String, segment: String },

    /// The declared relation kind does not match the model schema
    KindMismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

impl SchemaError {
    pub(super) fn unknown_model(name: impl Into<String>) -> Self {
        Self {
            kind: SchemaErrorKind::UnknownModel { name: name.into() },
        }
    }

    pub(super) fn unknown_relation(model: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            kind: SchemaErrorKind::UnknownRelation {
                model: model.into(),
                relation: relation.into(),
            },
        }
    }

    pub(super) fn unresolved_path(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            kind: SchemaErrorKind::UnresolvedPath {
                path: path.into(),
                segment: segment.into(),
            },
        }
    }

    pub(super) fn kind_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            kind: SchemaErrorKind::KindMismatch {
                field: field.into(),
                expected: expected.into(),
                actual: actual.into(),
            },
        }
    }
}

impl std::error::Error for SchemaError {}

impl core::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            SchemaErrorKind::UnknownModel { name } => {
                write!(f, "schema does not contain a model named `{name}`")
            }
            SchemaErrorKind::UnknownRelation { model, relation } => {
                write!(f, "model `{model}` has no relation named `{relation}`")
            }
            SchemaErrorKind::UnresolvedPath { path, segment } => {
                write!(
                    f,
                    "entity path `{path}` cannot be resolved; `{segment}` is not a relation"
                )
            }
            SchemaErrorKind::KindMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "field `{field}` declares a {expected} relation, but the schema defines {actual}"
                )
            }
        }
    }
}
