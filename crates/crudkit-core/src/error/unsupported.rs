/// Error for relation kinds the create pathway does not commit.
///
/// The relation tree only knows how to persist one-to-one chains. Other
/// kinds are rejected when the form is validated so the gap surfaces
/// before any data is written.
#[derive(Debug)]
pub(super) struct UnsupportedError {
    field: String,
    kind: String,
}

impl UnsupportedError {
    pub(super) fn relation(field: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: kind.into(),
        }
    }
}

impl std::error::Error for UnsupportedError {}

impl core::fmt::Display for UnsupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "field `{}`: {} relations cannot be created through the relation tree",
            self.field, self.kind
        )
    }
}
