/// Error when submitted data cannot be interpreted as declared.
#[derive(Debug)]
pub(super) struct PayloadError {
    kind: PayloadErrorKind,
}

#[derive(Debug)]
enum PayloadErrorKind {
    /// A JSON-encoded string value failed to decode
    InvalidJson { field: String, detail: String },

    /// `data[attribute][pivot_id]` has no entry for the pivot id
    MissingPivotAttribute { attribute: String, pivot_id: String },

    /// The submitted value has a shape the field does not accept
    UnexpectedShape { field: String, expected: String },
}

impl PayloadError {
    pub(super) fn invalid_json(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: PayloadErrorKind::InvalidJson {
                field: field.into(),
                detail: detail.into(),
            },
        }
    }

    pub(super) fn missing_pivot_attribute(
        attribute: impl Into<String>,
        pivot_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: PayloadErrorKind::MissingPivotAttribute {
                attribute: attribute.into(),
                pivot_id: pivot_id.into(),
            },
        }
    }

    pub(super) fn unexpected_shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            kind: PayloadErrorKind::UnexpectedShape {
                field: field.into(),
                expected: expected.into(),
            },
        }
    }
}

impl std::error::Error for PayloadError {}

impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            PayloadErrorKind::InvalidJson { field, detail } => {
                write!(f, "field `{field}` holds invalid JSON: {detail}")
            }
            PayloadErrorKind::MissingPivotAttribute { attribute, pivot_id } => {
                write!(
                    f,
                    "pivot attribute `{attribute}` has no value for pivot id `{pivot_id}`"
                )
            }
            PayloadErrorKind::UnexpectedShape { field, expected } => {
                write!(f, "field `{field}` expects {expected}")
            }
        }
    }
}
