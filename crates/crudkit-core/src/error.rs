mod driver;
mod payload;
mod schema;
mod unsupported;

use driver::DriverError;
use payload::PayloadError;
use schema::SchemaError;
use unsupported::UnsupportedError;

/// An error that can occur while building or committing a create call.
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    /// A field definition disagrees with the model schema.
    Schema(SchemaError),

    /// Submitted data could not be interpreted the way the field schema
    /// declares it.
    MalformedPayload(PayloadError),

    /// The backing store rejected an operation. Propagated unmodified; the
    /// engine never retries.
    Driver(DriverError),

    /// A declared relation kind the create pathway does not commit.
    Unsupported(UnsupportedError),
}

impl Error {
    /// A field references a model that does not exist in the schema.
    pub fn unknown_model(name: impl Into<String>) -> Self {
        SchemaError::unknown_model(name).into()
    }

    /// A named relation does not exist on the resolved model.
    pub fn unknown_relation(model: impl Into<String>, relation: impl Into<String>) -> Self {
        SchemaError::unknown_relation(model, relation).into()
    }

    /// An entity path segment resolved to something that is not a relation.
    pub fn unresolved_entity_path(path: impl Into<String>, segment: impl Into<String>) -> Self {
        SchemaError::unresolved_path(path, segment).into()
    }

    /// A field's declared relation kind does not match the model schema.
    pub fn relation_kind_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        SchemaError::kind_mismatch(field, expected, actual).into()
    }

    /// A JSON-encoded value failed to decode.
    pub fn invalid_json(field: impl Into<String>, detail: impl Into<String>) -> Self {
        PayloadError::invalid_json(field, detail).into()
    }

    /// A pivot-attribute matrix has no entry for the given pivot id.
    pub fn missing_pivot_attribute(attribute: impl Into<String>, pivot_id: impl Into<String>) -> Self {
        PayloadError::missing_pivot_attribute(attribute, pivot_id).into()
    }

    /// A submitted value has a shape the field schema does not allow.
    pub fn unexpected_shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        PayloadError::unexpected_shape(field, expected).into()
    }

    /// A store operation failed.
    pub fn driver_operation_failed(detail: impl Into<String>) -> Self {
        DriverError::operation_failed(detail).into()
    }

    /// A relation kind the recursive commit cannot handle.
    pub fn unsupported_relation(field: impl Into<String>, kind: impl Into<String>) -> Self {
        UnsupportedError::relation(field, kind).into()
    }

    pub fn is_schema(&self) -> bool {
        matches!(self.kind, ErrorKind::Schema(_))
    }

    pub fn is_malformed_payload(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedPayload(_))
    }

    pub fn is_driver(&self) -> bool {
        matches!(self.kind, ErrorKind::Driver(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, ErrorKind::Unsupported(_))
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match &self.kind {
            Schema(err) => core::fmt::Display::fmt(err, f),
            MalformedPayload(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            Unsupported(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        }
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Self {
            kind: ErrorKind::Schema(err),
        }
    }
}

impl From<PayloadError> for Error {
    fn from(err: PayloadError) -> Self {
        Self {
            kind: ErrorKind::MalformedPayload(err),
        }
    }
}

impl From<DriverError> for Error {
    fn from(err: DriverError) -> Self {
        Self {
            kind: ErrorKind::Driver(err),
        }
    }
}

impl From<UnsupportedError> for Error {
    fn from(err: UnsupportedError) -> Self {
        Self {
            kind: ErrorKind::Unsupported(err),
        }
    }
}
