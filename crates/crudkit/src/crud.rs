use crate::{engine, FieldDef, Form};

use crudkit_core::{schema::ModelId, Driver, Payload, Result, Schema, Value};

use indexmap::IndexMap;

use std::sync::Arc;

/// A handle over one schema and one driver, from which validated forms
/// are built and create calls are executed.
#[derive(Clone)]
pub struct Crud {
    schema: Arc<Schema>,
    driver: Arc<dyn Driver>,
}

/// The persisted root entity as returned by [`Crud::create`].
///
/// Relations are not reloaded; callers wanting eager-loaded relations
/// re-fetch through their read pathway.
#[derive(Debug)]
pub struct CreatedRecord {
    pub model: ModelId,
    pub id: Value,
    pub values: IndexMap<String, Value>,
}

impl Crud {
    pub fn new(schema: Arc<Schema>, driver: Arc<dyn Driver>) -> Self {
        Self { schema, driver }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a field-definition list against the schema for `root`.
    ///
    /// All entity-path resolution happens here, once; `create` performs
    /// no relation discovery of its own.
    pub fn form(&self, root: ModelId, fields: Vec<FieldDef>) -> Result<Form> {
        Form::new(&self.schema, root, fields)
    }

    /// Insert a row together with its declared relations.
    ///
    /// The root is persisted first (belongs-to foreign keys resolved
    /// onto it before the insert), then many-to-many pivots are synced,
    /// then the one-to-one relation tree commits parent-first. The whole
    /// call is wrapped in a single driver transaction.
    pub async fn create(&self, form: &Form, payload: Payload) -> Result<CreatedRecord> {
        engine::create::execute(&self.schema, &*self.driver, form, payload).await
    }
}

impl std::fmt::Debug for Crud {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Crud")
            .field("models", &self.schema.models.len())
            .finish()
    }
}
