//! Shared fixture for the end-to-end create tests.
//!
//! One schema covers every scenario: a `users` root with a nullable
//! belongs-to, a two-level has-one chain, a plain many-to-many and a
//! polymorphic one. Each test builds its own form over this schema and
//! runs against a fresh in-memory driver.

pub use crudkit::{
    Crud, CreatedRecord, FieldDef, Form, Payload, PivotFields, RelationKind, Value,
};
pub use crudkit_core::schema::ModelId;
pub use crudkit_driver_mem::Mem;

use crudkit::Schema;

use std::sync::Arc;

pub struct Panel {
    pub crud: Crud,
    pub mem: Arc<Mem>,
    schema: Arc<Schema>,
}

impl Panel {
    pub fn model(&self, name: &str) -> ModelId {
        self.schema
            .model_by_name(name)
            .unwrap_or_else(|| panic!("fixture schema has no model `{name}`"))
            .id
    }

    /// A validated form over the `users` root.
    pub fn form(&self, fields: Vec<FieldDef>) -> Form {
        self.crud.form(self.model("users"), fields).unwrap()
    }
}

pub fn panel() -> Panel {
    let _ = env_logger::builder().is_test(true).try_init();

    let schema = Arc::new(fixture_schema());
    let mem = Arc::new(Mem::new());
    let crud = Crud::new(schema.clone(), mem.clone());

    Panel { crud, mem, schema }
}

fn fixture_schema() -> Schema {
    Schema::builder()
        .model("users", |m| {
            m.field("name");
            m.field("options");
            m.field("extras");
            m.belongs_to("company", "companies", "company_id").nullable();
            m.has_one("address", "addresses", "user_id");
            m.many_to_many("tags", "tags", "tag_user", "user_id", "tag_id");
            m.many_to_many("images", "images", "imageables", "imageable_id", "image_id");
        })
        .model("companies", |m| {
            m.field("name");
        })
        .model("addresses", |m| {
            m.field("line_1");
            m.field("city");
            m.belongs_to("country", "countries", "country_id");
            m.has_one("geo", "geos", "address_id");
        })
        .model("countries", |m| {
            m.field("name");
        })
        .model("geos", |m| {
            m.field("lat");
            m.field("lng");
        })
        .model("tags", |m| {
            m.field("label");
        })
        .model("images", |m| {
            m.field("path");
        })
        .build()
        .unwrap()
}
