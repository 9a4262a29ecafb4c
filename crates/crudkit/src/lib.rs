//! The create pathway of an admin-panel CRUD engine.
//!
//! A [`Form`] binds an ordered list of [`FieldDef`]s to a root model in a
//! [`Schema`](crudkit_core::Schema). [`Crud::create`] turns a raw
//! [`Payload`] into a root row, its one-to-one relation chain, and its
//! many-to-many pivot rows, committed parent-first inside one driver
//! transaction.

mod crud;
pub use crud::{CreatedRecord, Crud};

mod engine;

mod form;
pub use form::Form;

pub mod schema;
pub use schema::{FieldDef, PivotFields, RelationKind};

pub use crudkit_core::{Error, Payload, Result, Schema, Value};
