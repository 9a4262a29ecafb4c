mod error;
pub use error::Error;

pub mod driver;
pub use driver::Driver;

pub mod schema;
pub use schema::Schema;

mod value;
pub use value::Value;

mod payload;
pub use payload::Payload;

/// A Result type alias that uses crudkit's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
