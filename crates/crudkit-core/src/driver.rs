mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::fmt::Debug;

/// The persistence boundary.
///
/// The engine plans [`Operation`]s and hands them here one at a time;
/// the driver owns connections, SQL (or not), and transaction mechanics.
/// Store failures propagate unmodified and are never retried.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a database operation
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
