mod insert;
pub use insert::Insert;

mod update_or_create;
pub use update_or_create::UpdateOrCreate;

mod sync_pivot;
pub use sync_pivot::{PivotRow, SyncPivot};

mod transaction;
pub use transaction::Transaction;

#[derive(Debug)]
pub enum Operation {
    /// Create a new record and return it, primary key included.
    Insert(Insert),

    /// Update the record matching a filter, or create it when the filter
    /// matches nothing. An empty filter always creates.
    UpdateOrCreate(UpdateOrCreate),

    /// Full-replace reconciliation of a pivot table for one owner row.
    SyncPivot(SyncPivot),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}
