use super::Operation;

/// Transaction lifecycle markers.
///
/// The engine brackets every create call with `Start` and `Commit` and
/// issues `Rollback` on any failure in between, so a partial create is
/// never observable. Drivers choose the mechanics; the in-memory driver
/// snapshots its whole store on `Start` and restores it on `Rollback`.
#[derive(Debug)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Operation {
        Operation::Transaction(value)
    }
}
