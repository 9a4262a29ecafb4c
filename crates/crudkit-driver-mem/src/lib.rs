//! An in-memory [`Driver`] for tests and demos.
//!
//! Tables are plain maps with auto-increment primary keys; pivot tables
//! are row lists. Transactions snapshot the whole store on `Start` and
//! restore it on `Rollback`, which gives the engine real all-or-nothing
//! semantics without a database.

use crudkit_core::{
    async_trait,
    driver::{
        operation::{Insert, Operation, SyncPivot, Transaction, UpdateOrCreate},
        Driver, Response,
    },
    schema::ModelId,
    Error, Value,
};

use indexmap::IndexMap;

use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct Mem {
    state: Mutex<State>,
    /// When set, the next operation whose name matches fails once.
    fail_next: Mutex<Option<String>>,
}

#[derive(Debug, Default, Clone)]
struct State {
    tables: BTreeMap<usize, Table>,
    pivots: BTreeMap<String, Vec<PivotEntry>>,
    snapshot: Option<Box<Store>>,
}

#[derive(Debug, Default, Clone)]
struct Store {
    tables: BTreeMap<usize, Table>,
    pivots: BTreeMap<String, Vec<PivotEntry>>,
}

#[derive(Debug, Default, Clone)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, IndexMap<String, Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PivotEntry {
    pub owner: Value,
    pub related: Value,
    pub attrs: IndexMap<String, Value>,
}

impl Mem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next operation of the given kind with a driver error.
    /// Kinds: `insert`, `update-or-create`, `sync-pivot`, `transaction`.
    pub fn fail_next(&self, op: &str) {
        *self.fail_next.lock().unwrap() = Some(op.to_string());
    }

    /// All rows of a model's table, insertion order.
    pub fn rows(&self, model: ModelId) -> Vec<IndexMap<String, Value>> {
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(&model.0)
            .map(|table| table.rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn row_count(&self, model: ModelId) -> usize {
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(&model.0)
            .map(|table| table.rows.len())
            .unwrap_or(0)
    }

    /// All pivot rows of a join table.
    pub fn pivot_rows(&self, table: &str) -> Vec<PivotEntry> {
        let state = self.state.lock().unwrap();
        state.pivots.get(table).cloned().unwrap_or_default()
    }

    fn check_fail(&self, op: &str) -> crudkit_core::Result<()> {
        let mut fail_next = self.fail_next.lock().unwrap();
        if fail_next.as_deref() == Some(op) {
            *fail_next = None;
            return Err(Error::driver_operation_failed(format!(
                "injected failure for `{op}`"
            )));
        }
        Ok(())
    }

    fn insert_row(
        state: &mut State,
        model: ModelId,
        primary_key: &str,
        values: IndexMap<String, Value>,
    ) -> IndexMap<String, Value> {
        let table = state.tables.entry(model.0).or_default();
        table.next_id += 1;
        let id = table.next_id;

        let mut row = IndexMap::new();
        row.insert(primary_key.to_string(), Value::I64(id));
        row.extend(values);
        table.rows.insert(id, row.clone());
        row
    }
}

#[async_trait]
impl Driver for Mem {
    async fn exec(&self, op: Operation) -> crudkit_core::Result<Response> {
        match op {
            Operation::Insert(op) => {
                self.check_fail("insert")?;
                let Insert {
                    model,
                    primary_key,
                    values,
                } = op;

                let mut state = self.state.lock().unwrap();
                let row = Self::insert_row(&mut state, model, &primary_key, values);
                Ok(Response::record(row))
            }
            Operation::UpdateOrCreate(op) => {
                self.check_fail("update-or-create")?;
                let UpdateOrCreate {
                    model,
                    primary_key,
                    filter,
                    values,
                } = op;

                let mut state = self.state.lock().unwrap();

                if !filter.is_empty() {
                    let table = state.tables.entry(model.0).or_default();
                    let found = table.rows.iter_mut().find(|(_, row)| {
                        filter.iter().all(|(key, value)| row.get(key) == Some(value))
                    });
                    if let Some((_, row)) = found {
                        row.extend(values);
                        return Ok(Response::record(row.clone()));
                    }
                }

                let row = Self::insert_row(&mut state, model, &primary_key, values);
                Ok(Response::record(row))
            }
            Operation::SyncPivot(op) => {
                self.check_fail("sync-pivot")?;
                let SyncPivot {
                    table,
                    owner_key: _,
                    owner_id,
                    related_key: _,
                    rows,
                } = op;

                let mut state = self.state.lock().unwrap();
                let entries = state.pivots.entry(table).or_default();

                // Full replace: drop the owner's existing associations,
                // then attach the new set.
                entries.retain(|entry| entry.owner != owner_id);
                let count = rows.len() as u64;
                for row in rows {
                    entries.push(PivotEntry {
                        owner: owner_id.clone(),
                        related: row.id,
                        attrs: row.attrs,
                    });
                }

                Ok(Response::count(count))
            }
            Operation::Transaction(op) => {
                self.check_fail("transaction")?;
                let mut state = self.state.lock().unwrap();

                match op {
                    Transaction::Start => {
                        state.snapshot = Some(Box::new(Store {
                            tables: state.tables.clone(),
                            pivots: state.pivots.clone(),
                        }));
                    }
                    Transaction::Commit => {
                        state.snapshot = None;
                    }
                    Transaction::Rollback => {
                        let snapshot = state.snapshot.take().ok_or_else(|| {
                            Error::driver_operation_failed("rollback without a transaction")
                        })?;
                        log::debug!("rolling back to snapshot");
                        state.tables = snapshot.tables;
                        state.pivots = snapshot.pivots;
                    }
                }

                Ok(Response::count(0))
            }
        }
    }
}
