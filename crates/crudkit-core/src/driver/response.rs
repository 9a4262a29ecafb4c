use crate::Value;

use indexmap::IndexMap;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// The affected record, primary key included
    Record(IndexMap<String, Value>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn record(record: IndexMap<String, Value>) -> Self {
        Self {
            rows: Rows::Record(record),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    #[track_caller]
    pub fn into_count(self) -> u64 {
        match self {
            Self::Count(count) => count,
            _ => panic!("expected a count response; rows={self:#?}"),
        }
    }

    #[track_caller]
    pub fn into_record(self) -> IndexMap<String, Value> {
        match self {
            Self::Record(record) => record,
            _ => panic!("expected a record response; rows={self:#?}"),
        }
    }
}
