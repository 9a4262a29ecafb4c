use crate::{Error, Result};

use indexmap::IndexMap;

/// A submitted or stored value.
///
/// Form submissions arrive as scalars, sequences, mappings, or
/// JSON-encoded strings; every shape normalizes into this one enum before
/// the engine looks at it.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// A list of values
    List(Vec<Value>),

    /// An ordered mapping from attribute name to value
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn to_list(self) -> Result<Vec<Value>> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(Error::unexpected_shape("<value>", "a sequence")),
        }
    }

    /// Renders the value as a mapping key.
    ///
    /// Pivot-attribute matrices are keyed by pivot id, which may be
    /// submitted as an integer or a string depending on the form layer.
    pub fn to_map_key(&self) -> Option<String> {
        match self {
            Self::I64(v) => Some(v.to_string()),
            Self::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Decode a JSON-encoded string into a `Value`.
    pub fn from_json_str(src: &str) -> core::result::Result<Self, serde_json::Error> {
        let json: serde_json::Value = serde_json::from_str(src)?;
        Ok(json.into())
    }
}

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        match src {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Self::I64(v)
                } else {
                    Self::F64(v.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(src: IndexMap<String, Value>) -> Self {
        Self::Map(src)
    }
}
