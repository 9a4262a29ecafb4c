use crate::Value;

use indexmap::IndexMap;

/// A raw form submission: an ordered mapping from field name to value.
///
/// Keys may be plain (`name`), dotted (`address.line_1`), or bracketed
/// (`address[line_1]`); bracketed keys normalize to the dotted form on
/// insert. Matrix-shaped submissions (`hours[pivot_id]`) are stored as a
/// `Value::Map` keyed by the inner index.
#[derive(Debug, Default, Clone)]
pub struct Payload {
    entries: IndexMap<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, normalizing bracketed key syntax to dotted.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(dotted(&key.into()), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Look up a dotted path, preferring a literal key over map traversal.
    ///
    /// Form layers submit nested attributes both ways: as a literal
    /// `"address.line_1"` key and as a nested map under `"address"`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.entries.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;

        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }

        Some(current)
    }

    /// Look up `data[attribute][pivot_id]` from a matrix-shaped submission.
    pub fn matrix(&self, attribute: &str, pivot_id: &Value) -> Option<&Value> {
        let key = pivot_id.to_map_key()?;
        self.entries.get(attribute)?.as_map()?.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Payload {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut payload = Self::new();
        for (key, value) in iter {
            payload.set(key, value);
        }
        payload
    }
}

/// Normalize HTML-style bracket syntax (`a[b][c]`) to dotted (`a.b.c`).
fn dotted(key: &str) -> String {
    if !key.contains('[') {
        return key.to_string();
    }

    key.replace("[]", "")
        .replace('[', ".")
        .replace(']', "")
}
