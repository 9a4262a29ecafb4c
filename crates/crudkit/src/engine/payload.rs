use crate::{FieldDef, Form};

use crudkit_core::{Error, Payload, Result, Value};

use indexmap::IndexMap;

/// Normalize a pivot field's submitted value into its list of pivot ids.
///
/// Accepted shapes, classified once here rather than by each consumer:
/// - absent: no associations, empty list;
/// - a JSON-encoded string: decoded, then either a bare id list or a
///   list of composite rows carrying the id under the field's own name;
/// - a native list: used directly.
pub(crate) fn pivot_ids(def: &FieldDef, payload: &Payload) -> Result<Vec<Value>> {
    let Some(value) = payload.get(&def.name) else {
        return Ok(vec![]);
    };

    match value {
        Value::String(raw) => {
            let decoded = Value::from_json_str(raw)
                .map_err(|err| Error::invalid_json(&def.name, err.to_string()))?;
            let items = decoded
                .to_list()
                .map_err(|_| Error::unexpected_shape(&def.name, "a JSON sequence of pivot ids"))?;

            items
                .into_iter()
                .map(|item| match item {
                    // Composite rows carry the id under the field name.
                    Value::Map(mut row) => row.shift_remove(&def.name).ok_or_else(|| {
                        Error::unexpected_shape(
                            &def.name,
                            format!("rows carrying a `{}` id attribute", def.name),
                        )
                    }),
                    id => Ok(id),
                })
                .collect()
        }
        Value::List(items) => Ok(items.clone()),
        _ => Err(Error::unexpected_shape(&def.name, "a sequence of pivot ids")),
    }
}

/// Decode JSON-casted attributes submitted as strings (create step 1).
pub(crate) fn decode_json_casted(form: &Form, mut payload: Payload) -> Result<Payload> {
    for def in form.fields() {
        if !def.json_cast {
            continue;
        }

        let Some(Value::String(raw)) = payload.get(&def.name) else {
            continue;
        };

        let decoded = Value::from_json_str(raw)
            .map_err(|err| Error::invalid_json(&def.name, err.to_string()))?;
        payload.set(def.name.clone(), decoded);
    }

    Ok(payload)
}

/// Pack virtual ("fake") fields into their storage columns (create
/// step 2). Every fake field sharing a storage column lands in one JSON
/// object value under that column's key.
pub(crate) fn compact_fake_fields(form: &Form, mut payload: Payload) -> Payload {
    let mut stores: IndexMap<String, IndexMap<String, Value>> = IndexMap::new();

    for def in form.fields() {
        let Some(store) = &def.fake_store else {
            continue;
        };

        if let Some(value) = payload.remove(&def.name) {
            stores
                .entry(store.clone())
                .or_default()
                .insert(def.name.clone(), value);
        }
    }

    for (store, values) in stores {
        log::debug!(
            "compacted {} fake field(s) into `{}`",
            values.len(),
            store
        );
        payload.set(store, Value::Map(values));
    }

    payload
}
