use crate::{engine::payload as payload_norm, form::ResolvedRelation, Form, PivotFields};

use crudkit_core::{
    driver::operation::PivotRow,
    Error, Payload, Result, Value,
};

use indexmap::IndexMap;

/// The planned pivot work for one many-to-many field.
#[derive(Debug)]
pub(crate) struct PivotSyncPlan {
    /// Relation name on the root model
    pub(crate) relation: String,

    /// The new association set, extra pivot attributes included
    pub(crate) rows: Vec<PivotRow>,

    /// For morph fields: the raw id list synced for the morph relation
    pub(crate) raw_ids: Option<Vec<Value>>,

    /// False for morph fields without declared pivot attributes, where
    /// only the raw sync runs
    pub(crate) sync_attrs: bool,
}

/// Plan the pivot sync for every `pivot` field.
///
/// Planning is pure: it reads the payload and produces rows, so a
/// malformed submission fails the create before anything is written.
pub(crate) fn plan(form: &Form, payload: &Payload) -> Result<Vec<PivotSyncPlan>> {
    let mut plans = vec![];

    for rel in form.pivot_relation_fields() {
        let ids = payload_norm::pivot_ids(&rel.def, payload)?;

        let mut rows = Vec::with_capacity(ids.len());
        for id in &ids {
            rows.push(PivotRow {
                id: id.clone(),
                attrs: pivot_attrs(rel, payload, id)?,
            });
        }

        let raw_ids = (rel.def.morph && payload.get(&rel.def.name).is_some())
            .then(|| ids.clone());

        log::debug!(
            "planned pivot sync for `{}`: {} row(s), morph={}",
            rel.def.name,
            rows.len(),
            raw_ids.is_some()
        );

        plans.push(PivotSyncPlan {
            relation: rel.entity.clone(),
            rows,
            sync_attrs: !rel.def.morph || rel.def.pivot_fields.is_some(),
            raw_ids,
        });
    }

    Ok(plans)
}

/// Resolve the extra pivot attributes for one pivot id.
fn pivot_attrs(
    rel: &ResolvedRelation,
    payload: &Payload,
    pivot_id: &Value,
) -> Result<IndexMap<String, Value>> {
    let Some(pivot_fields) = &rel.def.pivot_fields else {
        return Ok(IndexMap::new());
    };

    match pivot_fields {
        PivotFields::Matrix(attributes) => {
            // Each attribute is a matrix keyed by pivot id. A missing cell
            // is a data-integrity failure, not a field to skip.
            let mut attrs = IndexMap::new();
            for attribute in attributes {
                let value = payload.matrix(attribute, pivot_id).ok_or_else(|| {
                    Error::missing_pivot_attribute(
                        attribute,
                        pivot_id.to_map_key().unwrap_or_default(),
                    )
                })?;
                attrs.insert(attribute.clone(), value.clone());
            }
            Ok(attrs)
        }
        PivotFields::Inline(_) => {
            // Attributes ride inside the field's own JSON rows: find the
            // row carrying this id and keep everything but the id itself.
            let Some(Value::String(raw)) = payload.get(&rel.def.name) else {
                return Err(Error::unexpected_shape(
                    &rel.def.name,
                    "a JSON string of pivot rows",
                ));
            };

            let decoded = Value::from_json_str(raw)
                .map_err(|err| Error::invalid_json(&rel.def.name, err.to_string()))?;
            let rows = decoded.to_list().map_err(|_| {
                Error::unexpected_shape(&rel.def.name, "a JSON sequence of pivot rows")
            })?;

            let row = rows
                .into_iter()
                .filter_map(|row| match row {
                    Value::Map(entries) => Some(entries),
                    _ => None,
                })
                .find(|entries| entries.get(&rel.def.name) == Some(pivot_id))
                .ok_or_else(|| {
                    Error::missing_pivot_attribute(
                        &rel.def.name,
                        pivot_id.to_map_key().unwrap_or_default(),
                    )
                })?;

            Ok(row
                .into_iter()
                .filter(|(key, _)| key != &rel.def.name)
                .collect())
        }
    }
}
