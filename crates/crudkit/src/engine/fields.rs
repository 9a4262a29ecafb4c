use crate::FieldDef;

use crudkit_core::{
    schema::{Field, Model, ModelId},
    Error, Result, Schema,
};

/// Flatten a field list into its relation fields: top-level fields that
/// map to a relation, plus every relation subfield of composite fields,
/// in encounter order.
pub(crate) fn relation_fields(fields: &[FieldDef]) -> Vec<&FieldDef> {
    let mut out = vec![];

    for field in fields {
        if field.is_relation() {
            out.push(field);
        }

        for subfield in &field.subfields {
            if subfield.is_relation() {
                out.push(subfield);
            }
        }
    }

    out
}

/// Normalize HTML-style bracket names (`address[country]`) to dotted.
pub(crate) fn dotted_name(name: &str) -> String {
    if !name.contains('[') {
        return name.to_string();
    }

    name.replace("[]", "").replace('[', ".").replace(']', "")
}

/// Reduce an entity path to the path of the relation it actually names.
///
/// The last segment of a dotted entity path may be a plain attribute of
/// the parent relation rather than a relation itself (`address.line_1`
/// names the `line_1` column of the `address` relation). The check is
/// purely structural against the schema; no store access.
///
/// Single-segment paths are returned unchanged.
pub(crate) fn only_relation_entity(
    schema: &Schema,
    root: ModelId,
    field: &FieldDef,
) -> Result<String> {
    let path = dotted_name(field.entity_path());
    let segments: Vec<&str> = path.split('.').collect();

    let [head @ .., last] = &segments[..] else {
        return Ok(path);
    };

    if head.is_empty() {
        return Ok(path);
    }

    let parent = resolve_model(schema, root, &path, head)?;

    if parent.has_relation(last) {
        Ok(path)
    } else {
        Ok(head.join("."))
    }
}

/// Walk a relation path from `root` and return the final relation field.
pub(crate) fn resolve_relation<'a>(
    schema: &'a Schema,
    root: ModelId,
    path: &str,
) -> Result<&'a Field> {
    let segments: Vec<&str> = path.split('.').collect();
    let [head @ .., last] = &segments[..] else {
        return Err(Error::unresolved_entity_path(path, path));
    };

    let parent = resolve_model(schema, root, path, head)?;
    parent
        .relation(last)
        .ok_or_else(|| Error::unknown_relation(&parent.name, *last))
}

/// Resolve the model reached by following `segments` from `root`.
fn resolve_model<'a>(
    schema: &'a Schema,
    root: ModelId,
    path: &str,
    segments: &[&str],
) -> Result<&'a Model> {
    let mut model = schema.model(root);

    for segment in segments {
        let relation = model
            .relation(segment)
            .ok_or_else(|| Error::unresolved_entity_path(path, *segment))?;
        model = relation
            .relation_target(schema)
            .ok_or_else(|| Error::unresolved_entity_path(path, *segment))?;
    }

    Ok(model)
}
