use crate::{engine::fields, Form, RelationKind};

use crudkit_core::{schema::ModelId, Payload, Result, Schema, Value};

use indexmap::IndexMap;

/// The pending relation graph for one create call.
///
/// Built from the flat payload before anything is persisted and walked
/// parent-first afterwards. Nodes are constructed directly from resolved
/// entity paths; there is no string-keyed nested-map assembly, so two
/// fields addressing the same relation always land in the same node.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RelationTree {
    pub(crate) relations: IndexMap<String, RelationNode>,
}

#[derive(Debug, PartialEq)]
pub(crate) struct RelationNode {
    /// Target model of this relation
    pub(crate) model: ModelId,

    /// How the relation hangs off its parent
    pub(crate) kind: RelationKind,

    /// Column values pending for the related row
    pub(crate) values: IndexMap<String, Value>,

    /// Relations nested under this one
    pub(crate) relations: IndexMap<String, RelationNode>,
}

impl RelationNode {
    fn new(model: ModelId, kind: RelationKind) -> Self {
        Self {
            model,
            kind,
            values: IndexMap::new(),
            relations: IndexMap::new(),
        }
    }
}

/// Build the relation tree from the normalized payload.
///
/// Selects relation fields that are not committed elsewhere: top-level
/// belongs-to fields become foreign keys on the root row and pivot
/// fields go through pivot sync. The tree holds everything else:
/// one-to-one chains and the belongs-to relations nested inside them.
pub(crate) fn build(schema: &Schema, form: &Form, payload: &Payload) -> Result<RelationTree> {
    let mut tree = RelationTree::default();

    for rel in form.relation_fields() {
        if rel.def.pivot {
            continue;
        }
        if rel.kind.is_belongs_to() && !rel.nested {
            continue;
        }

        let segments: Vec<&str> = rel.entity.split('.').collect();
        let mut model = form.root();
        let mut nodes = &mut tree.relations;

        for (depth, segment) in segments.iter().enumerate() {
            let field = fields::resolve_relation(schema, model, segment)?;
            let target = field
                .relation_target_id()
                .expect("validated relation has a target");
            let kind = RelationKind::of(&field.ty).expect("validated relation has a kind");

            // Move the cursor rather than reborrowing it, so the node
            // reference can be carried into the next iteration.
            let children = nodes;
            let entry = children
                .entry(segment.to_string())
                .or_insert_with(|| RelationNode::new(target, kind));
            model = target;

            if depth == segments.len() - 1 {
                set_values(entry, rel, payload);
                break;
            }
            nodes = &mut entry.relations;
        }
    }

    Ok(tree)
}

/// Record the submitted value on the node addressed by the field.
fn set_values(node: &mut RelationNode, rel: &crate::form::ResolvedRelation, payload: &Payload) {
    let attribute = rel
        .attribute
        .rsplit('.')
        .next()
        .expect("attribute keys are not empty");

    if rel.attribute == rel.entity {
        // The field addresses the relation itself. A map submission
        // carries the related row's attributes; a scalar is the related
        // id (a nested belongs-to), stored under the relation's own name
        // for the commit walk to pick up.
        match payload.get_path(&rel.attribute) {
            Some(Value::Map(entries)) => {
                for (key, value) in entries {
                    node.values.insert(key.clone(), value.clone());
                }
            }
            Some(value) => {
                node.values.insert(attribute.to_string(), value.clone());
            }
            None => {}
        }
        return;
    }

    let value = payload
        .get_path(&rel.attribute)
        .cloned()
        .unwrap_or(Value::Null);
    node.values.insert(attribute.to_string(), value);
}
