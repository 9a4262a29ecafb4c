use crate::{
    crud::CreatedRecord,
    engine::{payload as payload_norm, pivot, pivot::PivotSyncPlan, tree, tree::RelationNode},
    Form,
};

use crudkit_core::{
    driver::operation::{Insert, PivotRow, SyncPivot, Transaction, UpdateOrCreate},
    schema::ModelId,
    Driver, Error, Payload, Result, Schema, Value,
};

use async_recursion::async_recursion;
use indexmap::IndexMap;

use std::collections::HashSet;

/// Execute one create call end to end.
///
/// Planning (payload normalization, pivot rows, relation tree) happens
/// before the transaction opens, so a malformed submission never touches
/// the store. Everything that writes runs between `Start` and `Commit`;
/// any failure rolls the whole create back, root row included.
pub(crate) async fn execute(
    schema: &Schema,
    driver: &dyn Driver,
    form: &Form,
    payload: Payload,
) -> Result<CreatedRecord> {
    let payload = payload_norm::decode_json_casted(form, payload)?;
    let payload = payload_norm::compact_fake_fields(form, payload);

    let root_values = root_values(schema, form, &payload)?;
    let pivot_plans = pivot::plan(form, &payload)?;
    let relation_tree = tree::build(schema, form, &payload)?;

    driver.exec(Transaction::Start.into()).await?;

    let result = commit(schema, driver, form, root_values, pivot_plans, relation_tree).await;

    match result {
        Ok(record) => {
            driver.exec(Transaction::Commit.into()).await?;
            Ok(record)
        }
        Err(err) => {
            // Report the original failure even if the rollback also fails.
            let _ = driver.exec(Transaction::Rollback.into()).await;
            Err(err)
        }
    }
}

async fn commit(
    schema: &Schema,
    driver: &dyn Driver,
    form: &Form,
    root_values: IndexMap<String, Value>,
    pivot_plans: Vec<PivotSyncPlan>,
    relation_tree: tree::RelationTree,
) -> Result<CreatedRecord> {
    let root = schema.model(form.root());

    log::debug!(
        "creating `{}` with {} column(s), {} pivot sync(s)",
        root.name,
        root_values.len(),
        pivot_plans.len()
    );

    let record = driver
        .exec(
            Insert {
                model: root.id,
                primary_key: root.primary_key.clone(),
                values: root_values,
            }
            .into(),
        )
        .await?
        .rows
        .into_record();

    let root_id = record
        .get(&root.primary_key)
        .cloned()
        .ok_or_else(|| Error::driver_operation_failed("insert returned no primary key"))?;

    sync_pivots(schema, driver, root.id, &root_id, pivot_plans).await?;
    commit_relations(schema, driver, root.id, &root_id, relation_tree.relations).await?;

    Ok(CreatedRecord {
        model: root.id,
        id: root_id,
        values: record,
    })
}

/// Commit every planned pivot sync against the freshly created root.
async fn sync_pivots(
    schema: &Schema,
    driver: &dyn Driver,
    root: ModelId,
    root_id: &Value,
    plans: Vec<PivotSyncPlan>,
) -> Result<()> {
    for plan in plans {
        let model = schema.model(root);
        let field = model
            .relation(&plan.relation)
            .ok_or_else(|| Error::unknown_relation(&model.name, &plan.relation))?;
        let many_to_many = field.ty.expect_many_to_many();

        if plan.sync_attrs {
            driver
                .exec(
                    SyncPivot {
                        table: many_to_many.pivot_table.clone(),
                        owner_key: many_to_many.owner_key.clone(),
                        owner_id: root_id.clone(),
                        related_key: many_to_many.related_key.clone(),
                        rows: plan.rows,
                    }
                    .into(),
                )
                .await?;
        }

        if let Some(raw_ids) = plan.raw_ids {
            driver
                .exec(
                    SyncPivot {
                        table: many_to_many.pivot_table.clone(),
                        owner_key: many_to_many.owner_key.clone(),
                        owner_id: root_id.clone(),
                        related_key: many_to_many.related_key.clone(),
                        rows: raw_ids.into_iter().map(PivotRow::new).collect(),
                    }
                    .into(),
                )
                .await?;
        }
    }

    Ok(())
}

/// Commit the relation tree parent-first.
///
/// Each has-one node is written with its parent's primary key on its
/// foreign-key column, so a node can only be committed after its parent
/// row exists. Belongs-to children collapse into the node's own row
/// before that single write.
#[async_recursion]
async fn commit_relations(
    schema: &Schema,
    driver: &dyn Driver,
    parent: ModelId,
    parent_id: &Value,
    nodes: IndexMap<String, RelationNode>,
) -> Result<()> {
    for (method, node) in nodes {
        let parent_model = schema.model(parent);
        let field = parent_model
            .relation(&method)
            .ok_or_else(|| Error::unknown_relation(&parent_model.name, &method))?;

        let Some(has_one) = field.ty.as_has_one() else {
            // Only one-to-one chains are committed through the tree.
            return Err(Error::unsupported_relation(&method, field.ty.kind_name()));
        };

        let child_model = schema.model(has_one.target);
        let mut values = node.values;
        let mut remaining = IndexMap::new();

        // Belongs-to children store their foreign key on this node's own
        // row, so their values merge in before the write.
        for (child_method, child_node) in node.relations {
            if child_node.kind.is_belongs_to() {
                values.insert(
                    belongs_to_foreign_key(schema, child_model.id, &child_method)?,
                    child_node
                        .values
                        .get(&child_method)
                        .cloned()
                        .unwrap_or(Value::Null),
                );
            } else {
                remaining.insert(child_method, child_node);
            }
        }

        values.insert(has_one.foreign_key.clone(), parent_id.clone());

        log::debug!(
            "committing has-one `{}` on `{}`",
            method,
            parent_model.name
        );

        // Empty filter: nothing can match during a create, so this always
        // inserts; the same operation carries the update pathway.
        let record = driver
            .exec(
                UpdateOrCreate {
                    model: child_model.id,
                    primary_key: child_model.primary_key.clone(),
                    filter: IndexMap::new(),
                    values,
                }
                .into(),
            )
            .await?
            .rows
            .into_record();

        if !remaining.is_empty() {
            let child_id = record
                .get(&child_model.primary_key)
                .cloned()
                .ok_or_else(|| {
                    Error::driver_operation_failed("update-or-create returned no primary key")
                })?;
            commit_relations(schema, driver, child_model.id, &child_id, remaining).await?;
        }
    }

    Ok(())
}

/// The foreign-key column for a belongs-to relation on `model`.
fn belongs_to_foreign_key(schema: &Schema, model: ModelId, relation: &str) -> Result<String> {
    let model = schema.model(model);
    let field = model
        .relation(relation)
        .ok_or_else(|| Error::unknown_relation(&model.name, relation))?;
    let belongs_to = field
        .ty
        .as_belongs_to()
        .ok_or_else(|| Error::relation_kind_mismatch(relation, "belongs-to", field.ty.kind_name()))?;
    Ok(belongs_to.foreign_key.clone())
}

/// Assemble the root row's column values (create steps 3 and 4).
///
/// Pivot fields never map to root columns. Top-level belongs-to fields
/// resolve to their foreign-key columns: a submitted value associates,
/// an absent one dissociates by writing an explicit null.
fn root_values(schema: &Schema, form: &Form, payload: &Payload) -> Result<IndexMap<String, Value>> {
    let root = schema.model(form.root());
    let mut values = IndexMap::new();

    let pivot_names: HashSet<&str> = form
        .pivot_relation_fields()
        .map(|rel| rel.def.name.as_str())
        .collect();

    for field in root.primitives() {
        if pivot_names.contains(field.name.as_str()) {
            continue;
        }
        if let Some(value) = payload.get(&field.name) {
            let column = field
                .ty
                .as_primitive()
                .expect("primitives() yields primitive fields")
                .column
                .clone();
            values.insert(column, value.clone());
        }
    }

    for rel in form.relation_fields() {
        if !rel.kind.is_belongs_to() || rel.nested || rel.def.pivot {
            continue;
        }

        let foreign_key = belongs_to_foreign_key(schema, root.id, &rel.entity)?;
        let value = payload
            .get_path(&rel.attribute)
            .cloned()
            .unwrap_or(Value::Null);
        values.insert(foreign_key, value);
    }

    Ok(values)
}
