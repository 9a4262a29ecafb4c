use tests::*;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn tags_field() -> FieldDef {
    FieldDef::relation("tags", RelationKind::ManyToMany).pivot()
}

fn related_ids(panel: &Panel, table: &str, owner: &Value) -> Vec<Value> {
    panel
        .mem
        .pivot_rows(table)
        .into_iter()
        .filter(|entry| &entry.owner == owner)
        .map(|entry| entry.related)
        .collect()
}

#[tokio::test]
async fn native_id_lists_attach_exactly_those_rows() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name"), tags_field()]);

    let record = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "alice")
                .with("tags", Value::List(vec![1.into(), 3.into(), 5.into()])),
        )
        .await
        .unwrap();

    assert_eq!(
        related_ids(&panel, "tag_user", &record.id),
        vec![Value::I64(1), Value::I64(3), Value::I64(5)]
    );
}

#[tokio::test]
async fn json_strings_attach_the_same_rows_as_native_lists() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name"), tags_field()]);

    let native = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "a")
                .with("tags", Value::List(vec![1.into(), 3.into()])),
        )
        .await
        .unwrap();
    let encoded = panel
        .crud
        .create(
            &form,
            Payload::new().with("name", "b").with("tags", "[1, 3]"),
        )
        .await
        .unwrap();

    assert_eq!(
        related_ids(&panel, "tag_user", &native.id),
        related_ids(&panel, "tag_user", &encoded.id),
    );
}

#[tokio::test]
async fn each_owner_keeps_its_own_association_set() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name"), tags_field()]);

    let first = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "a")
                .with("tags", Value::List(vec![1.into(), 2.into()])),
        )
        .await
        .unwrap();
    let second = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "b")
                .with("tags", Value::List(vec![2.into()])),
        )
        .await
        .unwrap();

    assert_eq!(
        related_ids(&panel, "tag_user", &first.id),
        vec![Value::I64(1), Value::I64(2)]
    );
    assert_eq!(
        related_ids(&panel, "tag_user", &second.id),
        vec![Value::I64(2)]
    );
}

#[tokio::test]
async fn matrix_attributes_land_on_their_pivot_rows() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        tags_field().pivot_fields(PivotFields::Matrix(vec!["note".into()])),
    ]);

    let notes: IndexMap<String, Value> = [
        ("1".to_string(), Value::from("first")),
        ("3".to_string(), Value::from("third")),
    ]
    .into_iter()
    .collect();

    panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "alice")
                .with("tags", Value::List(vec![1.into(), 3.into()]))
                .with("note", Value::Map(notes)),
        )
        .await
        .unwrap();

    let rows = panel.mem.pivot_rows("tag_user");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].attrs.get("note"), Some(&Value::from("first")));
    assert_eq!(rows[1].attrs.get("note"), Some(&Value::from("third")));
}

#[tokio::test]
async fn inline_attributes_land_on_their_pivot_rows() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        tags_field().pivot_fields(PivotFields::Inline(vec!["note".into()])),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "bob")
                .with("tags", r#"[{"tags": 2, "note": "a"}, {"tags": 4, "note": "b"}]"#),
        )
        .await
        .unwrap();

    let rows = panel.mem.pivot_rows("tag_user");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].related, Value::I64(2));
    assert_eq!(rows[0].attrs.get("note"), Some(&Value::from("a")));
    assert!(rows[0].attrs.get("tags").is_none());
    assert_eq!(rows[1].related, Value::I64(4));
    assert_eq!(rows[1].attrs.get("note"), Some(&Value::from("b")));
}

#[tokio::test]
async fn missing_matrix_cell_aborts_before_any_write() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        tags_field().pivot_fields(PivotFields::Matrix(vec!["note".into()])),
    ]);

    let notes: IndexMap<String, Value> =
        [("1".to_string(), Value::from("first"))].into_iter().collect();

    let err = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "alice")
                .with("tags", Value::List(vec![1.into(), 3.into()]))
                .with("note", Value::Map(notes)),
        )
        .await
        .unwrap_err();

    assert!(err.is_malformed_payload(), "{err}");
    assert_eq!(panel.mem.row_count(panel.model("users")), 0);
    assert!(panel.mem.pivot_rows("tag_user").is_empty());
}

#[tokio::test]
async fn malformed_json_leaves_no_root_row() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name"), tags_field()]);

    let err = panel
        .crud
        .create(
            &form,
            Payload::new().with("name", "alice").with("tags", "[1, 3,"),
        )
        .await
        .unwrap_err();

    assert!(err.is_malformed_payload(), "{err}");
    assert_eq!(panel.mem.row_count(panel.model("users")), 0);
}

#[tokio::test]
async fn absent_pivot_value_attaches_nothing() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name"), tags_field()]);

    panel
        .crud
        .create(&form, Payload::new().with("name", "alice"))
        .await
        .unwrap();

    assert_eq!(panel.mem.row_count(panel.model("users")), 1);
    assert!(panel.mem.pivot_rows("tag_user").is_empty());
}

#[tokio::test]
async fn morph_fields_sync_raw_ids_without_attributes() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::relation("images", RelationKind::MorphMany)
            .pivot()
            .morph(),
    ]);

    let record = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "alice")
                .with("images", Value::List(vec![10.into(), 11.into()])),
        )
        .await
        .unwrap();

    let rows = panel.mem.pivot_rows("imageables");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.owner == record.id));
    assert!(rows.iter().all(|row| row.attrs.is_empty()));
    assert_eq!(
        related_ids(&panel, "imageables", &record.id),
        vec![Value::I64(10), Value::I64(11)]
    );
}

#[tokio::test]
async fn pivot_on_a_belongs_to_field_fails_form_validation() {
    let panel = panel();
    let err = panel
        .crud
        .form(
            panel.model("users"),
            vec![FieldDef::relation("company", RelationKind::BelongsTo).pivot()],
        )
        .unwrap_err();

    assert!(err.is_schema(), "{err}");
}
