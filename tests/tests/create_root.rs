use tests::*;

use pretty_assertions::assert_eq;

#[tokio::test]
async fn relation_free_create_persists_one_row() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name")]);

    let record = panel
        .crud
        .create(&form, Payload::new().with("name", "alice"))
        .await
        .unwrap();

    assert_eq!(record.id, Value::I64(1));
    assert_eq!(record.values.get("name"), Some(&Value::from("alice")));

    let rows = panel.mem.rows(panel.model("users"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some(&Value::from("alice")));
    assert!(panel.mem.pivot_rows("tag_user").is_empty());
}

#[tokio::test]
async fn undeclared_payload_keys_are_ignored() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name")]);

    let record = panel
        .crud
        .create(
            &form,
            Payload::new().with("name", "bob").with("is_admin", true),
        )
        .await
        .unwrap();

    assert!(record.values.get("is_admin").is_none());
    let rows = panel.mem.rows(panel.model("users"));
    assert!(rows[0].get("is_admin").is_none());
}

#[tokio::test]
async fn primary_keys_auto_increment_across_creates() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name")]);

    let first = panel
        .crud
        .create(&form, Payload::new().with("name", "a"))
        .await
        .unwrap();
    let second = panel
        .crud
        .create(&form, Payload::new().with("name", "b"))
        .await
        .unwrap();

    assert_eq!(first.id, Value::I64(1));
    assert_eq!(second.id, Value::I64(2));
    assert_eq!(panel.mem.row_count(panel.model("users")), 2);
}

#[tokio::test]
async fn json_casted_strings_are_stored_decoded() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("options").json_cast(),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "carol")
                .with("options", r#"{"theme": "dark"}"#),
        )
        .await
        .unwrap();

    let rows = panel.mem.rows(panel.model("users"));
    let options = rows[0].get("options").unwrap().as_map().unwrap();
    assert_eq!(options.get("theme"), Some(&Value::from("dark")));
}

#[tokio::test]
async fn invalid_json_cast_leaves_no_row() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("options").json_cast(),
    ]);

    let err = panel
        .crud
        .create(
            &form,
            Payload::new().with("name", "carol").with("options", "{nope"),
        )
        .await
        .unwrap_err();

    assert!(err.is_malformed_payload(), "{err}");
    assert_eq!(panel.mem.row_count(panel.model("users")), 0);
}

#[tokio::test]
async fn fake_fields_compact_into_their_store_column() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("height").fake("extras"),
        FieldDef::new("weight").fake("extras"),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "dave")
                .with("height", 180i64)
                .with("weight", 75i64),
        )
        .await
        .unwrap();

    let rows = panel.mem.rows(panel.model("users"));
    assert!(rows[0].get("height").is_none());
    let extras = rows[0].get("extras").unwrap().as_map().unwrap();
    assert_eq!(extras.get("height"), Some(&Value::I64(180)));
    assert_eq!(extras.get("weight"), Some(&Value::I64(75)));
}
