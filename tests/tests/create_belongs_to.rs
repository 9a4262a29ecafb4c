use tests::*;

use pretty_assertions::assert_eq;

#[tokio::test]
async fn submitted_id_lands_on_the_foreign_key_column() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::relation("company", RelationKind::BelongsTo),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new().with("name", "alice").with("company", 2i64),
        )
        .await
        .unwrap();

    let rows = panel.mem.rows(panel.model("users"));
    assert_eq!(rows[0].get("company_id"), Some(&Value::I64(2)));
    // Association never creates the related row.
    assert_eq!(panel.mem.row_count(panel.model("companies")), 0);
}

#[tokio::test]
async fn absent_value_dissociates_with_an_explicit_null() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::relation("company", RelationKind::BelongsTo),
    ]);

    panel
        .crud
        .create(&form, Payload::new().with("name", "bob"))
        .await
        .unwrap();

    let rows = panel.mem.rows(panel.model("users"));
    assert_eq!(rows[0].get("company_id"), Some(&Value::Null));
}

#[tokio::test]
async fn undeclared_relation_kinds_are_inferred_from_the_schema() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("company").entity("company"),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new().with("name", "carol").with("company", 9i64),
        )
        .await
        .unwrap();

    let rows = panel.mem.rows(panel.model("users"));
    assert_eq!(rows[0].get("company_id"), Some(&Value::I64(9)));
}

#[tokio::test]
async fn declared_kind_mismatch_fails_form_validation() {
    let panel = panel();
    let err = panel
        .crud
        .form(
            panel.model("users"),
            vec![FieldDef::relation("company", RelationKind::HasOne)],
        )
        .unwrap_err();

    assert!(err.is_schema(), "{err}");
}
