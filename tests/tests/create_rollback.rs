use tests::*;

use pretty_assertions::assert_eq;

#[tokio::test]
async fn pivot_sync_failure_rolls_back_the_root_insert() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::relation("tags", RelationKind::ManyToMany).pivot(),
    ]);

    panel.mem.fail_next("sync-pivot");

    let err = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "alice")
                .with("tags", Value::List(vec![1.into()])),
        )
        .await
        .unwrap_err();

    assert!(err.is_driver(), "{err}");
    assert_eq!(panel.mem.row_count(panel.model("users")), 0);
    assert!(panel.mem.pivot_rows("tag_user").is_empty());
}

#[tokio::test]
async fn tree_commit_failure_rolls_back_the_whole_create() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("address.line_1").entity("address.line_1"),
    ]);

    panel.mem.fail_next("update-or-create");

    let err = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "bob")
                .with("address.line_1", "1 Main St"),
        )
        .await
        .unwrap_err();

    assert!(err.is_driver(), "{err}");
    assert_eq!(panel.mem.row_count(panel.model("users")), 0);
    assert_eq!(panel.mem.row_count(panel.model("addresses")), 0);
}

#[tokio::test]
async fn root_insert_failure_leaves_the_store_untouched() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name")]);

    panel.mem.fail_next("insert");

    let err = panel
        .crud
        .create(&form, Payload::new().with("name", "carol"))
        .await
        .unwrap_err();

    assert!(err.is_driver(), "{err}");
    assert_eq!(panel.mem.row_count(panel.model("users")), 0);
}

#[tokio::test]
async fn the_store_stays_usable_after_a_rollback() {
    let panel = panel();
    let form = panel.form(vec![FieldDef::new("name")]);

    panel.mem.fail_next("insert");
    panel
        .crud
        .create(&form, Payload::new().with("name", "a"))
        .await
        .unwrap_err();

    let record = panel
        .crud
        .create(&form, Payload::new().with("name", "b"))
        .await
        .unwrap();

    assert_eq!(record.id, Value::I64(1));
    assert_eq!(panel.mem.row_count(panel.model("users")), 1);
}
