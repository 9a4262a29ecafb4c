use tests::*;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn has_one_row_commits_after_the_root_with_its_foreign_key() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("address.line_1").entity("address.line_1"),
        FieldDef::new("address.city").entity("address.city"),
    ]);

    let record = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "alice")
                .with("address.line_1", "1 Main St")
                .with("address.city", "Lisbon"),
        )
        .await
        .unwrap();

    let addresses = panel.mem.rows(panel.model("addresses"));
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].get("line_1"), Some(&Value::from("1 Main St")));
    assert_eq!(addresses[0].get("city"), Some(&Value::from("Lisbon")));
    assert_eq!(addresses[0].get("user_id"), Some(&record.id));
}

#[tokio::test]
async fn bracketed_keys_address_the_same_relation() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("address[line_1]").entity("address.line_1"),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "bob")
                .with("address[line_1]", "2 Side St"),
        )
        .await
        .unwrap();

    let addresses = panel.mem.rows(panel.model("addresses"));
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].get("line_1"), Some(&Value::from("2 Side St")));
}

#[tokio::test]
async fn nested_belongs_to_collapses_into_the_has_one_row() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("address.line_1").entity("address.line_1"),
        FieldDef::new("address.country").entity("address.country"),
    ]);

    let record = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "carol")
                .with("address.line_1", "3 High St")
                .with("address.country", 7i64),
        )
        .await
        .unwrap();

    // One addresses row carries the column, the nested foreign key and
    // the parent link; no countries row is created.
    let addresses = panel.mem.rows(panel.model("addresses"));
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].get("line_1"), Some(&Value::from("3 High St")));
    assert_eq!(addresses[0].get("country_id"), Some(&Value::I64(7)));
    assert_eq!(addresses[0].get("user_id"), Some(&record.id));
    assert_eq!(panel.mem.row_count(panel.model("countries")), 0);
}

#[tokio::test]
async fn two_level_chains_commit_parent_first() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("address.line_1").entity("address.line_1"),
        FieldDef::new("address.geo.lat").entity("address.geo.lat"),
        FieldDef::new("address.geo.lng").entity("address.geo.lng"),
    ]);

    panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "dave")
                .with("address.line_1", "4 Hill Rd")
                .with("address.geo.lat", Value::F64(38.72))
                .with("address.geo.lng", Value::F64(-9.14)),
        )
        .await
        .unwrap();

    let addresses = panel.mem.rows(panel.model("addresses"));
    assert_eq!(addresses.len(), 1);
    let address_id = addresses[0].get("id").unwrap();

    let geos = panel.mem.rows(panel.model("geos"));
    assert_eq!(geos.len(), 1);
    assert_eq!(geos[0].get("lat"), Some(&Value::F64(38.72)));
    assert_eq!(geos[0].get("lng"), Some(&Value::F64(-9.14)));
    assert_eq!(geos[0].get("address_id"), Some(address_id));
}

#[tokio::test]
async fn map_submissions_carry_the_related_row_attributes() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::relation("address", RelationKind::HasOne),
    ]);

    let address: IndexMap<String, Value> = [
        ("line_1".to_string(), Value::from("5 Gate Way")),
        ("city".to_string(), Value::from("Porto")),
    ]
    .into_iter()
    .collect();

    let record = panel
        .crud
        .create(
            &form,
            Payload::new()
                .with("name", "frank")
                .with("address", Value::Map(address)),
        )
        .await
        .unwrap();

    let addresses = panel.mem.rows(panel.model("addresses"));
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].get("line_1"), Some(&Value::from("5 Gate Way")));
    assert_eq!(addresses[0].get("city"), Some(&Value::from("Porto")));
    assert_eq!(addresses[0].get("user_id"), Some(&record.id));
}

#[tokio::test]
async fn declared_tree_fields_commit_even_when_blank() {
    let panel = panel();
    let form = panel.form(vec![
        FieldDef::new("name"),
        FieldDef::new("address.line_1").entity("address.line_1"),
    ]);

    let record = panel
        .crud
        .create(&form, Payload::new().with("name", "erin"))
        .await
        .unwrap();

    let addresses = panel.mem.rows(panel.model("addresses"));
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].get("line_1"), Some(&Value::Null));
    assert_eq!(addresses[0].get("user_id"), Some(&record.id));
}

#[tokio::test]
async fn declaring_the_wrong_kind_fails_form_validation() {
    let panel = panel();
    let err = panel
        .crud
        .form(
            panel.model("addresses"),
            vec![FieldDef::relation("geo", RelationKind::HasMany)],
        )
        .unwrap_err();

    assert!(err.is_schema(), "{err}");
}
