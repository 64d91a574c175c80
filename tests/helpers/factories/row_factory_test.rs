use crate::engine::types::Value;
use crate::test_helpers::factories::RowFactory;

#[test]
fn test_row_factory_keeps_column_order() {
    let row = RowFactory::new()
        .with("service", "A")
        .with("count", 3_i64)
        .create();

    let names: Vec<&String> = row.columns.keys().collect();
    assert_eq!(names, vec!["service", "count"]);
    assert_eq!(row.get("count"), Some(&Value::Long(3)));
}

#[test]
fn test_counted_rows() {
    let rows = RowFactory::counted(&[10, 7]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("name"), Some(&Value::from("entity-1")));
    assert_eq!(rows[1].get("count"), Some(&Value::Long(7)));
}
