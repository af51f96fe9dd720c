use super::*;
use serde_json::json;

#[test]
fn records_union_their_keys() {
    let items = json!([{"name": "a", "done": true}, {"name": "b", "cost": 3}]);
    let t = TableSnapshot::from_records(items.as_array().unwrap());
    assert_eq!(t.columns, vec!["done", "name", "cost"]);
    assert_eq!(t.rows[0], vec![json!(true), json!("a"), Value::Null]);
    assert_eq!(t.rows[1], vec![Value::Null, json!("b"), json!(3)]);
}

#[test]
fn empty_records_fall_back_to_value_column() {
    let items = json!([{}, {}]);
    let t = TableSnapshot::from_records(items.as_array().unwrap());
    assert_eq!(t.columns, vec!["value"]);
    assert_eq!(t.rows.len(), 2);
}

#[test]
fn rows_pad_to_widest() {
    let items = json!([["x", "y", "z"], ["w"]]);
    let t = TableSnapshot::from_rows(items.as_array().unwrap());
    assert_eq!(t.columns, vec!["0", "1", "2"]);
    assert_eq!(t.rows[1], vec![json!("w"), Value::Null, Value::Null]);
}

#[test]
fn scalars_become_single_column() {
    let items = json!(["a", false]);
    let t = TableSnapshot::from_scalars(items.as_array().unwrap());
    assert_eq!(t.columns, vec!["value"]);
    assert_eq!(t.rows, vec![vec![json!("a")], vec![json!(false)]]);
    assert!(!t.is_empty());
}
