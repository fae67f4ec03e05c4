use crudstore_model::{Entity, Fields};
use crudstore_types::EntityId;
use pretty_assertions::assert_eq;
use serde_json::json;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[test]
fn accessors_read_typed_attributes() {
    let entity = Entity::new(
        EntityId::new(1),
        fields(json!({"name": "Alice", "admin": true, "age": 31})),
    );
    assert_eq!(entity.get_str("name"), Some("Alice"));
    assert_eq!(entity.get_bool("admin"), Some(true));
    assert_eq!(entity.get_number("age"), Some(31.0));
}

#[test]
fn accessors_return_none_for_missing_or_mistyped() {
    let entity = Entity::new(EntityId::new(1), fields(json!({"name": 5})));
    assert_eq!(entity.get_str("name"), None);
    assert_eq!(entity.get_str("missing"), None);
    assert_eq!(entity.get_bool("name"), None);
}

#[test]
fn serializes_with_id_and_fields() {
    let entity = Entity::new(EntityId::new(1), fields(json!({"name": "Alice"})));
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value, json!({"id": 1, "fields": {"name": "Alice"}}));
}

#[test]
fn deserializes_from_json() {
    let entity: Entity =
        serde_json::from_value(json!({"id": 9, "fields": {"tags": ["a", "b"]}})).unwrap();
    assert_eq!(entity.id, EntityId::new(9));
    assert_eq!(entity.fields["tags"], json!(["a", "b"]));
}

#[test]
fn empty_fields_are_allowed() {
    let entity = Entity::new(EntityId::new(2), Fields::new());
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value, json!({"id": 2, "fields": {}}));
}

#[test]
fn clones_are_independent() {
    let original = Entity::new(EntityId::new(1), fields(json!({"name": "Alice"})));
    let mut copy = original.clone();
    copy.fields.insert("name".into(), json!("Mallory"));
    assert_eq!(original.get_str("name"), Some("Alice"));
    assert_eq!(copy.get_str("name"), Some("Mallory"));
}
