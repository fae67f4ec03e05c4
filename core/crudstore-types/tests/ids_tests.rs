use crudstore_types::{EntityId, Error};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn first_id_is_one() {
    assert_eq!(EntityId::FIRST.get(), 1);
}

#[test]
fn next_increments_by_one() {
    let id = EntityId::new(41);
    assert_eq!(id.next(), Some(EntityId::new(42)));
}

#[test]
fn next_is_none_at_the_end_of_the_space() {
    assert_eq!(EntityId::new(u64::MAX).next(), None);
}

#[test]
fn parse_accepts_surrounding_whitespace() {
    assert_eq!(EntityId::parse(" 7 ").unwrap(), EntityId::new(7));
}

#[test]
fn parse_rejects_negative() {
    let err = EntityId::parse("-1").unwrap_err();
    assert!(matches!(err, Error::InvalidId(_)));
}

#[test]
fn from_str_rejects_garbage() {
    assert!(EntityId::from_str("abc").is_err());
    assert!(EntityId::from_str("").is_err());
}

#[test]
fn ordering_follows_raw_value() {
    let mut ids = vec![EntityId::new(3), EntityId::new(1), EntityId::new(2)];
    ids.sort();
    assert_eq!(ids, vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]);
}

#[test]
fn hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(EntityId::new(5));
    set.insert(EntityId::from(5));
    assert_eq!(set.len(), 1);
}

#[test]
fn serializes_as_bare_number() {
    let json = serde_json::to_string(&EntityId::new(12)).unwrap();
    assert_eq!(json, "12");
    let back: EntityId = serde_json::from_str("12").unwrap();
    assert_eq!(back, EntityId::new(12));
}

proptest! {
    #[test]
    fn display_parses_back(raw in any::<u64>()) {
        let id = EntityId::new(raw);
        prop_assert_eq!(EntityId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn next_is_strictly_greater(raw in 0..u64::MAX) {
        let id = EntityId::new(raw);
        prop_assert!(id.next().unwrap() > id);
    }
}
