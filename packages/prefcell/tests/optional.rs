use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use prefcell::{Bytes, InMemoryStore, PrefCell, Storable, Store, Value};

fn new_store() -> Arc<dyn Store> {
    Arc::new(InMemoryStore::new())
}

/// Drive an optional cell through absent -> initial -> updated -> absent.
fn check_optional<T>(key: &str, initial: T, updated: T, slot: fn(&T) -> Value)
where
    T: Storable + Clone + PartialEq + std::fmt::Debug,
{
    let store = new_store();
    let mut cell = PrefCell::<Option<T>>::optional_with_store(key, store.clone()).unwrap();

    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    cell.on_change(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(store.get(key), None);
    assert_eq!(*cell.get(), None);
    assert_eq!(*cell.default_value(), None);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    cell.set(Some(initial.clone()));
    assert_eq!(store.get(key), Some(slot(&initial)));
    assert_eq!(count.load(Ordering::SeqCst), 1);

    cell.set(Some(updated.clone()));
    assert_eq!(store.get(key), Some(slot(&updated)));
    assert_eq!(*cell.get(), Some(updated));
    assert_eq!(count.load(Ordering::SeqCst), 2);

    cell.set(None);
    assert_eq!(store.get(key), None);
    assert!(!store.contains(key));
    assert_eq!(*cell.get(), None);
    assert_eq!(count.load(Ordering::SeqCst), 3);

    let reread = PrefCell::<Option<T>>::optional_with_store(key, store).unwrap();
    assert_eq!(*reread.get(), None);
}

#[test]
fn optional_bool() {
    check_optional("testBool", true, false, |v| Value::Bool(*v));
}

#[test]
fn optional_int() {
    check_optional("testInt", -12i64, 42i64, |v| Value::Integer(*v));
}

#[test]
fn optional_double() {
    check_optional("testDouble", -12.5f64, 42.5f64, |v| Value::Float(*v));
}

#[test]
fn optional_string() {
    check_optional("testString", "Hello".to_string(), "World".to_string(), |v| {
        Value::String(v.clone())
    });
}

#[test]
fn optional_date() {
    let past = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
    let future = Utc.with_ymd_and_hms(4001, 1, 1, 0, 0, 0).unwrap();
    check_optional("testDate", past, future, |v| Value::Date(*v));
}

#[test]
fn optional_data() {
    check_optional(
        "testData",
        Bytes::from_static(&[0x01, 0x02, 0x03]),
        Bytes::from_static(&[0x04, 0x05, 0x06]),
        |v| Value::Bytes(v.to_vec()),
    );
}

#[test]
fn optional_reads_existing_value() {
    let store = new_store();
    store.set("k", Value::Integer(5)).unwrap();
    let cell = PrefCell::<Option<i64>>::optional_with_store("k", store).unwrap();
    assert_eq!(*cell.get(), Some(5));
}

#[test]
fn optional_wrong_slot_reads_absent() {
    let store = new_store();
    store.set("k", Value::from("five")).unwrap();
    let cell = PrefCell::<Option<i64>>::optional_with_store("k", store).unwrap();
    assert_eq!(*cell.get(), None);
}

#[test]
fn optional_with_explicit_default() {
    let store = new_store();
    let mut cell = PrefCell::with_store(Some(10i64), "k", store.clone()).unwrap();
    assert_eq!(*cell.get(), Some(10));

    cell.set(Some(11));
    let reread = PrefCell::with_store(Some(10i64), "k", store.clone()).unwrap();
    assert_eq!(*reread.get(), Some(11));

    cell.set(None);
    assert!(!store.contains("k"));
    let cleared = PrefCell::with_store(Some(10i64), "k", store).unwrap();
    assert_eq!(*cleared.get(), Some(10));
}

#[test]
fn empty_key_is_rejected() {
    assert!(PrefCell::<Option<bool>>::optional_with_store("", new_store()).is_err());
}
