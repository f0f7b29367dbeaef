//! Cells built without an explicit store share the process-wide one.
//!
//! Kept in its own test binary: the standard store is global state.

use std::sync::Arc;

use prefcell::{set_standard, standard, InMemoryStore, PrefCell, Store, Value};

#[test]
fn cells_default_to_the_standard_store() {
    let mut writer = PrefCell::new(1i64, "standard_shared").unwrap();
    assert!(Arc::ptr_eq(writer.store(), &standard()));

    writer.set(2);
    assert_eq!(standard().get("standard_shared"), Some(Value::Integer(2)));

    let reader = PrefCell::new(100i64, "standard_shared").unwrap();
    assert_eq!(*reader.get(), 2);

    let mut optional = PrefCell::<Option<String>>::optional("standard_optional").unwrap();
    optional.set(Some("x".to_string()));
    assert!(standard().contains("standard_optional"));
    optional.set(None);
    assert!(!standard().contains("standard_optional"));

    // Swap in an isolated store; existing cells keep the old one.
    let isolated: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    let previous = set_standard(isolated.clone());

    let fresh = PrefCell::new(100i64, "standard_shared").unwrap();
    assert_eq!(*fresh.get(), 100);
    assert!(Arc::ptr_eq(fresh.store(), &isolated));

    writer.set(3);
    assert_eq!(previous.get("standard_shared"), Some(Value::Integer(3)));
    assert_eq!(isolated.get("standard_shared"), None);

    set_standard(previous);
}
