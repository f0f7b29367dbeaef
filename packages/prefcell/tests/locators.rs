use std::sync::Arc;

use prefcell::{
    archive_object, file_locator, unarchive_object, InMemoryStore, PrefCell, Store, Url, Value,
};

fn new_store() -> Arc<dyn Store> {
    Arc::new(InMemoryStore::new())
}

fn remote() -> Url {
    Url::parse("http://example.com/").unwrap()
}

fn local() -> Url {
    file_locator(".").unwrap()
}

#[test]
fn remote_then_local() {
    let store = new_store();
    let mut cell = PrefCell::with_store(remote(), "testURL", store.clone()).unwrap();
    assert_eq!(store.get("testURL"), None);

    cell.set(remote());
    let archived = archive_object(store.as_ref(), &remote()).unwrap();
    assert_eq!(store.get("testURL"), Some(Value::Bytes(archived.to_vec())));
    assert_eq!(*cell.get(), remote());

    cell.set(local());
    let expected_path = local().to_file_path().unwrap();
    assert_eq!(
        store.get("testURL"),
        Some(Value::String(expected_path.to_string_lossy().into_owned()))
    );
    assert_eq!(*cell.get(), local());
}

#[test]
fn remote_locator_rereads_equal() {
    let store = new_store();
    let remote = Url::parse("https://example.com/path?q=1#frag").unwrap();
    let mut cell = PrefCell::with_store(local(), "k", store.clone()).unwrap();
    cell.set(remote.clone());

    let data = store.get("k").unwrap();
    let unarchived: Url = unarchive_object(store.as_ref(), data.as_bytes().unwrap()).unwrap();
    assert_eq!(unarchived, remote);

    let reread = PrefCell::with_store(local(), "k", store).unwrap();
    assert_eq!(*reread.get(), remote);
}

#[test]
fn local_locator_rereads_equivalent_path() {
    let store = new_store();
    let local = Url::parse("file:///tmp/prefs/report.txt#section").unwrap();

    let mut cell = PrefCell::with_store(remote(), "k", store.clone()).unwrap();
    cell.set(local.clone());
    assert_eq!(store.get("k"), Some(Value::from("/tmp/prefs/report.txt")));

    // The mirror is exact; a re-read only recovers the path.
    assert_eq!(*cell.get(), local);
    let reread = PrefCell::with_store(remote(), "k", store).unwrap();
    assert_ne!(*reread.get(), local);
    assert_eq!(reread.get().to_file_path(), local.to_file_path());
}

#[test]
fn optional_locator() {
    let store = new_store();
    let mut cell = PrefCell::<Option<Url>>::optional_with_store("testOptionalURL", store.clone())
        .unwrap();
    assert_eq!(*cell.get(), None);

    cell.set(Some(remote()));
    assert!(matches!(store.get("testOptionalURL"), Some(Value::Bytes(_))));

    cell.set(Some(local()));
    assert!(matches!(store.get("testOptionalURL"), Some(Value::String(_))));

    cell.set(None);
    assert_eq!(store.get("testOptionalURL"), None);
}

#[test]
fn broken_archive_reads_default() {
    let store = new_store();
    store.set("k", Value::Bytes(b"not an archive".to_vec())).unwrap();
    let cell = PrefCell::with_store(remote(), "k", store).unwrap();
    assert_eq!(*cell.get(), remote());
}

#[cfg(unix)]
#[test]
fn file_locator_with_host_replaces_stored_value() {
    let store = new_store();
    let mut cell = PrefCell::with_store(remote(), "k", store.clone()).unwrap();
    cell.set(Url::parse("http://example.com/old").unwrap());

    let share = Url::parse("file://server/share/doc.txt").unwrap();
    cell.set(share.clone());
    assert_eq!(*cell.get(), share);

    let reread = PrefCell::with_store(remote(), "k", store).unwrap();
    assert_eq!(*reread.get(), share);
}
