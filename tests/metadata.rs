use std::collections::BTreeMap;

use waveplot::data::metadata::MetadataStore;

fn kv(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn observe_reports_new_keys_once() {
    let mut store = MetadataStore::new();
    let first = store.observe(&kv(&[("TEMP", "20"), ("MODE", "idle")]));
    assert_eq!(first.len(), 2);
    let again = store.observe(&kv(&[("TEMP", "21")]));
    assert!(again.is_empty());
    assert_eq!(store.latest("TEMP"), Some("21"));
    assert_eq!(store.seen_keys().len(), 2);
}

#[test]
fn channel_key_is_skipped() {
    let mut store = MetadataStore::new();
    let new_keys = store.observe(&kv(&[("CH", "1"), ("ch", "2")]));
    assert!(new_keys.is_empty());
    assert!(store.latest("CH").is_none());
}

#[test]
fn selection_is_limited_to_seen_keys() {
    let mut store = MetadataStore::new();
    store.observe(&kv(&[("A", "1")]));
    store.select(["A", "B"]);
    assert!(store.is_selected("A"));
    assert!(!store.is_selected("B"));
    store.deselect(["A"]);
    assert!(!store.is_selected("A"));
}

#[test]
fn display_is_sorted_case_insensitively() {
    let mut store = MetadataStore::new();
    store.observe(&kv(&[("b", "2"), ("A", "1"), ("c", "3"), ("empty", "")]));
    store.select(["c", "A", "b", "empty"]);
    assert_eq!(store.render_display(), "A=1\nb=2\nc=3\nempty=");
}

#[test]
fn reset_clears_everything() {
    let mut store = MetadataStore::new();
    store.observe(&kv(&[("A", "1")]));
    store.select(["A"]);
    store.reset();
    assert!(store.latest("A").is_none());
    assert!(store.seen_keys().is_empty());
    assert_eq!(store.selected_keys().count(), 0);
    assert_eq!(store.render_display(), "");
}
