#![cfg(feature = "serde")]

use hybrid_multiset::{Multiset, SignedMultiset};

#[test]
fn multiset_round_trips_as_a_counts_map() {
    let set: Multiset<String> = ["a", "a", "b"].into_iter().map(String::from).collect();

    let json = serde_json::to_string(&set).unwrap();
    let back: Multiset<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(back, set);
}

#[test]
fn multiset_deserialization_drops_zero_multiplicities() {
    let set: Multiset<String> = serde_json::from_str(r#"{"a": 2, "b": 0}"#).unwrap();

    assert_eq!(set.count("a"), 2);
    assert!(!set.contains("b"));
}

#[test]
fn signed_multiset_round_trips_as_a_counts_map() {
    let set: SignedMultiset<String> = [("a".to_owned(), 2), ("b".to_owned(), -1)]
        .into_iter()
        .collect();

    let json = serde_json::to_string(&set).unwrap();
    let back: SignedMultiset<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(back, set);
}

#[test]
fn signed_multiset_deserialization_drops_zero_counts() {
    let set: SignedMultiset<String> = serde_json::from_str(r#"{"a": -3, "b": 0}"#).unwrap();

    assert_eq!(set.count("a"), -3);
    assert!(!set.contains("b"));
}
