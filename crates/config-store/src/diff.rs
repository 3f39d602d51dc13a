//! Top-level difference between two configuration payloads

use common::Payload;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Old and new value of one top-level key.
///
/// `old` is null for an added key, `new` is null for a removed key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

/// Changes keyed by top-level field name, sorted for stable output.
pub type ChangeSet = BTreeMap<String, FieldChange>;

/// Compute the changes from `previous` (if any) to `next`.
pub fn diff(previous: Option<&Payload>, next: &Payload) -> ChangeSet {
    let mut changes = ChangeSet::new();

    for (key, new_value) in next {
        let old_value = previous.and_then(|p| p.get(key));
        if old_value != Some(new_value) {
            changes.insert(
                key.clone(),
                FieldChange {
                    old: old_value.cloned().unwrap_or(Value::Null),
                    new: new_value.clone(),
                },
            );
        }
    }

    if let Some(previous) = previous {
        for (key, old_value) in previous {
            if !next.contains_key(key) {
                changes.insert(
                    key.clone(),
                    FieldChange {
                        old: old_value.clone(),
                        new: Value::Null,
                    },
                );
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_version_lists_every_key() {
        let next = payload(json!({"gain": 10, "mode": "fast"}));
        let changes = diff(None, &next);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes["gain"].old, Value::Null);
        assert_eq!(changes["gain"].new, json!(10));
    }

    #[test]
    fn test_modified_added_removed() {
        let prev = payload(json!({"gain": 10, "offset": 1, "mode": "fast"}));
        let next = payload(json!({"gain": 20, "mode": "fast", "filter": "ir"}));
        let changes = diff(Some(&prev), &next);

        assert_eq!(changes.len(), 3);
        assert_eq!(changes["gain"], FieldChange { old: json!(10), new: json!(20) });
        assert_eq!(changes["filter"], FieldChange { old: Value::Null, new: json!("ir") });
        assert_eq!(changes["offset"], FieldChange { old: json!(1), new: Value::Null });
        assert!(!changes.contains_key("mode"));
    }

    #[test]
    fn test_identical_payloads() {
        let prev = payload(json!({"gain": 10}));
        assert!(diff(Some(&prev), &prev.clone()).is_empty());
    }
}
