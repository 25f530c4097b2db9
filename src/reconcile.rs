use crate::config::{ConfigMap, ConfigPair};

/// Unions the key sets of a live/test list pair so both sides expose exactly
/// the same keys.
///
/// Key order in the output is first-seen order across live then test. Values
/// are preserved per side; a key missing on one side gets an empty value
/// there. Keys are compared and stored in trimmed form. When a key appears
/// more than once on a side, the occurrence with a non-empty value wins
/// (last-non-empty); if every occurrence is empty, the first one does.
///
/// Reconciling an already reconciled pair yields the same pair.
pub fn reconcile(live: &ConfigMap, test: &ConfigMap) -> (ConfigMap, ConfigMap) {
    let mut all_keys: Vec<String> = Vec::new();
    for pair in live.pairs().iter().chain(test.pairs()) {
        if pair.has_key() && !all_keys.iter().any(|k| k == pair.trimmed_key()) {
            all_keys.push(pair.trimmed_key().to_string());
        }
    }

    if all_keys.is_empty() {
        return (ConfigMap::new(), ConfigMap::new());
    }

    (project(live, &all_keys), project(test, &all_keys))
}

fn project(side: &ConfigMap, keys: &[String]) -> ConfigMap {
    let pairs = keys
        .iter()
        .map(|key| ConfigPair::new(key.clone(), value_of(side, key)))
        .collect();
    ConfigMap::from_pairs(pairs)
}

fn value_of(side: &ConfigMap, key: &str) -> String {
    let mut first: Option<&str> = None;
    let mut last_non_empty: Option<&str> = None;
    for pair in side.pairs() {
        if pair.trimmed_key() != key {
            continue;
        }
        if first.is_none() {
            first = Some(&pair.value);
        }
        if !pair.value.is_empty() {
            last_non_empty = Some(&pair.value);
        }
    }
    last_non_empty.or(first).unwrap_or_default().to_string()
}
