use serde::{Deserialize, Serialize};

/// A single editable key/value row in a PSP credential form.
///
/// The key may be empty while the user is still typing; uniqueness is only
/// enforced by reconciliation, never at this layer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ConfigPair {
    pub key: String,
    pub value: String,
}

impl ConfigPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// The key with surrounding whitespace removed. All key comparisons go
    /// through this form.
    pub fn trimmed_key(&self) -> &str {
        self.key.trim()
    }

    pub fn has_key(&self) -> bool {
        !self.trimmed_key().is_empty()
    }
}

/// An ordered sequence of [`ConfigPair`] rows for one side (live or test) of
/// a PSP/payment-method configuration.
///
/// The list is never fully empty: removing the last row reinserts a single
/// blank pair so the form always shows at least one input row.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ConfigMap {
    pairs: Vec<ConfigPair>,
}

impl ConfigMap {
    /// A fresh list with one blank row.
    pub fn new() -> Self {
        Self {
            pairs: vec![ConfigPair::blank()],
        }
    }

    /// Builds a list from existing rows. An empty input still yields one
    /// blank row.
    pub fn from_pairs(pairs: Vec<ConfigPair>) -> Self {
        if pairs.is_empty() {
            Self::new()
        } else {
            Self { pairs }
        }
    }

    pub fn pairs(&self) -> &[ConfigPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn push(&mut self, pair: ConfigPair) {
        self.pairs.push(pair);
    }

    /// Removes the row at `index`. Out-of-range indices are ignored. If the
    /// removal empties the list, a blank row is reinserted.
    pub fn remove_at(&mut self, index: usize) {
        if index >= self.pairs.len() {
            return;
        }
        self.pairs.remove(index);
        if self.pairs.is_empty() {
            self.pairs.push(ConfigPair::blank());
        }
    }

    /// Replaces the key at `index` in place. No other row is touched.
    pub fn set_key(&mut self, index: usize, key: impl Into<String>) {
        if let Some(pair) = self.pairs.get_mut(index) {
            pair.key = key.into();
        }
    }

    /// Replaces the value at `index` in place. No other row is touched.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(pair) = self.pairs.get_mut(index) {
            pair.value = value.into();
        }
    }

    /// Index of the first row whose trimmed key equals `key`, scan order.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.pairs.iter().position(|p| p.trimmed_key() == key)
    }
}

impl Default for ConfigMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_has_one_blank_row() {
        let list = ConfigMap::new();
        assert_eq!(list.pairs(), &[ConfigPair::blank()]);
    }

    #[test]
    fn test_from_empty_pairs_yields_blank_row() {
        let list = ConfigMap::from_pairs(vec![]);
        assert_eq!(list.len(), 1);
        assert!(!list.pairs()[0].has_key());
    }

    #[test]
    fn test_remove_last_row_reinserts_blank() {
        let mut list = ConfigMap::from_pairs(vec![ConfigPair::new("apiKey", "secret")]);
        list.remove_at(0);
        assert_eq!(list.pairs(), &[ConfigPair::blank()]);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut list = ConfigMap::from_pairs(vec![ConfigPair::new("a", "1")]);
        list.remove_at(5);
        assert_eq!(list.len(), 1);
        assert_eq!(list.pairs()[0].key, "a");
    }

    #[test]
    fn test_set_key_and_value_in_place() {
        let mut list = ConfigMap::new();
        list.set_key(0, "merchantId");
        list.set_value(0, "m-42");
        assert_eq!(list.pairs()[0], ConfigPair::new("merchantId", "m-42"));
    }

    #[test]
    fn test_push_allows_duplicate_keys() {
        let mut list = ConfigMap::from_pairs(vec![ConfigPair::new("k", "v1")]);
        list.push(ConfigPair::new("k", "v2"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_position_of_uses_trimmed_keys() {
        let list = ConfigMap::from_pairs(vec![
            ConfigPair::new("  apiKey ", "x"),
            ConfigPair::new("other", "y"),
        ]);
        assert_eq!(list.position_of("apiKey"), Some(0));
        assert_eq!(list.position_of("missing"), None);
    }
}
