//! Last-wins / ordered-append folding for repeated keys.

use std::collections::HashMap;

/// Builds the single-value and multi-value views of a repeated-key collection
/// in one pass.
///
/// `insert` overwrites the single-value entry and appends to the multi-value
/// entry, so the single view always holds the last value seen while the multi
/// view keeps every value in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldedMap {
    single: HashMap<String, String>,
    multi: HashMap<String, Vec<String>>,
}

impl FoldedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        self.multi
            .entry(name.clone())
            .or_default()
            .push(value.clone());
        self.single.insert(name, value);
    }

    /// Last value seen for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.single.get(name).map(String::as_str)
    }

    /// Every value seen for `name`, oldest first.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.multi.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.single.is_empty()
    }

    pub fn into_parts(self) -> (HashMap<String, String>, HashMap<String, Vec<String>>) {
        (self.single, self.multi)
    }
}

impl<K, V> FromIterator<(K, V)> for FoldedMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_value_wins_and_history_is_ordered() {
        let map: FoldedMap = [("X-A", "1"), ("X-A", "2"), ("X-B", "z")]
            .into_iter()
            .collect();

        assert_eq!(map.get("X-A"), Some("2"));
        assert_eq!(map.get_all("X-A"), ["1", "2"]);
        assert_eq!(map.get("X-B"), Some("z"));
        assert_eq!(map.get_all("X-B"), ["z"]);
    }

    #[test]
    fn both_views_share_keys() {
        let mut map = FoldedMap::new();
        assert!(map.is_empty());
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("a", "3");

        let (single, multi) = map.into_parts();
        assert_eq!(single.len(), 2);
        assert_eq!(multi.len(), 2);
        assert_eq!(multi["a"], vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn missing_key_has_no_values() {
        let map = FoldedMap::new();
        assert_eq!(map.get("nope"), None);
        assert!(map.get_all("nope").is_empty());
    }
}
