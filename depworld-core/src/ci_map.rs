//! Case-insensitive, insertion-ordered string map.
//!
//! Identities coming out of build resolution are compared ordinally without
//! regard to case (`Newtonsoft.Json` and `newtonsoft.json` are one package).
//! The spelling of the first inserted key is kept for display and output.

use indexmap::IndexMap;

/// Fold a key to its comparison form.
///
/// Upper-cases one character at a time and leaves a character alone when its
/// upper case is more than one character, so `ß` and `SS` stay distinct.
fn fold(key: &str) -> String {
    key.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

/// Map from string keys to values with case-insensitive lookup.
///
/// Iteration follows insertion order. Overwriting an existing key replaces
/// the value but keeps the originally inserted spelling of the key.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    entries: IndexMap<String, (String, V)>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert or overwrite. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.get_mut(&fold(&key)) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.insert(fold(&key), (key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&fold(key)).map(|(_, v)| v)
    }

    /// Look up a value along with the stored spelling of its key.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        self.entries.get(&fold(key)).map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(original_key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("Newtonsoft.Json/13.0.1", 1);

        assert_eq!(map.get("newtonsoft.json/13.0.1"), Some(&1));
        assert_eq!(map.get("NEWTONSOFT.JSON/13.0.1"), Some(&1));
        assert!(map.contains_key("NewtonSoft.Json/13.0.1"));
        assert!(!map.contains_key("Newtonsoft.Json"));
        assert_eq!(
            map.get_key_value("newtonsoft.JSON/13.0.1"),
            Some(("Newtonsoft.Json/13.0.1", &1))
        );
    }

    #[test]
    fn test_fold_maps_char_to_char() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("Straße/1.0.0", 1);
        map.insert("STRASSE/1.0.0", 2);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("straße/1.0.0"), Some(&1));
        assert_eq!(map.get("strasse/1.0.0"), Some(&2));
        assert_eq!(map.get("ÉCOLE"), None);

        map.insert("école", 3);
        assert_eq!(map.get("ÉCOLE"), Some(&3));
    }

    #[test]
    fn test_overwrite_keeps_first_spelling() {
        let mut map = CaseInsensitiveMap::new();
        assert_eq!(map.insert("net6.0/PkgA", "first"), None);
        assert_eq!(map.insert("NET6.0/pkga", "second"), Some("first"));

        assert_eq!(map.len(), 1);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("net6.0/PkgA", &"second")]);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut map = CaseInsensitiveMap::new();
        map.insert("c", 3);
        map.insert("a", 1);
        map.insert("b", 2);

        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }
}
