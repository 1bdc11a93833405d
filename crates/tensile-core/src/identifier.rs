//! Node identifiers backed by a global string interner
//!
//! Graph nodes are named by opaque identifiers that arrive either as strings
//! or as numbers. Both forms are interned as strings, so the numeric node `7`
//! and the string node `"7"` are the same [`NodeId`].

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for node names.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned node identifier.
///
/// `NodeId` is `Copy` and compares by symbol, which keeps the all-pairs loop of
/// the layout engine free of string comparisons.
///
/// # Examples
///
/// ```
/// use tensile_core::identifier::NodeId;
///
/// let a = NodeId::new("alpha");
/// let numeric = NodeId::from(42_u64);
///
/// assert_eq!(a, "alpha");
/// assert_eq!(numeric, NodeId::new("42"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(DefaultSymbol);

impl NodeId {
    /// Creates a `NodeId` from its name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{name}")
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<u64> for NodeId {
    /// Numeric identifiers are named by their decimal representation
    fn from(value: u64) -> Self {
        Self::new(&value.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::new(&value.to_string())
    }
}

impl PartialEq<str> for NodeId {
    /// Allows direct comparison with string slices: `id == "name"`
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name == other)
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = NodeId::new("hub");
        let id2 = NodeId::new("hub");
        let id3 = NodeId::new("leaf");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "hub");
    }

    #[test]
    fn test_numeric_ids_match_their_string_form() {
        assert_eq!(NodeId::from(7_u64), NodeId::new("7"));
        assert_eq!(NodeId::from(-3_i64), NodeId::new("-3"));
        assert_ne!(NodeId::from(7_u64), NodeId::new("07"));
    }

    #[test]
    fn test_display() {
        let id = NodeId::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
        assert_eq!(NodeId::from(12_u64).to_string(), "12");
    }

    #[test]
    fn test_from_string() {
        let id: NodeId = String::from("owned").into();
        assert_eq!(id, NodeId::new("owned"));
    }

    #[test]
    fn test_hash_and_eq() {
        let mut map = HashMap::new();
        map.insert(NodeId::new("key1"), "value1");
        map.insert(NodeId::new("key2"), "value2");

        assert_eq!(map.get(&NodeId::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = NodeId::new("parent");
        assert!(id == "parent");
        assert!(id != "child");

        let empty = NodeId::new("");
        assert!(empty == "");
    }
}
