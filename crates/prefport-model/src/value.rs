//! Typed preference values.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Preference store contents keyed by preference name.
///
/// A `BTreeMap` keeps iteration (and therefore export output) deterministic.
pub type PreferenceMap = BTreeMap<String, TypedValue>;

/// The six value shapes a preference may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Boolean,
    Int,
    Long,
    Float,
    String,
    StringSet,
}

impl ValueKind {
    /// All kinds, in wire-tag order.
    pub const ALL: [ValueKind; 6] = [
        Self::Boolean,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::String,
        Self::StringSet,
    ];

    /// Literal tag written to the `type` field of a value envelope.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::String => "string",
            Self::StringSet => "string_set",
        }
    }

    /// Resolve a wire tag. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single preference value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
    /// Member order carries no meaning; duplicates collapse.
    StringSet(BTreeSet<String>),
}

impl TypedValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::StringSet(_) => ValueKind::StringSet,
        }
    }

    /// Build a string set from any iterator of string-like items.
    pub fn string_set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringSet(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for TypedValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<BTreeSet<String>> for TypedValue {
    fn from(value: BTreeSet<String>) -> Self {
        Self::StringSet(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for kind in ValueKind::ALL {
            assert_eq!(ValueKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(ValueKind::from_tag("double"), None);
        assert_eq!(ValueKind::from_tag("Boolean"), None);
        assert_eq!(ValueKind::from_tag(""), None);
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(TypedValue::from(true).kind(), ValueKind::Boolean);
        assert_eq!(TypedValue::from(7_i32).kind(), ValueKind::Int);
        assert_eq!(TypedValue::from(7_i64).kind(), ValueKind::Long);
        assert_eq!(TypedValue::from(0.5_f32).kind(), ValueKind::Float);
        assert_eq!(TypedValue::from("x").kind(), ValueKind::String);
        assert_eq!(
            TypedValue::string_set(["en", "de"]).kind(),
            ValueKind::StringSet
        );
    }

    #[test]
    fn test_string_set_collapses_duplicates() {
        let TypedValue::StringSet(set) = TypedValue::string_set(["en", "de", "en"]) else {
            panic!("expected a string set");
        };
        assert_eq!(set.len(), 2);
    }
}
