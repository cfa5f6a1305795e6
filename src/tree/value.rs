//! The recursive statistics value model.
//!
//! A stats dump is an arbitrarily nested tree of mappings, sequences and
//! scalars (integers, floats, strings). `StatValue` is the tagged union the
//! whole pipeline operates on; `Document` is one named, tagged tree as it
//! came out of a single simulation run.
//!
//! Mappings use `BTreeMap`: insertion order carries no meaning in a stats
//! dump, and sorted-key iteration makes every recursive walk deterministic,
//! which keeps merge results independent of document and key order.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping node: unique string keys to subtrees
pub type StatMap = BTreeMap<String, StatValue>;

/// One node of a statistics tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<StatValue>),
    Map(StatMap),
}

impl StatValue {
    /// True for any non-container node
    pub fn is_scalar(&self) -> bool {
        !matches!(self, StatValue::Seq(_) | StatValue::Map(_))
    }

    /// True for integer and float scalars
    pub fn is_numeric(&self) -> bool {
        matches!(self, StatValue::Int(_) | StatValue::Float(_))
    }

    /// Numeric value of a scalar, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Int(i) => Some(*i as f64),
            StatValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Check if this node is a leaf: a scalar, or a container whose
    /// children are all scalars.
    pub fn is_leaf(&self) -> bool {
        match self {
            StatValue::Seq(items) => items.iter().all(StatValue::is_scalar),
            StatValue::Map(map) => map.values().all(StatValue::is_scalar),
            _ => true,
        }
    }

    /// A leaf collection is a Seq or Map of scalars: the unit histogram
    /// and per-element statistics operate on.
    pub fn is_leaf_collection(&self) -> bool {
        matches!(self, StatValue::Seq(_) | StatValue::Map(_)) && self.is_leaf()
    }

    /// Number of direct children (0 for scalars)
    pub fn len(&self) -> usize {
        match self {
            StatValue::Seq(items) => items.len(),
            StatValue::Map(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for StatValue {
    /// Scalar-oriented rendering for flattened and tabular output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(i) => write!(f, "{}", i),
            StatValue::Float(x) => write!(f, "{}", x),
            StatValue::Str(s) => write!(f, "{}", s),
            StatValue::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            StatValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Int(v)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        StatValue::Str(v.to_string())
    }
}

impl From<Vec<StatValue>> for StatValue {
    fn from(v: Vec<StatValue>) -> Self {
        StatValue::Seq(v)
    }
}

impl From<StatMap> for StatValue {
    fn from(v: StatMap) -> Self {
        StatValue::Map(v)
    }
}

/// Depth-first walk over a mapping, invoking `f` once per non-mapping value
/// with its `::`-style path components.
///
/// Sequences count as values here (they render as one cell/line), matching
/// the flattened output contract.
pub fn walk_leaves<'a, F>(map: &'a StatMap, f: &mut F)
where
    F: FnMut(&[&'a str], &'a StatValue),
{
    fn go<'a, F>(map: &'a StatMap, path: &mut Vec<&'a str>, f: &mut F)
    where
        F: FnMut(&[&'a str], &'a StatValue),
    {
        for (key, value) in map {
            path.push(key.as_str());
            match value {
                StatValue::Map(inner) => go(inner, path, f),
                other => f(path, other),
            }
            path.pop();
        }
    }

    let mut path = Vec::new();
    go(map, &mut path, f);
}

/// A named, tagged statistics tree from one simulation run or stats dump.
///
/// `name` derives from the origin (file stem); `tags` is read-only after
/// load. Pipeline stages never mutate a document in place, they produce
/// new ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub tags: Vec<String>,
    pub tree: StatMap,
}

impl Document {
    pub fn new(name: impl Into<String>, tags: Vec<String>, tree: StatMap) -> Self {
        Self {
            name: name.into(),
            tags,
            tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf_map() -> StatMap {
        let mut m = StatMap::new();
        m.insert("hit".to_string(), StatValue::Int(10));
        m.insert("miss".to_string(), StatValue::Int(3));
        m
    }

    #[test]
    fn test_scalar_predicates() {
        assert!(StatValue::Int(1).is_scalar());
        assert!(StatValue::Float(0.5).is_numeric());
        assert!(!StatValue::Str("x".into()).is_numeric());
        assert!(!StatValue::Seq(vec![]).is_scalar());
    }

    #[test]
    fn test_is_leaf_collection() {
        let seq = StatValue::Seq(vec![StatValue::Int(1), StatValue::Int(2)]);
        assert!(seq.is_leaf_collection());

        let map = StatValue::Map(leaf_map());
        assert!(map.is_leaf_collection());

        let mut nested = StatMap::new();
        nested.insert("inner".to_string(), StatValue::Map(leaf_map()));
        assert!(!StatValue::Map(nested).is_leaf_collection());

        assert!(!StatValue::Int(7).is_leaf_collection());
    }

    #[test]
    fn test_len_counts_direct_children() {
        assert_eq!(StatValue::Map(leaf_map()).len(), 2);
        assert_eq!(StatValue::Seq(vec![StatValue::Int(1)]).len(), 1);
        assert_eq!(StatValue::Int(7).len(), 0);

        assert!(StatValue::Seq(vec![]).is_empty());
        assert!(!StatValue::Map(leaf_map()).is_empty());
    }

    #[test]
    fn test_walk_leaves_paths_in_key_order() {
        let mut inner = StatMap::new();
        inner.insert("b".to_string(), StatValue::Int(2));
        inner.insert("a".to_string(), StatValue::Int(1));

        let mut root = StatMap::new();
        root.insert("cache".to_string(), StatValue::Map(inner));
        root.insert("cycles".to_string(), StatValue::Int(99));

        let mut seen = Vec::new();
        walk_leaves(&root, &mut |path, value| {
            seen.push((path.join("::"), value.clone()));
        });

        assert_eq!(
            seen,
            vec![
                ("cache::a".to_string(), StatValue::Int(1)),
                ("cache::b".to_string(), StatValue::Int(2)),
                ("cycles".to_string(), StatValue::Int(99)),
            ]
        );
    }

    #[test]
    fn test_display_renders_containers() {
        let seq = StatValue::Seq(vec![StatValue::Int(1), StatValue::Float(2.5)]);
        assert_eq!(seq.to_string(), "[1, 2.5]");
        assert_eq!(StatValue::Map(leaf_map()).to_string(), "{hit: 10, miss: 3}");
    }
}
