//! Compiled `::`-delimited node search paths.
//!
//! A path like `L1_.*::count::hit` selects, level by level, every mapping
//! key whose full text matches the segment's regex. The final segment keeps
//! the entire matched subtree; intermediate segments only descend into
//! mapping values. Missing data is absence, not an error: selection never
//! fails, it just returns less.

use crate::tree::{StatMap, StatValue};
use crate::utils::config::PATH_SEPARATOR;
use crate::utils::error::FilterError;
use regex::Regex;

/// One compiled node search path
#[derive(Debug, Clone)]
pub struct PathSpec {
    raw: String,
    segments: Vec<Regex>,
}

impl PathSpec {
    /// Compile each `::` segment as a fully anchored regex.
    ///
    /// Anchoring uses a non-capturing group so alternations like `ld|st`
    /// match whole keys, not prefixes or suffixes.
    pub fn compile(path: &str) -> Result<Self, FilterError> {
        let mut segments = Vec::new();
        for segment in path.split(PATH_SEPARATOR) {
            let anchored = format!("^(?:{})$", segment);
            let re = Regex::new(&anchored).map_err(|source| FilterError::InvalidPattern {
                path: path.to_string(),
                segment: segment.to_string(),
                source,
            })?;
            segments.push(re);
        }
        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path string this spec was compiled from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Walk `tree` and collect every subtree this path selects.
    ///
    /// Keys with no match at a level are pruned; a non-mapping value hit
    /// before the last segment ends that branch with no match.
    pub fn select(&self, tree: &StatMap) -> StatMap {
        find(tree, &self.segments)
    }
}

fn find(tree: &StatMap, segments: &[Regex]) -> StatMap {
    let mut found = StatMap::new();
    let Some((first, rest)) = segments.split_first() else {
        return found;
    };

    for (key, value) in tree {
        if !first.is_match(key) {
            continue;
        }
        if rest.is_empty() {
            // Last segment in the search list: keep the full subtree.
            found.insert(key.clone(), value.clone());
        } else if let StatValue::Map(inner) = value {
            found.insert(key.clone(), StatValue::Map(find(inner, rest)));
        }
    }

    found
}
