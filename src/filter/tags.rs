//! Tag-based document filtering and renaming.
//!
//! Every configured pattern must be satisfied by a distinct tag of the
//! document (AND semantics, first match wins per pattern). Documents that
//! satisfy all patterns are re-keyed: the whole original tree is wrapped
//! under a compound `name.tag1.tag2...` key so later stages and reports can
//! tell the surviving runs apart. Documents that miss a pattern are dropped,
//! not failed.

use crate::tree::{Document, StatMap, StatValue};
use crate::utils::config::NAME_SEPARATOR;
use crate::utils::error::FilterError;
use log::debug;
use regex::Regex;

/// Compiled required-tag patterns
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    patterns: Vec<Regex>,
}

impl TagFilter {
    /// Compile the required patterns, fully anchored like path segments.
    pub fn compile(patterns: &[String]) -> Result<Self, FilterError> {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let anchored = format!("^(?:{})$", pattern);
            let re = Regex::new(&anchored).map_err(|source| FilterError::InvalidTagPattern {
                pattern: pattern.clone(),
                source,
            })?;
            compiled.push(re);
        }
        Ok(Self { patterns: compiled })
    }

    /// True when no patterns are configured (identity pass-through)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Find one distinct tag per pattern, in pattern order.
    ///
    /// Returns None as soon as any pattern has no unused matching tag.
    fn match_tags<'a>(&self, tags: &'a [String]) -> Option<Vec<&'a str>> {
        let mut used = vec![false; tags.len()];
        let mut matched = Vec::with_capacity(self.patterns.len());

        for re in &self.patterns {
            let (idx, tag) = tags
                .iter()
                .enumerate()
                .find(|(i, t)| !used[*i] && re.is_match(t))?;
            used[idx] = true;
            matched.push(tag.as_str());
        }

        Some(matched)
    }

    /// Filter and re-key the document list.
    pub fn apply(&self, docs: Vec<Document>) -> Vec<Document> {
        if self.is_empty() {
            return docs;
        }

        let mut kept = Vec::with_capacity(docs.len());
        for doc in docs {
            let compound = match self.match_tags(&doc.tags) {
                Some(matched) => {
                    let mut parts = vec![doc.name.as_str()];
                    parts.extend(matched);
                    parts.join(NAME_SEPARATOR)
                }
                None => {
                    debug!("tag filter dropped document '{}'", doc.name);
                    continue;
                }
            };

            let mut wrapped = StatMap::new();
            wrapped.insert(compound.clone(), StatValue::Map(doc.tree));
            kept.push(Document::new(compound, doc.tags, wrapped));
        }

        debug!("tag filter kept {} document(s)", kept.len());
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(name: &str, tags: &[&str]) -> Document {
        let mut tree = StatMap::new();
        tree.insert("cycles".to_string(), StatValue::Int(100));
        Document::new(name, tags.iter().map(|t| t.to_string()).collect(), tree)
    }

    fn filter(patterns: &[&str]) -> TagFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        TagFilter::compile(&patterns).unwrap()
    }

    #[test]
    fn test_all_patterns_must_match() {
        let f = filter(&["astar", "sp_.*"]);

        let kept = f.apply(vec![doc("run1", &["astar", "sp_3"]), doc("run2", &["gcc"])]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "run1.astar.sp_3");
    }

    #[test]
    fn test_rename_wraps_original_tree() {
        let f = filter(&["astar"]);
        let kept = f.apply(vec![doc("run1", &["astar"])]);

        let StatValue::Map(inner) = &kept[0].tree["run1.astar"] else {
            panic!("expected wrapper mapping")
        };
        assert_eq!(inner["cycles"], StatValue::Int(100));
    }

    #[test]
    fn test_tags_are_not_reused_across_patterns() {
        // Both patterns match "sp_3"; only a document carrying two distinct
        // matching tags survives.
        let f = filter(&["sp_.*", "sp_.*"]);

        let kept = f.apply(vec![doc("a", &["sp_3"]), doc("b", &["sp_3", "sp_4"])]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "b.sp_3.sp_4");
    }

    #[test]
    fn test_no_patterns_is_identity() {
        let f = filter(&[]);
        let docs = vec![doc("run1", &[])];
        assert_eq!(f.apply(docs.clone()), docs);
    }

    #[test]
    fn test_untagged_document_dropped_when_patterns_required() {
        let f = filter(&["astar"]);
        assert!(f.apply(vec![doc("run1", &[])]).is_empty());
    }

    #[test]
    fn test_invalid_pattern_reports_pattern() {
        let err = TagFilter::compile(&["(".to_string()]).unwrap_err();
        assert!(err.to_string().contains("("));
    }
}
