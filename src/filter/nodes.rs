//! Node selection: keep only the subtrees named by `--node` paths.
//!
//! Each path is applied independently and the per-path results are unioned
//! into one filtered tree per document (OR semantics across paths).
//! Documents whose union comes out empty are dropped from the list so later
//! stages never see hollow results.

use super::path::PathSpec;
use crate::tree::{merge_union, Document, StatMap};
use crate::utils::config::PATH_SEPARATOR;
use crate::utils::error::FilterError;
use log::debug;

/// Compiled node selection stage
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    specs: Vec<PathSpec>,
}

impl NodeFilter {
    /// Compile the configured paths.
    ///
    /// When the tag stage ran, every document tree gained a synthesized
    /// wrapper key at the top; `below_wrapper` prefixes each path with
    /// `.*::` so the user's paths keep addressing the original levels.
    pub fn compile(paths: &[String], below_wrapper: bool) -> Result<Self, FilterError> {
        let mut specs = Vec::with_capacity(paths.len());
        for path in paths {
            let full = if below_wrapper {
                format!(".*{}{}", PATH_SEPARATOR, path)
            } else {
                path.clone()
            };
            specs.push(PathSpec::compile(&full)?);
        }
        Ok(Self { specs })
    }

    /// True when no paths are configured (identity pass-through)
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Apply every path to every document, union per document, drop empties.
    pub fn apply(&self, docs: Vec<Document>) -> Vec<Document> {
        if self.is_empty() {
            return docs;
        }

        let mut kept = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut filtered = StatMap::new();
            for spec in &self.specs {
                let found = spec.select(&doc.tree);
                if found.is_empty() {
                    debug!("path '{}' matched nothing in '{}'", spec.raw(), doc.name);
                }
                merge_union(&mut filtered, found);
            }

            if filtered.is_empty() {
                debug!(
                    "node filter dropped document '{}': no path matched",
                    doc.name
                );
                continue;
            }
            kept.push(Document::new(doc.name, doc.tags, filtered));
        }

        debug!("node filter kept {} document(s)", kept.len());
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::StatValue;
    use pretty_assertions::assert_eq;

    fn map(entries: Vec<(&str, StatValue)>) -> StatMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn doc() -> Document {
        let tree = map(vec![
            (
                "L1_I",
                StatValue::Map(map(vec![
                    ("hit", StatValue::Int(10)),
                    ("miss", StatValue::Int(1)),
                ])),
            ),
            ("cycles", StatValue::Int(500)),
        ]);
        Document::new("run1", vec![], tree)
    }

    fn compile(paths: &[&str], below_wrapper: bool) -> NodeFilter {
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        NodeFilter::compile(&paths, below_wrapper).unwrap()
    }

    #[test]
    fn test_paths_union_per_document() {
        let f = compile(&["L1_I::hit", "cycles"], false);
        let kept = f.apply(vec![doc()]);

        assert_eq!(kept.len(), 1);
        let tree = &kept[0].tree;
        assert_eq!(tree["cycles"], StatValue::Int(500));
        assert_eq!(
            tree["L1_I"],
            StatValue::Map(map(vec![("hit", StatValue::Int(10))]))
        );
    }

    #[test]
    fn test_empty_union_drops_document() {
        let f = compile(&["no_such_node"], false);
        assert!(f.apply(vec![doc()]).is_empty());
    }

    #[test]
    fn test_no_paths_is_identity() {
        let f = compile(&[], false);
        let docs = vec![doc()];
        assert_eq!(f.apply(docs.clone()), docs);
    }

    #[test]
    fn test_wrapper_prefix_searches_one_level_deeper() {
        let mut wrapped = StatMap::new();
        wrapped.insert(
            "run1.astar".to_string(),
            StatValue::Map(doc().tree),
        );
        let wrapped_doc = Document::new("run1.astar", vec!["astar".to_string()], wrapped);

        let f = compile(&["cycles"], true);
        let kept = f.apply(vec![wrapped_doc]);

        assert_eq!(kept.len(), 1);
        let StatValue::Map(inner) = &kept[0].tree["run1.astar"] else {
            panic!("expected wrapper mapping")
        };
        assert_eq!(inner["cycles"], StatValue::Int(500));
    }
}
