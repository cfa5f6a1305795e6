//! Numeric reductions over filtered document lists.

pub mod simpoint;
pub mod sum;

pub use simpoint::{extract_sample_id, weighted_merge, WeightTable};
pub use sum::{sum_all, sum_document};

use crate::tree::{Document, StatMap, StatValue};

/// The tree a reduction should consume.
///
/// After tag renaming, a document's tree is a single-entry mapping wrapping
/// the original tree under the synthesized compound name. Reductions merge
/// the trees *inside* those wrappers so that runs with different names still
/// land on the same keys. Unwrapped documents are consumed as-is.
pub(crate) fn inner_tree(doc: &Document) -> &StatMap {
    if doc.tree.len() == 1 {
        if let Some(StatValue::Map(inner)) = doc.tree.get(&doc.name) {
            return inner;
        }
    }
    &doc.tree
}
