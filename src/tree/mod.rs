//! Statistics tree value model and deep-merge policies.

pub mod merge;
pub mod value;

pub use merge::{merge_sum, merge_union};
pub use value::{walk_leaves, Document, StatMap, StatValue};
