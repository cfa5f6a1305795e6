//! Document filtering: tag selection and node path selection.

pub mod nodes;
pub mod path;
pub mod tags;

pub use nodes::NodeFilter;
pub use path::PathSpec;
pub use tags::TagFilter;
