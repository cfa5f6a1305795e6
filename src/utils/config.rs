//! Configuration constants for the CLI.

/// Separator between levels in a node search path
pub const PATH_SEPARATOR: &str = "::";

/// Separator used when joining a document name with its matched tags
pub const NAME_SEPARATOR: &str = ".";

/// Default separator for flattened output lines
pub const DEFAULT_FLATTEN_SEP: &str = "::";

/// Name suffix given to a weighted-merge result ("{prefix}_sp_merged")
pub const SP_MERGED_SUFFIX: &str = "_sp_merged";

/// Marker embedded in tag/name components that carry a sample id
pub const SP_MARKER: &str = "sp_";

/// Width of the star bar in histogram output
pub const HISTOGRAM_BAR_WIDTH: usize = 50;

// Top-level nodes that may carry the document's tag list. Different
// simulator builds dump under different section names.
pub const TAG_NODE_CANDIDATES: &[&str] = &["simulator", "sim_stats"];

/// Key holding the tag list inside a tag node
pub const TAGS_KEY: &str = "tags";
