//! Input decoding: YAML stats dumps and simpoint weight files.

pub mod weights;
pub mod yaml;

pub use weights::load_weights;
pub use yaml::load_documents;
