//! Report writers: pure read-only consumers of the final document list.

pub mod flatten;
pub mod histogram;
pub mod table;
pub mod yaml;

pub use flatten::write_flattened;
pub use histogram::write_histograms;
pub use table::write_csv;
pub use yaml::write_yaml;
