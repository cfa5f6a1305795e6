//! mstats
//!
//! Filtering, merging and reporting for hierarchical simulation
//! statistics dumps.
//!
//! Stats dumps are nested YAML trees of counters, one document per run.
//! This crate selects subtrees by `::`-delimited regex paths, filters runs
//! by tag, merges runs (plain or simpoint-weighted sums) and renders the
//! result as YAML, flattened lines, histograms or a CSV table.
//!
//! This crate provides the core implementation for the `mstats` CLI tool.

pub mod filter;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reduce;
pub mod tree;
pub mod utils;
