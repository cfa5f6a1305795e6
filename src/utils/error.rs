//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs.
//!
//! Structural absence (no tag match, no path match, empty result tree) is
//! never an error: it is filtered silently and logged at debug level.
//! Everything below is fatal and aborts the whole run.

use thiserror::Error;

/// Errors that can occur while compiling filter configuration
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid node search pattern '{segment}' in path '{path}': {source}")]
    InvalidPattern {
        path: String,
        segment: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid tag pattern '{pattern}': {source}")]
    InvalidTagPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that can occur during numeric reduction
///
/// A silently dropped document would corrupt a weighted average invisibly,
/// so every one of these aborts the pipeline before any report is emitted.
#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("document '{document}' has no sp_<N> component in its name")]
    SampleIdNotFound { document: String },

    #[error("no weight for sample id {sample_id} (document '{document}')")]
    MissingWeight { sample_id: u64, document: String },

    #[error(
        "sequence length mismatch at '{path}' in document '{document}': \
         expected {expected} elements, found {found}"
    )]
    ShapeMismatch {
        path: String,
        document: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "value kind at '{path}' in document '{document}' differs from \
         previously merged documents"
    )]
    StructureMismatch { path: String, document: String },

    #[error("non-numeric value at '{path}' in document '{document}'")]
    NonNumeric { path: String, document: String },
}

/// Errors that can occur while loading input files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("malformed weight entry at {path}:{line}: expected '<weight> <id>'")]
    WeightFormat { path: String, line: usize },
}

/// Errors that can occur while writing reports
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize YAML output: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration errors, rejected before any document is processed
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("--sum and --sp-weights are mutually exclusive")]
    ConflictingModes,

    #[error("--sp-weights requires --sp-pfx to filter and name the merged result")]
    MissingPrefix,
}

/// Errors raised by a pipeline stage
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
