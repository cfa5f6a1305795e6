//! Pipeline assembly: an explicit ordered list of stages.
//!
//! A run is always tag filter -> node filter -> reductions, each stage a
//! small object behind the `Stage` trait. Everything configurable is
//! compiled up front by `build_pipeline`, so invalid regexes and conflicting
//! reduction modes are rejected before the first document is touched.

use crate::filter::{NodeFilter, TagFilter};
use crate::reduce::{sum_all, sum_document, weighted_merge, WeightTable};
use crate::tree::Document;
use crate::utils::config::SP_MARKER;
use crate::utils::error::{ConfigError, PipelineError};
use log::debug;

/// One processing stage over the document list
pub trait Stage {
    fn name(&self) -> &'static str;
    fn apply(&self, docs: Vec<Document>) -> Result<Vec<Document>, PipelineError>;
}

/// Everything a run can configure, values only.
///
/// Stages receive their configuration at construction; nothing here is
/// global or mutated after `build_pipeline`.
#[derive(Debug, Default)]
pub struct PipelineConfig {
    /// Required tag patterns (AND semantics)
    pub tag_patterns: Vec<String>,
    /// `::`-delimited node selections (OR semantics)
    pub node_paths: Vec<String>,
    /// Collapse each document to a single total
    pub sum: bool,
    /// Numerically merge all documents under this name
    pub sum_all: Option<String>,
    /// Simpoint weight table (enables the weighted merge)
    pub sp_weights: Option<WeightTable>,
    /// Simpoint prefix: derives a tag pattern and names the merged result
    pub sp_prefix: Option<String>,
    /// Reject non-numeric leaves under reduction instead of skipping them
    pub strict_numeric: bool,
}

/// A compiled, ready-to-run stage list
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Pipeline {
    /// Run every stage in order. The first fatal error aborts the run.
    pub fn run(&self, mut docs: Vec<Document>) -> Result<Vec<Document>, PipelineError> {
        for stage in &self.stages {
            let before = docs.len();
            docs = stage.apply(docs)?;
            debug!(
                "stage {}: {} document(s) in, {} out",
                stage.name(),
                before,
                docs.len()
            );
        }
        Ok(docs)
    }
}

/// Compile the configuration into a pipeline.
///
/// All configuration errors surface here, before any document is processed.
pub fn build_pipeline(config: PipelineConfig) -> Result<Pipeline, PipelineError> {
    if config.sum && config.sp_weights.is_some() {
        return Err(ConfigError::ConflictingModes.into());
    }
    if config.sp_weights.is_some() && config.sp_prefix.is_none() {
        return Err(ConfigError::MissingPrefix.into());
    }

    // The simpoint prefix implies a tag filter selecting that benchmark's
    // sampled runs.
    let mut tag_patterns = config.tag_patterns;
    if let Some(prefix) = &config.sp_prefix {
        tag_patterns.push(format!("{}_{}[0-9]+", prefix, SP_MARKER));
    }

    let tag_filter = TagFilter::compile(&tag_patterns).map_err(PipelineError::Filter)?;
    let below_wrapper = !tag_filter.is_empty();
    let node_filter =
        NodeFilter::compile(&config.node_paths, below_wrapper).map_err(PipelineError::Filter)?;

    let mut stages: Vec<Box<dyn Stage>> = Vec::new();
    if !tag_filter.is_empty() {
        stages.push(Box::new(TagStage(tag_filter)));
    }
    if !node_filter.is_empty() {
        stages.push(Box::new(NodeStage(node_filter)));
    }
    if let (Some(weights), Some(prefix)) = (config.sp_weights, config.sp_prefix) {
        stages.push(Box::new(WeightedStage {
            weights,
            prefix,
            strict: config.strict_numeric,
        }));
    }
    if let Some(name) = config.sum_all {
        stages.push(Box::new(SumAllStage { name }));
    }
    if config.sum {
        stages.push(Box::new(SumStage {
            strict: config.strict_numeric,
        }));
    }

    Ok(Pipeline { stages })
}

struct TagStage(TagFilter);

impl Stage for TagStage {
    fn name(&self) -> &'static str {
        "tag-filter"
    }

    fn apply(&self, docs: Vec<Document>) -> Result<Vec<Document>, PipelineError> {
        Ok(self.0.apply(docs))
    }
}

struct NodeStage(NodeFilter);

impl Stage for NodeStage {
    fn name(&self) -> &'static str {
        "node-filter"
    }

    fn apply(&self, docs: Vec<Document>) -> Result<Vec<Document>, PipelineError> {
        Ok(self.0.apply(docs))
    }
}

struct SumStage {
    strict: bool,
}

impl Stage for SumStage {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn apply(&self, docs: Vec<Document>) -> Result<Vec<Document>, PipelineError> {
        docs.iter()
            .map(|doc| sum_document(doc, self.strict))
            .collect::<Result<_, _>>()
            .map_err(PipelineError::Reduce)
    }
}

struct SumAllStage {
    name: String,
}

impl Stage for SumAllStage {
    fn name(&self) -> &'static str {
        "sum-all"
    }

    fn apply(&self, docs: Vec<Document>) -> Result<Vec<Document>, PipelineError> {
        Ok(vec![sum_all(&docs, &self.name)])
    }
}

struct WeightedStage {
    weights: WeightTable,
    prefix: String,
    strict: bool,
}

impl Stage for WeightedStage {
    fn name(&self) -> &'static str {
        "simpoint-merge"
    }

    fn apply(&self, docs: Vec<Document>) -> Result<Vec<Document>, PipelineError> {
        let merged = weighted_merge(&docs, &self.weights, &self.prefix, self.strict)
            .map_err(PipelineError::Reduce)?;
        Ok(vec![merged])
    }
}
