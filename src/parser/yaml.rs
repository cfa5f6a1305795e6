//! YAML stats decoding.
//!
//! A stats dump file holds one or more YAML documents, each an arbitrarily
//! nested mapping of numbers, strings and sequences. Decoding produces
//! `Document`s: the tree, a name derived from the file stem, and the tag
//! list the simulator recorded under its top-level section.

use crate::tree::{Document, StatMap, StatValue};
use crate::utils::config::{TAGS_KEY, TAG_NODE_CANDIDATES};
use crate::utils::error::InputError;
use log::debug;
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Load every YAML document in `path` as a `Document`.
pub fn load_documents(path: &Path) -> Result<Vec<Document>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut docs = Vec::new();
    for de in serde_yaml::Deserializer::from_str(&text) {
        let value = Value::deserialize(de).map_err(|source| InputError::Yaml {
            path: path.display().to_string(),
            source,
        })?;

        let StatValue::Map(tree) = convert(value) else {
            debug!("skipping non-mapping YAML document in {}", path.display());
            continue;
        };

        let tags = extract_tags(&tree);
        docs.push(Document::new(stem.clone(), tags, tree));
    }

    debug!("loaded {} document(s) from {}", docs.len(), path.display());
    Ok(docs)
}

/// Convert a decoded YAML value into the pipeline's value model.
///
/// Mapping keys are stringified: histogram buckets are often numeric keys
/// and the tree model keys by string throughout.
fn convert(value: Value) -> StatValue {
    match value {
        Value::Null => StatValue::Str(String::new()),
        Value::Bool(b) => StatValue::Str(b.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => StatValue::Int(i),
            None => StatValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => StatValue::Str(s),
        Value::Sequence(items) => StatValue::Seq(items.into_iter().map(convert).collect()),
        Value::Mapping(mapping) => {
            let mut map = StatMap::new();
            for (key, val) in mapping {
                map.insert(key_string(&key), convert(val));
            }
            StatValue::Map(map)
        }
        Value::Tagged(tagged) => convert(tagged.value),
    }
}

fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

/// Pull the tag list out of the simulator's top-level section, if present.
fn extract_tags(tree: &StatMap) -> Vec<String> {
    for candidate in TAG_NODE_CANDIDATES {
        let Some(StatValue::Map(section)) = tree.get(*candidate) else {
            continue;
        };
        let Some(StatValue::Seq(items)) = section.get(TAGS_KEY) else {
            continue;
        };
        return items.iter().map(StatValue::to_string).collect();
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn write_stats(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".stats")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_single_document() {
        let file = write_stats(
            "simulator:\n  tags: [astar, sp_3]\nbase_machine:\n  cycles: 100\n  ipc: 0.5\n",
        );
        let docs = load_documents(file.path()).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].tags, vec!["astar".to_string(), "sp_3".to_string()]);

        let StatValue::Map(machine) = &docs[0].tree["base_machine"] else {
            panic!("expected mapping")
        };
        assert_eq!(machine["cycles"], StatValue::Int(100));
        assert_eq!(machine["ipc"], StatValue::Float(0.5));
    }

    #[test]
    fn test_multi_document_file_shares_name() {
        let file = write_stats("---\na: 1\n---\na: 2\n");
        let docs = load_documents(file.path()).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, docs[1].name);
        assert_eq!(docs[0].tree["a"], StatValue::Int(1));
        assert_eq!(docs[1].tree["a"], StatValue::Int(2));
    }

    #[test]
    fn test_numeric_mapping_keys_are_stringified() {
        let file = write_stats("hist:\n  0: 5\n  1: 10\n");
        let docs = load_documents(file.path()).unwrap();

        let StatValue::Map(hist) = &docs[0].tree["hist"] else {
            panic!("expected mapping")
        };
        assert_eq!(hist["0"], StatValue::Int(5));
        assert_eq!(hist["1"], StatValue::Int(10));
    }

    #[test]
    fn test_missing_tags_section_means_no_tags() {
        let file = write_stats("cycles: 1\n");
        let docs = load_documents(file.path()).unwrap();
        assert!(docs[0].tags.is_empty());
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let file = write_stats("a: [unclosed\n");
        let err = load_documents(file.path()).unwrap_err();
        assert!(matches!(err, InputError::Yaml { .. }));
    }
}
