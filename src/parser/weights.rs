//! Simpoint weight file parsing.
//!
//! One sample per line: `<weight> <id>` (the order the simpoint toolchain
//! emits). The table is loaded once and never mutated afterwards.

use crate::reduce::WeightTable;
use crate::utils::error::InputError;
use log::debug;
use std::fs;
use std::path::Path;

/// Load a weight table from `path`.
pub fn load_weights(path: &Path) -> Result<WeightTable, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut table = WeightTable::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let parsed = match (fields.next(), fields.next(), fields.next()) {
            (Some(weight), Some(id), None) => {
                weight.parse::<f64>().ok().zip(id.parse::<u64>().ok())
            }
            _ => None,
        };
        let Some((weight, id)) = parsed else {
            return Err(InputError::WeightFormat {
                path: path.display().to_string(),
                line: idx + 1,
            });
        };

        table.insert(id, weight);
    }

    debug!("loaded {} weight(s) from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn write_weights(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_weights() {
        let file = write_weights("0.25 1\n0.75 2\n\n");
        let table = load_weights(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[&1], 0.25);
        assert_eq!(table[&2], 0.75);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let file = write_weights("0.25 1\nnot a weight line\n");
        let err = load_weights(file.path()).unwrap_err();

        let InputError::WeightFormat { line, .. } = err else {
            panic!("expected WeightFormat, got {err}")
        };
        assert_eq!(line, 2);
    }
}
