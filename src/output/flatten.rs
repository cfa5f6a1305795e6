//! Flattened report: one `nodeX::nodeY : value` line per leaf.

use crate::tree::{walk_leaves, Document};
use crate::utils::error::OutputError;
use std::io::Write;

/// Write every document's leaves as `path : value` lines.
///
/// `sep` joins path components (default `::`). Sequences render inline as
/// one value; depth-first key order makes the output stable.
pub fn write_flattened<W: Write>(
    out: &mut W,
    docs: &[Document],
    sep: &str,
) -> Result<(), OutputError> {
    for doc in docs {
        let mut result = Ok(());
        walk_leaves(&doc.tree, &mut |path, value| {
            if result.is_ok() {
                result = writeln!(out, "{} : {}", path.join(sep), value);
            }
        });
        result?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{StatMap, StatValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten_lines() {
        let mut cache = StatMap::new();
        cache.insert("hit".to_string(), StatValue::Int(10));
        cache.insert("rate".to_string(), StatValue::Float(0.5));

        let mut tree = StatMap::new();
        tree.insert("L1".to_string(), StatValue::Map(cache));
        tree.insert(
            "hist".to_string(),
            StatValue::Seq(vec![StatValue::Int(1), StatValue::Int(2)]),
        );

        let docs = vec![Document::new("run1", vec![], tree)];
        let mut buf = Vec::new();
        write_flattened(&mut buf, &docs, "::").unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "L1::hit : 10\nL1::rate : 0.5\nhist : [1, 2]\n"
        );
    }

    #[test]
    fn test_custom_separator() {
        let mut inner = StatMap::new();
        inner.insert("b".to_string(), StatValue::Int(1));
        let mut tree = StatMap::new();
        tree.insert("a".to_string(), StatValue::Map(inner));

        let docs = vec![Document::new("run1", vec![], tree)];
        let mut buf = Vec::new();
        write_flattened(&mut buf, &docs, ".").unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "a.b : 1\n");
    }
}
