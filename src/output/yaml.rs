//! YAML dump of a result list, the round-trip counterpart of the reader.

use crate::tree::Document;
use crate::utils::error::OutputError;
use std::io::Write;

/// Write every document's tree as one YAML document, `---` separated.
pub fn write_yaml<W: Write>(out: &mut W, docs: &[Document]) -> Result<(), OutputError> {
    for doc in docs {
        writeln!(out, "---")?;
        let rendered = serde_yaml::to_string(&doc.tree)?;
        out.write_all(rendered.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{StatMap, StatValue};

    #[test]
    fn test_multi_document_dump() {
        let make = |name: &str, v: i64| {
            let mut tree = StatMap::new();
            tree.insert("cycles".to_string(), StatValue::Int(v));
            Document::new(name, vec![], tree)
        };

        let mut buf = Vec::new();
        write_yaml(&mut buf, &[make("a", 1), make("b", 2)]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.matches("---").count(), 2);
        assert!(text.contains("cycles: 1"));
        assert!(text.contains("cycles: 2"));
    }
}
