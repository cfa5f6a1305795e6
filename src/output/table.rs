//! Tabular CSV projection of a result list.
//!
//! Columns are the sorted union of every document's flattened leaf paths,
//! so all rows line up even when documents carry different statistic sets.
//! One row per document; a path missing from a document renders as `0`.

use crate::tree::{walk_leaves, Document, StatValue};
use crate::utils::error::OutputError;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// Write the documents as a CSV table with a `name` key column.
pub fn write_csv<W: Write>(out: &mut W, docs: &[Document], sep: &str) -> Result<(), OutputError> {
    let mut columns: BTreeSet<String> = BTreeSet::new();
    let mut rows: Vec<(&str, BTreeMap<String, &StatValue>)> = Vec::with_capacity(docs.len());

    for doc in docs {
        let mut cells = BTreeMap::new();
        walk_leaves(&doc.tree, &mut |path, value| {
            let column = path.join(sep);
            columns.insert(column.clone());
            cells.insert(column, value);
        });
        rows.push((doc.name.as_str(), cells));
    }

    write!(out, "name")?;
    for column in &columns {
        write!(out, ",{}", escape(column))?;
    }
    writeln!(out)?;

    for (name, cells) in rows {
        write!(out, "{}", escape(name))?;
        for column in &columns {
            match cells.get(column) {
                Some(value) => write!(out, ",{}", escape(&value.to_string()))?,
                None => write!(out, ",0")?,
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Minimal CSV quoting for cells that would break the row format.
fn escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::StatMap;
    use pretty_assertions::assert_eq;

    fn doc(name: &str, entries: Vec<(&str, StatValue)>) -> Document {
        let tree = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Document::new(name, vec![], tree)
    }

    fn render(docs: &[Document]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, docs, "::").unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_columns_are_union_and_missing_cells_are_zero() {
        let docs = vec![
            doc("run1", vec![("hit", StatValue::Int(10))]),
            doc("run2", vec![("miss", StatValue::Int(2))]),
        ];

        assert_eq!(
            render(&docs),
            "name,hit,miss\nrun1,10,0\nrun2,0,2\n"
        );
    }

    #[test]
    fn test_nested_paths_join_with_separator() {
        let mut inner = StatMap::new();
        inner.insert("hit".to_string(), StatValue::Int(3));
        let docs = vec![doc("run1", vec![("L1", StatValue::Map(inner))])];

        assert_eq!(render(&docs), "name,L1::hit\nrun1,3\n");
    }

    #[test]
    fn test_sequence_cells_are_quoted() {
        let docs = vec![doc(
            "run1",
            vec![(
                "hist",
                StatValue::Seq(vec![StatValue::Int(1), StatValue::Int(2)]),
            )],
        )];

        assert_eq!(render(&docs), "name,hist\nrun1,\"[1, 2]\"\n");
    }
}
