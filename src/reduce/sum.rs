//! Flattening sums: collapse trees to a single number or numeric vector.
//!
//! Two operations live here:
//!
//! * `sum_document` (`--sum`) collapses one document's entire tree to a
//!   single total - a scalar, or a vector when the tree's numeric content
//!   is sequences. Quick go/no-go summaries.
//! * `sum_all` (`--sum-all NAME`) numerically merges every document into
//!   one tree under a caller-supplied name.
//!
//! Non-numeric leaves are inert by default; `strict` turns them into fatal
//! errors (see the `--strict-numeric` flag).

use crate::reduce::inner_tree;
use crate::tree::{merge_sum, Document, StatMap, StatValue};
use crate::utils::error::ReduceError;
use log::debug;

/// Running total for one document
enum Acc {
    Empty,
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Acc {
    fn into_value(self) -> StatValue {
        match self {
            // Nothing numeric in the whole tree still reports a zero total.
            Acc::Empty => StatValue::Float(0.0),
            Acc::Scalar(total) => StatValue::Float(total),
            Acc::Vector(totals) => {
                StatValue::Seq(totals.into_iter().map(StatValue::Float).collect())
            }
        }
    }
}

/// Collapse one document to `{ name: total }`.
pub fn sum_document(doc: &Document, strict: bool) -> Result<Document, ReduceError> {
    let mut acc = Acc::Empty;
    let mut path = Vec::new();
    sum_map(&doc.tree, &mut path, &mut acc, strict, &doc.name)?;

    let mut tree = StatMap::new();
    tree.insert(doc.name.clone(), acc.into_value());
    Ok(Document::new(doc.name.clone(), doc.tags.clone(), tree))
}

fn sum_map<'a>(
    map: &'a StatMap,
    path: &mut Vec<&'a str>,
    acc: &mut Acc,
    strict: bool,
    document: &str,
) -> Result<(), ReduceError> {
    for (key, value) in map {
        path.push(key.as_str());
        match value {
            StatValue::Map(inner) => sum_map(inner, path, acc, strict, document)?,
            StatValue::Int(i) => add_scalar(*i as f64, path, acc, strict, document)?,
            StatValue::Float(x) => add_scalar(*x, path, acc, strict, document)?,
            StatValue::Seq(items) => add_sequence(items, path, acc, strict, document)?,
            StatValue::Str(_) => skip_non_numeric(path, strict, document)?,
        }
        path.pop();
    }
    Ok(())
}

fn add_scalar(
    v: f64,
    path: &[&str],
    acc: &mut Acc,
    strict: bool,
    document: &str,
) -> Result<(), ReduceError> {
    match acc {
        Acc::Empty => *acc = Acc::Scalar(v),
        Acc::Scalar(total) => *total += v,
        Acc::Vector(_) => {
            shape_conflict(path, acc, 1, strict, document)?;
            debug!(
                "sum: skipping scalar at '{}': total is vector-shaped",
                path.join("::")
            );
        }
    }
    Ok(())
}

fn add_sequence(
    items: &[StatValue],
    path: &[&str],
    acc: &mut Acc,
    strict: bool,
    document: &str,
) -> Result<(), ReduceError> {
    if items.is_empty() {
        return Ok(());
    }
    let Some(numbers) = numeric_elements(items) else {
        return skip_non_numeric(path, strict, document);
    };
    match acc {
        // First numeric value seen overall: the accumulator takes
        // the sequence's shape.
        Acc::Empty => *acc = Acc::Vector(numbers),
        Acc::Vector(totals) if totals.len() == numbers.len() => {
            for (total, v) in totals.iter_mut().zip(numbers) {
                *total += v;
            }
        }
        _ => {
            shape_conflict(path, acc, items.len(), strict, document)?;
            debug!(
                "sum: skipping sequence of {} at '{}': shape conflict",
                items.len(),
                path.join("::")
            );
        }
    }
    Ok(())
}

/// Elements of an all-numeric sequence, or None if anything else is present.
fn numeric_elements(items: &[StatValue]) -> Option<Vec<f64>> {
    items.iter().map(StatValue::as_number).collect()
}

fn shape_conflict(
    path: &[&str],
    acc: &Acc,
    found: usize,
    strict: bool,
    document: &str,
) -> Result<(), ReduceError> {
    if strict {
        let expected = match acc {
            Acc::Vector(totals) => totals.len(),
            _ => 1,
        };
        return Err(ReduceError::ShapeMismatch {
            path: path.join("::"),
            document: document.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn skip_non_numeric(path: &[&str], strict: bool, document: &str) -> Result<(), ReduceError> {
    if strict {
        return Err(ReduceError::NonNumeric {
            path: path.join("::"),
            document: document.to_string(),
        });
    }
    debug!("sum: skipping non-numeric value at '{}'", path.join("::"));
    Ok(())
}

/// Numerically merge every document into one tree under `name`.
pub fn sum_all(docs: &[Document], name: &str) -> Document {
    let mut merged = StatMap::new();
    for doc in docs {
        merge_sum(&mut merged, inner_tree(doc));
    }

    let mut tree = StatMap::new();
    tree.insert(name.to_string(), StatValue::Map(merged));
    Document::new(name, Vec::new(), tree)
}
