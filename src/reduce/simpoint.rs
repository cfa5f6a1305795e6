//! Weighted merge of sampled ("simpoint") runs.
//!
//! Each surviving document carries a sample id in its synthesized name
//! (a `..._sp_<N>` component added by tag renaming). The id selects a weight
//! from the weight table; every numeric leaf is scaled by that weight and
//! added into a single running tree. The result is one document standing for
//! the weighted average of the whole run.
//!
//! Everything that would silently under-report is fatal here: a missing
//! weight, an id-less document, a sequence whose length disagrees with the
//! documents merged before it. Accumulation is plain float addition over
//! sorted-key walks, so the result does not depend on document order.

use crate::reduce::inner_tree;
use crate::tree::{Document, StatMap, StatValue};
use crate::utils::config::{NAME_SEPARATOR, SP_MARKER, SP_MERGED_SUFFIX};
use crate::utils::error::ReduceError;
use log::debug;
use std::collections::BTreeMap;

/// Sample id to weight, loaded once per run and never mutated
pub type WeightTable = BTreeMap<u64, f64>;

/// Extract the sample id embedded in a synthesized document name.
///
/// The name is `.`-separated; the leading component is the file stem and is
/// always skipped. The first remaining component containing `sp_` supplies
/// the id as its last `_`-delimited field.
pub fn extract_sample_id(name: &str) -> Option<u64> {
    name.split(NAME_SEPARATOR)
        .skip(1)
        .find(|part| part.contains(SP_MARKER))
        .and_then(|part| part.rsplit('_').next())
        .and_then(|id| id.parse().ok())
}

/// Merge all documents into one weighted tree named `{prefix}_sp_merged`.
pub fn weighted_merge(
    docs: &[Document],
    weights: &WeightTable,
    prefix: &str,
    strict: bool,
) -> Result<Document, ReduceError> {
    let mut merged = StatMap::new();

    for doc in docs {
        let sample_id =
            extract_sample_id(&doc.name).ok_or_else(|| ReduceError::SampleIdNotFound {
                document: doc.name.clone(),
            })?;
        let weight = *weights
            .get(&sample_id)
            .ok_or_else(|| ReduceError::MissingWeight {
                sample_id,
                document: doc.name.clone(),
            })?;

        debug!(
            "weighted merge: document '{}' sample {} weight {}",
            doc.name, sample_id, weight
        );

        let mut path = Vec::new();
        apply_weight(inner_tree(doc), weight, &mut merged, &mut path, strict, &doc.name)?;
    }

    let name = format!("{}{}", prefix, SP_MERGED_SUFFIX);
    let mut tree = StatMap::new();
    tree.insert(name.clone(), StatValue::Map(merged));
    Ok(Document::new(name, Vec::new(), tree))
}

fn apply_weight<'a>(
    node: &'a StatMap,
    weight: f64,
    merged: &mut StatMap,
    path: &mut Vec<&'a str>,
    strict: bool,
    document: &str,
) -> Result<(), ReduceError> {
    for (key, value) in node {
        path.push(key.as_str());
        match value {
            StatValue::Map(inner) => {
                let entry = merged
                    .entry(key.clone())
                    .or_insert_with(|| StatValue::Map(StatMap::new()));
                let StatValue::Map(merged_inner) = entry else {
                    return Err(structure_mismatch(path, document));
                };
                apply_weight(inner, weight, merged_inner, path, strict, document)?;
            }
            StatValue::Seq(items) => {
                merge_sequence(items, weight, merged, key, path, strict, document)?;
            }
            StatValue::Int(_) | StatValue::Float(_) => {
                let scaled = value.as_number().unwrap_or(0.0) * weight;
                match merged.get_mut(key) {
                    None => {
                        merged.insert(key.clone(), StatValue::Float(scaled));
                    }
                    Some(StatValue::Float(total)) => *total += scaled,
                    Some(_) => return Err(structure_mismatch(path, document)),
                }
            }
            StatValue::Str(_) => {
                // Strings never enter the weighted result.
                if strict {
                    return Err(ReduceError::NonNumeric {
                        path: path.join("::"),
                        document: document.to_string(),
                    });
                }
                debug!(
                    "weighted merge: skipping non-numeric leaf at '{}'",
                    path.join("::")
                );
            }
        }
        path.pop();
    }
    Ok(())
}

fn merge_sequence(
    items: &[StatValue],
    weight: f64,
    merged: &mut StatMap,
    key: &str,
    path: &[&str],
    strict: bool,
    document: &str,
) -> Result<(), ReduceError> {
    let numbers: Option<Vec<f64>> = items.iter().map(StatValue::as_number).collect();
    let Some(numbers) = numbers else {
        if strict {
            return Err(ReduceError::NonNumeric {
                path: path.join("::"),
                document: document.to_string(),
            });
        }
        debug!(
            "weighted merge: skipping non-numeric sequence at '{}'",
            path.join("::")
        );
        return Ok(());
    };

    match merged.get_mut(key) {
        None => {
            let scaled = numbers
                .into_iter()
                .map(|v| StatValue::Float(v * weight))
                .collect();
            merged.insert(key.to_string(), StatValue::Seq(scaled));
        }
        Some(StatValue::Seq(totals)) => {
            if totals.len() != numbers.len() {
                return Err(ReduceError::ShapeMismatch {
                    path: path.join("::"),
                    document: document.to_string(),
                    expected: totals.len(),
                    found: numbers.len(),
                });
            }
            for (total, v) in totals.iter_mut().zip(numbers) {
                let StatValue::Float(t) = total else {
                    return Err(structure_mismatch(path, document));
                };
                *t += v * weight;
            }
        }
        Some(_) => return Err(structure_mismatch(path, document)),
    }
    Ok(())
}

fn structure_mismatch(path: &[&str], document: &str) -> ReduceError {
    ReduceError::StructureMismatch {
        path: path.join("::"),
        document: document.to_string(),
    }
}
