//! Histogram report for numeric leaf collections.
//!
//! The tree is walked recursively, printing `key {` / `}` blocks. Any leaf
//! collection with more than one element gets summary statistics followed by
//! one line per element: percent of total, cumulative percent, the value and
//! a star bar. Mapping collections iterate by descending value (key order
//! breaks ties); sequence collections iterate by index, and additionally
//! report the index-weighted sum since bucket position is the weight there.

use crate::tree::{Document, StatMap, StatValue};
use crate::utils::config::HISTOGRAM_BAR_WIDTH;
use crate::utils::error::OutputError;
use std::io::Write;

/// Write histogram blocks for every document.
pub fn write_histograms<W: Write>(out: &mut W, docs: &[Document]) -> Result<(), OutputError> {
    for doc in docs {
        let mut pad = String::new();
        histogram_node(out, &doc.tree, &mut pad)?;
    }
    Ok(())
}

fn histogram_node<W: Write>(
    out: &mut W,
    map: &StatMap,
    pad: &mut String,
) -> Result<(), OutputError> {
    for (key, value) in map {
        if value.is_scalar() {
            continue;
        }

        writeln!(out, "{}{} {{", pad, key)?;
        pad.push_str("  ");

        if value.is_leaf_collection() && value.len() > 1 {
            write_collection(out, value, pad)?;
        } else if let StatValue::Map(inner) = value {
            histogram_node(out, inner, pad)?;
        }

        pad.truncate(pad.len() - 2);
        writeln!(out, "{}}}", pad)?;
    }
    Ok(())
}

/// Elements in report order: label, numeric value.
fn ordered_entries(node: &StatValue) -> Vec<(String, f64)> {
    match node {
        StatValue::Map(map) => {
            let mut entries: Vec<(String, f64)> = map
                .iter()
                .map(|(k, v)| (k.clone(), v.as_number().unwrap_or(0.0)))
                .collect();
            entries.sort_by(|(ka, va), (kb, vb)| {
                vb.partial_cmp(va)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| ka.cmp(kb))
            });
            entries
        }
        StatValue::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.as_number().unwrap_or(0.0)))
            .collect(),
        _ => Vec::new(),
    }
}

fn write_collection<W: Write>(
    out: &mut W,
    node: &StatValue,
    pad: &str,
) -> Result<(), OutputError> {
    let is_map = matches!(node, StatValue::Map(_));
    let entries = ordered_entries(node);
    if entries.is_empty() {
        return Ok(());
    }

    let total: f64 = entries.iter().map(|(_, v)| v).sum();
    let min = entries.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = entries
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    // Index-weighted sum only makes sense for sequences, where the element
    // position is the bucket value.
    let weighted_sum: f64 = entries
        .iter()
        .enumerate()
        .map(|(i, (_, v))| v * i as f64)
        .sum();

    let average = if is_map {
        total / entries.len() as f64
    } else if total != 0.0 {
        weighted_sum / total
    } else {
        0.0
    };

    let label_width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let value_width = entries
        .iter()
        .map(|(_, v)| format!("{}", v).len())
        .max()
        .unwrap_or(0);

    writeln!(out, "{}Minimum:         {}", pad, min)?;
    writeln!(out, "{}Maximum:         {}", pad, max)?;
    writeln!(out, "{}Average:         {:.2}", pad, average)?;
    writeln!(out, "{}Total Sum:       {}", pad, total)?;
    if !is_map {
        writeln!(out, "{}Weighted Sum:    {}", pad, weighted_sum)?;
    }
    writeln!(out)?;

    let mut accum = 0.0;
    for (label, value) in &entries {
        accum += value;
        let percent = if total != 0.0 {
            value / total * 100.0
        } else {
            0.0
        };
        let cumulative = if total != 0.0 {
            accum / total * 100.0
        } else {
            0.0
        };
        let stars = "*".repeat((percent / 100.0 * HISTOGRAM_BAR_WIDTH as f64) as usize);

        writeln!(
            out,
            "{}{:<lw$} [{:>5.1}] [{:>5.1}]: {:>vw$} {}",
            pad,
            label,
            percent,
            cumulative,
            value,
            stars,
            lw = label_width,
            vw = value_width,
        )?;
    }

    Ok(())
}
