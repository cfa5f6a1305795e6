//! Deep-merge policies for statistics trees.
//!
//! Two distinct merges exist and must not be conflated:
//!
//! * `merge_union` - structural union used when combining the results of
//!   several node selections: mappings recurse, anything else is overwritten
//!   by the incoming value. No arithmetic happens here.
//! * `merge_sum` - numeric merge used by `--sum-all`: overlapping numeric
//!   leaves add (element-wise for sequences), mappings union recursively,
//!   everything else is overwritten by the incoming value.
//!
//! Sequences only add element-wise when both sides are all-numeric and of
//! equal length; otherwise the incoming sequence replaces the old one. That
//! is the documented policy for ragged merges - never a panic.

use super::value::{StatMap, StatValue};

/// Structural union of `src` into `dst`: recurse on mapping overlap,
/// new value wins everywhere else.
pub fn merge_union(dst: &mut StatMap, src: StatMap) {
    for (key, src_val) in src {
        match (dst.get_mut(&key), src_val) {
            (Some(StatValue::Map(dst_inner)), StatValue::Map(src_inner)) => {
                merge_union(dst_inner, src_inner);
            }
            (_, src_val) => {
                dst.insert(key, src_val);
            }
        }
    }
}

/// Numeric merge of `src` into `dst`: overlapping numeric leaves add,
/// mappings union, anything else is overwritten by `src`.
pub fn merge_sum(dst: &mut StatMap, src: &StatMap) {
    for (key, src_val) in src {
        match dst.get_mut(key) {
            None => {
                dst.insert(key.clone(), src_val.clone());
            }
            Some(dst_val) => merge_sum_value(dst_val, src_val),
        }
    }
}

fn merge_sum_value(dst: &mut StatValue, src: &StatValue) {
    match (&mut *dst, src) {
        (StatValue::Map(dst_inner), StatValue::Map(src_inner)) => {
            merge_sum(dst_inner, src_inner);
        }
        (StatValue::Seq(dst_items), StatValue::Seq(src_items)) => {
            match add_sequences(dst_items, src_items) {
                Some(summed) => *dst = StatValue::Seq(summed),
                None => *dst = src.clone(),
            }
        }
        (dst_scalar, src_scalar) => match add_scalars(dst_scalar, src_scalar) {
            Some(sum) => *dst = sum,
            None => *dst = src.clone(),
        },
    }
}

/// Add two scalars, keeping Int when both sides are Int.
pub(crate) fn add_scalars(a: &StatValue, b: &StatValue) -> Option<StatValue> {
    match (a, b) {
        (StatValue::Int(x), StatValue::Int(y)) => Some(StatValue::Int(x + y)),
        _ => Some(StatValue::Float(a.as_number()? + b.as_number()?)),
    }
}

/// Element-wise sum of two all-numeric sequences of equal length.
fn add_sequences(a: &[StatValue], b: &[StatValue]) -> Option<Vec<StatValue>> {
    if a.len() != b.len() {
        return None;
    }
    a.iter().zip(b).map(|(x, y)| add_scalars(x, y)).collect()
}
