use crate::error::Error;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Characters that act as joiners between a prefix/suffix and the base name.
///
/// A prefix ending in one of these (or a suffix starting with one) is
/// concatenated directly; otherwise a single `-` is inserted. This lets the
/// caller control the joiner by pre-terminating the value with a delimiter.
pub const DELIMITERS: [char; 4] = ['_', '-', '.', ','];

/// The kind of transformation a single operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    AddPrefix,
    RemovePrefix,
    AddSuffix,
    RemoveSuffix,
}

/// One composable rename operation.
///
/// `step` is a 1-based ordering key: operations are always evaluated in
/// ascending `step` order, independent of the order they arrive in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub step: u32,
    #[serde(rename = "type")]
    pub kind: OpKind,
    pub value: String,
}

impl Operation {
    pub fn new(step: u32, kind: OpKind, value: impl Into<String>) -> Self {
        Self {
            step,
            kind,
            value: value.into(),
        }
    }
}

/// Validate a batch of operations and return them sorted by step.
///
/// Within one batch no two operations may share a `step`.
pub fn validate_operations(ops: &[Operation]) -> Result<Vec<Operation>> {
    let mut sorted = ops.to_vec();
    sorted.sort_by_key(|op| op.step);
    for pair in sorted.windows(2) {
        if pair[0].step == pair[1].step {
            return Err(Error::DuplicateStep(pair[0].step).into());
        }
    }
    Ok(sorted)
}

/// Split a file name into (base, extension).
///
/// The extension is the final-dot tail, kept with its dot so the two halves
/// re-concatenate to the original. A name whose only non-dot characters come
/// after the leading dots (`.hidden`, `...`) has no extension.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

fn ends_with_delimiter(s: &str) -> bool {
    s.chars().last().is_some_and(|c| DELIMITERS.contains(&c))
}

fn starts_with_delimiter(s: &str) -> bool {
    s.chars().next().is_some_and(|c| DELIMITERS.contains(&c))
}

pub fn add_prefix(base: &str, value: &str) -> String {
    if value.is_empty() {
        return base.to_string();
    }
    if ends_with_delimiter(value) {
        format!("{value}{base}")
    } else {
        format!("{value}-{base}")
    }
}

pub fn remove_prefix(base: &str, value: &str) -> String {
    if value.is_empty() {
        return base.to_string();
    }
    match base.strip_prefix(value) {
        // Strip at most one leading delimiter left behind by the prefix
        Some(rest) => rest.strip_prefix(DELIMITERS).unwrap_or(rest).to_string(),
        None => base.to_string(),
    }
}

pub fn add_suffix(base: &str, value: &str) -> String {
    if value.is_empty() {
        return base.to_string();
    }
    if starts_with_delimiter(value) {
        format!("{base}{value}")
    } else {
        format!("{base}-{value}")
    }
}

pub fn remove_suffix(base: &str, value: &str) -> String {
    if value.is_empty() {
        return base.to_string();
    }
    match base.strip_suffix(value) {
        Some(rest) => rest.strip_suffix(DELIMITERS).unwrap_or(rest).to_string(),
        None => base.to_string(),
    }
}

/// Apply an operation list to a bare base string (no extension handling).
///
/// Pure and deterministic: each operation receives the output of the previous
/// one, in ascending step order.
pub fn apply_operations(base: &str, ops: &[Operation]) -> String {
    let mut sorted: Vec<&Operation> = ops.iter().collect();
    sorted.sort_by_key(|op| op.step);

    let mut current = base.to_string();
    for op in sorted {
        current = match op.kind {
            OpKind::AddPrefix => add_prefix(&current, &op.value),
            OpKind::RemovePrefix => remove_prefix(&current, &op.value),
            OpKind::AddSuffix => add_suffix(&current, &op.value),
            OpKind::RemoveSuffix => remove_suffix(&current, &op.value),
        };
    }
    current
}

/// Apply an operation list to a file name, leaving the extension untouched.
pub fn transform_file_name(name: &str, ops: &[Operation]) -> String {
    let (base, ext) = split_name(name);
    let new_base = apply_operations(base, ops);
    format!("{new_base}{ext}")
}
