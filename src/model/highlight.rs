use std::collections::BTreeSet;

use serde_json::Value;

/// Resolved highlight references for one step.
///
/// Entries are interpreted per shape: integers are positions or numeric ids, strings are ids or
/// keys, and `[row, col]` pairs (or `{"row", "col"}` objects) address grid cells. References
/// that match nothing in the active snapshot are simply never hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightSet {
    indices: BTreeSet<i64>,
    keys: BTreeSet<String>,
    cells: BTreeSet<(i64, i64)>,
}

impl HighlightSet {
    pub fn from_values(values: &[Value]) -> Self {
        let mut out = Self::default();
        for v in values {
            match v {
                Value::Number(_) => {
                    if let Some(i) = as_integer(v) {
                        out.indices.insert(i);
                    }
                }
                Value::String(s) => {
                    let s = s.trim();
                    if let Ok(i) = s.parse::<i64>() {
                        out.indices.insert(i);
                    }
                    out.keys.insert(s.to_owned());
                }
                Value::Array(pair) if pair.len() == 2 => {
                    if let (Some(r), Some(c)) = (as_integer(&pair[0]), as_integer(&pair[1])) {
                        out.cells.insert((r, c));
                    }
                }
                Value::Object(map) => {
                    let row = map.get("row").and_then(as_integer);
                    let col = map.get("col").and_then(as_integer);
                    if let (Some(r), Some(c)) = (row, col) {
                        out.cells.insert((r, c));
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.keys.is_empty() && self.cells.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        i64::try_from(index).is_ok_and(|i| self.indices.contains(&i))
    }

    /// Match an entity id (a graph node `id`, a tree node value).
    pub fn contains_id(&self, id: &Value) -> bool {
        match id {
            Value::Number(_) => as_integer(id).is_some_and(|i| self.indices.contains(&i)),
            Value::String(s) => self.keys.contains(s.trim()),
            Value::Bool(b) => self.keys.contains(if *b { "true" } else { "false" }),
            _ => false,
        }
    }

    /// Match a grid cell, either as an explicit pair or as a row-major flat index.
    pub fn contains_cell(&self, row: usize, col: usize, cols: usize) -> bool {
        let (Ok(r), Ok(c)) = (i64::try_from(row), i64::try_from(col)) else {
            return false;
        };
        if self.cells.contains(&(r, c)) {
            return true;
        }
        row.checked_mul(cols)
            .and_then(|base| base.checked_add(col))
            .is_some_and(|flat| self.contains_index(flat))
    }
}

/// Integer view of a JSON number, accepting integral floats such as `2.0`.
pub(crate) fn as_integer(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    let f = v.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/model/highlight.rs"]
mod tests;
