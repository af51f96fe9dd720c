use serde_json::Value;

/// Generic record table: one column per key, one row per record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableSnapshot {
    pub columns: Vec<String>,
    /// Cells aligned with `columns`; missing keys are `null`.
    pub rows: Vec<Vec<Value>>,
}

impl TableSnapshot {
    /// Columns are the union of record keys in first-seen order. Non-record items become rows of
    /// a single `value` column.
    pub(crate) fn from_records(items: &[Value]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for item in items {
            let Some(record) = item.as_object() else {
                continue;
            };
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        if columns.is_empty() {
            return Self::from_scalars(items);
        }

        let rows = items
            .iter()
            .map(|item| match item.as_object() {
                Some(record) => columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect(),
                None => {
                    let mut row = vec![Value::Null; columns.len()];
                    row[0] = item.clone();
                    row
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub(crate) fn from_scalars(items: &[Value]) -> Self {
        Self {
            columns: vec!["value".to_owned()],
            rows: items.iter().map(|v| vec![v.clone()]).collect(),
        }
    }

    /// Positional columns `0..n` for lists of lists; short rows are padded with `null`.
    pub(crate) fn from_rows(items: &[Value]) -> Self {
        let width = items
            .iter()
            .map(|row| row.as_array().map_or(1, Vec::len))
            .max()
            .unwrap_or(0);
        let rows = items
            .iter()
            .map(|row| {
                let mut cells = match row {
                    Value::Array(cells) => cells.clone(),
                    other => vec![other.clone()],
                };
                cells.resize(width, Value::Null);
                cells
            })
            .collect();
        Self {
            columns: (0..width).map(|i| i.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/table.rs"]
mod tests;
