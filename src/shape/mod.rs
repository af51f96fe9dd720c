//! Snapshot classification.
//!
//! [`classify`] maps an untyped snapshot onto exactly one [`Shape`]. Predicates run in a fixed
//! precedence order and look at the first element only; elements of one snapshot are assumed to
//! share a structure. The Board test is the exception: it checks every cell value.

pub(crate) mod graph;
pub(crate) mod scalar;
pub(crate) mod table;
pub(crate) mod tree;

use std::fmt;

use serde_json::{Map, Value};

pub use graph::{Distance, GraphEdge, GraphNode, GraphSnapshot};
pub use table::TableSnapshot;
pub use tree::{MAX_TREE_DEPTH, TreeNode};

/// Bit width of every [`Shape::BitVector`] row.
pub const BIT_WIDTH: usize = 32;

/// Structural category of a snapshot, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    Sequence,
    Graph,
    Grid,
    Board,
    Tree,
    Trie,
    BitVector,
    Table,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Graph => "graph",
            Self::Grid => "grid",
            Self::Board => "board",
            Self::Tree => "tree",
            Self::Trie => "trie",
            Self::BitVector => "bitvector",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified snapshot: a closed tagged union over every supported structure.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Bar heights. Non-numeric entries decode to `NaN`.
    Sequence(Vec<f64>),
    Graph(GraphSnapshot),
    /// Rows of scalar cells; not necessarily rectangular.
    Grid(Vec<Vec<Value>>),
    /// Rows of marker cells.
    Board(Vec<Vec<u32>>),
    Tree(TreeNode),
    Trie(TreeNode),
    /// One entry per row; `None` for entries that are not valid 32-bit values.
    BitVector(Vec<Option<u32>>),
    Table(TableSnapshot),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sequence(_) => ShapeKind::Sequence,
            Self::Graph(_) => ShapeKind::Graph,
            Self::Grid(_) => ShapeKind::Grid,
            Self::Board(_) => ShapeKind::Board,
            Self::Tree(_) => ShapeKind::Tree,
            Self::Trie(_) => ShapeKind::Trie,
            Self::BitVector(_) => ShapeKind::BitVector,
            Self::Table(_) => ShapeKind::Table,
        }
    }
}

/// Classify a snapshot. Total: every input, including `null`, maps to one variant.
pub fn classify(snapshot: &Value) -> Shape {
    match snapshot {
        Value::Null => Shape::Sequence(Vec::new()),
        Value::Array(items) => classify_list(items),
        // A lone record is read as a one-element list so a bare tree root still classifies.
        Value::Object(_) => classify_list(std::slice::from_ref(snapshot)),
        Value::Number(_) => Shape::Sequence(vec![scalar::to_f64(snapshot)]),
        Value::Bool(_) | Value::String(_) => {
            Shape::Table(TableSnapshot::from_scalars(std::slice::from_ref(snapshot)))
        }
    }
}

fn classify_list(items: &[Value]) -> Shape {
    let Some(first) = items.first() else {
        return Shape::Sequence(Vec::new());
    };

    match first {
        Value::Object(record) => classify_records(record, items),
        Value::Array(row) => classify_rows(row, items),
        Value::Number(_) => Shape::Sequence(items.iter().map(scalar::to_f64).collect()),
        Value::String(s) if scalar::parse_bits(s).is_some() => {
            Shape::BitVector(items.iter().map(scalar::to_bits).collect())
        }
        Value::String(s) if scalar::parse_number(s).is_some() => {
            Shape::Sequence(items.iter().map(scalar::to_f64).collect())
        }
        Value::String(_) | Value::Bool(_) | Value::Null => {
            Shape::Table(TableSnapshot::from_scalars(items))
        }
    }
}

/// Graph > Tree > Trie > Table.
fn classify_records(root: &Map<String, Value>, items: &[Value]) -> Shape {
    if root.contains_key("id") {
        return Shape::Graph(GraphSnapshot::from_records(items));
    }
    let children = root.get("children");
    let binary = root.contains_key("left") || root.contains_key("right");
    if binary || children.is_some_and(Value::is_array) {
        return Shape::Tree(TreeNode::from_snapshot(items));
    }
    if children.is_some_and(Value::is_object) {
        return Shape::Trie(TreeNode::from_snapshot(items));
    }
    Shape::Table(TableSnapshot::from_records(items))
}

/// Board > Grid > Table.
fn classify_rows(first_row: &[Value], rows: &[Value]) -> Shape {
    let numeric = first_row.first().is_none_or(|cell| cell.is_number());
    if !numeric {
        return Shape::Table(TableSnapshot::from_rows(rows));
    }

    let grid: Vec<Vec<Value>> = rows
        .iter()
        .map(|row| row.as_array().cloned().unwrap_or_default())
        .collect();

    if let Some(board) = as_board(&grid) {
        return Shape::Board(board);
    }
    Shape::Grid(grid)
}

/// A board is a non-empty grid of single-digit markers: either all `0`/`1`, or digits up to
/// `9` with at least one empty (`0`) cell, as in a partially filled Sudoku.
fn as_board(grid: &[Vec<Value>]) -> Option<Vec<Vec<u32>>> {
    if grid.iter().all(Vec::is_empty) {
        return None;
    }
    let board = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell.as_u64() {
                    Some(v @ 0..=9) => Some(v as u32),
                    _ => None,
                })
                .collect::<Option<Vec<u32>>>()
        })
        .collect::<Option<Vec<Vec<u32>>>>()?;

    let cells = || board.iter().flatten();
    let markers = cells().all(|v| *v <= 1);
    let has_empty = cells().any(|v| *v == 0);
    (markers || has_empty).then_some(board)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/classify.rs"]
mod tests;
