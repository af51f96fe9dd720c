use serde_json::{Map, Value};

use crate::model::highlight::as_integer;
use crate::shape::scalar;

const LABEL_FIELDS: [&str; 7] = ["value", "val", "key", "label", "name", "data", "char"];
const TERMINAL_FIELDS: [&str; 5] = ["isEnd", "is_end", "end", "isWord", "terminal"];

/// Deepest level normalization expands; nodes below it are cut and flagged `truncated`.
pub const MAX_TREE_DEPTH: usize = 256;

/// Canonical recursive tree node shared by the Tree and Trie shapes.
///
/// `left`/`right` fields, a `children` list and a keyed `children` map all normalize into this
/// one structure; only Trie nodes carry an `edge_label`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeNode {
    pub label: String,
    /// Raw value the label came from, matched against id highlights.
    pub key: Option<Value>,
    /// Position in the snapshot list when the node was resolved from it.
    pub index: Option<usize>,
    /// Map key on the edge from the parent (Trie only).
    pub edge_label: Option<String>,
    /// Marks a node that ends a word (Trie only).
    pub terminal: bool,
    /// Children were dropped at [`MAX_TREE_DEPTH`].
    pub truncated: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Normalize a snapshot whose first element is the root.
    ///
    /// Children may be nested records, or integer positions into `items` when the snapshot is a
    /// flat node list. Each position is resolved at most once across the whole tree: the first
    /// node to expand it claims it, and later references (shared subtrees, cycles, the root)
    /// are dropped. Expansion uses an explicit work stack, so long chains do not recurse.
    pub(crate) fn from_snapshot(items: &[Value]) -> Self {
        let Some(root) = items.first() else {
            return Self::default();
        };
        let mut builder = Builder {
            items,
            claimed: vec![false; items.len()],
            arena: Vec::new(),
            parents: Vec::new(),
            pending: Vec::new(),
        };
        builder.claimed[0] = true;
        let mut head = header(root);
        // A lone nested root has no list to be positioned in.
        head.index = (items.len() > 1).then_some(0);
        let id = builder.alloc(head, None);
        builder.pending.push((id, root, 1));
        builder.expand();
        builder.assemble()
    }

    /// Number of nodes in this subtree.
    pub fn len(&self) -> usize {
        let mut stack = vec![self];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        let mut stack = vec![(self, 1usize)];
        let mut deepest = 0;
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// Whether any node in this subtree lost children to the depth cap.
    pub fn is_truncated(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.truncated {
                return true;
            }
            stack.extend(&node.children);
        }
        false
    }
}

/// Flat arena filled in preorder-by-parent; children always get larger ids than their parent.
struct Builder<'a> {
    items: &'a [Value],
    claimed: Vec<bool>,
    arena: Vec<Option<TreeNode>>,
    parents: Vec<Option<usize>>,
    /// `(arena id, source value, depth)` still to expand.
    pending: Vec<(usize, &'a Value, usize)>,
}

impl<'a> Builder<'a> {
    fn alloc(&mut self, node: TreeNode, parent: Option<usize>) -> usize {
        self.arena.push(Some(node));
        self.parents.push(parent);
        self.arena.len() - 1
    }

    fn expand(&mut self) {
        while let Some((id, source, depth)) = self.pending.pop() {
            let Some(record) = source.as_object() else {
                continue;
            };
            let refs = child_refs(record);
            if refs.is_empty() {
                continue;
            }
            if depth >= MAX_TREE_DEPTH {
                if let Some(Some(node)) = self.arena.get_mut(id) {
                    node.truncated = true;
                }
                continue;
            }

            let mut spawned = Vec::with_capacity(refs.len());
            for (edge, child) in refs {
                let Some((mut node, child_source)) = self.resolve(child) else {
                    continue;
                };
                node.edge_label = edge;
                let child_id = self.alloc(node, Some(id));
                if child_source.is_object() {
                    spawned.push((child_id, child_source, depth + 1));
                }
            }
            // Reversed so the first child is expanded first.
            self.pending.extend(spawned.into_iter().rev());
        }
    }

    fn resolve(&mut self, v: &'a Value) -> Option<(TreeNode, &'a Value)> {
        match v {
            Value::Null => None,
            Value::Number(_) if self.items.len() > 1 => {
                let pos = as_integer(v)
                    .and_then(|i| usize::try_from(i).ok())
                    .filter(|p| *p < self.items.len())?;
                if std::mem::replace(&mut self.claimed[pos], true) {
                    return None;
                }
                let items = self.items;
                let source = &items[pos];
                let mut node = header(source);
                node.index = Some(pos);
                Some((node, source))
            }
            other => Some((header(other), other)),
        }
    }

    /// Move every node into its parent, deepest ids first.
    fn assemble(mut self) -> TreeNode {
        for id in (1..self.arena.len()).rev() {
            let Some(mut node) = self.arena[id].take() else {
                continue;
            };
            // Siblings arrive last-first.
            node.children.reverse();
            if let Some(parent) = self.parents[id].and_then(|p| self.arena[p].as_mut()) {
                parent.children.push(node);
            }
        }
        let mut root = self
            .arena
            .first_mut()
            .and_then(Option::take)
            .unwrap_or_default();
        root.children.reverse();
        root
    }
}

/// Child slots of a record in drawing order: `left`, `right`, then `children`.
fn child_refs(record: &Map<String, Value>) -> Vec<(Option<String>, &Value)> {
    let mut refs: Vec<(Option<String>, &Value)> = ["left", "right"]
        .iter()
        .filter_map(|side| record.get(*side))
        .map(|v| (None, v))
        .collect();
    match record.get("children") {
        Some(Value::Array(list)) => refs.extend(list.iter().map(|v| (None, v))),
        Some(Value::Object(map)) => refs.extend(map.iter().map(|(k, v)| (Some(k.clone()), v))),
        _ => {}
    }
    refs.retain(|(_, v)| !v.is_null());
    refs
}

/// Node without children: label, key and terminal flag only.
fn header(v: &Value) -> TreeNode {
    let Some(record) = v.as_object() else {
        return leaf(v);
    };
    let key = LABEL_FIELDS.iter().find_map(|f| record.get(*f)).cloned();
    TreeNode {
        label: key.as_ref().map(scalar::display).unwrap_or_default(),
        key,
        terminal: TERMINAL_FIELDS
            .iter()
            .any(|f| record.get(*f).and_then(Value::as_bool).unwrap_or(false)),
        ..TreeNode::default()
    }
}

fn leaf(v: &Value) -> TreeNode {
    TreeNode {
        label: scalar::display(v),
        key: Some(v.clone()),
        ..TreeNode::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/tree.rs"]
mod tests;
