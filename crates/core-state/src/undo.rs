//! Undo/redo history tree.
//!
//! Every document mutation is recorded as a node appended under the current
//! head. Undo walks to the parent and remembers (in the parent's single redo
//! slot) which child it came from; redo follows that slot back down. Nodes are
//! never removed for the lifetime of a session, so abandoned branches stay in
//! the arena but are unreachable through redo once a newer edit claims the
//! slot.

use tracing::trace;

/// Kind of recorded document mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
}

/// One recorded mutation: `text` was inserted at, or deleted from, `start`
/// (char offset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub kind: EditKind,
    pub text: String,
    pub start: usize,
}

impl EditOp {
    /// Length of the recorded text in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Index of a node inside the history arena. The root sentinel is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug)]
struct Node {
    /// `None` only for the root sentinel.
    op: Option<EditOp>,
    parent: Option<NodeId>,
    redo_child: Option<NodeId>,
}

#[derive(Debug)]
pub struct UndoTree {
    nodes: Vec<Node>,
    head: NodeId,
}

impl Default for UndoTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                op: None,
                parent: None,
                redo_child: None,
            }],
            head: NodeId::ROOT,
        }
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Total nodes recorded this session, root sentinel included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn can_undo(&self) -> bool {
        self.head != NodeId::ROOT
    }

    pub fn can_redo(&self) -> bool {
        self.nodes[self.head.0].redo_child.is_some()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Append a new leaf under the head and advance the head to it.
    ///
    /// The head's redo slot is pointed at the new node so an immediate redo
    /// after a later undo replays this branch, never an abandoned sibling.
    pub fn record(&mut self, kind: EditKind, text: impl Into<String>, start: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.head;
        self.nodes.push(Node {
            op: Some(EditOp {
                kind,
                text: text.into(),
                start,
            }),
            parent: Some(parent),
            redo_child: None,
        });
        self.nodes[parent.0].redo_child = Some(id);
        self.head = id;
        trace!(target: "state.undo", node = id.0, parent = parent.0, ?kind, start, nodes = self.nodes.len(), "record");
        id
    }

    /// Step the head back to its parent and return the operation to reverse.
    pub fn undo(&mut self) -> Option<EditOp> {
        let current = self.head;
        let node = &self.nodes[current.0];
        let (Some(op), Some(parent)) = (node.op.clone(), node.parent) else {
            return None;
        };
        self.nodes[parent.0].redo_child = Some(current);
        self.head = parent;
        trace!(target: "state.undo", from = current.0, to = parent.0, "undo");
        Some(op)
    }

    /// Follow the head's redo slot and return the operation to replay.
    pub fn redo(&mut self) -> Option<EditOp> {
        let next = self.nodes[self.head.0].redo_child?;
        let op = self.nodes[next.0].op.clone()?;
        trace!(target: "state.undo", from = self.head.0, to = next.0, "redo");
        self.head = next;
        Some(op)
    }
}
