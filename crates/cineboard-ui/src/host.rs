//! Host-tree seam: the node insertion/removal primitive the presenters
//! consume, plus an in-memory implementation for tests and the CLI.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;

pub type NodeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Append as the last child of the host node.
    BeforeEnd,
    /// Insert as the host node's next sibling.
    AfterEnd,
}

/// What the presenters need from their environment. All operations are
/// synchronous; `remove` and `replace` are no-ops when the target node is
/// absent or detached.
pub trait HostTree {
    fn create(&mut self, markup: &str) -> NodeId;
    fn render(&mut self, host: NodeId, child: NodeId, position: Position);
    /// Swap `old` for `new` in place, keeping the slot among its siblings.
    fn replace(&mut self, old: NodeId, new: NodeId);
    fn remove(&mut self, node: NodeId);
}

/// Shared handle presenters hold on the host tree.
pub type SharedTree = Rc<RefCell<dyn HostTree>>;

struct NodeData {
    markup: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory host tree. Nodes live in an arena keyed by id; detached nodes
/// (created but never rendered) are legal and serve as containers.
#[derive(Default)]
pub struct MemTree {
    next: NodeId,
    nodes: HashMap<NodeId, NodeData>,
}

impl MemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn markup(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.markup.as_str())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Indented markup of a whole subtree, one line per markup line.
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(root, 0, &mut out);
        out
    }

    fn dump_into(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(data) = self.nodes.get(&node) else { return };
        for line in data.markup.lines() {
            let _ = writeln!(out, "{:indent$}{line}", "", indent = depth * 2);
        }
        for child in &data.children {
            self.dump_into(*child, depth + 1, out);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(data) = self.nodes.get_mut(&parent) {
                data.children.retain(|c| *c != node);
            }
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = None;
        }
    }

    fn delete_subtree(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.remove(&node) {
            for child in data.children {
                self.delete_subtree(child);
            }
        }
    }
}

impl HostTree for MemTree {
    fn create(&mut self, markup: &str) -> NodeId {
        self.next += 1;
        let id = self.next;
        self.nodes.insert(
            id,
            NodeData { markup: markup.to_string(), parent: None, children: Vec::new() },
        );
        id
    }

    fn render(&mut self, host: NodeId, child: NodeId, position: Position) {
        if !self.nodes.contains_key(&child) || !self.nodes.contains_key(&host) {
            return;
        }
        // Re-rendering an attached node moves it instead of duplicating it.
        self.detach(child);
        match position {
            Position::BeforeEnd => {
                if let Some(data) = self.nodes.get_mut(&host) {
                    data.children.push(child);
                }
                if let Some(data) = self.nodes.get_mut(&child) {
                    data.parent = Some(host);
                }
            }
            Position::AfterEnd => {
                let Some(parent) = self.nodes.get(&host).and_then(|n| n.parent) else { return };
                let Some(data) = self.nodes.get_mut(&parent) else { return };
                let at = data
                    .children
                    .iter()
                    .position(|c| *c == host)
                    .map(|i| i + 1)
                    .unwrap_or(data.children.len());
                data.children.insert(at, child);
                if let Some(data) = self.nodes.get_mut(&child) {
                    data.parent = Some(parent);
                }
            }
        }
    }

    fn replace(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.nodes.get(&old).and_then(|n| n.parent) else {
            self.delete_subtree(old);
            return;
        };
        self.detach(new);
        let Some(data) = self.nodes.get_mut(&parent) else { return };
        let Some(at) = data.children.iter().position(|c| *c == old) else { return };
        data.children[at] = new;
        if let Some(data) = self.nodes.get_mut(&new) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.nodes.get_mut(&old) {
            data.parent = None;
        }
        self.delete_subtree(old);
    }

    fn remove(&mut self, node: NodeId) {
        if !self.nodes.contains_key(&node) {
            return;
        }
        self.detach(node);
        self.delete_subtree(node);
    }
}
