//! Statistics panel presenter.

use cineboard_core::Item;

use crate::host::{NodeId, Position, SharedTree};
use crate::views;

/// Renders the statistics panel over a snapshot of the full collection.
/// The snapshot is taken at activation and is not refreshed by store
/// notices; re-activating recomputes it.
pub struct StatsPresenter {
    tree: SharedTree,
    container: NodeId,
    node: Option<NodeId>,
}

impl StatsPresenter {
    pub fn new(tree: SharedTree, container: NodeId) -> Self {
        Self { tree, container, node: None }
    }

    pub fn init(&mut self, items: Vec<Item>) {
        let markup = views::stats(&items);
        let mut tree = self.tree.borrow_mut();
        let node = tree.create(&markup);
        match self.node.take() {
            Some(old) => tree.replace(old, node),
            None => tree.render(self.container, node, Position::BeforeEnd),
        }
        self.node = Some(node);
    }

    pub fn destroy(&mut self) {
        if let Some(node) = self.node.take() {
            self.tree.borrow_mut().remove(node);
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}
