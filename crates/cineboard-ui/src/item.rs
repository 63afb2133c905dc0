//! Item presenter: lifecycle of one rendered catalog item, switching
//! between the compact card and the edit overlay.

use std::cell::RefCell;
use std::rc::Rc;

use cineboard_core::{Annotation, AnnotationId, Item};

use crate::host::{NodeId, Position, SharedTree};
use crate::mode::{ModeCoordinator, PresenterKey};
use crate::views;

/// User edits routed up from a presenter. The presenter never touches the
/// stores; the handler injected at construction decides which stores to
/// mutate and which notification kind to request.
#[derive(Debug, Clone)]
pub enum ViewAction {
    UpdateItem(Item),
    AddAnnotation { item: Item, annotation: Annotation },
    DeleteAnnotation { item: Item, annotation_id: AnnotationId },
}

pub type ActionHandler = Rc<dyn Fn(ViewAction)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Edit,
}

pub struct ItemPresenter {
    tree: SharedTree,
    card_host: NodeId,
    overlay_host: NodeId,
    handler: ActionHandler,
    coordinator: Rc<ModeCoordinator>,
    key: PresenterKey,
    item: Item,
    annotations: Vec<Annotation>,
    mode: Mode,
    card_node: Option<NodeId>,
    overlay_node: Option<NodeId>,
}

impl ItemPresenter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tree: SharedTree,
        card_host: NodeId,
        overlay_host: NodeId,
        handler: ActionHandler,
        coordinator: Rc<ModeCoordinator>,
        item: Item,
        annotations: Vec<Annotation>,
    ) -> Self {
        let key = coordinator.issue_key();
        Self {
            tree,
            card_host,
            overlay_host,
            handler,
            coordinator,
            key,
            item,
            annotations,
            mode: Mode::View,
            card_node: None,
            overlay_node: None,
        }
    }

    /// Render (or re-render) with fresh data, staying in the current mode.
    /// This is the patch-reconciliation entry point: an open overlay keeps
    /// showing, with updated content.
    pub fn init(&mut self, item: Item, annotations: Vec<Annotation>) {
        self.item = item;
        self.annotations = annotations;
        self.render_card();
        if self.mode == Mode::Edit {
            self.render_overlay();
        }
    }

    fn render_card(&mut self) {
        let markup = views::card(&self.item, self.annotations.len());
        let mut tree = self.tree.borrow_mut();
        let node = tree.create(&markup);
        match self.card_node.take() {
            Some(old) => tree.replace(old, node),
            None => tree.render(self.card_host, node, Position::BeforeEnd),
        }
        self.card_node = Some(node);
    }

    fn render_overlay(&mut self) {
        let markup = views::overlay(&self.item, &self.annotations);
        let mut tree = self.tree.borrow_mut();
        let node = tree.create(&markup);
        match self.overlay_node.take() {
            Some(old) => tree.replace(old, node),
            None => tree.render(self.overlay_host, node, Position::BeforeEnd),
        }
        self.overlay_node = Some(node);
    }

    /// View -> Edit. Goes through the shared handle so the coordinator can
    /// close whichever presenter currently holds the overlay.
    pub fn open(this: &Rc<RefCell<Self>>) {
        {
            let presenter = this.borrow();
            if presenter.mode == Mode::Edit {
                return;
            }
            presenter.coordinator.request(presenter.key, Rc::downgrade(this));
        }
        let mut presenter = this.borrow_mut();
        presenter.mode = Mode::Edit;
        presenter.render_overlay();
    }

    /// Edit -> View on an explicit close action.
    pub fn close(&mut self) {
        if self.mode != Mode::Edit {
            return;
        }
        self.drop_overlay();
        self.coordinator.release(self.key);
    }

    /// Edit -> View driven by the coordinator (another presenter opened).
    /// The coordinator already moved the active slot, so no release here.
    pub fn reset_view(&mut self) {
        if self.mode != Mode::Edit {
            return;
        }
        self.drop_overlay();
    }

    fn drop_overlay(&mut self) {
        self.mode = Mode::View;
        if let Some(node) = self.overlay_node.take() {
            self.tree.borrow_mut().remove(node);
        }
    }

    /// Remove every node this presenter owns and release the overlay slot.
    pub fn destroy(&mut self) {
        if self.mode == Mode::Edit {
            self.coordinator.release(self.key);
        }
        self.drop_overlay();
        if let Some(node) = self.card_node.take() {
            self.tree.borrow_mut().remove(node);
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn key(&self) -> PresenterKey {
        self.key
    }

    pub fn card_node(&self) -> Option<NodeId> {
        self.card_node
    }

    pub fn overlay_node(&self) -> Option<NodeId> {
        self.overlay_node
    }

    pub fn handler(&self) -> ActionHandler {
        Rc::clone(&self.handler)
    }

    // Gestures build actions; callers dispatch them through `handler()`
    // after every presenter borrow is released, since the store mutation
    // notifies back into the registries synchronously.

    pub fn toggle_watchlist(&self) -> ViewAction {
        let mut item = self.item.clone();
        item.in_watchlist = !item.in_watchlist;
        ViewAction::UpdateItem(item)
    }

    pub fn toggle_watched(&self) -> ViewAction {
        let mut item = self.item.clone();
        item.is_watched = !item.is_watched;
        ViewAction::UpdateItem(item)
    }

    pub fn toggle_favorite(&self) -> ViewAction {
        let mut item = self.item.clone();
        item.is_favorite = !item.is_favorite;
        ViewAction::UpdateItem(item)
    }

    /// Overlay form submit: apply all three flags and leave edit mode.
    pub fn submit_flags(
        &mut self,
        in_watchlist: bool,
        is_watched: bool,
        is_favorite: bool,
    ) -> ViewAction {
        self.close();
        let mut item = self.item.clone();
        item.in_watchlist = in_watchlist;
        item.is_watched = is_watched;
        item.is_favorite = is_favorite;
        ViewAction::UpdateItem(item)
    }

    pub fn add_annotation(&self, annotation: Annotation) -> ViewAction {
        let mut item = self.item.clone();
        item.annotations.push(annotation.id.clone());
        ViewAction::AddAnnotation { item, annotation }
    }

    /// `None` when the id is not attached to this item (silent no-op).
    pub fn delete_annotation(&self, annotation_id: &AnnotationId) -> Option<ViewAction> {
        let mut item = self.item.clone();
        let before = item.annotations.len();
        item.annotations.retain(|id| id != annotation_id);
        if item.annotations.len() == before {
            return None;
        }
        Some(ViewAction::DeleteAnnotation { item, annotation_id: annotation_id.clone() })
    }
}
