//! List presenter: orchestrates the catalog screen across the main
//! (paginated) zone and the two ranked extra zones, reconciling item
//! presenters against store notifications.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use cineboard_core::{
    most_annotated, project, resolve_annotations, top_rated, Annotation, AnnotationStore,
    ChangeKind, FilterKind, FilterStore, Item, ItemId, ItemStore, Notice, SortKind,
};

use crate::host::{NodeId, Position, SharedTree};
use crate::item::{ActionHandler, ItemPresenter, ViewAction};
use crate::mode::ModeCoordinator;
use crate::views;

/// Cards revealed per "show more" step.
pub const PAGE_SIZE: usize = 5;
/// Cards in each ranked extra zone.
pub const EXTRA_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Main,
    Best,
    MostCommented,
}

type Registry = BTreeMap<ItemId, Rc<RefCell<ItemPresenter>>>;

pub struct ListPresenter {
    tree: SharedTree,
    container: NodeId,
    overlay_host: NodeId,
    items: Rc<ItemStore>,
    annotations: Rc<AnnotationStore>,
    filter: Rc<FilterStore>,
    handler: ActionHandler,
    coordinator: Rc<ModeCoordinator>,
    page_size: usize,
    extra_count: usize,
    /// Number of cards currently revealed in the main zone.
    cursor: usize,
    sort: SortKind,
    main: Registry,
    best: Registry,
    most_commented: Registry,
    sort_node: Option<NodeId>,
    board_node: Option<NodeId>,
    main_list_node: Option<NodeId>,
    best_list_node: Option<NodeId>,
    commented_list_node: Option<NodeId>,
    show_more_node: Option<NodeId>,
    empty_node: Option<NodeId>,
    /// False after a Disabled teardown; notices are ignored until `init`.
    active: bool,
}

impl ListPresenter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tree: SharedTree,
        container: NodeId,
        overlay_host: NodeId,
        items: Rc<ItemStore>,
        annotations: Rc<AnnotationStore>,
        filter: Rc<FilterStore>,
        page_size: usize,
        extra_count: usize,
    ) -> Rc<RefCell<Self>> {
        let handler = Self::action_handler(&items, &annotations, &filter);
        let this = Rc::new(RefCell::new(Self {
            tree,
            container,
            overlay_host,
            items: Rc::clone(&items),
            annotations: Rc::clone(&annotations),
            filter: Rc::clone(&filter),
            handler,
            coordinator: Rc::new(ModeCoordinator::new()),
            page_size,
            extra_count,
            cursor: page_size,
            sort: SortKind::Default,
            main: Registry::new(),
            best: Registry::new(),
            most_commented: Registry::new(),
            sort_node: None,
            board_node: None,
            main_list_node: None,
            best_list_node: None,
            commented_list_node: None,
            show_more_node: None,
            empty_node: None,
            active: false,
        }));

        let weak = Rc::downgrade(&this);
        items.subscribe(Box::new(move |notice: &Notice| {
            if let Some(list) = weak.upgrade() {
                list.borrow_mut().on_notice(notice);
            }
        }));
        let weak = Rc::downgrade(&this);
        annotations.subscribe(Box::new(move |notice: &Notice| {
            if let Some(list) = weak.upgrade() {
                list.borrow_mut().on_notice(notice);
            }
        }));
        let weak = Rc::downgrade(&this);
        filter.subscribe(Box::new(move |notice: &Notice| {
            if let Some(list) = weak.upgrade() {
                list.borrow_mut().on_notice(notice);
            }
        }));

        this
    }

    /// Store routing for user edits; this is the handler handed to every
    /// item presenter. Flag edits request Minor when a narrowing filter is
    /// active, since the edit can move the item out of the projection;
    /// annotation edits are always item-scoped patches.
    fn action_handler(
        items: &Rc<ItemStore>,
        annotations: &Rc<AnnotationStore>,
        filter: &Rc<FilterStore>,
    ) -> ActionHandler {
        let items = Rc::clone(items);
        let annotations = Rc::clone(annotations);
        let filter = Rc::clone(filter);
        Rc::new(move |action: ViewAction| {
            tracing::debug!(action = ?action, "view action");
            match action {
                ViewAction::UpdateItem(item) => {
                    let kind = if filter.active() == FilterKind::All {
                        ChangeKind::Patch
                    } else {
                        ChangeKind::Minor
                    };
                    items.patch(kind, item);
                }
                ViewAction::AddAnnotation { item, annotation } => {
                    annotations.add(ChangeKind::Patch, annotation);
                    items.patch(ChangeKind::Patch, item);
                }
                ViewAction::DeleteAnnotation { item, annotation_id } => {
                    annotations.remove(ChangeKind::Patch, &annotation_id);
                    items.patch(ChangeKind::Patch, item);
                }
            }
        })
    }

    fn projection(&self) -> Vec<Item> {
        project(&self.items.items(), self.filter.active(), self.sort)
    }

    /// First render, and re-render after a Disabled teardown. Any previous
    /// render is cleared first, so repeated calls cannot duplicate nodes.
    pub fn init(&mut self) {
        self.active = true;
        self.clear_board(true, false);
        self.rebuild();
    }

    pub fn on_notice(&mut self, notice: &Notice) {
        if !self.active {
            return;
        }
        tracing::debug!(kind = ?notice.kind, "model notice");
        match notice.kind {
            ChangeKind::Patch => {
                let Some(item) = &notice.item else { return };
                let resolved = resolve_annotations(&self.annotations.annotations(), item);
                for registry in [&self.main, &self.best, &self.most_commented] {
                    if let Some(presenter) = registry.get(&item.id) {
                        presenter.borrow_mut().init(item.clone(), resolved.clone());
                    }
                }
            }
            ChangeKind::Minor => {
                self.clear_board(true, false);
                self.rebuild();
            }
            ChangeKind::Major => {
                self.clear_board(true, true);
                self.rebuild();
            }
            ChangeKind::Disabled => {
                self.clear_board(true, true);
                self.active = false;
            }
        }
    }

    /// Reveal the next page of the main zone, clamped to the projection.
    /// The control disappears once everything is visible.
    pub fn on_show_more(&mut self) {
        let Some(host) = self.main_list_node else { return };
        let projection = self.projection();
        let annotations = self.annotations.annotations();
        self.cursor = self.cursor.min(projection.len());
        let new_cursor = projection.len().min(self.cursor + self.page_size);
        let fresh = &projection[self.cursor..new_cursor];
        for item in fresh {
            self.render_card(Zone::Main, host, item, &annotations);
        }
        self.cursor = new_cursor;
        if self.cursor >= projection.len() {
            if let Some(node) = self.show_more_node.take() {
                self.tree.borrow_mut().remove(node);
            }
        }
    }

    /// Re-sorting rebuilds the main zone only; the extra zones are
    /// sort-insensitive and keep their nodes.
    pub fn on_sort_change(&mut self, sort: SortKind) {
        if self.sort == sort {
            return;
        }
        self.sort = sort;
        self.clear_main_zone();
        self.render_sort();
        self.render_main_zone();
    }

    fn rebuild(&mut self) {
        self.render_sort();
        if self.projection().is_empty() {
            self.render_empty();
            return;
        }
        self.render_board();
    }

    fn render_sort(&mut self) {
        let markup = views::sort_bar(self.sort);
        let mut tree = self.tree.borrow_mut();
        let node = tree.create(&markup);
        match self.sort_node.take() {
            Some(old) => tree.replace(old, node),
            None => tree.render(self.container, node, Position::BeforeEnd),
        }
        self.sort_node = Some(node);
    }

    fn render_empty(&mut self) {
        let mut tree = self.tree.borrow_mut();
        let node = tree.create(&views::empty());
        tree.render(self.container, node, Position::BeforeEnd);
        self.empty_node = Some(node);
    }

    fn render_board(&mut self) {
        {
            let mut tree = self.tree.borrow_mut();
            let board = tree.create(&views::board());
            tree.render(self.container, board, Position::BeforeEnd);
            let main = tree.create(&views::main_list());
            tree.render(board, main, Position::BeforeEnd);
            let best = tree.create(&views::best_list());
            tree.render(board, best, Position::BeforeEnd);
            let commented = tree.create(&views::commented_list());
            tree.render(board, commented, Position::BeforeEnd);
            self.board_node = Some(board);
            self.main_list_node = Some(main);
            self.best_list_node = Some(best);
            self.commented_list_node = Some(commented);
        }
        self.render_main_zone();
        self.render_best_zone();
        self.render_commented_zone();
    }

    fn render_main_zone(&mut self) {
        let Some(host) = self.main_list_node else { return };
        let projection = self.projection();
        let annotations = self.annotations.annotations();
        self.cursor = self.cursor.min(projection.len());
        let visible = &projection[..self.cursor];
        for item in visible {
            self.render_card(Zone::Main, host, item, &annotations);
        }
        if self.cursor < projection.len() {
            self.render_show_more(host);
        }
    }

    fn render_best_zone(&mut self) {
        let Some(host) = self.best_list_node else { return };
        // Ranked from the full collection: the extra zones ignore the filter.
        let ranked = top_rated(&self.items.items(), self.extra_count);
        let annotations = self.annotations.annotations();
        for item in &ranked {
            self.render_card(Zone::Best, host, item, &annotations);
        }
    }

    fn render_commented_zone(&mut self) {
        let Some(host) = self.commented_list_node else { return };
        let ranked = most_annotated(&self.items.items(), self.extra_count);
        let annotations = self.annotations.annotations();
        for item in &ranked {
            self.render_card(Zone::MostCommented, host, item, &annotations);
        }
    }

    fn render_card(&mut self, zone: Zone, host: NodeId, item: &Item, annotations: &[Annotation]) {
        let resolved = resolve_annotations(annotations, item);
        let presenter = Rc::new(RefCell::new(ItemPresenter::new(
            Rc::clone(&self.tree),
            host,
            self.overlay_host,
            Rc::clone(&self.handler),
            Rc::clone(&self.coordinator),
            item.clone(),
            resolved.clone(),
        )));
        presenter.borrow_mut().init(item.clone(), resolved);
        self.registry_mut(zone).insert(item.id.clone(), presenter);
    }

    fn render_show_more(&mut self, main_list: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let node = tree.create(&views::show_more());
        tree.render(main_list, node, Position::AfterEnd);
        self.show_more_node = Some(node);
    }

    fn clear_main_zone(&mut self) {
        for presenter in self.main.values() {
            presenter.borrow_mut().destroy();
        }
        self.main.clear();
        self.cursor = self.page_size;
        if let Some(node) = self.show_more_node.take() {
            self.tree.borrow_mut().remove(node);
        }
    }

    fn clear_board(&mut self, reset_cursor: bool, reset_sort: bool) {
        for presenter in
            self.main.values().chain(self.best.values()).chain(self.most_commented.values())
        {
            presenter.borrow_mut().destroy();
        }
        self.main.clear();
        self.best.clear();
        self.most_commented.clear();

        {
            let mut tree = self.tree.borrow_mut();
            for node in [
                self.sort_node.take(),
                self.empty_node.take(),
                self.show_more_node.take(),
                self.board_node.take(),
            ]
            .into_iter()
            .flatten()
            {
                tree.remove(node);
            }
        }
        self.main_list_node = None;
        self.best_list_node = None;
        self.commented_list_node = None;

        if reset_cursor {
            self.cursor = self.page_size;
        }
        if reset_sort {
            self.sort = SortKind::Default;
        }
    }

    fn registry_mut(&mut self, zone: Zone) -> &mut Registry {
        match zone {
            Zone::Main => &mut self.main,
            Zone::Best => &mut self.best,
            Zone::MostCommented => &mut self.most_commented,
        }
    }

    fn registry(&self, zone: Zone) -> &Registry {
        match zone {
            Zone::Main => &self.main,
            Zone::Best => &self.best,
            Zone::MostCommented => &self.most_commented,
        }
    }

    /// Presenter lookup for host-driven gestures, main zone first.
    pub fn find(&self, id: &ItemId) -> Option<Rc<RefCell<ItemPresenter>>> {
        self.main
            .get(id)
            .or_else(|| self.best.get(id))
            .or_else(|| self.most_commented.get(id))
            .cloned()
    }

    pub fn find_in(&self, zone: Zone, id: &ItemId) -> Option<Rc<RefCell<ItemPresenter>>> {
        self.registry(zone).get(id).cloned()
    }

    pub fn registry_ids(&self, zone: Zone) -> Vec<ItemId> {
        self.registry(zone).keys().cloned().collect()
    }

    pub fn zone_host(&self, zone: Zone) -> Option<NodeId> {
        match zone {
            Zone::Main => self.main_list_node,
            Zone::Best => self.best_list_node,
            Zone::MostCommented => self.commented_list_node,
        }
    }

    pub fn coordinator(&self) -> Rc<ModeCoordinator> {
        Rc::clone(&self.coordinator)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sort(&self) -> SortKind {
        self.sort
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn sort_node(&self) -> Option<NodeId> {
        self.sort_node
    }

    pub fn show_more_node(&self) -> Option<NodeId> {
        self.show_more_node
    }

    pub fn empty_node(&self) -> Option<NodeId> {
        self.empty_node
    }
}
