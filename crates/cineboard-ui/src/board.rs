//! Composition root: owns the stores and both screen presenters, and
//! exposes the surface a host wires its input events to.

use std::cell::RefCell;
use std::rc::Rc;

use cineboard_core::{
    Annotation, AnnotationId, AnnotationStore, ChangeBus, ChangeKind, FilterKind, FilterStore,
    Item, ItemId, ItemStore, SortKind,
};

use crate::host::{NodeId, SharedTree};
use crate::item::{ItemPresenter, ViewAction};
use crate::list::{ListPresenter, Zone, EXTRA_COUNT, PAGE_SIZE};
use crate::stats::StatsPresenter;

/// Wires the three stores to the list and statistics presenters. Every
/// mutation entry point here sequences presenter borrows against the
/// synchronous notification cycle: the store dispatch runs only after the
/// gesture's presenter borrow is released, so reconciliation never
/// re-enters a held borrow.
pub struct Board {
    items: Rc<ItemStore>,
    annotations: Rc<AnnotationStore>,
    filter: Rc<FilterStore>,
    list: Rc<RefCell<ListPresenter>>,
    stats: RefCell<StatsPresenter>,
}

impl Board {
    pub fn new(
        tree: SharedTree,
        container: NodeId,
        overlay_host: NodeId,
        items: Vec<Item>,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self::new_with(tree, container, overlay_host, items, annotations, PAGE_SIZE, EXTRA_COUNT)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_with(
        tree: SharedTree,
        container: NodeId,
        overlay_host: NodeId,
        items: Vec<Item>,
        annotations: Vec<Annotation>,
        page_size: usize,
        extra_count: usize,
    ) -> Self {
        let item_store = Rc::new(ItemStore::new(ChangeBus::new()));
        let annotation_store = Rc::new(AnnotationStore::new(ChangeBus::new()));
        let filter_store = Rc::new(FilterStore::new(ChangeBus::new()));
        // Bootstrap happens before any presenter subscribes.
        item_store.replace_all(items);
        annotation_store.replace_all(annotations);

        let list = ListPresenter::new(
            Rc::clone(&tree),
            container,
            overlay_host,
            Rc::clone(&item_store),
            Rc::clone(&annotation_store),
            Rc::clone(&filter_store),
            page_size,
            extra_count,
        );
        let stats = RefCell::new(StatsPresenter::new(tree, container));

        Self {
            items: item_store,
            annotations: annotation_store,
            filter: filter_store,
            list,
            stats,
        }
    }

    pub fn init(&self) {
        self.list.borrow_mut().init();
    }

    pub fn show_more(&self) {
        self.list.borrow_mut().on_show_more();
    }

    pub fn set_sort(&self, sort: SortKind) {
        self.list.borrow_mut().on_sort_change(sort);
    }

    /// User filter switch: full reset via the filter store's Major notice.
    pub fn set_filter(&self, filter: FilterKind) {
        self.filter.set(ChangeKind::Major, filter);
    }

    /// Open the detail overlay for an item visible in any zone.
    pub fn open(&self, id: &ItemId) {
        let presenter = { self.list.borrow().find(id) };
        if let Some(presenter) = presenter {
            ItemPresenter::open(&presenter);
        }
    }

    /// Close whichever overlay is open, if any.
    pub fn close(&self) {
        let active = { self.list.borrow().coordinator().active_handle() };
        if let Some(presenter) = active {
            presenter.borrow_mut().close();
        }
    }

    pub fn toggle_watchlist(&self, id: &ItemId) {
        self.send(id, |p| Some(p.toggle_watchlist()));
    }

    pub fn toggle_watched(&self, id: &ItemId) {
        self.send(id, |p| Some(p.toggle_watched()));
    }

    pub fn toggle_favorite(&self, id: &ItemId) {
        self.send(id, |p| Some(p.toggle_favorite()));
    }

    pub fn submit_flags(&self, id: &ItemId, in_watchlist: bool, is_watched: bool, is_favorite: bool) {
        self.send(id, |p| Some(p.submit_flags(in_watchlist, is_watched, is_favorite)));
    }

    pub fn add_annotation(&self, id: &ItemId, annotation: Annotation) {
        self.send(id, |p| Some(p.add_annotation(annotation)));
    }

    pub fn delete_annotation(&self, id: &ItemId, annotation_id: &AnnotationId) {
        self.send(id, |p| p.delete_annotation(annotation_id));
    }

    /// Suspend the catalog screen and show the statistics panel. The panel
    /// gets a one-shot snapshot of the full collection at activation.
    pub fn activate_stats(&self) {
        self.filter.set(ChangeKind::Disabled, FilterKind::Disabled);
        self.stats.borrow_mut().init(self.items.items());
    }

    /// Tear the statistics panel down and bring the catalog screen back.
    pub fn activate_catalog(&self) {
        self.stats.borrow_mut().destroy();
        self.list.borrow_mut().init();
    }

    /// Resolve a gesture into a view action under a short presenter borrow,
    /// then dispatch with every borrow released.
    fn send<F>(&self, id: &ItemId, gesture: F)
    where
        F: FnOnce(&mut ItemPresenter) -> Option<ViewAction>,
    {
        let dispatch = {
            let presenter = match self.list.borrow().find(id) {
                Some(p) => p,
                None => return,
            };
            let mut p = presenter.borrow_mut();
            gesture(&mut p).map(|action| (p.handler(), action))
        };
        if let Some((handler, action)) = dispatch {
            handler.as_ref()(action);
        }
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.items()
    }

    pub fn item_store(&self) -> Rc<ItemStore> {
        Rc::clone(&self.items)
    }

    pub fn annotation_store(&self) -> Rc<AnnotationStore> {
        Rc::clone(&self.annotations)
    }

    pub fn filter_store(&self) -> Rc<FilterStore> {
        Rc::clone(&self.filter)
    }

    pub fn list(&self) -> Rc<RefCell<ListPresenter>> {
        Rc::clone(&self.list)
    }

    pub fn stats_node(&self) -> Option<NodeId> {
        self.stats.borrow().node()
    }

    pub fn find_in(&self, zone: Zone, id: &ItemId) -> Option<Rc<RefCell<ItemPresenter>>> {
        self.list.borrow().find_in(zone, id)
    }
}
