//! cineboard-core: catalog data model, change bus, stores, and projection helpers

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use time::OffsetDateTime;

pub type ItemId = String;
pub type AnnotationId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub rating: f32,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    pub runtime_min: u32,
    pub genres: Vec<String>,
    pub description: String,
    pub is_watched: bool,
    pub is_favorite: bool,
    pub in_watchlist: bool,
    /// Identifiers of annotations attached to this item, in attachment order.
    pub annotations: Vec<AnnotationId>,
}

/// Reaction attached to an annotation. Fixed set, mirrors the add-form choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emoji {
    Smile,
    Sleeping,
    Puke,
    Angry,
}

impl Emoji {
    pub fn as_str(self) -> &'static str {
        match self {
            Emoji::Smile => "smile",
            Emoji::Sleeping => "sleeping",
            Emoji::Puke => "puke",
            Emoji::Angry => "angry",
        }
    }
}

/// User-authored comment. Immutable once created; it can only be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub text: String,
    pub emoji: Emoji,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    All,
    Watchlist,
    Watched,
    Favorites,
    /// Reserved state used while the statistics screen owns the page; the
    /// catalog screen is torn down, so the predicate is never narrowing.
    Disabled,
}

impl FilterKind {
    pub fn accepts(self, item: &Item) -> bool {
        match self {
            FilterKind::All | FilterKind::Disabled => true,
            FilterKind::Watchlist => item.in_watchlist,
            FilterKind::Watched => item.is_watched,
            FilterKind::Favorites => item.is_favorite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    #[default]
    Default,
    ByDate,
    ByRating,
}

/// Scope of a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Single-item update; zones reconcile only the matching presenter.
    Patch,
    /// Soft rebuild: sort is preserved, pagination restarts.
    Minor,
    /// Full reset: sort and pagination restart.
    Major,
    /// Suspend the catalog screen.
    Disabled,
}

/// Change notification broadcast by the stores. `item` carries the patched
/// item for single-item updates; `annotation` is the delta (the annotation
/// just added or removed) when an annotation edit triggered the change.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: ChangeKind,
    pub item: Option<Item>,
    pub annotation: Option<Annotation>,
}

impl Notice {
    pub fn bare(kind: ChangeKind) -> Self {
        Self { kind, item: None, annotation: None }
    }

    pub fn for_item(kind: ChangeKind, item: Item) -> Self {
        Self { kind, item: Some(item), annotation: None }
    }

    pub fn for_annotation(kind: ChangeKind, annotation: Annotation) -> Self {
        Self { kind, item: None, annotation: Some(annotation) }
    }
}

pub type SubscriptionId = u64;
pub type Handler<T> = Box<dyn FnMut(&T)>;

/// Synchronous publish/subscribe primitive. Handlers run on the notifying
/// call stack, in registration order, with no batching and no error
/// isolation: a panicking handler aborts the rest of the dispatch.
///
/// Dispatch is not re-entrant. A handler must not trigger a mutation that
/// notifies the same bus again; doing so is a borrow panic, not a deadlock.
pub struct ChangeBus<T> {
    next: Cell<SubscriptionId>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> ChangeBus<T> {
    pub fn new() -> Self {
        Self { next: Cell::new(0), handlers: RefCell::new(Vec::new()) }
    }

    pub fn subscribe(&self, handler: Handler<T>) -> SubscriptionId {
        let id = self.next.get();
        self.next.set(id + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().retain(|(sub, _)| *sub != id);
    }

    pub fn notify(&self, message: &T) {
        for (_, handler) in self.handlers.borrow_mut().iter_mut() {
            handler(message);
        }
    }
}

impl<T> Default for ChangeBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Authoritative ordered collection of catalog items. Mutation happens only
/// through the methods here; the getter hands out a copy.
pub struct ItemStore {
    items: RefCell<Vec<Item>>,
    bus: ChangeBus<Notice>,
}

impl ItemStore {
    pub fn new(bus: ChangeBus<Notice>) -> Self {
        Self { items: RefCell::new(Vec::new()), bus }
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn replace_all(&self, items: Vec<Item>) {
        *self.items.borrow_mut() = items;
        self.bus.notify(&Notice::bare(ChangeKind::Major));
    }

    /// Replace one item in place, preserving collection order. A missing
    /// target is a silent no-op and notifies nothing.
    pub fn patch(&self, kind: ChangeKind, item: Item) {
        {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|i| i.id == item.id) {
                Some(slot) => *slot = item.clone(),
                None => return,
            }
        }
        self.bus.notify(&Notice::for_item(kind, item));
    }

    pub fn subscribe(&self, handler: Handler<Notice>) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.bus.unsubscribe(id);
    }
}

/// Authoritative collection of annotations, keyed by identifier.
pub struct AnnotationStore {
    annotations: RefCell<Vec<Annotation>>,
    bus: ChangeBus<Notice>,
}

impl AnnotationStore {
    pub fn new(bus: ChangeBus<Notice>) -> Self {
        Self { annotations: RefCell::new(Vec::new()), bus }
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.borrow().clone()
    }

    pub fn replace_all(&self, annotations: Vec<Annotation>) {
        *self.annotations.borrow_mut() = annotations;
        self.bus.notify(&Notice::bare(ChangeKind::Major));
    }

    pub fn add(&self, kind: ChangeKind, annotation: Annotation) {
        self.annotations.borrow_mut().push(annotation.clone());
        self.bus.notify(&Notice::for_annotation(kind, annotation));
    }

    /// Delete by identifier. A missing target is a silent no-op.
    pub fn remove(&self, kind: ChangeKind, id: &AnnotationId) {
        let removed = {
            let mut annotations = self.annotations.borrow_mut();
            match annotations.iter().position(|a| &a.id == id) {
                Some(index) => annotations.remove(index),
                None => return,
            }
        };
        self.bus.notify(&Notice::for_annotation(kind, removed));
    }

    pub fn subscribe(&self, handler: Handler<Notice>) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.bus.unsubscribe(id);
    }
}

/// The single active filter selector.
pub struct FilterStore {
    active: Cell<FilterKind>,
    bus: ChangeBus<Notice>,
}

impl FilterStore {
    pub fn new(bus: ChangeBus<Notice>) -> Self {
        Self { active: Cell::new(FilterKind::All), bus }
    }

    pub fn active(&self) -> FilterKind {
        self.active.get()
    }

    /// Switch the selector. User-driven switches notify `Major`; the
    /// statistics screen passes `Disabled` to suspend the catalog.
    pub fn set(&self, kind: ChangeKind, filter: FilterKind) {
        self.active.set(filter);
        self.bus.notify(&Notice::bare(kind));
    }

    pub fn subscribe(&self, handler: Handler<Notice>) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.bus.unsubscribe(id);
    }
}

/// Filtered and sorted view of the catalog. Pure and recomputed on every
/// call; catalog sizes are small enough that caching is not worth carrying.
/// Sorting is stable, so ties keep the filtered (store) order.
pub fn project(items: &[Item], filter: FilterKind, sort: SortKind) -> Vec<Item> {
    let mut out: Vec<Item> = items.iter().filter(|i| filter.accepts(i)).cloned().collect();
    match sort {
        SortKind::Default => {}
        SortKind::ByDate => out.sort_by(|a, b| b.release_date.cmp(&a.release_date)),
        SortKind::ByRating => out.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    out
}

/// Top `n` by rating over the full collection, clamped to its size.
pub fn top_rated(items: &[Item], n: usize) -> Vec<Item> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    out.truncate(n);
    out
}

/// Top `n` by annotation count over the full collection.
pub fn most_annotated(items: &[Item], n: usize) -> Vec<Item> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| b.annotations.len().cmp(&a.annotations.len()));
    out.truncate(n);
    out
}

/// Annotations referenced by the item, in collection order. Dangling
/// references are dropped rather than failing the render.
pub fn resolve_annotations(annotations: &[Annotation], item: &Item) -> Vec<Annotation> {
    annotations.iter().filter(|a| item.annotations.contains(&a.id)).cloned().collect()
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),

    #[error("duplicate annotation id: {0}")]
    DuplicateAnnotation(AnnotationId),

    #[error("item {item} references missing annotation {annotation}")]
    DanglingAnnotation { item: ItemId, annotation: AnnotationId },
}

/// Cross-reference check for bootstrap collections. The stores accept any
/// data; callers loading external documents run this first.
pub fn validate_bootstrap(items: &[Item], annotations: &[Annotation]) -> Result<(), BootstrapError> {
    let mut annotation_ids = HashSet::new();
    for annotation in annotations {
        if !annotation_ids.insert(annotation.id.as_str()) {
            return Err(BootstrapError::DuplicateAnnotation(annotation.id.clone()));
        }
    }
    let mut item_ids = HashSet::new();
    for item in items {
        if !item_ids.insert(item.id.as_str()) {
            return Err(BootstrapError::DuplicateItem(item.id.clone()));
        }
        for id in &item.annotations {
            if !annotation_ids.contains(id.as_str()) {
                return Err(BootstrapError::DanglingAnnotation {
                    item: item.id.clone(),
                    annotation: id.clone(),
                });
            }
        }
    }
    Ok(())
}

pub fn release_year(stamp: &OffsetDateTime) -> i32 {
    stamp.year()
}

/// "7 August 2026"; used for release dates and annotation dates alike.
pub fn format_date(stamp: &OffsetDateTime) -> String {
    let format = time::macros::format_description!("[day padding:none] [month repr:long] [year]");
    stamp.format(&format).unwrap_or_default()
}

/// "1h 36m", collapsing zero parts.
pub fn format_runtime(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub fn total_runtime(items: &[Item]) -> u32 {
    items.iter().map(|i| i.runtime_min).sum()
}

pub fn watched_count(items: &[Item]) -> usize {
    items.iter().filter(|i| i.is_watched).count()
}

/// Most frequent genre across the given items; `None` when no genres exist.
/// Ties resolve deterministically (last alphabetical among the tied).
pub fn top_genre(items: &[Item]) -> Option<String> {
    let mut counts = std::collections::BTreeMap::new();
    for item in items {
        for genre in &item.genres {
            *counts.entry(genre.as_str()).or_insert(0usize) += 1;
        }
    }
    counts.into_iter().max_by_key(|(_, count)| *count).map(|(genre, _)| genre.to_string())
}

/// Viewer rank shown by the statistics panel.
pub fn user_rank(watched: usize) -> &'static str {
    match watched {
        0 => "",
        1..=10 => "novice",
        11..=20 => "fan",
        _ => "movie buff",
    }
}

/// Sortable id from epoch nanos. Collisions are not a concern at catalog scale.
pub fn new_id() -> String {
    let ns = OffsetDateTime::now_utc().unix_timestamp_nanos();
    format!("{ns:x}")
}
