//! Overlay exclusivity: one coordinator per list presenter tracks the
//! single item presenter allowed to hold the edit overlay.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::item::ItemPresenter;

pub type PresenterKey = u64;

#[derive(Default)]
pub struct ModeCoordinator {
    next: Cell<PresenterKey>,
    active: RefCell<Option<(PresenterKey, Weak<RefCell<ItemPresenter>>)>>,
}

impl ModeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity handed to each presenter at construction.
    pub fn issue_key(&self) -> PresenterKey {
        let key = self.next.get();
        self.next.set(key + 1);
        key
    }

    /// Close the previous holder, then record `key` as the active one.
    /// The previous holder is reset before the new overlay opens, so at no
    /// instant are two overlays attached.
    pub fn request(&self, key: PresenterKey, handle: Weak<RefCell<ItemPresenter>>) {
        let previous = self.active.borrow_mut().take();
        if let Some((previous_key, previous_handle)) = previous {
            if previous_key != key {
                if let Some(presenter) = previous_handle.upgrade() {
                    presenter.borrow_mut().reset_view();
                }
            }
        }
        *self.active.borrow_mut() = Some((key, handle));
    }

    /// Forget `key` if it is the active holder (close or destroy).
    pub fn release(&self, key: PresenterKey) {
        let mut active = self.active.borrow_mut();
        if matches!(&*active, Some((held, _)) if *held == key) {
            *active = None;
        }
    }

    pub fn active_key(&self) -> Option<PresenterKey> {
        self.active.borrow().as_ref().map(|(key, _)| *key)
    }

    pub fn active_handle(&self) -> Option<Rc<RefCell<ItemPresenter>>> {
        self.active.borrow().as_ref().and_then(|(_, handle)| handle.upgrade())
    }
}
