//! cineboard-ui: presenters that keep rendered views in sync with the stores.
//!
//! The only thing required from the environment is the [`HostTree`] node
//! primitive; everything else (projection, reconciliation, pagination,
//! overlay exclusivity) happens here against that seam.

pub mod board;
pub mod host;
pub mod item;
pub mod list;
pub mod mode;
pub mod stats;
pub mod views;

pub use board::Board;
pub use host::{HostTree, MemTree, NodeId, Position, SharedTree};
pub use item::{ActionHandler, ItemPresenter, Mode, ViewAction};
pub use list::{ListPresenter, Zone, EXTRA_COUNT, PAGE_SIZE};
pub use mode::ModeCoordinator;
pub use stats::StatsPresenter;
