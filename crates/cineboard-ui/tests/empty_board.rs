mod common;

use cineboard_ui::Zone;
use common::board_with;

#[test]
fn empty_catalog_renders_placeholder_only() {
    let f = board_with(Vec::new(), Vec::new());
    f.board.init();

    let list = f.board.list();
    let list = list.borrow();
    assert!(list.sort_node().is_some());
    assert!(list.empty_node().is_some());
    assert!(list.zone_host(Zone::Main).is_none());
    assert!(list.zone_host(Zone::Best).is_none());
    assert!(list.show_more_node().is_none());
    drop(list);

    // The screen holds the sort control and the placeholder, nothing else.
    assert_eq!(f.container_children().len(), 2);
    let markups: Vec<String> =
        f.container_children().into_iter().map(|n| f.markup(n)).collect();
    assert!(markups[0].starts_with("sort:"));
    assert_eq!(markups[1], "there are no movies in our database");
}

#[test]
fn init_on_empty_catalog_is_idempotent() {
    let f = board_with(Vec::new(), Vec::new());
    f.board.init();
    f.board.init();
    assert_eq!(f.container_children().len(), 2);
}
