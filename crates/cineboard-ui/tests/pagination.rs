mod common;

use cineboard_core::Item;
use cineboard_ui::Zone;
use common::{board_with, item};

fn seven_items() -> Vec<Item> {
    (0..7).map(|i| item(&format!("f{i}"), 5.0, i)).collect()
}

#[test]
fn first_page_then_show_more_reveals_the_rest() {
    let f = board_with(seven_items(), Vec::new());
    f.board.init();

    assert_eq!(f.zone_children(Zone::Main).len(), 5);
    {
        let list = f.board.list();
        let list = list.borrow();
        assert_eq!(list.cursor(), 5);
        assert!(list.show_more_node().is_some());
    }

    f.board.show_more();

    assert_eq!(f.zone_children(Zone::Main).len(), 7);
    let list = f.board.list();
    let list = list.borrow();
    assert_eq!(list.cursor(), 7);
    assert!(list.show_more_node().is_none());
}

#[test]
fn main_zone_follows_store_order_by_default() {
    let f = board_with(seven_items(), Vec::new());
    f.board.init();

    let markups = f.zone_markups(Zone::Main);
    for (i, markup) in markups.iter().enumerate() {
        assert!(markup.starts_with(&format!("[f{i}]")), "unexpected row: {markup}");
    }
}

#[test]
fn cursor_clamps_to_small_projections() {
    let items: Vec<Item> = (0..3).map(|i| item(&format!("f{i}"), 5.0, i)).collect();
    let f = board_with(items, Vec::new());
    f.board.init();

    {
        let list = f.board.list();
        let list = list.borrow();
        assert_eq!(list.cursor(), 3);
        // Everything visible, so the control is absent.
        assert!(list.show_more_node().is_none());
    }

    // Extra presses are no-ops and never move the cursor backwards.
    f.board.show_more();
    f.board.show_more();
    let list = f.board.list();
    let list = list.borrow();
    assert_eq!(list.cursor(), 3);
    drop(list);
    assert_eq!(f.zone_children(Zone::Main).len(), 3);
}
