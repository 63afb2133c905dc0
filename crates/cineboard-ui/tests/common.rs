#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use cineboard_core::{Annotation, Emoji, Item};
use cineboard_ui::{Board, HostTree, MemTree, NodeId, SharedTree, Zone};
use time::macros::datetime;
use time::Duration;

pub fn item(id: &str, rating: f32, day_offset: i64) -> Item {
    Item {
        id: id.into(),
        title: format!("Film {id}"),
        rating,
        release_date: datetime!(2020-01-01 0:00 UTC) + Duration::days(day_offset),
        runtime_min: 96,
        genres: vec!["Drama".into()],
        description: String::new(),
        is_watched: false,
        is_favorite: false,
        in_watchlist: false,
        annotations: Vec::new(),
    }
}

pub fn annotation(id: &str, text: &str) -> Annotation {
    Annotation {
        id: id.into(),
        text: text.into(),
        emoji: Emoji::Smile,
        author: "Tim Macoveev".into(),
        created_at: datetime!(2021-06-01 12:00 UTC),
    }
}

pub struct Fixture {
    pub mem: Rc<RefCell<MemTree>>,
    pub board: Board,
    pub container: NodeId,
    pub overlay: NodeId,
}

pub fn board_with(items: Vec<Item>, annotations: Vec<Annotation>) -> Fixture {
    let mem = Rc::new(RefCell::new(MemTree::new()));
    let (container, overlay) = {
        let mut tree = mem.borrow_mut();
        (tree.create("screen"), tree.create("overlay"))
    };
    let tree: SharedTree = mem.clone();
    let board = Board::new(tree, container, overlay, items, annotations);
    Fixture { mem, board, container, overlay }
}

impl Fixture {
    pub fn zone_children(&self, zone: Zone) -> Vec<NodeId> {
        let host = self.board.list().borrow().zone_host(zone).expect("zone host");
        self.mem.borrow().children(host).to_vec()
    }

    pub fn zone_markups(&self, zone: Zone) -> Vec<String> {
        self.zone_children(zone)
            .into_iter()
            .map(|node| self.markup(node))
            .collect()
    }

    pub fn overlay_children(&self) -> Vec<NodeId> {
        self.mem.borrow().children(self.overlay).to_vec()
    }

    pub fn container_children(&self) -> Vec<NodeId> {
        self.mem.borrow().children(self.container).to_vec()
    }

    pub fn markup(&self, node: NodeId) -> String {
        self.mem.borrow().markup(node).expect("node markup").to_string()
    }
}
