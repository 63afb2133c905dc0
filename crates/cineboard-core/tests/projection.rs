use cineboard_core::{
    most_annotated, project, resolve_annotations, top_rated, Annotation, Emoji, FilterKind, Item,
    SortKind,
};
use time::macros::datetime;
use time::Duration;

fn item(id: &str, rating: f32, day_offset: i64) -> Item {
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

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn project_is_deterministic_and_leaves_input_untouched() {
    let items = vec![item("a", 3.0, 0), item("b", 9.0, 2), item("c", 6.0, 1)];
    let before = items.clone();

    let first = project(&items, FilterKind::All, SortKind::ByRating);
    let second = project(&items, FilterKind::All, SortKind::ByRating);

    assert_eq!(first, second);
    assert_eq!(items, before);
}

#[test]
fn default_sort_keeps_store_order() {
    let items = vec![item("a", 3.0, 2), item("b", 9.0, 0), item("c", 6.0, 1)];
    let out = project(&items, FilterKind::All, SortKind::Default);
    assert_eq!(ids(&out), ["a", "b", "c"]);
}

#[test]
fn by_date_sorts_descending() {
    let items = vec![item("a", 3.0, 0), item("b", 9.0, 2), item("c", 6.0, 1)];
    let out = project(&items, FilterKind::All, SortKind::ByDate);
    assert_eq!(ids(&out), ["b", "c", "a"]);
}

#[test]
fn by_rating_sorts_descending_with_stable_ties() {
    // a and c share a rating; the store order between them must survive.
    let items = vec![item("a", 6.0, 0), item("b", 9.0, 1), item("c", 6.0, 2)];
    let out = project(&items, FilterKind::All, SortKind::ByRating);
    assert_eq!(ids(&out), ["b", "a", "c"]);
}

#[test]
fn filters_map_to_item_flags() {
    let mut a = item("a", 1.0, 0);
    a.in_watchlist = true;
    let mut b = item("b", 2.0, 0);
    b.is_watched = true;
    let mut c = item("c", 3.0, 0);
    c.is_favorite = true;
    let items = vec![a, b, c];

    assert_eq!(ids(&project(&items, FilterKind::Watchlist, SortKind::Default)), ["a"]);
    assert_eq!(ids(&project(&items, FilterKind::Watched, SortKind::Default)), ["b"]);
    assert_eq!(ids(&project(&items, FilterKind::Favorites, SortKind::Default)), ["c"]);
    assert_eq!(project(&items, FilterKind::All, SortKind::Default).len(), 3);
}

#[test]
fn extra_rankings_clamp_to_collection_size() {
    let items = vec![item("a", 3.0, 0), item("b", 9.0, 1)];
    assert_eq!(ids(&top_rated(&items, 5)), ["b", "a"]);

    let mut c = item("c", 1.0, 2);
    c.annotations = vec!["x".into(), "y".into()];
    let mut d = item("d", 1.0, 3);
    d.annotations = vec!["z".into()];
    let items = vec![items[0].clone(), c, d];
    assert_eq!(ids(&most_annotated(&items, 2)), ["c", "d"]);
}

#[test]
fn resolve_keeps_collection_order_and_drops_dangling() {
    let note = |id: &str| Annotation {
        id: id.into(),
        text: "Booooooooooring".into(),
        emoji: Emoji::Sleeping,
        author: "Tim Macoveev".into(),
        created_at: datetime!(2021-06-01 12:00 UTC),
    };
    let annotations = vec![note("n1"), note("n2"), note("n3")];

    let mut it = item("a", 5.0, 0);
    // Reference order differs from collection order and includes a dead id.
    it.annotations = vec!["n3".into(), "gone".into(), "n1".into()];

    let resolved = resolve_annotations(&annotations, &it);
    let got: Vec<&str> = resolved.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(got, ["n1", "n3"]);
}
