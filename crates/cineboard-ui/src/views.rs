//! Markup collaborators: pure state-to-markup functions with no store
//! access. Presenters create host nodes from these and wire the gestures.

use cineboard_core::{
    format_date, format_runtime, release_year, top_genre, total_runtime, user_rank, watched_count,
    Annotation, Item, SortKind,
};
use std::fmt::Write as _;

fn flag_marks(item: &Item) -> String {
    format!(
        "{}{}{}",
        if item.in_watchlist { 'l' } else { '-' },
        if item.is_watched { 'w' } else { '-' },
        if item.is_favorite { 'f' } else { '-' }
    )
}

/// Compact summary row for one catalog item.
pub fn card(item: &Item, annotation_count: usize) -> String {
    format!(
        "[{}] {} ({}) *{:.1} {} [{}] {} comments",
        item.id,
        item.title,
        release_year(&item.release_date),
        item.rating,
        format_runtime(item.runtime_min),
        flag_marks(item),
        annotation_count
    )
}

/// Detail overlay with editable flags and the annotation list.
pub fn overlay(item: &Item, annotations: &[Annotation]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "details [{}] {}", item.id, item.title);
    let _ = writeln!(out, "rating: {:.1}", item.rating);
    let _ = writeln!(out, "released: {}", format_date(&item.release_date));
    let _ = writeln!(out, "runtime: {}", format_runtime(item.runtime_min));
    if !item.genres.is_empty() {
        let _ = writeln!(out, "genres: {}", item.genres.join(", "));
    }
    if !item.description.is_empty() {
        let _ = writeln!(out, "{}", item.description);
    }
    let _ = writeln!(
        out,
        "controls: watchlist:{} watched:{} favorite:{}",
        onoff(item.in_watchlist),
        onoff(item.is_watched),
        onoff(item.is_favorite)
    );
    let _ = writeln!(out, "comments ({})", annotations.len());
    for a in annotations {
        let _ = writeln!(
            out,
            "  :{}: {} ({}, {})",
            a.emoji.as_str(),
            a.text,
            a.author,
            format_date(&a.created_at)
        );
    }
    out.push_str("new comment: select reaction below and write comment here");
    out
}

fn onoff(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

pub fn sort_bar(current: SortKind) -> String {
    let mark = |kind: SortKind, label: &str| {
        if kind == current {
            format!("[{label}]")
        } else {
            label.to_string()
        }
    };
    format!(
        "sort: {} {} {}",
        mark(SortKind::Default, "default"),
        mark(SortKind::ByDate, "by date"),
        mark(SortKind::ByRating, "by rating")
    )
}

pub fn board() -> String {
    "films".into()
}

pub fn main_list() -> String {
    "all movies. upcoming".into()
}

pub fn best_list() -> String {
    "top rated".into()
}

pub fn commented_list() -> String {
    "most commented".into()
}

pub fn show_more() -> String {
    "show more".into()
}

pub fn empty() -> String {
    "there are no movies in our database".into()
}

/// Statistics panel over a snapshot of the full collection.
pub fn stats(items: &[Item]) -> String {
    let watched: Vec<Item> = items.iter().filter(|i| i.is_watched).cloned().collect();
    let mut out = String::new();
    let _ = writeln!(out, "statistics");
    let rank = user_rank(watched_count(items));
    if !rank.is_empty() {
        let _ = writeln!(out, "your rank: {rank}");
    }
    let _ = writeln!(out, "you watched: {} movies", watched.len());
    let _ = writeln!(out, "total duration: {}", format_runtime(total_runtime(&watched)));
    match top_genre(&watched) {
        Some(genre) => {
            let _ = writeln!(out, "top genre: {genre}");
        }
        None => {
            let _ = writeln!(out, "top genre: -");
        }
    }
    out
}
