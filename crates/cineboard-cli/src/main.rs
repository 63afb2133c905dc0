use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cineboard_core::{validate_bootstrap, Annotation, FilterKind, Item, SortKind};
use cineboard_ui::{Board, HostTree, MemTree, NodeId, SharedTree};

mod config;

#[derive(Parser)]
#[command(name = "cineboard", version, about = "Catalog board over a bootstrap document")]
struct Cli {
    /// Bootstrap JSON document with items and annotations
    #[arg(long)]
    data: PathBuf,
    /// TOML config with page_size / extra_count overrides
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the board and print the visual tree
    Show {
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
        #[arg(long, value_enum, default_value = "default")]
        sort: SortArg,
        /// Extra pages to reveal with the show-more control
        #[arg(long, default_value_t = 0)]
        more: u32,
        /// Open the detail overlay for this item id
        #[arg(long)]
        open: Option<String>,
        /// Print the catalog items as JSON instead of the rendered tree
        #[arg(long)]
        json: bool,
    },
    /// Render the statistics panel
    Stats,
    /// Cross-reference check of the bootstrap document
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterArg {
    All,
    Watchlist,
    Watched,
    Favorites,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterKind::All,
            FilterArg::Watchlist => FilterKind::Watchlist,
            FilterArg::Watched => FilterKind::Watched,
            FilterArg::Favorites => FilterKind::Favorites,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Default,
    Date,
    Rating,
}

impl From<SortArg> for SortKind {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Default => SortKind::Default,
            SortArg::Date => SortKind::ByDate,
            SortArg::Rating => SortKind::ByRating,
        }
    }
}

#[derive(serde::Deserialize)]
struct Bootstrap {
    items: Vec<Item>,
    annotations: Vec<Annotation>,
}

fn load_bootstrap(path: &Path) -> Result<Bootstrap> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).context("parse bootstrap document")
}

struct Screen {
    mem: Rc<RefCell<MemTree>>,
    board: Board,
    container: NodeId,
    overlay: NodeId,
}

fn wire(settings: &config::Settings, bootstrap: Bootstrap) -> Screen {
    let mem = Rc::new(RefCell::new(MemTree::new()));
    let (container, overlay) = {
        let mut tree = mem.borrow_mut();
        (tree.create("screen"), tree.create("overlay"))
    };
    let tree: SharedTree = mem.clone();
    let board = Board::new_with(
        tree,
        container,
        overlay,
        bootstrap.items,
        bootstrap.annotations,
        settings.page_size(),
        settings.extra_count(),
    );
    Screen { mem, board, container, overlay }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;
    let bootstrap = load_bootstrap(&cli.data)?;
    validate_bootstrap(&bootstrap.items, &bootstrap.annotations)
        .context("invalid bootstrap document")?;

    match cli.command {
        Commands::Validate => {
            println!(
                "ok: {} items, {} annotations",
                bootstrap.items.len(),
                bootstrap.annotations.len()
            );
        }
        Commands::Show { filter, sort, more, open, json } => {
            let screen = wire(&settings, bootstrap);
            screen.board.init();
            if filter != FilterArg::All {
                screen.board.set_filter(filter.into());
            }
            if sort != SortArg::Default {
                screen.board.set_sort(sort.into());
            }
            for _ in 0..more {
                screen.board.show_more();
            }
            if let Some(id) = open {
                screen.board.open(&id);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&screen.board.items())?);
            } else {
                print!("{}", screen.mem.borrow().dump(screen.container));
                let overlay_open = !screen.mem.borrow().children(screen.overlay).is_empty();
                if overlay_open {
                    print!("{}", screen.mem.borrow().dump(screen.overlay));
                }
            }
        }
        Commands::Stats => {
            let screen = wire(&settings, bootstrap);
            screen.board.init();
            screen.board.activate_stats();
            print!("{}", screen.mem.borrow().dump(screen.container));
        }
    }

    Ok(())
}
