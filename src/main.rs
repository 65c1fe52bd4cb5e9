use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::atomic::Ordering, sync::Arc};
use tokio::sync::mpsc;

/// Terminal media browser with a runtime permission flow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to /tmp/mediamaster-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, ^F/B, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Open a category screen on startup (IMAGES, VIDEOS, CONTACTS, AUDIOS, DOCUMENTS)
    #[arg(long)]
    category: Option<String>,

    /// Rescan the library paths before starting
    #[arg(long)]
    reindex: bool,
}

mod app;
mod config;
mod handlers;
mod services;
mod ui;

use config::Config;
use mediamaster::adapter::Recycler;
use mediamaster::model::Model;
use mediamaster::permissions::{GrantDb, PermissionResponse};
use mediamaster::store::catalog::CatalogDb;
use mediamaster::store::indexer::index_library;
use mediamaster::store::{Collection, ContentStore, UnavailableStore};
use mediamaster::utils::{get_data_dir, log_debug, DEBUG_MODE};
use mediamaster::ContentUri;
use services::{QueryRequest, QueryResponse};
use ui::icons::{IconMode, IconRenderer, IconTheme};

pub struct App {
    pub model: Model,

    grants: GrantDb,
    store: Arc<dyn ContentStore>,
    package_name: String,
    icon_renderer: IconRenderer,

    query_tx: mpsc::UnboundedSender<QueryRequest>,
    query_rx: mpsc::UnboundedReceiver<QueryResponse>,
    permission_tx: mpsc::UnboundedSender<PermissionResponse>,
    permission_rx: mpsc::UnboundedReceiver<PermissionResponse>,

    recycler: Recycler,
    thumbnails: app::thumbnails::Thumbnails,

    /// Last status-bar date lookup
    selected_date: Option<(ContentUri, Option<String>)>,
}

impl App {
    async fn new(config: Config, reindex: bool) -> Result<Self> {
        let data_dir = get_data_dir(config.data_dir.as_deref());
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        log_debug(&format!("Data directory: {}", data_dir.display()));

        let grants = GrantDb::open(&data_dir.join("grants.db"))?;

        // A missing catalog leaves every screen empty instead of failing startup
        let store: Arc<dyn ContentStore> = match CatalogDb::open(&data_dir.join("catalog.db")) {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                if reindex || catalog_is_empty(&catalog) {
                    index_catalog(catalog.clone(), &config).await;
                }
                catalog
            }
            Err(e) => {
                log_debug(&format!("Failed to open catalog: {}", e));
                Arc::new(UnavailableStore)
            }
        };

        let icon_renderer =
            IconRenderer::new(IconMode::from_config(&config.icon_mode), IconTheme::default());

        // Initialize thumbnail protocol picker
        let picker = if config.image_preview_enabled {
            let mut picker = match ratatui_image::picker::Picker::from_query_stdio() {
                Ok(p) => p,
                Err(e) => {
                    log_debug(&format!("Thumbnails: Failed to detect terminal: {}", e));
                    ratatui_image::picker::Picker::from_fontsize((8, 16))
                }
            };

            match config.image_protocol.to_lowercase().as_str() {
                "auto" => {
                    log_debug("Thumbnails: Auto-detected protocol");
                }
                "iterm2" => {
                    picker.set_protocol_type(ratatui_image::picker::ProtocolType::Iterm2);
                    log_debug("Thumbnails: Using iTerm2 protocol");
                }
                "kitty" => {
                    picker.set_protocol_type(ratatui_image::picker::ProtocolType::Kitty);
                    log_debug("Thumbnails: Using Kitty protocol");
                }
                "sixel" => {
                    picker.set_protocol_type(ratatui_image::picker::ProtocolType::Sixel);
                    log_debug("Thumbnails: Using Sixel protocol");
                }
                "halfblocks" => {
                    picker.set_protocol_type(ratatui_image::picker::ProtocolType::Halfblocks);
                    log_debug("Thumbnails: Using Halfblocks protocol");
                }
                unknown => {
                    log_debug(&format!(
                        "Thumbnails: Unknown protocol '{}', using auto-detect",
                        unknown
                    ));
                }
            }

            Some(picker)
        } else {
            log_debug("Thumbnails disabled in config");
            None
        };

        let (query_tx, query_rx) = services::query::spawn_query_service(store.clone());
        let (permission_tx, permission_rx) = mpsc::unbounded_channel();

        Ok(App {
            model: Model::new(config.vim_mode, config.api_level),
            grants,
            thumbnails: app::thumbnails::Thumbnails::new(store.clone(), picker),
            store,
            package_name: config.package_name,
            icon_renderer,
            query_tx,
            query_rx,
            permission_tx,
            permission_rx,
            recycler: Recycler::new(),
            selected_date: None,
        })
    }
}

fn catalog_is_empty(catalog: &CatalogDb) -> bool {
    Collection::ALL
        .iter()
        .all(|collection| catalog.count(*collection).unwrap_or(0) == 0)
}

/// Scan the configured library on the blocking pool; failures are logged
async fn index_catalog(catalog: Arc<CatalogDb>, config: &Config) {
    let library_paths = config.library_paths.clone();
    let contacts = config.contacts.clone();

    let result =
        tokio::task::spawn_blocking(move || index_library(&catalog, &library_paths, &contacts))
            .await;

    match result {
        Ok(Ok(summary)) => log_debug(&format!(
            "Indexed {} files, {} contacts ({} pruned)",
            summary.files, summary.contacts, summary.pruned
        )),
        Ok(Err(e)) => log_debug(&format!("Indexing failed: {}", e)),
        Err(e) => log_debug(&format!("Indexing task panicked: {}", e)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    DEBUG_MODE.store(args.debug, Ordering::Relaxed);
    if args.debug {
        log_debug("Debug mode enabled");
    }

    let mut config = config::load_config(args.config)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }

    let mut app = App::new(config, args.reindex).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Some(token) = args.category {
        app.open_category_token(&token);
    }

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process query results (non-blocking)
        while let Ok(response) = app.query_rx.try_recv() {
            app.handle_query_response(response);
        }

        // Process prompt answers (non-blocking)
        while let Ok(response) = app.permission_rx.try_recv() {
            app.handle_permission_response(response);
        }

        let arrived = app.thumbnails.drain_updates();
        if arrived > 0 {
            log_debug(&format!("Thumbnails: {} finished", arrived));
        }

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handlers::handle_key(app, key)?;
            }
        }
    }

    Ok(())
}
