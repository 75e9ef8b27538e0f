use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::atomic::Ordering, time::Instant};
use tokio::sync::mpsc;

use tenderdesk::api::ProcurementClient;
use tenderdesk::config::{get_config_path, Config};
use tenderdesk::services::api::{spawn_api_service, ApiResponse};
use tenderdesk::{handlers, log_debug, ui, App, DEBUG_MODE};

/// Procurement management console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to /tmp/tenderdesk-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Section shown first (dashboard, processes, suppliers, ...)
    #[arg(short, long)]
    section: Option<String>,
}

/// Open a session, or make sure one already exists
async fn authenticate(client: &ProcurementClient, config: &Config) -> Result<()> {
    match config.credentials() {
        Some((username, password)) => client
            .login(username, password)
            .await
            .with_context(|| format!("Login failed for user {}", username)),
        None => {
            let authenticated = client
                .is_authenticated()
                .await
                .context("Could not check the session")?;
            if !authenticated {
                anyhow::bail!("Not authenticated: set username and password in the config file");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set debug mode
    DEBUG_MODE.store(args.debug, Ordering::Relaxed);
    log_debug("Debug mode enabled");

    // Determine config file path
    let config_path = get_config_path(args.config)?;
    log_debug(&format!("Loading config from: {:?}", config_path));

    // Load configuration
    let mut config = Config::load(&config_path)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }

    let client = ProcurementClient::new(config.base_url.clone())?;
    authenticate(&client, &config).await?;

    let (api_tx, api_rx) = spawn_api_service(client);
    let mut app = App::new(config.vim_mode, config.download_dir(), api_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start(args.section.as_deref(), Instant::now());

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app, api_rx);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut api_rx: mpsc::UnboundedReceiver<ApiResponse>,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = api_rx.try_recv() {
            handlers::handle_api_response(app, response);
        }

        // Notices, busy timers, badge poll, search debounce, calendar callbacks
        app.tick(Instant::now());

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handlers::handle_key(app, key);
                }
            }
        }
    }

    Ok(())
}
