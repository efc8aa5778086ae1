//! headlines: browse NewsAPI headlines in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//!                      Completion
//! ┌────────────┐  (tokio task → mpsc)  ┌──────────┐  draw()  ┌──────────┐
//! │  source/   │ ────────────────────► │ feed.rs  │ ───────► │  ui.rs   │
//! │ (NewsAPI)  │ ◄──────────────────── │ (state)  │          │ (render) │
//! └────────────┘   fetch(FeedRequest)  └──────────┘          └──────────┘
//!                                           ▲
//!                                           │ intents via app.rs
//!                                      ┌──────────┐
//!                                      │ input.rs │
//!                                      └──────────┘
//! ```
//!
//! * **`source/`**: the `NewsSource` trait, the `Article` type and the
//!   NewsAPI client.
//! * **`feed`**: the controller. Owns `FeedState`, issues requests, applies
//!   completions, persists the theme.
//! * **`app`**: UI root. Owns the controller plus selection / search-box
//!   state, and turns user intents into controller calls.
//! * **`ui`**: pure rendering from `App` state.
//! * **`input`**: maps key events to `App` intents.
//! * **`config`**, **`cli`**, **`logging`**, **`storage`**, **`theme`**:
//!   settings, flags, tracing, the preference file and the colour palettes.
//! * **`main`**: wires everything together (load settings, start logging,
//!   set up the runtime and terminal, run the event loop).

mod app;
mod browser;
mod category;
mod cli;
mod config;
mod error;
mod feed;
mod input;
mod logging;
mod source;
mod storage;
mod theme;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use cli::Cli;
use config::Settings;
use feed::FeedController;
use source::NewsApiClient;
use storage::FileStore;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Open the preference file, starting over if the existing one is corrupt.
fn open_prefs(settings: &Settings) -> FileStore {
    let path = settings.prefs_path();
    match FileStore::open(&path) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
            FileStore::empty(path)
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // -- settings and logging ------------------------------------------------
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);

    let _log_guard = logging::init(&settings.logs_dir(), &settings.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "headlines starting");

    // -- news source and controller ------------------------------------------
    let api_key = settings.require_api_key()?;
    let client = NewsApiClient::new(&settings.base_url, api_key, settings.request_timeout())?;
    let prefs = open_prefs(&settings);
    tracing::debug!(path = %prefs.path().display(), "using preference file");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let entered = runtime.enter();

    // The theme is read here, before the terminal shows its first frame.
    let feed = FeedController::new(Arc::new(client), Box::new(prefs), settings.default_category);
    let mut app = App::new(feed);

    // -- terminal setup (RAII, Drop restores on exit or panic) --------------
    install_panic_hook();
    let mut guard = TerminalGuard::new()?;
    app.feed.start();

    let result = run(&mut guard, &mut app);

    drop(guard);
    drop(entered);
    // In-flight requests are not worth waiting for on quit.
    runtime.shutdown_background();

    match &result {
        Ok(()) => tracing::info!("headlines exited"),
        Err(e) => tracing::error!(error = ?e, "headlines exited with error"),
    }
    result
}

/// The main event loop.
///
/// Runs at ~10 fps (100 ms tick).  Each iteration:
///   1. Apply any finished requests.
///   2. Render the UI.
///   3. Poll for keyboard input (non-blocking, up to tick_rate).
fn run(guard: &mut TerminalGuard, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        app.tick();

        guard.terminal.draw(|f| ui::draw(app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(app, key);
            }
        }

        if app.quit {
            return Ok(());
        }
    }
}
