//! inboxwatch — a live-updating notification inbox for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐ trigger  ┌────────────┐ replace ┌───────────┐
//! │  poll.rs │ ───────► │ controller │ ──────► │   store   │
//! │ (thread) │          │ (sync/)    │         │  (sync/)  │
//! └──────────┘          └────────────┘         └───────────┘
//!      │                      │ fetch()             │ subscribe
//!      │                ┌────────────┐              │
//!      │                │  source/   │              │
//!      │                └────────────┘              │
//!      │ PollMsg (channel)                          │
//!      ▼                                            │
//! ┌──────────┐  draw()  ┌──────────┐ ◄──────────────┘
//! │  app.rs  │ ───────► │  ui.rs   │
//! │ (state)  │          │ (render) │
//! └──────────┘          └──────────┘
//!      ▲
//!      │ handle_key_event()
//! ┌──────────┐
//! │ input.rs │
//! └──────────┘
//! ```
//!
//! * **`source/`** — the `NotificationSource` trait and concrete
//!   implementations (currently GitHub only).
//! * **`sync/`** — the core: state store, sync controller, status.
//! * **`credential`** — the `CredentialProvider` trait and the env-var
//!   implementation.
//! * **`poll`** — spawns a background thread that drives sync cycles on a
//!   timer and on manual refresh.
//! * **`app`** — owns all presentation state (items, scroll position, etc.).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: read config, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod credential;
mod input;
mod poll;
mod source;
mod sync;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use credential::EnvTokenProvider;
use poll::PollMsg;
use source::GitHubSource;
use sync::{StateStore, SyncController};

/// Fetched when no endpoint is given on the command line.
const DEFAULT_ENDPOINT: &str = "https://api.github.com/notifications";

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.  This prevents the common TUI bug where a panic leaves the
/// terminal in a broken state.
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
/// panic message.  Without this, a panic inside the event loop would leave
/// raw mode enabled and the alternate screen active.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Enable tracing when `INBOXWATCH_LOG` names a log file.
///
/// Output goes to the file, never to the terminal — stdout belongs to the
/// alternate screen.  `RUST_LOG` controls the filter as usual.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("INBOXWATCH_LOG") else {
        return Ok(());
    };

    let file = std::fs::File::create(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inboxwatch=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    install_panic_hook();

    // -- configuration -------------------------------------------------------
    // `.env` is optional; the token is read lazily at each fetch, so it can
    // be rotated without restarting.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.into());

    // -- build the sync core -------------------------------------------------
    let store = Arc::new(StateStore::new());
    let source = GitHubSource::new(endpoint, "GitHub")?;
    let controller = Arc::new(SyncController::new(
        Box::new(source),
        Box::new(EnvTokenProvider::new("GITHUB_TOKEN")),
        store.clone(),
    ));

    // -- start background syncing --------------------------------------------
    let (refresh_tx, events) = poll::spawn(controller, store, poll::SYNC_INTERVAL);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new("GitHub");

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Drain any messages from the sync thread.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    //   4. Forward a pending manual-refresh request to the sync thread.
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Process sync messages
        while let Ok(msg) = events.try_recv() {
            match msg {
                PollMsg::Items(items) => app.set_items(items),
                PollMsg::Status(status) => app.set_status(&status),
            }
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        // 4. Forward manual refresh
        if app.take_refresh_request() {
            let _ = refresh_tx.send(());
        }

        if app.quit {
            break;
        }
    }

    // `guard` (and with it the refresh sender, once main returns) is dropped
    // here, restoring the terminal and stopping the sync thread.
    Ok(())
}
