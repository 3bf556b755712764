//! quakewatch — a terminal viewer for recent seismic events.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  pump()    ┌──────────┐  draw()  ┌──────────┐
//! │ loader.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread)  │ (delivery) │ (state)  │          │ (render) │
//! └───────────┘            └──────────┘          └──────────┘
//!       │                        ▲
//!       │ fetch_events()         │ handle_key_event()
//! ┌───────────┐            ┌──────────┐
//! │ source/   │            │ input.rs │
//! └───────────┘            └──────────┘
//! ```
//!
//! * **`source/`** — the `EventSource` trait, the `Quake` record type, and
//!   the USGS-style feed fetcher.
//! * **`loader`** — runs a single fetch on a background thread per trigger
//!   and delivers exactly one outcome to the event loop.
//! * **`app`** — owns all application state (records, scroll position, etc.).
//! * **`view`** — pure presentation mappings (location split, magnitude
//!   formatting and colours, date/time strings).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod input;
mod loader;
mod source;
mod ui;
mod view;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use loader::{LoadState, Loader};

/// Default feed queried when no endpoint is given on the command line.
const DEFAULT_ENDPOINT: &str = "https://feeds.quakewatch.dev/recent.json";

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

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never corrupt the alternate screen;
    // redirect with `2>quakewatch.log` to capture them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    install_panic_hook();

    // -- parse arguments -----------------------------------------------------
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.into());

    // -- configure the loader ------------------------------------------------
    let mut loader = Loader::new();
    loader.configure(&endpoint);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    // Kick off the initial load before entering the loop.
    loader.start();

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Collect a loader delivery, if one arrived.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    //   4. Act on quit/refresh requests.
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Collect the delivery (at most one per start)
        if let Some(quakes) = loader.pump() {
            app.status = format!("Loaded {} earthquakes", quakes.len());
            app.set_quakes(quakes);
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        // 4. Consume requests raised by the input layer
        if app.refresh_requested {
            app.refresh_requested = false;
            // While a fetch is pending this is a no-op, so mashing `r`
            // never spawns duplicate fetches.
            loader.start();
            if loader.state() == LoadState::Pending {
                app.status = "Refreshing…".into();
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.  If a fetch is still
    // pending, dropping `loader` abandons it and its result is discarded.
    Ok(())
}
