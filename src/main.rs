// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Arena Admin TUI.
//!
//! A terminal-based administration console for a competitive-programming
//! platform, backed by a local SQLite snapshot of the platform database.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * A **Background Worker** handles database queries and administrative
//!   mutations via asynchronous command processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and the background worker is handled via `std::sync::mpsc`
//! channels.

mod actions;
mod commander;
mod components;
mod config;
mod listing;
mod model;
mod render;
mod source;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Duration, Instant},
};

use crate::{
    actions::{
        commands::AppCommand,
        events::{AppEvent, process_events},
    },
    commander::Commander,
    components::{Roster, RosterAction},
    config::AppConfig,
    listing::ListQuery,
    model::{Badge, CoinPurchase, Contest, EntityKind, Notice, Problem, StoreItem, UserAccount},
    theme::Theme,
};

/// Transient status-line message, dismissed by the next keypress.
#[derive(Debug)]
enum Toast {
    Info(String),
    Error(String),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: EntityKind,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub command_tx: Sender<AppCommand>,

    pub commander: Commander,

    pub users: Roster<UserAccount>,
    pub problems: Roster<Problem>,
    pub contests: Roster<Contest>,
    pub purchases: Roster<CoinPurchase>,
    pub store_items: Roster<StoreItem>,
    pub badges: Roster<Badge>,
    pub notices: Roster<Notice>,

    pub toast: Option<Toast>,
}

/// Runs the closure against the roster for the currently active view.
macro_rules! with_active_roster {
    ($app:expr, |$roster:ident| $body:expr) => {
        match $app.main_view {
            EntityKind::Users => {
                let $roster = &mut $app.users;
                $body
            }
            EntityKind::Problems => {
                let $roster = &mut $app.problems;
                $body
            }
            EntityKind::Contests => {
                let $roster = &mut $app.contests;
                $body
            }
            EntityKind::Purchases => {
                let $roster = &mut $app.purchases;
                $body
            }
            EntityKind::StoreItems => {
                let $roster = &mut $app.store_items;
                $body
            }
            EntityKind::Badges => {
                let $roster = &mut $app.badges;
                $body
            }
            EntityKind::Notices => {
                let $roster = &mut $app.notices;
                $body
            }
        }
    };
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, command_tx: Sender<AppCommand>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            theme: Theme::default(),
            main_view: EntityKind::Users,
            event_tx,
            event_rx,
            command_tx,
            commander: Commander::new(),
            users: Roster::new(&config),
            problems: Roster::new(&config),
            contests: Roster::new(&config),
            purchases: Roster::new(&config),
            store_items: Roster::new(&config),
            badges: Roster::new(&config),
            notices: Roster::new(&config),
            toast: None,
            config,
        }
    }

    /// Issues a fetch for the active view from its current query state.
    pub fn refetch_active(&mut self) {
        let command = with_active_roster!(self, |roster| roster.fetch_command());
        let _ = self.command_tx.send(command);
    }

    /// Issues the first fetch for the active view if it has never loaded.
    pub fn ensure_loaded(&mut self) {
        let loaded = with_active_roster!(self, |roster| roster.loaded());
        if !loaded {
            self.refetch_active();
        }
    }

    pub fn with_active_query<T>(&mut self, f: impl FnOnce(&mut ListQuery) -> T) -> T {
        with_active_roster!(self, |roster| f(&mut roster.query))
    }

    pub fn active_search_active(&mut self) -> bool {
        with_active_roster!(self, |roster| roster.search_active())
    }

    pub fn process_active_roster_event(
        &mut self,
        event: &crossterm::event::Event,
    ) -> Option<RosterAction> {
        with_active_roster!(self, |roster| roster.process_event(event))
    }

    pub fn poll_active_search(&mut self, now: Instant) -> bool {
        with_active_roster!(self, |roster| roster.poll_search(now))
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    env_logger::init();

    let config = config::load_config();

    let (command_tx, command_rx) = mpsc::channel();

    let mut app = App::new(config, command_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, command_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&theme::Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A command worker to process asynchronous [`AppCommand`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes (the tick also drives
///   search debouncing).
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_rx: Receiver<AppCommand>,
) -> Result<()> {
    // Spawn a background worker to process application commands asynchronously.
    let command_event_tx = app.event_tx.clone();
    actions::commands::spawn_command_worker(&app.config, command_rx, command_event_tx);

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial fetch for the view shown at startup.
    app.ensure_loaded();

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
