//! Terminal UI for the Mastermind client.

mod app;
mod input;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::task::JoinSet;
use tokio::time::{Duration, timeout};
use tracing::{debug, error, info, instrument, warn};

pub use app::{App, Intent, MenuOption, Screen};
pub use input::{Action, map_key};
pub use ui::{HELP_LINES, draw};

use crate::config::ClientConfig;
use crate::game::{GameSessionController, IntentOutcome, RemoteGameService, Stage};
use crate::http_client::HttpGameClient;

/// Upper bound on exit-time cleanup once the terminal has been restored.
pub const EXIT_CLEANUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs the TUI against the configured server until the user quits.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
pub async fn run_tui(config: &ClientConfig) -> Result<()> {
    info!("Starting Mastermind TUI");

    let controller = Arc::new(GameSessionController::new(HttpGameClient::new(
        config.server_url(),
    )));
    let mut dispatcher = Dispatcher::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut dispatcher).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    dispatcher.shutdown(EXIT_CLEANUP_TIMEOUT).await;
    info!("Mastermind TUI stopped");
    res
}

/// Event loop: draw the latest snapshot, map keys, dispatch intents.
///
/// Returns once the user quits. Leaving the game is up to
/// [`Dispatcher::shutdown`], so the caller can restore the terminal first.
pub async fn run_app<B, S>(
    terminal: &mut Terminal<B>,
    dispatcher: &mut Dispatcher<S>,
) -> Result<()>
where
    B: Backend,
    <B as Backend>::Error: Send + Sync + 'static,
    S: RemoteGameService + 'static,
{
    let mut app = App::new();
    let mut updates = dispatcher.controller().subscribe();

    loop {
        let snapshot = updates.borrow_and_update().clone();
        app.sync(&snapshot);
        terminal.draw(|f| draw(f, &app, &snapshot))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && let Some(action) = map_key(key)
            && let Some(intent) = app.handle_action(action, &snapshot)
        {
            dispatcher.dispatch(intent);
        }

        if *app.should_quit() {
            return Ok(());
        }
    }
}

/// Forwards intents to the controller without blocking the render loop and
/// keeps track of the tasks it spawns.
pub struct Dispatcher<S> {
    controller: Arc<GameSessionController<S>>,
    tasks: JoinSet<IntentOutcome>,
}

impl<S> Dispatcher<S>
where
    S: RemoteGameService + 'static,
{
    /// Creates a dispatcher for the given controller.
    pub fn new(controller: Arc<GameSessionController<S>>) -> Self {
        Self {
            controller,
            tasks: JoinSet::new(),
        }
    }

    /// The controller intents are sent to.
    pub fn controller(&self) -> &Arc<GameSessionController<S>> {
        &self.controller
    }

    /// Number of intent tasks that have not been reaped yet.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Runs an intent. `Reset` is applied inline; everything else is spawned.
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "Dispatching intent");
        while let Some(done) = self.tasks.try_join_next() {
            if let Err(e) = done {
                warn!(error = %e, "Intent task failed");
            }
        }

        if intent == Intent::Reset {
            self.controller.reset();
            return;
        }

        let controller = Arc::clone(&self.controller);
        self.tasks.spawn(async move {
            let outcome = match intent {
                Intent::Start => controller.start_game().await,
                Intent::SubmitGuess(raw) => controller.submit_guess(&raw).await,
                Intent::Abandon => controller.abandon().await,
                Intent::Reset => controller.reset(),
            };
            debug!(%outcome, "Intent finished");
            outcome
        });
    }

    /// Leaves any unfinished game and waits for outstanding intent tasks,
    /// giving up after `limit`.
    ///
    /// Abandoning first turns in-flight responses stale, so a game created
    /// while quitting is deleted by its own task. Whatever is still running
    /// when `limit` elapses is aborted.
    #[instrument(skip(self), fields(pending = self.tasks.len()))]
    pub async fn shutdown(mut self, limit: Duration) {
        let controller = Arc::clone(&self.controller);
        let cleanup = async {
            if controller.stage() != Stage::Finished {
                controller.abandon().await;
            }
            while let Some(done) = self.tasks.join_next().await {
                if let Err(e) = done {
                    warn!(error = %e, "Intent task failed");
                }
            }
        };

        if timeout(limit, cleanup).await.is_err() {
            warn!(?limit, "Exit cleanup timed out");
            self.tasks.abort_all();
        }
    }
}
