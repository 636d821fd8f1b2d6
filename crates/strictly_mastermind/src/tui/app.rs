//! Application state: which screen is shown and what the user is typing.
//!
//! The app never touches the game session. It turns key actions into
//! [`Intent`]s for the controller and reads a [`ControllerSnapshot`] to
//! decide what the keys mean.

use derive_getters::Getters;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument};

use super::input::Action;
use crate::game::{CODE_LENGTH, ControllerSnapshot, ViewStage};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Main menu.
    #[default]
    MainMenu,
    /// The game screen; what it shows follows the controller stage.
    Game,
    /// Rules.
    Help,
}

/// Entries on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MenuOption {
    /// Open the game screen.
    #[strum(to_string = "Start Game")]
    StartGame,
    /// Open the rules.
    #[strum(to_string = "Help")]
    Help,
    /// Quit.
    #[strum(to_string = "Exit")]
    Exit,
}

/// Something the controller has to do on the user's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Create a remote game.
    Start,
    /// Submit the given raw guess.
    SubmitGuess(String),
    /// Leave the current game.
    Abandon,
    /// Clear a finished game.
    Reset,
}

/// Main application state.
#[derive(Debug, Default, Getters)]
pub struct App {
    /// Screen being shown.
    screen: Screen,
    /// Highlighted main menu row.
    menu_index: usize,
    /// Guess being typed. Kept after a failed submit and cleared once the
    /// controller records a scored attempt.
    draft: String,
    /// Attempt count in the last snapshot seen by [`App::sync`].
    #[getter(skip)]
    attempts_seen: usize,
    /// Set once the user asked to exit.
    should_quit: bool,
}

impl App {
    /// Creates the app on the main menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// The highlighted menu entry.
    pub fn selected_option(&self) -> MenuOption {
        MenuOption::iter()
            .nth(self.menu_index)
            .unwrap_or(MenuOption::StartGame)
    }

    /// Catches up with a new controller snapshot.
    ///
    /// The draft is cleared only when the session gains or loses attempts,
    /// so a guess that failed validation or was lost to a remote error stays
    /// editable.
    pub fn sync(&mut self, snapshot: &ControllerSnapshot) {
        let attempts = snapshot.session().attempts().len();
        if attempts != self.attempts_seen {
            debug!(attempts, "Session attempts changed, clearing draft");
            self.draft.clear();
            self.attempts_seen = attempts;
        }
    }

    /// Handles one action given the controller's current snapshot.
    #[instrument(skip(self, snapshot), fields(screen = ?self.screen))]
    pub fn handle_action(&mut self, action: Action, snapshot: &ControllerSnapshot) -> Option<Intent> {
        if action == Action::Quit {
            info!("Quit requested");
            self.should_quit = true;
            return None;
        }
        match self.screen {
            Screen::MainMenu => self.handle_menu(action),
            Screen::Help => {
                if matches!(action, Action::Back | Action::Select | Action::Char('q')) {
                    self.screen = Screen::MainMenu;
                }
                None
            }
            Screen::Game => self.handle_game(action, snapshot),
        }
    }

    fn handle_menu(&mut self, action: Action) -> Option<Intent> {
        let count = MenuOption::iter().count();
        match action {
            Action::Up => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            Action::Down => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            Action::Select => match self.selected_option() {
                MenuOption::StartGame => {
                    debug!("Opening game screen");
                    self.draft.clear();
                    self.screen = Screen::Game;
                }
                MenuOption::Help => self.screen = Screen::Help,
                MenuOption::Exit => self.should_quit = true,
            },
            Action::Char('q') | Action::Back => self.should_quit = true,
            _ => {}
        }
        None
    }

    fn handle_game(&mut self, action: Action, snapshot: &ControllerSnapshot) -> Option<Intent> {
        match snapshot.view_stage() {
            ViewStage::PreGame => match action {
                Action::Select if !snapshot.stage().is_busy() => Some(Intent::Start),
                Action::Back => self.leave_game(Intent::Abandon),
                _ => None,
            },
            ViewStage::InGameWaiting | ViewStage::InGameBusy => match action {
                Action::Char(c) if c.is_ascii_digit() => {
                    if self.draft.chars().count() < CODE_LENGTH {
                        self.draft.push(c);
                    }
                    None
                }
                Action::Backspace => {
                    self.draft.pop();
                    None
                }
                Action::Select if snapshot.view_stage() == ViewStage::InGameWaiting => {
                    Some(Intent::SubmitGuess(self.draft.clone()))
                }
                Action::Back => self.leave_game(Intent::Abandon),
                _ => None,
            },
            ViewStage::Finished => match action {
                Action::Select | Action::Char('r') => Some(Intent::Reset),
                Action::Back => self.leave_game(Intent::Reset),
                _ => None,
            },
        }
    }

    fn leave_game(&mut self, intent: Intent) -> Option<Intent> {
        debug!(?intent, "Leaving game screen");
        self.draft.clear();
        self.screen = Screen::MainMenu;
        Some(intent)
    }
}
