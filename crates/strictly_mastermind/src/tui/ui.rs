//! Stateless rendering of the three screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
};
use strum::IntoEnumIterator;

use super::app::{App, MenuOption, Screen};
use crate::game::{CODE_LENGTH, ControllerSnapshot, Stage, ViewStage};

/// Rules shown on the help screen.
pub const HELP_LINES: &[&str] = &[
    "How to play Mastermind:",
    "• The computer generates a secret 4-digit code",
    "• Each digit is between 1-6",
    "• You have to guess the secret code",
    "",
    "Feedback after each guess:",
    "• Black peg = correct digit in correct position",
    "• White peg = correct digit in wrong position",
    "",
    "Goal: Get 4 black pegs to win!",
];

/// Draws the current screen.
pub fn draw(frame: &mut Frame, app: &App, snapshot: &ControllerSnapshot) {
    match app.screen() {
        Screen::MainMenu => draw_menu(frame, app),
        Screen::Help => draw_help(frame),
        Screen::Game => match snapshot.view_stage() {
            ViewStage::PreGame => draw_pre_game(frame, snapshot),
            ViewStage::InGameWaiting | ViewStage::InGameBusy => {
                draw_in_game(frame, app, snapshot)
            }
            ViewStage::Finished => draw_finished(frame, snapshot),
        },
    }
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
}

fn footer(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn error_line(snapshot: &ControllerSnapshot) -> Line<'static> {
    if snapshot.has_error() {
        Line::from(Span::styled(
            snapshot.error_message().clone(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::default()
    }
}

fn framed(frame: &mut Frame) -> Rect {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn draw_menu(frame: &mut Frame, app: &App) {
    let area = framed(frame);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(title("=== MAIN MENU ==="), chunks[0]);

    let items: Vec<ListItem> = MenuOption::iter()
        .map(|opt| ListItem::new(opt.to_string()))
        .collect();
    let menu = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(*app.menu_index()));
    frame.render_stateful_widget(menu, chunks[1], &mut list_state);

    frame.render_widget(
        footer("↑↓: Navigate | Enter: Select | q: Quit"),
        chunks[2],
    );
}

fn draw_help(frame: &mut Frame) {
    let area = framed(frame);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(title("=== MASTERMIND HELP ==="), chunks[0]);
    let lines: Vec<Line> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();
    frame.render_widget(Paragraph::new(lines), chunks[1]);
    frame.render_widget(footer("Esc: Back to Main Menu"), chunks[2]);
}

fn draw_pre_game(frame: &mut Frame, snapshot: &ControllerSnapshot) {
    let area = framed(frame);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(title("=== NEW MASTERMIND GAME ==="), chunks[0]);

    let gray = Style::default().fg(Color::Gray);
    let action = if *snapshot.stage() == Stage::Creating {
        Line::from(Span::styled(
            "Creating game...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "[Enter] START GAME",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    };
    let body = vec![
        Line::from("Guess the secret 4-digit code!"),
        Line::from(""),
        Line::from(Span::styled(
            "Black pegs = correct digit in correct position",
            gray,
        )),
        Line::from(Span::styled(
            "White pegs = correct digit in wrong position",
            gray,
        )),
        Line::from(""),
        action,
        Line::from(""),
        error_line(snapshot),
    ];
    frame.render_widget(
        Paragraph::new(body).alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(footer("Esc: Back to Menu"), chunks[2]);
}

fn draw_in_game(frame: &mut Frame, app: &App, snapshot: &ControllerSnapshot) {
    let area = framed(frame);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(title("=== MASTERMIND GAME ==="), chunks[0]);

    let rows = snapshot
        .session()
        .attempts()
        .iter()
        .enumerate()
        .map(|(i, attempt)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(attempt.code().clone())
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Cell::from(format!("Black: {}", attempt.exact_matches())),
                Cell::from(format!("White: {}", attempt.partial_matches())),
            ])
        });
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["#", "Guess", "", ""])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Previous Attempts"));
    frame.render_widget(table, chunks[1]);

    let placeholder = "_".repeat(CODE_LENGTH.saturating_sub(app.draft().chars().count()));
    let input = Paragraph::new(Line::from(vec![
        Span::styled(
            app.draft().clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Enter your 4-digit guess"),
    );
    frame.render_widget(input, chunks[2]);

    let status = if snapshot.view_stage() == ViewStage::InGameBusy {
        Line::from(Span::styled(
            "Checking guess...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        error_line(snapshot)
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[3]);

    frame.render_widget(
        footer("0-9: Type | Backspace: Delete | Enter: Submit | Esc: Back to Menu"),
        chunks[4],
    );
}

fn draw_finished(frame: &mut Frame, snapshot: &ControllerSnapshot) {
    let area = framed(frame);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(title("=== GAME FINISHED ==="), chunks[0]);

    let session = snapshot.session();
    let body = match (session.last_attempt(), session.solved_in()) {
        (Some(last), Some(count)) => vec![
            Line::from(Span::styled(
                "CONGRATULATIONS!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("You cracked the code!"),
            Line::from(Span::styled(
                format!("Secret code was: {}", last.code()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("You solved it in {} attempts!", count)),
        ],
        _ => vec![
            Line::from(Span::styled(
                "Game Over",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from("Better luck next time!"),
        ],
    };
    frame.render_widget(
        Paragraph::new(body).alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        footer("Enter / r: Play Again | Esc: Back to Menu"),
        chunks[2],
    );
}
