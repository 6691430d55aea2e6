use crate::core::game::{Context, Game};
use crate::games::guess::session::{Feedback, Session, Status};
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Longest guess the input box accepts
const MAX_INPUT_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessAction {
    TogglePause,
    TryAgain,
    Reveal,
    Submit(String),
}

/// Text shown under the controls for the current session state
pub fn feedback_message<R: Rng>(session: &Session<R>) -> Option<String> {
    match (session.status(), session.last_feedback()) {
        (Status::Won, _) => Some(format!(
            "Congratulations! You guessed it in {} attempts!",
            session.attempts()
        )),
        (Status::Active, Feedback::None) => Some("Make a guess!".into()),
        (Status::Active, Feedback::TooLow) => Some("Too low! Try a higher number.".into()),
        (Status::Active, Feedback::TooHigh) => Some("Too high! Try a lower number.".into()),
        (Status::Active, Feedback::Correct) => None,
        (Status::Idle, _) if session.is_paused() => Some("Paused.".into()),
        (Status::Idle, _) => None,
    }
}

/// Terminal front end for the number guessing game
#[derive(Default)]
pub struct GuessGame {
    input: String,
    notice: Option<String>,
    /// Mirrors whether the last applied action left the round active
    accepting: bool,
}

impl GuessGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl Game for GuessGame {
    type Action = GuessAction;
    type State = Session;

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Action>) {
        match event.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if self.accepting && self.input.len() < MAX_INPUT_LEN {
                    self.input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => ctx.send_action(GuessAction::Submit(std::mem::take(&mut self.input))),
            KeyCode::Char(' ') | KeyCode::Char('p') => ctx.send_action(GuessAction::TogglePause),
            KeyCode::Char('r') => ctx.send_action(GuessAction::TryAgain),
            KeyCode::Char('a') => ctx.send_action(GuessAction::Reveal),
            _ => {}
        }
    }

    fn handle_action(&mut self, action: Self::Action, state: &mut Self::State) {
        self.notice = None;
        match action {
            GuessAction::Submit(text) => {
                if let Err(e) = state.guess_input(&text) {
                    self.notice = Some(e.to_string());
                }
            }
            GuessAction::TogglePause => {
                self.input.clear();
                state.toggle_pause();
            }
            GuessAction::TryAgain => {
                self.input.clear();
                state.try_again();
            }
            GuessAction::Reveal => {
                state.reveal();
            }
        }
        self.accepting = state.status() == Status::Active;
        if !self.accepting {
            self.input.clear();
        }
    }

    fn is_quit(&self, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc | KeyCode::Char('q'))
    }

    fn render(&self, frame: &mut Frame, state: &Self::State) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(frame.area());

        frame.render_widget(
            Paragraph::new(" NUMBER GUESSING GAME ")
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            chunks[0],
        );

        let play_label = if state.status() == Status::Active { "[Space] Pause" } else { "[Space] Start" };
        frame.render_widget(
            Paragraph::new(format!("{play_label}  [R] Try Again  [Q] Quit")).alignment(Alignment::Center),
            chunks[1],
        );

        if state.status() == Status::Active {
            let (lo, hi) = (state.range().start(), state.range().end());
            frame.render_widget(
                Paragraph::new(format!(" > {}", self.input))
                    .block(Block::default().title(format!(" Enter your guess ({lo}-{hi}) ")).borders(Borders::ALL)),
                chunks[2],
            );
        }

        let mut lines = Vec::new();
        if let Some(message) = feedback_message(state) {
            let color = match state.status() {
                Status::Won => Color::Green,
                _ => Color::Cyan,
            };
            lines.push(Line::from(Span::styled(
                message,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(notice) = &self.notice {
            lines.push(Line::from(Span::styled(notice.clone(), Style::default().fg(Color::Red))));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[3]);

        let mut footer = format!("Attempts: {}", state.attempts());
        if state.can_reveal() && !state.answer_revealed() {
            footer.push_str("    [A] See Answer");
        }
        frame.render_widget(Paragraph::new(footer), chunks[4]);

        if state.answer_revealed() {
            if let Some(target) = state.target() {
                frame.render_widget(
                    Paragraph::new(format!("The number was: {target}"))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                        .alignment(Alignment::Center),
                    chunks[5],
                );
            }
        }
    }
}
