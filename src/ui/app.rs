use crate::game::{GameOutcome, MoveEffect, PieceType, Player, RuleConfig, Session, COLS};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::board_widget::BoardGeometry;

/// Terminal front-end settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a finished board stays on screen before the next round
    pub win_pause_ms: u64,
    pub poll_interval_ms: u64,
    pub start_column: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            win_pause_ms: 3000,
            poll_interval_ms: 100,
            start_column: 3,
        }
    }
}

pub struct App {
    session: Session,
    config: UiConfig,
    selected_column: usize,
    geometry: BoardGeometry,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: UiConfig, rules: RuleConfig) -> Self {
        App {
            session: Session::with_rules(rules),
            selected_column: config.start_column.min(COLS - 1),
            config,
            geometry: BoardGeometry::default(),
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| -> io::Error { e.into() })?;

            if self.should_quit {
                break;
            }

            if self.session.is_game_over() {
                self.wait_out_pause()?;
                if self.should_quit {
                    break;
                }
                self.start_next_round();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle terminal events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.config.poll_interval_ms))? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Keep the finished board on screen. Only quit requests get through.
    fn wait_out_pause(&mut self) -> io::Result<()> {
        let deadline = Instant::now() + Duration::from_millis(self.config.win_pause_ms);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            if event::poll(remaining)? {
                let event = event::read()?;
                self.handle_pause_event(event);
                if self.should_quit {
                    return Ok(());
                }
            }
        }
    }

    /// Events read during the round pause are dropped unless they ask to quit.
    fn handle_pause_event(&mut self, event: Event) {
        if pause_event_quits(&event) {
            info!("quit during round pause");
            self.should_quit = true;
        }
    }

    fn start_next_round(&mut self) {
        if self.session.next_round() {
            self.selected_column = self.config.start_column.min(COLS - 1);
            self.message = Some(format!(
                "Round {}: {} starts",
                self.session.round(),
                self.session.current_player().name()
            ));
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if is_quit(&key) {
            self.should_quit = true;
            return;
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.power_shot(self.selected_column);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.select_special(PieceType::TimeBomb);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.select_special(PieceType::Rainbow);
            }
            _ => {}
        }
    }

    /// Pointer x picks the column; y is ignored.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let column = self.geometry.column_at(mouse.column);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some(col) = column {
                    self.selected_column = col;
                }
            }
            MouseEventKind::Down(button) => {
                self.message = None;
                let Some(col) = column else {
                    debug!(x = mouse.column, "click outside the board");
                    return;
                };
                self.selected_column = col;
                match button {
                    MouseButton::Left => self.drop_piece(col),
                    MouseButton::Right => self.power_shot(col),
                    MouseButton::Middle => {}
                }
            }
            _ => {}
        }
    }

    fn select_special(&mut self, piece: PieceType) {
        let player = self.session.current_player();
        if self.session.select_special(player, piece) {
            self.message = Some(format!("{} armed a {}!", player.name(), piece.name()));
        } else {
            self.message = Some("No special piece left this round!".to_string());
        }
    }

    fn drop_piece(&mut self, col: usize) {
        let player = self.session.current_player();
        let effect = self.session.attempt_drop(player, col);
        self.report(player, effect);
    }

    fn power_shot(&mut self, col: usize) {
        let player = self.session.current_player();
        let effect = self.session.attempt_power_shot(player, col);
        self.report(player, effect);
    }

    /// Turn an action's effect into the status message
    fn report(&mut self, player: Player, effect: MoveEffect) {
        debug!(
            player = player.name(),
            completed = effect.is_completed(),
            "input handled"
        );

        let pause_secs = self.config.win_pause_ms.div_ceil(1000);
        if let Some(outcome) = effect.outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner(winner) => {
                    format!("{} wins!! Next round in {pause_secs}s", winner.name())
                }
                GameOutcome::Draw => format!("It's a draw! Next round in {pause_secs}s"),
            });
            return;
        }

        self.message = match effect {
            MoveEffect::Rejected(rejection) => Some(rejection.describe().to_string()),
            MoveEffect::PowerShot { col, victim, .. } => Some(format!(
                "{} blasted {}'s piece out of column {}!",
                player.name(),
                victim.name(),
                col + 1
            )),
            MoveEffect::Dropped {
                piece: PieceType::TimeBomb,
                col,
                ..
            } => Some(format!(
                "{}'s time bomb went off in column {}!",
                player.name(),
                col + 1
            )),
            MoveEffect::Dropped { .. } => None,
        };
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        self.geometry =
            super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}

fn pause_event_quits(event: &Event) -> bool {
    matches!(event, Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(key))
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

impl Default for App {
    fn default() -> Self {
        Self::new(UiConfig::default(), RuleConfig::default())
    }
}
