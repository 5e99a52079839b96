use crate::game::{GameOutcome, PieceType, Player, Session};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{self, BoardGeometry, BOARD_HEIGHT};

/// Draw the whole game screen and return where the board ended up.
pub fn render(
    frame: &mut Frame,
    session: &Session,
    selected_column: usize,
    message: &Option<String>,
) -> BoardGeometry {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Length(4),         // Player status
            Constraint::Min(BOARD_HEIGHT), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(4),         // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_status(frame, session, chunks[1]);

    // No pending piece while the finished board is on display
    let hover = (!session.is_game_over()).then(|| {
        let player = session.current_player();
        (player, armed_piece(session, player))
    });
    let geometry =
        board_widget::render_board(frame, session.board(), selected_column, hover, chunks[2]);

    render_message(frame, message, chunks[3]);
    render_controls(frame, chunks[4]);

    geometry
}

/// Piece the player would drop next
fn armed_piece(session: &Session, player: Player) -> PieceType {
    let state = session.player(player);
    if state.special_available {
        state.selected_special
    } else {
        PieceType::Normal
    }
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let (status, color) = match session.last_round() {
        Some(summary) if session.is_game_over() => match summary.outcome {
            GameOutcome::Winner(player) => (
                format!("Round {}  |  {} wins!!", summary.round, player.name()),
                board_widget::player_color(player),
            ),
            GameOutcome::Draw => (format!("Round {}  |  Draw", summary.round), Color::White),
        },
        _ => {
            let player = session.current_player();
            (
                format!("Round {}  |  Current Player: {}", session.round(), player.name()),
                board_widget::player_color(player),
            )
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Power Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_status(frame: &mut Frame, session: &Session, area: Rect) {
    let lines: Vec<Line> = Player::ALL
        .iter()
        .map(|&player| status_line(session, player))
        .collect();

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Players"));

    frame.render_widget(status, area);
}

fn status_line(session: &Session, player: Player) -> Line<'static> {
    let state = session.player(player);

    let power_shot = if !session.rules().power_shots {
        "Off"
    } else if state.power_shot_used {
        "Used"
    } else {
        "Available"
    };
    let special = if !session.rules().special_pieces {
        "Off".to_string()
    } else if !state.special_available {
        "Spent".to_string()
    } else if state.selected_special == PieceType::Normal {
        "None".to_string()
    } else {
        format!("{} armed", state.selected_special.name())
    };

    let mut name_style = Style::default().fg(board_widget::player_color(player));
    if player == session.current_player() && !session.is_game_over() {
        name_style = name_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    Line::from(vec![
        Span::styled(format!(" {} ", player.name()), name_style),
        Span::raw(format!("  Score: {}", state.score)),
        Span::styled(
            format!("  |  Power Shot: {power_shot}"),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("  |  Special: {special}"),
            Style::default().fg(Color::LightRed),
        ),
    ])
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("Click: Drop  |  Right-click: Power Shot  |  T: Time Bomb  |  R: Rainbow");
    let line2 = Line::from("←/→: Move  |  Enter: Drop  |  P: Power Shot  |  Q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
