use crate::game::{Board, PieceType, Player, COLS, ROWS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 3;
/// Left frame, grid, right frame: "  ║" + cells + " ║".
const FRAME_LEFT: u16 = 3;
const BOARD_WIDTH: u16 = FRAME_LEFT + CELL_WIDTH * COLS as u16 + 2;
/// Hover row, column numbers, top border, rows, bottom border.
pub const BOARD_HEIGHT: u16 = ROWS as u16 + 4;

/// Where the grid landed on screen, used to turn pointer positions into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    grid_left: u16,
}

impl BoardGeometry {
    /// Geometry of a board centred horizontally in `area`
    pub fn centered_in(area: Rect) -> Self {
        let board_left = area.x + area.width.saturating_sub(BOARD_WIDTH) / 2;
        BoardGeometry {
            grid_left: board_left + FRAME_LEFT,
        }
    }

    /// Column under terminal x position `x`, or `None` when outside the grid
    pub fn column_at(&self, x: u16) -> Option<usize> {
        let offset = x.checked_sub(self.grid_left)?;
        let col = usize::from(offset / CELL_WIDTH);
        (col < COLS).then_some(col)
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        BoardGeometry::centered_in(Rect::new(0, 0, BOARD_WIDTH, BOARD_HEIGHT))
    }
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

pub fn piece_symbol(piece: PieceType) -> &'static str {
    match piece {
        PieceType::Normal => " ● ",
        PieceType::TimeBomb => " ✹ ",
        PieceType::Rainbow => " ◆ ",
    }
}

/// Render the board with the pending piece hovering over `selected_column`.
///
/// Row 0 is the bottom of the board, so rows are drawn top-down from `ROWS - 1`.
/// Returns the geometry needed to map pointer positions back to columns.
pub fn render_board(
    frame: &mut Frame,
    board: &Board,
    selected_column: usize,
    hover: Option<(Player, PieceType)>,
    area: Rect,
) -> BoardGeometry {
    let geometry = BoardGeometry::centered_in(area);
    let mut lines = Vec::new();

    let mut hover_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        match hover {
            Some((player, piece)) if col == selected_column => {
                hover_line.push(Span::styled(
                    piece_symbol(piece),
                    Style::default()
                        .fg(player_color(player))
                        .add_modifier(Modifier::BOLD),
                ));
            }
            _ => hover_line.push(Span::raw("   ")),
        }
    }
    lines.push(Line::from(hover_line));

    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let span = match board.get(row, col).owner() {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(owner) => Span::styled(
                    piece_symbol(PieceType::Normal),
                    Style::default().fg(player_color(owner)),
                ),
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let board_area = Rect {
        x: geometry.grid_left - FRAME_LEFT,
        width: BOARD_WIDTH.min(area.width),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), board_area);

    geometry
}
