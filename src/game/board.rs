use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }
}

/// Selects what a drop does. The board never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceType {
    #[default]
    Normal,
    TimeBomb,
    Rainbow,
}

impl PieceType {
    pub fn name(self) -> &'static str {
        match self {
            PieceType::Normal => "Normal",
            PieceType::TimeBomb => "Time Bomb",
            PieceType::Rainbow => "Rainbow",
        }
    }
}

/// 6x7 grid. Row 0 is the bottom row; pieces fill upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// True iff the top row of `col` is empty. Out-of-range columns are never valid.
    pub fn is_valid_location(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col] == Cell::Empty
    }

    /// Lowest empty row in `col`, scanning bottom-up
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Highest occupied row in `col`, scanning top-down
    pub fn top_occupied_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] != Cell::Empty)
    }

    /// Apply a drop at (row, col).
    ///
    /// Normal and rainbow pieces claim the cell for `owner`. A time bomb places
    /// nothing: it empties the 3x3 neighbourhood around (row, col), clamped to
    /// the grid.
    pub fn place(&mut self, row: usize, col: usize, owner: Player, piece: PieceType) {
        match piece {
            PieceType::Normal | PieceType::Rainbow => {
                self.cells[row][col] = owner.to_cell();
            }
            PieceType::TimeBomb => {
                let rows = row.saturating_sub(1)..=(row + 1).min(ROWS - 1);
                for r in rows {
                    let cols = col.saturating_sub(1)..=(col + 1).min(COLS - 1);
                    for c in cols {
                        self.cells[r][c] = Cell::Empty;
                    }
                }
            }
        }
    }

    /// Empty a single cell
    pub fn remove(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// True when no column accepts another drop
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_valid_location(col))
    }

    /// Check whether `owner` has four in a row anywhere on the board
    pub fn check_win(&self, owner: Player) -> bool {
        let cell = owner.to_cell();

        self.check_horizontal(cell)
            || self.check_vertical(cell)
            || self.check_diagonal_up(cell)
            || self.check_diagonal_down(cell)
    }

    fn check_horizontal(&self, cell: Cell) -> bool {
        (0..ROWS).any(|r| (0..COLS - 3).any(|c| (0..4).all(|i| self.cells[r][c + i] == cell)))
    }

    fn check_vertical(&self, cell: Cell) -> bool {
        (0..ROWS - 3).any(|r| (0..COLS).any(|c| (0..4).all(|i| self.cells[r + i][c] == cell)))
    }

    /// Bottom-left to top-right, /
    fn check_diagonal_up(&self, cell: Cell) -> bool {
        (0..ROWS - 3).any(|r| {
            (0..COLS - 3).any(|c| (0..4).all(|i| self.cells[r + i][c + i] == cell))
        })
    }

    /// Top-left to bottom-right, \
    fn check_diagonal_down(&self, cell: Cell) -> bool {
        (3..ROWS).any(|r| {
            (0..COLS - 3).any(|c| (0..4).all(|i| self.cells[r - i][c + i] == cell))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drop a normal piece the way the controller does
    fn drop_normal(board: &mut Board, col: usize, owner: Player) -> usize {
        let row = board.next_open_row(col).unwrap();
        board.place(row, col, owner, PieceType::Normal);
        row
    }

    fn occupied_cells(board: &Board) -> Vec<(usize, usize, Cell)> {
        let mut cells = Vec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                if board.get(row, col) != Cell::Empty {
                    cells.push((row, col, board.get(row, col)));
                }
            }
        }
        cells
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_pieces_stack_from_bottom() {
        let mut board = Board::new();

        assert_eq!(drop_normal(&mut board, 3, Player::One), 0);
        assert_eq!(board.get(0, 3), Cell::PlayerOne);

        assert_eq!(drop_normal(&mut board, 3, Player::Two), 1);
        assert_eq!(board.get(1, 3), Cell::PlayerTwo);
    }

    #[test]
    fn test_valid_location_until_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            assert!(board.is_valid_location(0));
            drop_normal(&mut board, 0, Player::One);
        }
        assert!(!board.is_valid_location(0));
        assert_eq!(board.next_open_row(0), None);
        assert!(board.is_valid_location(1));
    }

    #[test]
    fn test_out_of_range_column_is_rejected() {
        let board = Board::new();
        assert!(!board.is_valid_location(COLS));
        assert_eq!(board.next_open_row(COLS), None);
        assert_eq!(board.top_occupied_row(COLS), None);
    }

    #[test]
    fn test_next_open_row_finds_lowest_gap() {
        let mut board = Board::new();
        for _ in 0..4 {
            drop_normal(&mut board, 2, Player::Two);
        }
        board.remove(1, 2);
        assert_eq!(board.next_open_row(2), Some(1));
    }

    #[test]
    fn test_top_occupied_row() {
        let mut board = Board::new();
        assert_eq!(board.top_occupied_row(4), None);

        drop_normal(&mut board, 4, Player::One);
        drop_normal(&mut board, 4, Player::Two);
        assert_eq!(board.top_occupied_row(4), Some(1));
    }

    #[test]
    fn test_place_normal_touches_only_its_cell() {
        let mut board = Board::new();
        drop_normal(&mut board, 1, Player::Two);

        board.place(0, 5, Player::One, PieceType::Normal);

        assert_eq!(
            occupied_cells(&board),
            vec![(0, 1, Cell::PlayerTwo), (0, 5, Cell::PlayerOne)]
        );
    }

    #[test]
    fn test_rainbow_places_like_normal() {
        let mut board = Board::new();
        board.place(0, 6, Player::Two, PieceType::Rainbow);
        assert_eq!(occupied_cells(&board), vec![(0, 6, Cell::PlayerTwo)]);
    }

    #[test]
    fn test_time_bomb_clears_neighbourhood_only() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..5 {
                drop_normal(&mut board, col, Player::One);
            }
        }

        board.place(2, 3, Player::Two, PieceType::TimeBomb);

        for row in 0..ROWS {
            for col in 0..COLS {
                let inside = (1..=3).contains(&row) && (2..=4).contains(&col);
                let expected = if inside || row == 5 {
                    Cell::Empty
                } else {
                    Cell::PlayerOne
                };
                assert_eq!(board.get(row, col), expected, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_time_bomb_clamps_at_corner() {
        let mut board = Board::new();
        drop_normal(&mut board, 0, Player::One);
        drop_normal(&mut board, 1, Player::Two);
        drop_normal(&mut board, 2, Player::One);

        board.place(1, 0, Player::Two, PieceType::TimeBomb);

        assert_eq!(occupied_cells(&board), vec![(0, 2, Cell::PlayerOne)]);
    }

    #[test]
    fn test_time_bomb_clamps_at_top_right_corner() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                let owner = if col % 2 == 0 { Player::One } else { Player::Two };
                drop_normal(&mut board, col, owner);
            }
        }
        let before = board;

        board.place(ROWS - 1, COLS - 1, Player::One, PieceType::TimeBomb);

        for row in 0..ROWS {
            for col in 0..COLS {
                if row >= ROWS - 2 && col >= COLS - 2 {
                    assert_eq!(board.get(row, col), Cell::Empty, "cell ({row}, {col})");
                } else {
                    assert_eq!(board.get(row, col), before.get(row, col), "cell ({row}, {col})");
                }
            }
        }

        // Cleared columns refill from the lowest gap
        assert_eq!(board.next_open_row(COLS - 1), Some(ROWS - 2));
        assert_eq!(drop_normal(&mut board, COLS - 2, Player::Two), ROWS - 2);
    }

    #[test]
    fn test_time_bomb_does_not_place_the_piece() {
        let mut board = Board::new();
        board.place(0, 3, Player::One, PieceType::TimeBomb);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_then_remove_restores_board() {
        let mut board = Board::new();
        drop_normal(&mut board, 2, Player::Two);
        let before = board;

        let row = drop_normal(&mut board, 4, Player::One);
        board.remove(row, 4);

        assert_eq!(board, before);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                drop_normal(&mut board, col, Player::One);
            }
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            drop_normal(&mut board, col, Player::One);
        }
        assert!(board.check_win(Player::One));
        assert!(!board.check_win(Player::Two));
    }

    #[test]
    fn test_horizontal_win_at_right_edge() {
        let mut board = Board::new();
        for col in 3..COLS {
            board.place(5, col, Player::Two, PieceType::Normal);
        }
        assert!(board.check_win(Player::Two));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            drop_normal(&mut board, 6, Player::Two);
        }
        assert!(board.check_win(Player::Two));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // / from (0, 0) to (3, 3)
        drop_normal(&mut board, 0, Player::One);

        drop_normal(&mut board, 1, Player::Two);
        drop_normal(&mut board, 1, Player::One);

        drop_normal(&mut board, 2, Player::Two);
        drop_normal(&mut board, 2, Player::Two);
        drop_normal(&mut board, 2, Player::One);

        drop_normal(&mut board, 3, Player::Two);
        drop_normal(&mut board, 3, Player::Two);
        drop_normal(&mut board, 3, Player::Two);
        assert!(!board.check_win(Player::One));
        drop_normal(&mut board, 3, Player::One);

        assert!(board.check_win(Player::One));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // \ from (5, 3) to (2, 6), top corner of the grid
        for i in 0..4 {
            board.place(5 - i, 3 + i, Player::Two, PieceType::Normal);
        }
        assert!(board.check_win(Player::Two));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            drop_normal(&mut board, col, Player::One);
        }
        for _ in 0..3 {
            drop_normal(&mut board, 5, Player::One);
        }
        assert!(!board.check_win(Player::One));
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.place(0, col, Player::One, PieceType::Normal);
        }
        board.place(0, 2, Player::Two, PieceType::Normal);
        assert!(!board.check_win(Player::One));
    }

    #[test]
    fn test_cell_owner() {
        assert_eq!(Cell::Empty.owner(), None);
        assert_eq!(Cell::PlayerOne.owner(), Some(Player::One));
        assert_eq!(Cell::PlayerTwo.owner(), Some(Player::Two));
    }
}
