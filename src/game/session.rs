use tracing::{debug, info};

use super::{Board, PieceType, Player, COLS};

/// House rules that can be switched off from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub power_shots: bool,
    pub special_pieces: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            power_shots: true,
            special_pieces: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Why an input was ignored. Rejections leave the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidColumn,
    ColumnFull,
    RoundOver,
    OutOfTurn,
}

impl Rejection {
    pub fn describe(self) -> &'static str {
        match self {
            Rejection::InvalidColumn => "Invalid column!",
            Rejection::ColumnFull => "Column is full!",
            Rejection::RoundOver => "Round is over!",
            Rejection::OutOfTurn => "Not your turn!",
        }
    }
}

/// What an action did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEffect {
    Rejected(Rejection),
    PowerShot {
        row: usize,
        col: usize,
        victim: Player,
    },
    Dropped {
        row: usize,
        col: usize,
        piece: PieceType,
        outcome: Option<GameOutcome>,
    },
}

impl MoveEffect {
    /// True when the action consumed the turn
    pub fn is_completed(&self) -> bool {
        !matches!(self, MoveEffect::Rejected(_))
    }

    /// Outcome of the round if this action ended it
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self {
            MoveEffect::Dropped { outcome, .. } => *outcome,
            _ => None,
        }
    }
}

/// Per-player state. Scores persist across rounds, the rest is reset by
/// [`Session::next_round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub score: u32,
    pub power_shot_used: bool,
    pub special_available: bool,
    pub selected_special: PieceType,
}

impl PlayerState {
    fn new(rules: &RuleConfig) -> Self {
        PlayerState {
            score: 0,
            power_shot_used: false,
            special_available: rules.special_pieces,
            selected_special: PieceType::Normal,
        }
    }

    fn reset_round(&mut self, rules: &RuleConfig) {
        self.power_shot_used = false;
        self.special_available = rules.special_pieces;
        self.selected_special = PieceType::Normal;
    }

    /// Piece type for the next drop, consuming the special piece if one is armed
    fn take_piece(&mut self) -> PieceType {
        if self.special_available && self.selected_special != PieceType::Normal {
            self.special_available = false;
            std::mem::take(&mut self.selected_special)
        } else {
            PieceType::Normal
        }
    }
}

/// A finished round, kept for display until the next one ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub outcome: GameOutcome,
}

/// One play session: repeated rounds between two players on a shared board.
///
/// All mutation goes through the action methods; presentation code only reads.
/// When a round ends the board is left as-is and the session reports
/// game-over until [`Session::next_round`] is called.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    current_player: Player,
    players: [PlayerState; 2],
    rules: RuleConfig,
    round: u32,
    game_over: bool,
    last_round: Option<RoundSummary>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_rules(RuleConfig::default())
    }

    pub fn with_rules(rules: RuleConfig) -> Self {
        Session {
            board: Board::new(),
            current_player: Player::One,
            players: [PlayerState::new(&rules); 2],
            rules,
            round: 1,
            game_over: false,
            last_round: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// 1-based number of the round in progress
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// Whether `player` can still fire a power shot this round
    pub fn power_shot_available(&self, player: Player) -> bool {
        self.rules.power_shots && !self.player(player).power_shot_used
    }

    /// Arm a special piece for `player`'s next drop. Returns false (and changes
    /// nothing) if the player has no special piece left or the round is over.
    pub fn select_special(&mut self, player: Player, piece: PieceType) -> bool {
        if self.game_over {
            return false;
        }
        let state = &mut self.players[player.index()];
        if !state.special_available {
            debug!(player = player.name(), piece = piece.name(), "special piece not available");
            return false;
        }
        state.selected_special = piece;
        debug!(player = player.name(), piece = piece.name(), "special piece selected");
        true
    }

    /// Remove the opponent's topmost piece in `col`.
    ///
    /// With no shot left, or nothing of the opponent's on top of the column,
    /// the input is handled as a normal drop instead.
    pub fn attempt_power_shot(&mut self, player: Player, col: usize) -> MoveEffect {
        if let Some(rejection) = self.check_action(player, col) {
            return self.reject(player, rejection);
        }

        if self.power_shot_available(player) {
            if let Some(row) = self.board.top_occupied_row(col) {
                if let Some(victim) = self.board.get(row, col).owner().filter(|&v| v != player) {
                    self.board.remove(row, col);
                    self.players[player.index()].power_shot_used = true;
                    info!(player = player.name(), row, col, "power shot");
                    self.current_player = self.current_player.other();
                    return MoveEffect::PowerShot { row, col, victim };
                }
            }
        }

        debug!(player = player.name(), col, "no power shot target, dropping instead");
        self.attempt_drop(player, col)
    }

    /// Drop `player`'s piece (or armed special) into `col` and resolve the round.
    pub fn attempt_drop(&mut self, player: Player, col: usize) -> MoveEffect {
        if let Some(rejection) = self.check_action(player, col) {
            return self.reject(player, rejection);
        }
        if !self.board.is_valid_location(col) {
            return self.reject(player, Rejection::ColumnFull);
        }
        let Some(row) = self.board.next_open_row(col) else {
            return self.reject(player, Rejection::ColumnFull);
        };

        let piece = self.players[player.index()].take_piece();
        self.board.place(row, col, player, piece);
        debug!(player = player.name(), row, col, piece = piece.name(), "piece dropped");

        let outcome = if self.board.check_win(player) {
            Some(GameOutcome::Winner(player))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.finish_round(outcome);
        }

        self.current_player = self.current_player.other();

        MoveEffect::Dropped {
            row,
            col,
            piece,
            outcome,
        }
    }

    /// Start the next round after a finished one: empty board, power shots and
    /// special pieces handed out again. Returns false if no round has ended.
    pub fn next_round(&mut self) -> bool {
        if !self.game_over {
            return false;
        }
        self.board = Board::new();
        for state in &mut self.players {
            state.reset_round(&self.rules);
        }
        self.round += 1;
        self.game_over = false;
        info!(round = self.round, "new round");
        true
    }

    fn finish_round(&mut self, outcome: GameOutcome) {
        if let GameOutcome::Winner(player) = outcome {
            self.players[player.index()].score += 1;
            info!(
                winner = player.name(),
                round = self.round,
                score_one = self.players[0].score,
                score_two = self.players[1].score,
                "round won"
            );
        } else {
            info!(round = self.round, "round drawn");
        }
        self.game_over = true;
        self.last_round = Some(RoundSummary {
            round: self.round,
            outcome,
        });
    }

    fn check_action(&self, player: Player, col: usize) -> Option<Rejection> {
        if self.game_over {
            Some(Rejection::RoundOver)
        } else if player != self.current_player {
            Some(Rejection::OutOfTurn)
        } else if col >= COLS {
            Some(Rejection::InvalidColumn)
        } else {
            None
        }
    }

    fn reject(&self, player: Player, rejection: Rejection) -> MoveEffect {
        debug!(player = player.name(), ?rejection, "action rejected");
        MoveEffect::Rejected(rejection)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
