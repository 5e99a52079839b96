//! Core game logic: the board engine with its special-piece effects, player
//! identities, and the session controller that sequences turns and rounds.

mod board;
mod player;
mod session;

pub use board::{Board, Cell, PieceType, COLS, ROWS};
pub use player::Player;
pub use session::{
    GameOutcome, MoveEffect, PlayerState, Rejection, RoundSummary, RuleConfig, Session,
};
