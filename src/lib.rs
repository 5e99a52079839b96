//! # Power Connect Four
//!
//! Two-player Connect Four with house rules: a once-per-round power shot that
//! knocks the opponent's top piece out of a column, and special pieces (a time
//! bomb that clears its 3x3 neighbourhood, and a rainbow piece). Played in the
//! terminal with the mouse or keyboard through a Ratatui UI.
//!
//! ## Modules
//!
//! - [`game`]: Board engine, players, and the turn/session controller
//! - [`ui`]: Terminal UI: board rendering, input mapping, post-round pause
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: File-backed tracing setup
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
