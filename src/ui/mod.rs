//! Terminal UI: renders the session with Ratatui and turns mouse clicks and
//! key presses into session actions.

mod app;
pub mod board_widget;
mod game_view;

pub use app::{App, UiConfig};
