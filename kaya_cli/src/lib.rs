// Terminal front end for Kaya AI: one screen per flow state, drawn with
// ratatui over crossterm.

pub mod components;
pub mod keymap;
pub mod screens;
pub mod theme;
pub mod ui;
