//! Headless runner for ASTRUM: drives the engine on its own thread and
//! exposes the published snapshots to readers.

pub mod game_loop;
pub mod state;
