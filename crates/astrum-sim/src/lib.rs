//! Simulation core for ASTRUM.
//!
//! Owns the hecs world behind an entity registry, enforces the lifecycle,
//! composition and intel contracts, resolves targets, and produces
//! `GalaxySnapshot`s and per-faction views.

pub mod composition;
pub mod engine;
pub mod item;
pub mod lifecycle;
pub mod observation;
pub mod orders;
pub mod registry;
pub mod systems;
pub mod targeting;
pub mod world_setup;

pub use astrum_core as core;
pub use engine::{SimConfig, SimulationEngine, SnapshotHandle};
pub use item::Item;
pub use registry::Registry;
