//! Core types and definitions for the ASTRUM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identities, capability traits and kind markers, plain-data components,
//! orders, outbox events, snapshot views, errors, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod capabilities;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::ContractViolation;

#[cfg(test)]
mod tests;
