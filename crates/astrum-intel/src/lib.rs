//! Intel bookkeeping for ASTRUM.
//!
//! Tracks, per observed entity and per observing faction, the coverage last
//! confirmed by direct observation (with its timestamp) and the current
//! best estimate, which decays as the confirmation grows stale.
//! No ECS dependency; the sim crate attaches [`IntelRecord`] as a component.

pub mod policy;
pub mod record;

pub use astrum_core as core;
pub use policy::{DecayPolicy, EngagementPolicy, IntelConfig, IntelConfigError};
pub use record::{CoverageChange, IntelRecord};

#[cfg(test)]
mod tests;
