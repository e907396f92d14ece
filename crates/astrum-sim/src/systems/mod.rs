//! Systems that run over the registry each tick.
//!
//! Systems are functions over the world (or registry); they hold no state
//! of their own. All state lives in components.

pub mod alert;
pub mod cleanup;
pub mod intel_decay;
pub mod snapshot;
