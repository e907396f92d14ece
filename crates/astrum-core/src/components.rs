//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the sim crate, not in components. Which of these an
//! entity carries is decided by its kind's capability set
//! (see [`crate::capabilities`]).

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::types::{EntityId, PlayerId, Position};

/// Every entity: immutable identity and display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
}

/// Physical placement, written by the orbit/placement subsystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub position: Position,
    pub is_movable: bool,
    /// Bounding radius, used for targeting and proximity.
    pub radius: f64,
    /// False while the placement subsystem has the object inactive
    /// (not yet deployed, docked, in transit between scenes).
    pub is_active: bool,
}

/// Liveness of a mortal entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub is_alive: bool,
    /// Tick of death; `Some` exactly when `is_alive` is false.
    pub death_tick: Option<u64>,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            is_alive: true,
            death_tick: None,
        }
    }
}

/// Owning player of an owned entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: PlayerId,
}

/// Combat reach. For commands, the union of their living elements' reach.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Armament {
    pub max_weapons_range: f64,
}

/// Back-reference from an element to its command. A lookup key, not ownership.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Membership {
    pub command: Option<EntityId>,
    pub is_hq: bool,
}

/// Ordered element collection of a command. Insertion order is formation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub elements: Vec<EntityId>,
    pub hq: Option<EntityId>,
}

/// Marks an entity as eligible for a targeting candidate pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetMarker;

/// Marks the galactic center singleton.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CenterMarker;
