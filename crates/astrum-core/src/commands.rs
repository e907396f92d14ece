//! Inputs from external collaborators, applied at the next tick boundary.
//!
//! The core validates capability and liveness preconditions of orders;
//! executing them (pathing, firing, repairs) belongs to other subsystems.

use serde::{Deserialize, Serialize};

use crate::enums::IntelCoverage;
use crate::types::{EntityId, PlayerId, Position, SimTime};

/// Orders the AI or a player may issue to an element or command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Order {
    Move { destination: Position },
    Attack { target: EntityId },
    Patrol { destination: Position },
    Guard { target: EntityId },
    Repair,
    Refit,
    Disband,
}

impl Order {
    /// Whether the subject must be combat capable to receive this order.
    pub fn requires_combat(&self) -> bool {
        matches!(self, Order::Attack { .. } | Order::Guard { .. })
    }

    /// Whether the subject must be movable.
    pub fn requires_mobility(&self) -> bool {
        matches!(self, Order::Move { .. } | Order::Patrol { .. })
    }
}

/// All inputs the tick loop accepts from outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimInput {
    /// Sensor subsystem: direct contact by `faction` at `level`.
    Observe {
        entity: EntityId,
        faction: PlayerId,
        level: IntelCoverage,
        at: SimTime,
    },
    /// Placement subsystem: latest position and activation flag.
    Place {
        entity: EntityId,
        position: Position,
        is_active: bool,
    },
    /// Order subsystem: an order for validation.
    Issue {
        issuer: PlayerId,
        subject: EntityId,
        order: Order,
    },
}
