//! Snapshot views: the read-facing Item facade of the simulation.
//!
//! Snapshots are built after a tick completes, so every multi-field read
//! (coverage together with its timestamp, roster together with its HQ)
//! belongs to a single tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{AlertStatus, CommandStatus, EntityKind, IntelCoverage};
use crate::events::SimEvent;
use crate::types::{CoverageReading, EntityId, PlayerId, Position, SectorIndex, SimTime};

/// Complete authoritative state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalaxySnapshot {
    pub time: SimTime,
    /// Every entity, ascending by id.
    pub items: Vec<ItemView>,
    /// Events drained from the outbox during this tick.
    pub events: Vec<SimEvent>,
}

impl GalaxySnapshot {
    pub fn item(&self, id: EntityId) -> Option<&ItemView> {
        self.items
            .binary_search_by_key(&id, |item| item.id)
            .ok()
            .map(|idx| &self.items[idx])
    }
}

/// Read-only projection of one entity plus its capability metadata.
/// Fields for absent capabilities are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub position: Position,
    pub is_movable: bool,
    pub radius: f64,
    pub is_active: bool,
    pub sector: Option<SectorIndex>,
    pub is_alive: Option<bool>,
    pub owner: Option<PlayerId>,
    pub max_weapons_range: Option<f64>,
    pub alert: Option<AlertStatus>,
    pub element: Option<ElementView>,
    pub command: Option<CommandView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementView {
    pub command: Option<EntityId>,
    pub is_hq: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandView {
    pub elements: Vec<EntityId>,
    pub hq: Option<EntityId>,
    pub status: CommandStatus,
}

/// What one faction is allowed to know, gated by its current coverage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactionView {
    pub faction: PlayerId,
    pub time: SimTime,
    /// Entities with coverage above `Unknown`, ascending by id.
    pub contacts: Vec<ContactView>,
}

impl FactionView {
    pub fn contact(&self, id: EntityId) -> Option<&ContactView> {
        self.contacts.iter().find(|c| c.id == id)
    }
}

/// One entity as a faction sees it. Deeper fields appear as coverage grows:
/// `Basic` gives kind and location, `Broad` adds name, owner and liveness,
/// `Comprehensive` adds armament and composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactView {
    pub id: EntityId,
    pub coverage: CoverageReading,
    pub kind: EntityKind,
    pub position: Position,
    pub sector: Option<SectorIndex>,
    pub name: Option<String>,
    pub owner: Option<PlayerId>,
    pub is_alive: Option<bool>,
    pub max_weapons_range: Option<f64>,
    pub element: Option<ElementView>,
    pub command: Option<CommandView>,
}

impl ContactView {
    pub fn current(&self) -> IntelCoverage {
        self.coverage.current
    }
}
