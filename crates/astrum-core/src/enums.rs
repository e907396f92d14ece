//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Concrete entity kind. Cross-cutting code never branches on this to decide
/// capabilities; it exists for dispatch into typed storage and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Facility,
    Fleet,
    Starbase,
    Settlement,
    Planet,
    Moon,
    Star,
    Sector,
    UniverseCenter,
    Ordnance,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Ship,
        EntityKind::Facility,
        EntityKind::Fleet,
        EntityKind::Starbase,
        EntityKind::Settlement,
        EntityKind::Planet,
        EntityKind::Moon,
        EntityKind::Star,
        EntityKind::Sector,
        EntityKind::UniverseCenter,
        EntityKind::Ordnance,
    ];

    pub fn is_element(self) -> bool {
        matches!(self, EntityKind::Ship | EntityKind::Facility)
    }

    pub fn is_command(self) -> bool {
        matches!(
            self,
            EntityKind::Fleet | EntityKind::Starbase | EntityKind::Settlement
        )
    }
}

/// How much an observing faction knows about an entity.
/// Ordered: `Unknown < Basic < Broad < Comprehensive`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum IntelCoverage {
    /// Nothing known.
    #[default]
    Unknown,
    /// Existence, kind and location.
    Basic,
    /// Adds identity, owner and condition.
    Broad,
    /// Everything, including composition and armament.
    Comprehensive,
}

impl IntelCoverage {
    pub const ALL: [IntelCoverage; 4] = [
        IntelCoverage::Unknown,
        IntelCoverage::Basic,
        IntelCoverage::Broad,
        IntelCoverage::Comprehensive,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => IntelCoverage::Unknown,
            1 => IntelCoverage::Basic,
            2 => IntelCoverage::Broad,
            _ => IntelCoverage::Comprehensive,
        }
    }

    /// `steps` levels lower, stopping at `Unknown`.
    pub fn lowered_by(self, steps: u64) -> Self {
        let steps = steps.min(u8::MAX as u64) as u8;
        Self::from_rank(self.rank().saturating_sub(steps))
    }
}

/// Lifecycle status of a command as seen from outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    /// Has elements and a designated HQ element.
    Operational,
    /// Has elements but no HQ element.
    Leaderless,
    /// No elements attached.
    #[default]
    Empty,
    /// The command itself is dead; its roster awaits handoff.
    Destroyed,
}

/// Alert condition of a combat-capable entity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AlertStatus {
    #[default]
    Normal,
    /// A known hostile is approaching weapons range.
    Yellow,
    /// A legal target is inside weapons range.
    Red,
}

/// Result of a detach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detachment {
    /// The element was removed from its command.
    Detached { was_hq: bool },
    /// The element was not attached; nothing changed.
    AlreadyDetached,
}

/// Why an entity died.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    #[default]
    Destroyed,
    Scuttled,
    Expended,
}
