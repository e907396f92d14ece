//! Item facade: the read-only view of an entity handed to other subsystems.
//!
//! An `Item` borrows the registry, so it cannot coexist with a mutation;
//! every value it returns belongs to the same tick. Fields for capabilities
//! the entity lacks come back as `None`.

use hecs::{Component, EntityRef};

use astrum_core::components::*;
use astrum_core::enums::{AlertStatus, CommandStatus, EntityKind};
use astrum_core::state::{CommandView, ElementView, ItemView};
use astrum_core::types::{CoverageReading, EntityId, PlayerId, Position, SectorIndex};
use astrum_intel::IntelRecord;

use crate::composition::status_of;

pub struct Item<'a> {
    id: EntityId,
    kind: EntityKind,
    entity: EntityRef<'a>,
}

impl<'a> Item<'a> {
    pub(crate) fn new(id: EntityId, kind: EntityKind, entity: EntityRef<'a>) -> Self {
        Self { id, kind, entity }
    }

    fn copied<T: Component + Copy>(&self) -> Option<T> {
        self.entity.get::<&T>().map(|component| *component)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> String {
        self.entity
            .get::<&Identity>()
            .map(|identity| identity.name.clone())
            .unwrap_or_default()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.copied::<Placement>()
    }

    pub fn position(&self) -> Position {
        self.placement().map(|p| p.position).unwrap_or_default()
    }

    pub fn sector(&self) -> Option<SectorIndex> {
        self.copied::<SectorIndex>()
    }

    pub fn is_alive(&self) -> Option<bool> {
        self.copied::<Vitals>().map(|v| v.is_alive)
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.copied::<Ownership>().map(|o| o.owner)
    }

    pub fn max_weapons_range(&self) -> Option<f64> {
        self.copied::<Armament>().map(|a| a.max_weapons_range)
    }

    pub fn membership(&self) -> Option<Membership> {
        self.copied::<Membership>()
    }

    pub fn roster(&self) -> Option<Roster> {
        self.entity.get::<&Roster>().map(|roster| (*roster).clone())
    }

    pub fn is_targetable(&self) -> bool {
        self.entity.has::<TargetMarker>()
    }

    pub fn command_status(&self) -> Option<CommandStatus> {
        let roster = self.entity.get::<&Roster>()?;
        let alive = self.is_alive().unwrap_or(true);
        Some(status_of(alive, &roster))
    }

    /// `None` if the entity is not intel tracked.
    pub fn coverage(&self, faction: PlayerId) -> Option<CoverageReading> {
        self.entity
            .get::<&IntelRecord>()
            .map(|record| record.reading(faction))
    }

    /// Owned value copy of this item for snapshots.
    pub fn to_view(&self, alert: Option<AlertStatus>) -> ItemView {
        let placement = self.placement();
        ItemView {
            id: self.id,
            kind: self.kind(),
            name: self.name(),
            position: self.position(),
            is_movable: placement.map(|p| p.is_movable).unwrap_or(false),
            radius: placement.map(|p| p.radius).unwrap_or(0.0),
            is_active: placement.map(|p| p.is_active).unwrap_or(false),
            sector: self.sector(),
            is_alive: self.is_alive(),
            owner: self.owner(),
            max_weapons_range: self.max_weapons_range(),
            alert,
            element: self.element_view(),
            command: self.command_view(),
        }
    }

    pub fn element_view(&self) -> Option<ElementView> {
        self.membership().map(|m| ElementView {
            command: m.command,
            is_hq: m.is_hq,
        })
    }

    pub fn command_view(&self) -> Option<CommandView> {
        let status = self.command_status()?;
        self.roster().map(|roster| CommandView {
            elements: roster.elements,
            hq: roster.hq,
            status,
        })
    }
}
