//! Snapshot system: projects the registry into read-only views.
//!
//! This system is read-only. It never modifies the world.

use std::collections::BTreeMap;

use astrum_core::enums::{AlertStatus, IntelCoverage};
use astrum_core::events::SimEvent;
use astrum_core::state::{ContactView, FactionView, GalaxySnapshot};
use astrum_core::types::{CoverageReading, EntityId, PlayerId, SimTime};

use crate::item::Item;
use crate::registry::Registry;

/// Build the authoritative snapshot for this tick.
pub fn build_snapshot(
    registry: &Registry,
    time: &SimTime,
    events: Vec<SimEvent>,
    alerts: &BTreeMap<EntityId, AlertStatus>,
) -> GalaxySnapshot {
    GalaxySnapshot {
        time: *time,
        items: registry
            .items()
            .map(|item| item.to_view(alerts.get(&item.id()).copied()))
            .collect(),
        events,
    }
}

/// Build what `faction` may know, gated by its current coverage of each entity.
pub fn build_faction_view(registry: &Registry, faction: PlayerId, time: &SimTime) -> FactionView {
    FactionView {
        faction,
        time: *time,
        contacts: registry
            .items()
            .filter_map(|item| contact_view(&item, faction))
            .collect(),
    }
}

/// Owned entities read as Comprehensive; their dated snapshot still comes
/// only from real observations.
fn contact_view(item: &Item<'_>, faction: PlayerId) -> Option<ContactView> {
    let coverage = if item.owner() == Some(faction) {
        CoverageReading {
            current: IntelCoverage::Comprehensive,
            dated: item.coverage(faction).and_then(|reading| reading.dated),
        }
    } else {
        item.coverage(faction)?
    };

    let level = coverage.current;
    if level == IntelCoverage::Unknown {
        return None;
    }
    let broad = level >= IntelCoverage::Broad;
    let comprehensive = level >= IntelCoverage::Comprehensive;

    Some(ContactView {
        id: item.id(),
        coverage,
        kind: item.kind(),
        position: item.position(),
        sector: item.sector(),
        name: broad.then(|| item.name()),
        owner: if broad { item.owner() } else { None },
        is_alive: if broad { item.is_alive() } else { None },
        max_weapons_range: if comprehensive {
            item.max_weapons_range()
        } else {
            None
        },
        element: if comprehensive {
            item.element_view()
        } else {
            None
        },
        command: if comprehensive {
            item.command_view()
        } else {
            None
        },
    })
}
