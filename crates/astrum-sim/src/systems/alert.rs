//! Alert system: derives each combat-capable entity's alert condition.
//!
//! Red when the resolver yields at least one legal target; Yellow when a
//! hostile the owner can see (at the engagement threshold) is within
//! `ALERT_YELLOW_RANGE_FACTOR` times weapons range; Normal otherwise, and
//! always Normal for an entity with no weapons reach.

use std::collections::BTreeMap;

use astrum_core::components::{Armament, Identity, Ownership, Placement, Vitals};
use astrum_core::constants::ALERT_YELLOW_RANGE_FACTOR;
use astrum_core::enums::AlertStatus;
use astrum_core::types::{EntityId, PlayerId};
use astrum_intel::EngagementPolicy;

use crate::registry::Registry;
use crate::targeting::{select_targets, targetable_pool, Contact, Requester};

pub fn run(registry: &Registry, policy: &EngagementPolicy) -> BTreeMap<EntityId, AlertStatus> {
    let requesters: Vec<Requester> = registry
        .world()
        .query::<(&Identity, &Armament, &Ownership, &Placement, &Vitals)>()
        .iter()
        .filter(|(_, (_, _, _, _, vitals))| vitals.is_alive)
        .map(|(_, (identity, armament, ownership, placement, _))| Requester {
            id: identity.id,
            owner: ownership.owner,
            position: placement.position,
            max_weapons_range: armament.max_weapons_range,
        })
        .collect();

    let mut pools: BTreeMap<PlayerId, Vec<Contact>> = BTreeMap::new();
    let mut alerts = BTreeMap::new();
    for requester in requesters {
        let pool = pools
            .entry(requester.owner)
            .or_insert_with(|| targetable_pool(registry, requester.owner));
        alerts.insert(requester.id, alert_for(&requester, pool, policy));
    }
    alerts
}

fn alert_for(requester: &Requester, pool: &[Contact], policy: &EngagementPolicy) -> AlertStatus {
    // No reach, no threat picture.
    if requester.max_weapons_range <= 0.0 {
        return AlertStatus::Normal;
    }
    if !select_targets(requester, pool.iter().copied(), policy.min_coverage).is_empty() {
        return AlertStatus::Red;
    }
    let wide = Requester {
        max_weapons_range: requester.max_weapons_range * ALERT_YELLOW_RANGE_FACTOR,
        ..*requester
    };
    if !select_targets(&wide, pool.iter().copied(), policy.min_coverage).is_empty() {
        AlertStatus::Yellow
    } else {
        AlertStatus::Normal
    }
}
