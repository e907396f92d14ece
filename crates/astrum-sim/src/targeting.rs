//! Targeting resolver: which candidates may a combat-capable entity engage.
//!
//! Filters, in order:
//! 1. targetable and alive (and active in the placement subsystem);
//! 2. within the requester's max weapons range (Euclidean, position to position);
//! 3. current coverage for the requester's owner at least the policy minimum.
//!
//! Friendly entities and the requester itself are never candidates.
//! Output is sorted by ascending distance, then `EntityId`, so repeated
//! resolution over unchanged state yields identical results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use astrum_core::capabilities::{CombatCapable, Handle};
use astrum_core::components::*;
use astrum_core::enums::{EntityKind, IntelCoverage};
use astrum_core::error::ContractViolation;
use astrum_core::types::{EntityId, PlayerId, Position};
use astrum_intel::{EngagementPolicy, IntelRecord};

use crate::registry::Registry;

/// A legal target, as returned by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    pub id: EntityId,
    pub kind: EntityKind,
    pub distance: f64,
}

/// The requesting side of a resolution.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub id: EntityId,
    pub owner: PlayerId,
    pub position: Position,
    pub max_weapons_range: f64,
}

/// One entry of a candidate pool, already projected out of storage.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub is_alive: bool,
    pub is_active: bool,
    pub owner: Option<PlayerId>,
    pub coverage: IntelCoverage,
}

/// Pure filtering and ordering over a projected pool.
pub fn select_targets(
    requester: &Requester,
    pool: impl IntoIterator<Item = Contact>,
    min_coverage: IntelCoverage,
) -> Vec<TargetCandidate> {
    let mut targets: Vec<TargetCandidate> = pool
        .into_iter()
        .filter(|c| c.id != requester.id)
        .filter(|c| c.owner != Some(requester.owner))
        .filter(|c| c.is_alive && c.is_active)
        .filter_map(|c| {
            let distance = requester.position.range_to(&c.position);
            (distance <= requester.max_weapons_range).then_some((c, distance))
        })
        .filter(|(c, _)| c.coverage >= min_coverage)
        .map(|(c, distance)| TargetCandidate {
            id: c.id,
            kind: c.kind,
            distance,
        })
        .collect();

    targets.sort_by(by_distance);
    targets
}

/// Legal targets for `requester` among every entity in the registry.
pub fn resolve_targets<K: CombatCapable>(
    registry: &Registry,
    requester: Handle<K>,
    policy: &EngagementPolicy,
) -> Result<Vec<TargetCandidate>, ContractViolation> {
    registry.resolve(requester)?;
    resolve_for_entity(registry, requester.id(), policy)
}

/// Legal targets for `requester` among an explicit pool of ids. Ids that are
/// unknown or not targetable are dropped, not reported.
pub fn resolve_targets_in<K: CombatCapable>(
    registry: &Registry,
    requester: Handle<K>,
    pool: &[EntityId],
    policy: &EngagementPolicy,
) -> Result<Vec<TargetCandidate>, ContractViolation> {
    registry.resolve(requester)?;
    let requester = requester_profile(registry, requester.id())?;
    let contacts = pool
        .iter()
        .filter_map(|id| contact_for(registry, *id, requester.owner));
    Ok(select_targets(&requester, contacts, policy.min_coverage))
}

pub(crate) fn resolve_for_entity(
    registry: &Registry,
    requester_id: EntityId,
    policy: &EngagementPolicy,
) -> Result<Vec<TargetCandidate>, ContractViolation> {
    let requester = requester_profile(registry, requester_id)?;
    let contacts = targetable_pool(registry, requester.owner);
    Ok(select_targets(&requester, contacts, policy.min_coverage))
}

/// Project a combat-capable entity into a `Requester`.
pub(crate) fn requester_profile(
    registry: &Registry,
    id: EntityId,
) -> Result<Requester, ContractViolation> {
    registry.ensure_alive(id)?;
    let armament = registry.read::<Armament>(id, "combat")?;
    let ownership = registry.read::<Ownership>(id, "owned")?;
    let placement = registry.read::<Placement>(id, "placement")?;
    Ok(Requester {
        id,
        owner: ownership.owner,
        position: placement.position,
        max_weapons_range: armament.max_weapons_range,
    })
}

/// Every targetable entity, projected for `observer`.
pub(crate) fn targetable_pool(registry: &Registry, observer: PlayerId) -> Vec<Contact> {
    let mut query = registry
        .world()
        .query::<(
            &Identity,
            &Placement,
            &Vitals,
            &IntelRecord,
            Option<&Ownership>,
        )>()
        .with::<&TargetMarker>();
    query
        .iter()
        .map(|(_, (identity, placement, vitals, intel, ownership))| Contact {
            id: identity.id,
            kind: identity.kind,
            position: placement.position,
            is_alive: vitals.is_alive,
            is_active: placement.is_active,
            owner: ownership.map(|o| o.owner),
            coverage: intel.current(observer),
        })
        .collect()
}

fn contact_for(registry: &Registry, id: EntityId, observer: PlayerId) -> Option<Contact> {
    let item = registry.item(id).ok()?;
    if !item.is_targetable() {
        return None;
    }
    let placement = item.placement()?;
    Some(Contact {
        id,
        kind: item.kind(),
        position: placement.position,
        is_alive: item.is_alive()?,
        is_active: placement.is_active,
        owner: item.owner(),
        coverage: item.coverage(observer)?.current,
    })
}

/// Ascending distance, `EntityId` as tie-break.
pub fn by_distance(a: &TargetCandidate, b: &TargetCandidate) -> Ordering {
    a.distance.total_cmp(&b.distance).then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requester() -> Requester {
        Requester {
            id: EntityId(0),
            owner: PlayerId(1),
            position: Position::ORIGIN,
            max_weapons_range: 10.0,
        }
    }

    fn contact(id: u32, x: f64, coverage: IntelCoverage) -> Contact {
        Contact {
            id: EntityId(id),
            kind: EntityKind::Ship,
            position: Position::new(x, 0.0, 0.0),
            is_alive: true,
            is_active: true,
            owner: Some(PlayerId(2)),
            coverage,
        }
    }

    #[test]
    fn test_range_boundary_is_inclusive() {
        let pool = vec![
            contact(1, 10.0, IntelCoverage::Basic),
            contact(2, 10.0001, IntelCoverage::Basic),
        ];
        let targets = select_targets(&requester(), pool, IntelCoverage::Basic);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, EntityId(1));
    }

    #[test]
    fn test_ties_break_by_id() {
        let pool = vec![
            contact(9, 4.0, IntelCoverage::Broad),
            contact(3, -4.0, IntelCoverage::Broad),
            contact(5, 2.0, IntelCoverage::Broad),
        ];
        let ids: Vec<u32> = select_targets(&requester(), pool, IntelCoverage::Basic)
            .iter()
            .map(|t| t.id.0)
            .collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_coverage_gate() {
        let pool = vec![
            contact(1, 1.0, IntelCoverage::Unknown),
            contact(2, 2.0, IntelCoverage::Basic),
            contact(3, 3.0, IntelCoverage::Broad),
        ];
        let targets = select_targets(&requester(), pool, IntelCoverage::Broad);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, EntityId(3));
    }

    #[test]
    fn test_friendly_self_inactive_and_dead_are_excluded() {
        let mut friendly = contact(1, 1.0, IntelCoverage::Comprehensive);
        friendly.owner = Some(PlayerId(1));
        let mut me = contact(0, 0.0, IntelCoverage::Comprehensive);
        me.owner = None;
        let mut inactive = contact(2, 2.0, IntelCoverage::Comprehensive);
        inactive.is_active = false;
        let mut dead = contact(3, 3.0, IntelCoverage::Comprehensive);
        dead.is_alive = false;
        let mut unowned = contact(4, 4.0, IntelCoverage::Basic);
        unowned.owner = None;

        let targets = select_targets(
            &requester(),
            vec![friendly, me, inactive, dead, unowned],
            IntelCoverage::Basic,
        );
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, EntityId(4));
    }

    #[test]
    fn test_empty_pool_is_empty_result() {
        assert!(select_targets(&requester(), Vec::new(), IntelCoverage::Basic).is_empty());
    }
}
