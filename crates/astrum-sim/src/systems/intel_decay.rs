//! Intel decay system: lets every faction's current coverage go stale.

use hecs::World;

use astrum_core::components::Identity;
use astrum_core::events::{Outbox, SimEvent};
use astrum_core::types::SimTime;
use astrum_intel::{DecayPolicy, IntelRecord};

/// Apply `policy` to every intel record as of `now`.
pub fn run(world: &mut World, now: SimTime, policy: &DecayPolicy, outbox: &mut Outbox) {
    if !policy.enabled {
        return;
    }
    for (_entity, (identity, record)) in world.query_mut::<(&Identity, &mut IntelRecord)>() {
        for change in record.decay(now, policy) {
            tracing::debug!(
                target: "astrum::intel",
                entity = %identity.id,
                faction = %change.faction,
                from = ?change.from,
                to = ?change.to,
                "intel.degraded"
            );
            outbox.push(SimEvent::CoverageDegraded {
                entity: identity.id,
                faction: change.faction,
                from: change.from,
                to: change.to,
            });
        }
    }
}
