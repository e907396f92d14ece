//! Entry point for the sensor/visibility subsystem.
//!
//! Sensors report direct contacts here; they never write current coverage
//! themselves. Staleness is applied by the intel decay system.

use astrum_core::capabilities::{Handle, IntelTracked};
use astrum_core::enums::IntelCoverage;
use astrum_core::error::ContractViolation;
use astrum_core::types::{CoverageReading, EntityId, PlayerId, SimTime};
use astrum_intel::IntelRecord;

use crate::registry::Registry;

/// Record that `faction` made direct contact with `handle` at `level`.
///
/// `at` may lag the simulation clock `now` but never lead it.
pub fn observe<K: IntelTracked>(
    registry: &mut Registry,
    handle: Handle<K>,
    faction: PlayerId,
    level: IntelCoverage,
    at: SimTime,
    now: SimTime,
) -> Result<CoverageReading, ContractViolation> {
    registry.resolve(handle)?;
    observe_entity(registry, handle.id(), faction, level, at, now)
}

pub(crate) fn observe_entity(
    registry: &mut Registry,
    id: EntityId,
    faction: PlayerId,
    level: IntelCoverage,
    at: SimTime,
    now: SimTime,
) -> Result<CoverageReading, ContractViolation> {
    registry.ensure_alive(id)?;
    if at.tick > now.tick {
        return Err(ContractViolation::ObservationFromFuture {
            entity: id,
            faction,
            now: now.tick,
            attempted: at.tick,
        });
    }
    registry
        .write::<IntelRecord>(id, "intel")?
        .observe(faction, level, at)
}
