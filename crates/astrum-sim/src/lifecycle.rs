//! Death and ownership transitions.
//!
//! Death is one-shot: the first call flips liveness and emits `Died`, later
//! calls return `Ok(false)` and emit nothing. A dead entity rejects further
//! ownership changes.

use astrum_core::capabilities::{Handle, Mortal, Owned};
use astrum_core::components::*;
use astrum_core::enums::DeathCause;
use astrum_core::error::ContractViolation;
use astrum_core::events::{Outbox, SimEvent};
use astrum_core::types::{EntityId, PlayerId, SimTime};

use crate::composition::{detach_entity, refresh_armament};
use crate::registry::Registry;

/// Kill a mortal entity. Returns whether this call caused the death.
pub fn kill<K: Mortal>(
    registry: &mut Registry,
    handle: Handle<K>,
    cause: DeathCause,
    now: SimTime,
    outbox: &mut Outbox,
) -> Result<bool, ContractViolation> {
    registry.resolve(handle)?;
    kill_entity(registry, handle.id(), cause, now, outbox)
}

pub(crate) fn kill_entity(
    registry: &mut Registry,
    id: EntityId,
    cause: DeathCause,
    now: SimTime,
    outbox: &mut Outbox,
) -> Result<bool, ContractViolation> {
    let kind = registry.kind_of(id)?;
    let vitals = registry.write::<Vitals>(id, "mortal")?;
    if !vitals.is_alive {
        return Ok(false);
    }
    vitals.is_alive = false;
    vitals.death_tick = Some(now.tick);

    // A dead element no longer contributes reach to its command.
    if let Ok(membership) = registry.read::<Membership>(id, "element") {
        if let Some(command) = membership.command {
            refresh_armament(registry, command)?;
        }
    }

    tracing::info!(
        target: "astrum::lifecycle",
        entity = %id,
        kind = ?kind,
        cause = ?cause,
        tick = now.tick,
        "entity.died"
    );
    outbox.push(SimEvent::Died {
        entity: id,
        kind,
        cause,
        tick: now.tick,
    });
    Ok(true)
}

/// Hand an owned entity to `new_owner`. Returns whether the owner changed.
///
/// A command takes its attached elements along. An element that is attached
/// to a command is detached first, since a command and its elements always
/// share an owner.
pub fn set_owner<K: Owned>(
    registry: &mut Registry,
    handle: Handle<K>,
    new_owner: PlayerId,
    now: SimTime,
    outbox: &mut Outbox,
) -> Result<bool, ContractViolation> {
    registry.resolve(handle)?;
    transfer_entity(registry, handle.id(), new_owner, now, outbox)
}

pub(crate) fn transfer_entity(
    registry: &mut Registry,
    id: EntityId,
    new_owner: PlayerId,
    now: SimTime,
    outbox: &mut Outbox,
) -> Result<bool, ContractViolation> {
    registry.ensure_alive(id)?;
    let previous = registry.read::<Ownership>(id, "owned")?.owner;
    if previous == new_owner {
        return Ok(false);
    }

    if registry.has::<Membership>(id) {
        detach_entity(registry, id, outbox)?;
    }

    let cascade: Vec<EntityId> = match registry.item(id)?.roster() {
        Some(roster) => roster.elements,
        None => Vec::new(),
    };

    apply_owner(registry, id, previous, new_owner, now, outbox)?;
    for element in cascade {
        // Dead elements awaiting cleanup keep their last owner.
        if registry.ensure_alive(element).is_err() {
            continue;
        }
        let element_owner = registry.read::<Ownership>(element, "owned")?.owner;
        if element_owner != new_owner {
            apply_owner(registry, element, element_owner, new_owner, now, outbox)?;
        }
    }
    Ok(true)
}

fn apply_owner(
    registry: &mut Registry,
    id: EntityId,
    previous: PlayerId,
    new_owner: PlayerId,
    now: SimTime,
    outbox: &mut Outbox,
) -> Result<(), ContractViolation> {
    registry.write::<Ownership>(id, "owned")?.owner = new_owner;
    tracing::info!(
        target: "astrum::lifecycle",
        entity = %id,
        previous = %previous,
        current = %new_owner,
        "owner.changed"
    );
    outbox.push(SimEvent::OwnerChanged {
        entity: id,
        previous,
        current: new_owner,
        tick: now.tick,
    });
    Ok(())
}
