//! Unit composition: commands own ordered rosters of elements.
//!
//! Invariants kept here:
//! - an element's `Membership.command` names exactly the command whose
//!   roster lists it, and detaching clears both sides;
//! - at most one element of a roster carries the HQ flag;
//! - a command's `Armament` is the union (max) of its living elements' reach.

use astrum_core::capabilities::{CommandCapable, ElementCapable, Handle};
use astrum_core::components::*;
use astrum_core::enums::{CommandStatus, Detachment};
use astrum_core::error::ContractViolation;
use astrum_core::events::{Outbox, SimEvent};
use astrum_core::types::EntityId;

use crate::registry::Registry;

/// Attach `element` to `command`. The element must be detached first if it
/// belongs to another command; attaching it to its current command again
/// changes nothing.
pub fn attach<E: ElementCapable, C: CommandCapable>(
    registry: &mut Registry,
    element: Handle<E>,
    command: Handle<C>,
    outbox: &mut Outbox,
) -> Result<(), ContractViolation> {
    registry.resolve(element)?;
    registry.resolve(command)?;
    let (element_id, command_id) = (element.id(), command.id());

    if C::ELEMENT_KIND != E::KIND {
        return Err(ContractViolation::IncompatibleElement {
            command: command_id,
            element_kind: E::KIND,
        });
    }
    registry.ensure_alive(element_id)?;
    registry.ensure_alive(command_id)?;

    let membership = registry.read::<Membership>(element_id, "element")?;
    match membership.command {
        Some(current) if current == command_id => return Ok(()),
        Some(current) => {
            return Err(ContractViolation::ElementAlreadyAttached {
                element: element_id,
                command: current,
            })
        }
        None => {}
    }

    let element_owner = registry.read::<Ownership>(element_id, "owned")?.owner;
    let command_owner = registry.read::<Ownership>(command_id, "owned")?.owner;
    if element_owner != command_owner {
        return Err(ContractViolation::OwnerMismatch {
            element: element_id,
            element_owner,
            command: command_id,
            command_owner,
        });
    }

    *registry.write::<Membership>(element_id, "element")? = Membership {
        command: Some(command_id),
        is_hq: false,
    };
    registry
        .write::<Roster>(command_id, "command")?
        .elements
        .push(element_id);
    refresh_armament(registry, command_id)?;

    tracing::debug!(
        target: "astrum::composition",
        element = %element_id,
        command = %command_id,
        "element.attached"
    );
    outbox.push(SimEvent::ElementAttached {
        element: element_id,
        command: command_id,
    });
    Ok(())
}

/// Detach `element` from whatever command holds it. Detaching an element
/// that is not attached is a no-op.
pub fn detach<E: ElementCapable>(
    registry: &mut Registry,
    element: Handle<E>,
    outbox: &mut Outbox,
) -> Result<Detachment, ContractViolation> {
    registry.resolve(element)?;
    detach_entity(registry, element.id(), outbox)
}

/// Untyped detach used by cleanup and ownership transfer.
/// Permitted on dead elements and dead commands so rosters can be handed off.
pub(crate) fn detach_entity(
    registry: &mut Registry,
    element_id: EntityId,
    outbox: &mut Outbox,
) -> Result<Detachment, ContractViolation> {
    let membership = registry.read::<Membership>(element_id, "element")?;
    let Some(command_id) = membership.command else {
        return Ok(Detachment::AlreadyDetached);
    };

    *registry.write::<Membership>(element_id, "element")? = Membership::default();

    let mut was_hq = membership.is_hq;
    let mut leaderless = false;
    let mut command_exists = false;
    if let Ok(roster) = registry.write::<Roster>(command_id, "command") {
        roster.elements.retain(|id| *id != element_id);
        if roster.hq == Some(element_id) {
            roster.hq = None;
            was_hq = true;
        }
        leaderless = was_hq && !roster.elements.is_empty();
        command_exists = true;
    }
    if command_exists {
        refresh_armament(registry, command_id)?;
    }

    tracing::debug!(
        target: "astrum::composition",
        element = %element_id,
        command = %command_id,
        was_hq,
        "element.detached"
    );
    outbox.push(SimEvent::ElementDetached {
        element: element_id,
        command: command_id,
        was_hq,
    });
    if leaderless {
        outbox.push(SimEvent::CommandLeaderless {
            command: command_id,
        });
    }
    Ok(Detachment::Detached { was_hq })
}

/// Make `element` the HQ of `command`, clearing the previous holder.
pub fn designate_hq<C: CommandCapable, E: ElementCapable>(
    registry: &mut Registry,
    command: Handle<C>,
    element: Handle<E>,
    outbox: &mut Outbox,
) -> Result<(), ContractViolation> {
    registry.resolve(command)?;
    registry.resolve(element)?;
    let (command_id, element_id) = (command.id(), element.id());
    registry.ensure_alive(command_id)?;
    registry.ensure_alive(element_id)?;

    let membership = registry.read::<Membership>(element_id, "element")?;
    if membership.command != Some(command_id) {
        return Err(ContractViolation::NotAMember {
            element: element_id,
            command: command_id,
        });
    }

    let roster = registry.write::<Roster>(command_id, "command")?;
    let previous = roster.hq;
    if previous == Some(element_id) {
        return Ok(());
    }
    roster.hq = Some(element_id);

    if let Some(previous_id) = previous {
        if let Ok(prior) = registry.write::<Membership>(previous_id, "element") {
            prior.is_hq = false;
        }
    }
    registry.write::<Membership>(element_id, "element")?.is_hq = true;

    tracing::debug!(
        target: "astrum::composition",
        command = %command_id,
        element = %element_id,
        previous = ?previous,
        "hq.designated"
    );
    outbox.push(SimEvent::HqDesignated {
        command: command_id,
        element: element_id,
        previous,
    });
    Ok(())
}

pub fn command_status<C: CommandCapable>(
    registry: &Registry,
    command: Handle<C>,
) -> Result<CommandStatus, ContractViolation> {
    let roster = registry.roster(command)?;
    let alive = registry.ensure_alive(command.id()).is_ok();
    Ok(status_of(alive, &roster))
}

pub(crate) fn status_of(alive: bool, roster: &Roster) -> CommandStatus {
    if !alive {
        CommandStatus::Destroyed
    } else if roster.elements.is_empty() {
        CommandStatus::Empty
    } else if roster.hq.is_none() {
        CommandStatus::Leaderless
    } else {
        CommandStatus::Operational
    }
}

/// Recompute a command's reach as the max over its living elements.
pub(crate) fn refresh_armament(
    registry: &mut Registry,
    command_id: EntityId,
) -> Result<(), ContractViolation> {
    let entity = registry.entity_of(command_id)?;
    let elements = match registry.world().get::<&Roster>(entity) {
        Ok(roster) => roster.elements.clone(),
        Err(_) => return Ok(()),
    };
    let reach = elements
        .iter()
        .filter(|id| registry.ensure_alive(**id).is_ok())
        .filter_map(|id| registry.read::<Armament>(*id, "combat").ok())
        .map(|armament| armament.max_weapons_range)
        .fold(0.0_f64, f64::max);
    registry.write::<Armament>(command_id, "combat")?.max_weapons_range = reach;
    Ok(())
}
