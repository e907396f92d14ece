//! Cleanup system: removes dead entities from their owning collections.
//!
//! Dead elements are detached from their commands, then despawned. A dead
//! command is kept until its roster has been handed off; elements are never
//! killed on its behalf.

use astrum_core::components::{Identity, Membership, Roster, Vitals};
use astrum_core::events::Outbox;
use astrum_core::types::EntityId;

use crate::composition::detach_entity;
use crate::registry::Registry;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(registry: &mut Registry, outbox: &mut Outbox, despawn_buffer: &mut Vec<EntityId>) {
    despawn_buffer.clear();

    // Dead elements leave their commands.
    despawn_buffer.extend(
        registry
            .world()
            .query::<(&Identity, &Vitals, &Membership)>()
            .iter()
            .filter(|(_, (_, vitals, membership))| {
                !vitals.is_alive && membership.command.is_some()
            })
            .map(|(_, (identity, _, _))| identity.id),
    );
    despawn_buffer.sort_unstable();
    for id in despawn_buffer.drain(..) {
        if let Err(err) = detach_entity(registry, id, outbox) {
            tracing::warn!(target: "astrum::cleanup", entity = %id, error = %err, "detach.failed");
        }
    }

    // Dead entities with nothing left to hand off are removed.
    despawn_buffer.extend(
        registry
            .world()
            .query::<(&Identity, &Vitals, Option<&Roster>)>()
            .iter()
            .filter(|(_, (_, vitals, roster))| {
                !vitals.is_alive && roster.map_or(true, |r| r.elements.is_empty())
            })
            .map(|(_, (identity, _, _))| identity.id),
    );
    despawn_buffer.sort_unstable();
    for id in despawn_buffer.drain(..) {
        if registry.despawn(id).is_ok() {
            tracing::debug!(target: "astrum::cleanup", entity = %id, "entity.removed");
        }
    }
}
