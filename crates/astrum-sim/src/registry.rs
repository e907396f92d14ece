//! Entity registry: the hecs world plus an identity index.
//!
//! The world is the arena; `EntityId` is the stable key. Back-references
//! between entities (element -> command) are `EntityId` lookups through
//! this index, never pointers.

use std::collections::BTreeMap;

use hecs::{Component, EntityBuilder, World};

use astrum_core::capabilities::*;
use astrum_core::components::*;
use astrum_core::enums::EntityKind;
use astrum_core::error::ContractViolation;
use astrum_core::types::{CoverageReading, EntityId, PlayerId, SectorIndex};
use astrum_intel::IntelRecord;

use crate::item::Item;

#[derive(Debug, Clone, Copy)]
struct Slot {
    entity: hecs::Entity,
    kind: EntityKind,
}

/// Owns every simulation entity. Mutation goes through the crate's
/// operations; external readers get [`Item`]s.
#[derive(Default)]
pub struct Registry {
    world: World,
    index: BTreeMap<EntityId, Slot>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity of kind `K`. `configure` adds the capability
    /// components; `Identity` is added here.
    pub(crate) fn spawn<K: Kind>(
        &mut self,
        name: impl Into<String>,
        configure: impl FnOnce(EntityId, &mut EntityBuilder),
    ) -> Handle<K> {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut builder = EntityBuilder::new();
        builder.add(Identity {
            id,
            kind: K::KIND,
            name: name.into(),
        });
        configure(id, &mut builder);
        let entity = self.world.spawn(builder.build());
        self.index.insert(
            id,
            Slot {
                entity,
                kind: K::KIND,
            },
        );

        tracing::trace!(target: "astrum::registry", entity = %id, kind = ?K::KIND, "entity.spawned");
        Handle::from_raw(id)
    }

    /// Remove an entity and everything attached to it, intel included.
    pub(crate) fn despawn(&mut self, id: EntityId) -> Result<(), ContractViolation> {
        let slot = self
            .index
            .remove(&id)
            .ok_or(ContractViolation::UnknownEntity(id))?;
        let _ = self.world.despawn(slot.entity);
        tracing::trace!(target: "astrum::registry", entity = %id, "entity.despawned");
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every live id, ascending.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.index.keys().copied()
    }

    /// Ids of one kind, ascending.
    pub fn ids_of(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.index
            .iter()
            .filter(move |(_, slot)| slot.kind == kind)
            .map(|(id, _)| *id)
    }

    pub fn kind_of(&self, id: EntityId) -> Result<EntityKind, ContractViolation> {
        self.index
            .get(&id)
            .map(|slot| slot.kind)
            .ok_or(ContractViolation::UnknownEntity(id))
    }

    pub(crate) fn entity_of(&self, id: EntityId) -> Result<hecs::Entity, ContractViolation> {
        self.index
            .get(&id)
            .map(|slot| slot.entity)
            .ok_or(ContractViolation::UnknownEntity(id))
    }

    /// Resolve a typed handle, checking it still names an entity of its kind.
    pub(crate) fn resolve<K: Kind>(
        &self,
        handle: Handle<K>,
    ) -> Result<hecs::Entity, ContractViolation> {
        let slot = self
            .index
            .get(&handle.id())
            .ok_or(ContractViolation::UnknownEntity(handle.id()))?;
        if slot.kind != K::KIND {
            return Err(ContractViolation::KindMismatch {
                id: handle.id(),
                expected: K::KIND,
                actual: slot.kind,
            });
        }
        Ok(slot.entity)
    }

    /// Upgrade a bare id to a typed handle if the kinds agree.
    pub fn handle<K: Kind>(&self, id: EntityId) -> Result<Handle<K>, ContractViolation> {
        let handle = Handle::from_raw(id);
        self.resolve(handle)?;
        Ok(handle)
    }

    /// Read-only facade over one entity.
    pub fn item(&self, id: EntityId) -> Result<Item<'_>, ContractViolation> {
        let slot = self
            .index
            .get(&id)
            .ok_or(ContractViolation::UnknownEntity(id))?;
        let entity_ref = self
            .world
            .entity(slot.entity)
            .map_err(|_| ContractViolation::UnknownEntity(id))?;
        Ok(Item::new(id, slot.kind, entity_ref))
    }

    /// Items for every entity, ascending by id.
    pub fn items(&self) -> impl Iterator<Item = Item<'_>> + '_ {
        self.index.iter().filter_map(|(id, slot)| {
            self.world
                .entity(slot.entity)
                .ok()
                .map(|entity_ref| Item::new(*id, slot.kind, entity_ref))
        })
    }

    /// Copy a component out, or report the missing capability.
    pub(crate) fn read<T: Component + Copy>(
        &self,
        id: EntityId,
        capability: &'static str,
    ) -> Result<T, ContractViolation> {
        let entity = self.entity_of(id)?;
        self.world
            .get::<&T>(entity)
            .map(|component| *component)
            .map_err(|_| ContractViolation::MissingCapability {
                entity: id,
                capability,
            })
    }

    /// Mutable access to one component, or the missing capability.
    pub(crate) fn write<T: Component>(
        &mut self,
        id: EntityId,
        capability: &'static str,
    ) -> Result<&mut T, ContractViolation> {
        let entity = self.entity_of(id)?;
        self.world
            .query_one_mut::<&mut T>(entity)
            .map_err(|_| ContractViolation::MissingCapability {
                entity: id,
                capability,
            })
    }

    pub(crate) fn has<T: Component>(&self, id: EntityId) -> bool {
        self.entity_of(id)
            .ok()
            .and_then(|entity| self.world.entity(entity).ok())
            .map(|entity_ref| entity_ref.has::<T>())
            .unwrap_or(false)
    }

    /// Fails with `EntityDead` if `id` is mortal and dead. Immortal entities pass.
    pub(crate) fn ensure_alive(&self, id: EntityId) -> Result<(), ContractViolation> {
        let entity = self.entity_of(id)?;
        match self.world.get::<&Vitals>(entity) {
            Ok(vitals) if !vitals.is_alive => Err(ContractViolation::EntityDead(id)),
            _ => Ok(()),
        }
    }

    // --- Capability-typed reads ---

    pub fn placement<K: Kind>(&self, handle: Handle<K>) -> Result<Placement, ContractViolation> {
        self.resolve(handle)?;
        self.read::<Placement>(handle.id(), "placement")
    }

    pub fn sector<K: SectorLocated>(
        &self,
        handle: Handle<K>,
    ) -> Result<SectorIndex, ContractViolation> {
        self.resolve(handle)?;
        self.read::<SectorIndex>(handle.id(), "sector")
    }

    pub fn is_alive<K: Mortal>(&self, handle: Handle<K>) -> Result<bool, ContractViolation> {
        self.resolve(handle)?;
        Ok(self.read::<Vitals>(handle.id(), "mortal")?.is_alive)
    }

    pub fn owner<K: Owned>(&self, handle: Handle<K>) -> Result<PlayerId, ContractViolation> {
        self.resolve(handle)?;
        Ok(self.read::<Ownership>(handle.id(), "owned")?.owner)
    }

    pub fn max_weapons_range<K: CombatCapable>(
        &self,
        handle: Handle<K>,
    ) -> Result<f64, ContractViolation> {
        self.resolve(handle)?;
        Ok(self
            .read::<Armament>(handle.id(), "combat")?
            .max_weapons_range)
    }

    pub fn membership<K: ElementCapable>(
        &self,
        handle: Handle<K>,
    ) -> Result<Membership, ContractViolation> {
        self.resolve(handle)?;
        self.read::<Membership>(handle.id(), "element")
    }

    pub fn roster<K: CommandCapable>(&self, handle: Handle<K>) -> Result<Roster, ContractViolation> {
        let entity = self.resolve(handle)?;
        self.world
            .get::<&Roster>(entity)
            .map(|roster| (*roster).clone())
            .map_err(|_| ContractViolation::MissingCapability {
                entity: handle.id(),
                capability: "command",
            })
    }

    /// What `faction` currently believes about the entity, with its dated
    /// confirmation, read together.
    pub fn coverage<K: IntelTracked>(
        &self,
        handle: Handle<K>,
        faction: PlayerId,
    ) -> Result<CoverageReading, ContractViolation> {
        let entity = self.resolve(handle)?;
        self.world
            .get::<&IntelRecord>(entity)
            .map(|record| record.reading(faction))
            .map_err(|_| ContractViolation::MissingCapability {
                entity: handle.id(),
                capability: "intel",
            })
    }
}
