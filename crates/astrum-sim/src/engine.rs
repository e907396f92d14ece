//! Simulation engine: owns the registry and drives the tick loop.
//!
//! `SimulationEngine` applies queued inputs, runs the systems, and publishes
//! a `GalaxySnapshot` per tick. Headless, single-writer, deterministic for a
//! given seed and input sequence.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use astrum_core::capabilities::*;
use astrum_core::commands::SimInput;
use astrum_core::components::Placement;
use astrum_core::constants::SECTOR_SIZE;
use astrum_core::enums::{CommandStatus, DeathCause, Detachment, IntelCoverage};
use astrum_core::error::ContractViolation;
use astrum_core::events::{Outbox, SimEvent};
use astrum_core::state::{FactionView, GalaxySnapshot};
use astrum_core::types::{CoverageReading, EntityId, PlayerId, Position, SectorIndex, SimTime};
use astrum_intel::IntelConfig;

use crate::composition;
use crate::lifecycle;
use crate::observation;
use crate::orders::validate_order;
use crate::registry::Registry;
use crate::systems;
use crate::targeting::{self, TargetCandidate};
use crate::world_setup::{self, Homeworld};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub intel: Arc<IntelConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            intel: IntelConfig::builtin(),
        }
    }
}

/// Shared, read-only access to the most recently published snapshot.
///
/// Readers on other threads clone the inner `Arc`; the engine swaps in a new
/// one each tick, so a reader never sees a half-built snapshot.
#[derive(Clone, Default)]
pub struct SnapshotHandle(Arc<RwLock<Arc<GalaxySnapshot>>>);

impl SnapshotHandle {
    pub fn latest(&self) -> Arc<GalaxySnapshot> {
        match self.0.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    fn publish(&self, snapshot: GalaxySnapshot) {
        let snapshot = Arc::new(snapshot);
        match self.0.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

/// The simulation engine. Owns the registry and all sim state.
pub struct SimulationEngine {
    registry: Registry,
    time: SimTime,
    rng: ChaCha8Rng,
    intel: Arc<IntelConfig>,
    input_queue: VecDeque<SimInput>,
    outbox: Outbox,
    despawn_buffer: Vec<EntityId>,
    published: SnapshotHandle,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            registry: Registry::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            intel: config.intel,
            input_queue: VecDeque::new(),
            outbox: Outbox::new(),
            despawn_buffer: Vec::new(),
            published: SnapshotHandle::default(),
        }
    }

    /// Queue an input for processing at the next tick boundary.
    pub fn queue_input(&mut self, input: SimInput) {
        self.input_queue.push_back(input);
    }

    pub fn queue_inputs(&mut self, inputs: impl IntoIterator<Item = SimInput>) {
        self.input_queue.extend(inputs);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GalaxySnapshot {
        self.process_inputs();
        self.run_systems();
        self.time.advance();

        let alerts = systems::alert::run(&self.registry, &self.intel.engagement);
        let snapshot = systems::snapshot::build_snapshot(
            &self.registry,
            &self.time,
            self.outbox.drain(),
            &alerts,
        );
        self.published.publish(snapshot.clone());
        snapshot
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Spawn factories in `world_setup` need mutable access; all other
    /// mutation goes through the engine so it lands in the outbox.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn intel_config(&self) -> &IntelConfig {
        &self.intel
    }

    /// Events produced since the last tick.
    pub fn pending_events(&self) -> &[SimEvent] {
        self.outbox.pending()
    }

    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.published.clone()
    }

    /// What `faction` knows right now, gated by its current coverage.
    pub fn faction_view(&self, faction: PlayerId) -> FactionView {
        systems::snapshot::build_faction_view(&self.registry, faction, &self.time)
    }

    pub fn seed_demo_galaxy(&mut self, players: u16) -> Result<Vec<Homeworld>, ContractViolation> {
        world_setup::seed_demo_galaxy(&mut self.registry, &mut self.rng, players, &mut self.outbox)
    }

    // --- Direct operations ---

    pub fn kill<K: Mortal>(&mut self, handle: Handle<K>, cause: DeathCause) -> Result<bool, ContractViolation> {
        lifecycle::kill(&mut self.registry, handle, cause, self.time, &mut self.outbox)
    }

    pub fn set_owner<K: Owned>(&mut self, handle: Handle<K>, owner: PlayerId) -> Result<bool, ContractViolation> {
        lifecycle::set_owner(&mut self.registry, handle, owner, self.time, &mut self.outbox)
    }

    pub fn attach<E: ElementCapable, C: CommandCapable>(
        &mut self,
        element: Handle<E>,
        command: Handle<C>,
    ) -> Result<(), ContractViolation> {
        composition::attach(&mut self.registry, element, command, &mut self.outbox)
    }

    pub fn detach<E: ElementCapable>(&mut self, element: Handle<E>) -> Result<Detachment, ContractViolation> {
        composition::detach(&mut self.registry, element, &mut self.outbox)
    }

    pub fn designate_hq<C: CommandCapable, E: ElementCapable>(
        &mut self,
        command: Handle<C>,
        element: Handle<E>,
    ) -> Result<(), ContractViolation> {
        composition::designate_hq(&mut self.registry, command, element, &mut self.outbox)
    }

    pub fn command_status<C: CommandCapable>(&self, command: Handle<C>) -> Result<CommandStatus, ContractViolation> {
        composition::command_status(&self.registry, command)
    }

    pub fn observe<K: IntelTracked>(
        &mut self,
        handle: Handle<K>,
        faction: PlayerId,
        level: IntelCoverage,
    ) -> Result<CoverageReading, ContractViolation> {
        observation::observe(&mut self.registry, handle, faction, level, self.time, self.time)
    }

    pub fn resolve_targets<K: CombatCapable>(&self, requester: Handle<K>) -> Result<Vec<TargetCandidate>, ContractViolation> {
        targeting::resolve_targets(&self.registry, requester, &self.intel.engagement)
    }

    // --- Input processing ---

    fn process_inputs(&mut self) {
        while let Some(input) = self.input_queue.pop_front() {
            self.handle_input(input);
        }
    }

    fn handle_input(&mut self, input: SimInput) {
        match input {
            SimInput::Observe {
                entity,
                faction,
                level,
                at,
            } => {
                let now = self.time;
                if let Err(err) = observation::observe_entity(&mut self.registry, entity, faction, level, at, now) {
                    self.reject_input(err);
                }
            }
            SimInput::Place {
                entity,
                position,
                is_active,
            } => {
                if let Err(err) = self.place(entity, position, is_active) {
                    self.reject_input(err);
                }
            }
            SimInput::Issue {
                issuer,
                subject,
                order,
            } => match validate_order(&self.registry, issuer, subject, &order, &self.intel.engagement) {
                Ok(()) => {
                    tracing::debug!(target: "astrum::orders", subject = %subject, issuer = %issuer, ?order, "order.accepted");
                    self.outbox.push(SimEvent::OrderAccepted { subject, issuer, order });
                }
                Err(err) => {
                    tracing::warn!(target: "astrum::orders", subject = %subject, issuer = %issuer, error = %err, "order.rejected");
                    self.outbox.push(SimEvent::OrderRejected {
                        subject,
                        issuer,
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    fn place(&mut self, entity: EntityId, position: Position, is_active: bool) -> Result<(), ContractViolation> {
        self.registry.ensure_alive(entity)?;
        let placement: &mut Placement = self.registry.write::<Placement>(entity, "placement")?;
        placement.position = position;
        placement.is_active = is_active;
        if let Ok(sector) = self.registry.write::<SectorIndex>(entity, "sector") {
            *sector = SectorIndex::containing(&position, SECTOR_SIZE);
        }
        Ok(())
    }

    fn reject_input(&mut self, err: ContractViolation) {
        tracing::warn!(target: "astrum::engine", error = %err, "input.rejected");
        self.outbox.push(SimEvent::InputRejected {
            reason: err.to_string(),
        });
    }

    fn run_systems(&mut self) {
        systems::intel_decay::run(
            self.registry.world_mut(),
            self.time,
            &self.intel.decay,
            &mut self.outbox,
        );
        systems::cleanup::run(&mut self.registry, &mut self.outbox, &mut self.despawn_buffer);
    }
}
