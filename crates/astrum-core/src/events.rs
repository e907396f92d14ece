//! Events emitted by the simulation into the per-tick outbox.
//!
//! State transitions happen synchronously; the matching event is appended to
//! the outbox and subscribers drain it after the tick completes.

use serde::{Deserialize, Serialize};

use crate::commands::Order;
use crate::enums::{DeathCause, EntityKind, IntelCoverage};
use crate::types::{EntityId, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Liveness went true -> false. Emitted at most once per entity.
    Died {
        entity: EntityId,
        kind: EntityKind,
        cause: DeathCause,
        tick: u64,
    },
    OwnerChanged {
        entity: EntityId,
        previous: PlayerId,
        current: PlayerId,
        tick: u64,
    },
    ElementAttached {
        element: EntityId,
        command: EntityId,
    },
    ElementDetached {
        element: EntityId,
        command: EntityId,
        was_hq: bool,
    },
    HqDesignated {
        command: EntityId,
        element: EntityId,
        previous: Option<EntityId>,
    },
    /// The command lost its HQ element and has elements left.
    CommandLeaderless { command: EntityId },
    CoverageDegraded {
        entity: EntityId,
        faction: PlayerId,
        from: IntelCoverage,
        to: IntelCoverage,
    },
    OrderAccepted {
        subject: EntityId,
        issuer: PlayerId,
        order: Order,
    },
    OrderRejected {
        subject: EntityId,
        issuer: PlayerId,
        reason: String,
    },
    /// A queued external input violated a contract and was dropped.
    InputRejected { reason: String },
}

/// Per-tick event buffer. Pushed during mutation, drained after the tick.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    events: Vec<SimEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        self.events.extend(events);
    }

    pub fn pending(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every pending event, leaving the outbox empty.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
