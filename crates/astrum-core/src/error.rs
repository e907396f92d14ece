//! Contract violations: caller bugs surfaced immediately at the call site.
//!
//! Absence (no targets, no intel, no HQ) is never an error; it is an
//! empty or sentinel result. Re-applying death or detach is a silent no-op.

use thiserror::Error;

use crate::enums::{EntityKind, IntelCoverage};
use crate::types::{EntityId, PlayerId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),
    #[error("entity {id} is a {actual:?}, expected {expected:?}")]
    KindMismatch {
        id: EntityId,
        expected: EntityKind,
        actual: EntityKind,
    },
    #[error("entity {0} is dead")]
    EntityDead(EntityId),
    #[error("element {element} is already attached to command {command}; detach it first")]
    ElementAlreadyAttached { element: EntityId, command: EntityId },
    #[error("command {command} does not accept {element_kind:?} elements")]
    IncompatibleElement {
        command: EntityId,
        element_kind: EntityKind,
    },
    #[error("element {element} (owner {element_owner}) cannot join command {command} (owner {command_owner})")]
    OwnerMismatch {
        element: EntityId,
        element_owner: PlayerId,
        command: EntityId,
        command_owner: PlayerId,
    },
    #[error("element {element} is not attached to command {command}")]
    NotAMember { element: EntityId, command: EntityId },
    #[error("observation of {entity} by {faction} at tick {attempted} predates the dated snapshot at tick {last}")]
    ObservationOutOfOrder {
        entity: EntityId,
        faction: PlayerId,
        last: u64,
        attempted: u64,
    },
    #[error("observation of {entity} by {faction} is stamped tick {attempted}, ahead of the simulation at tick {now}")]
    ObservationFromFuture {
        entity: EntityId,
        faction: PlayerId,
        now: u64,
        attempted: u64,
    },
    #[error("only one {0:?} may exist")]
    DuplicateSingleton(EntityKind),
    #[error("{player} does not own {entity}")]
    NotOwner { entity: EntityId, player: PlayerId },
    #[error("{entity} has no {capability} capability")]
    MissingCapability {
        entity: EntityId,
        capability: &'static str,
    },
    #[error("{target} is not an engageable target for {issuer} (requires {required:?} coverage, in range, alive)")]
    TargetNotEngageable {
        issuer: EntityId,
        target: EntityId,
        required: IntelCoverage,
    },
}
