//! Order validation. The core checks capability and liveness preconditions;
//! carrying the order out is the order subsystem's job.

use astrum_core::commands::Order;
use astrum_core::components::*;
use astrum_core::error::ContractViolation;
use astrum_core::types::{EntityId, PlayerId};
use astrum_intel::EngagementPolicy;

use crate::registry::Registry;
use crate::targeting::resolve_for_entity;

/// Check that `issuer` may give `order` to `subject` right now.
pub fn validate_order(
    registry: &Registry,
    issuer: PlayerId,
    subject: EntityId,
    order: &Order,
    policy: &EngagementPolicy,
) -> Result<(), ContractViolation> {
    let ownership = registry.read::<Ownership>(subject, "owned")?;
    if ownership.owner != issuer {
        return Err(ContractViolation::NotOwner {
            entity: subject,
            player: issuer,
        });
    }
    registry.ensure_alive(subject)?;

    if order.requires_combat() && !registry.has::<Armament>(subject) {
        return Err(ContractViolation::MissingCapability {
            entity: subject,
            capability: "combat",
        });
    }
    if order.requires_mobility() {
        let placement = registry.read::<Placement>(subject, "placement")?;
        if !placement.is_movable {
            return Err(ContractViolation::MissingCapability {
                entity: subject,
                capability: "mobility",
            });
        }
    }

    match *order {
        Order::Attack { target } => {
            let legal = resolve_for_entity(registry, subject, policy)?;
            if !legal.iter().any(|candidate| candidate.id == target) {
                return Err(ContractViolation::TargetNotEngageable {
                    issuer: subject,
                    target,
                    required: policy.min_coverage,
                });
            }
        }
        Order::Guard { target } => {
            registry.kind_of(target)?;
            registry.ensure_alive(target)?;
        }
        Order::Disband => {
            if !registry.has::<Roster>(subject) {
                return Err(ContractViolation::MissingCapability {
                    entity: subject,
                    capability: "command",
                });
            }
        }
        Order::Move { .. } | Order::Patrol { .. } | Order::Repair | Order::Refit => {}
    }
    Ok(())
}
