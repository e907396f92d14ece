//! Per-entity intel record.
//!
//! State machine per (entity, faction):
//! - observation: dated := max(dated, observed) stamped now; current := dated
//! - decay tick: current lowered by policy; dated and its stamp stay frozen
//!
//! `current <= dated.level` holds at all times, and the dated stamp never
//! moves backwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use astrum_core::enums::IntelCoverage;
use astrum_core::error::ContractViolation;
use astrum_core::types::{CoverageReading, DatedCoverage, EntityId, PlayerId, SimTime};

use crate::policy::DecayPolicy;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct FactionIntel {
    current: IntelCoverage,
    dated: DatedCoverage,
}

/// A change to a faction's current coverage produced by decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageChange {
    pub faction: PlayerId,
    pub from: IntelCoverage,
    pub to: IntelCoverage,
}

/// Intel attached to one observable entity, keyed by observing faction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelRecord {
    subject: EntityId,
    factions: BTreeMap<PlayerId, FactionIntel>,
}

impl IntelRecord {
    pub fn new(subject: EntityId) -> Self {
        Self {
            subject,
            factions: BTreeMap::new(),
        }
    }

    pub fn subject(&self) -> EntityId {
        self.subject
    }

    /// Current belief and last confirmation for `faction`, read together.
    pub fn reading(&self, faction: PlayerId) -> CoverageReading {
        match self.factions.get(&faction) {
            Some(intel) => CoverageReading {
                current: intel.current,
                dated: Some(intel.dated),
            },
            None => CoverageReading::NEVER_OBSERVED,
        }
    }

    pub fn current(&self, faction: PlayerId) -> IntelCoverage {
        self.reading(faction).current
    }

    pub fn dated(&self, faction: PlayerId) -> Option<DatedCoverage> {
        self.reading(faction).dated
    }

    /// Factions that have observed the subject at least once, ascending.
    pub fn observers(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.factions.keys().copied()
    }

    /// Apply a direct sensor observation.
    ///
    /// The dated level never drops on this path: a weaker contact refreshes
    /// the stamp of what was already certified. An observation stamped before
    /// the current dated snapshot is rejected.
    pub fn observe(
        &mut self,
        faction: PlayerId,
        level: IntelCoverage,
        at: SimTime,
    ) -> Result<CoverageReading, ContractViolation> {
        let dated = match self.factions.get(&faction) {
            Some(existing) => {
                if at.tick < existing.dated.as_of.tick {
                    return Err(ContractViolation::ObservationOutOfOrder {
                        entity: self.subject,
                        faction,
                        last: existing.dated.as_of.tick,
                        attempted: at.tick,
                    });
                }
                DatedCoverage {
                    level: existing.dated.level.max(level),
                    as_of: at,
                }
            }
            None => DatedCoverage { level, as_of: at },
        };

        self.factions.insert(
            faction,
            FactionIntel {
                current: dated.level,
                dated,
            },
        );

        tracing::trace!(
            target: "astrum::intel",
            entity = %self.subject,
            faction = %faction,
            level = ?dated.level,
            tick = at.tick,
            "intel.observed"
        );

        Ok(self.reading(faction))
    }

    /// Let every faction's current estimate go stale according to `policy`.
    /// Current coverage only ever moves down here.
    pub fn decay(&mut self, now: SimTime, policy: &DecayPolicy) -> Vec<CoverageChange> {
        let mut changes = Vec::new();
        for (faction, intel) in self.factions.iter_mut() {
            let decayed = policy.decayed(&intel.dated, now).min(intel.current);
            if decayed != intel.current {
                changes.push(CoverageChange {
                    faction: *faction,
                    from: intel.current,
                    to: decayed,
                });
                intel.current = decayed;
            }
        }
        changes
    }
}
