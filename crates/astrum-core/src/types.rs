//! Fundamental identity, geometric and simulation types.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::IntelCoverage;

/// Stable identity of a simulation entity. Allocated once, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A player (faction). Players own entities and observe them through intel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PlayerId(pub u16);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// 3D position in simulation space (galactic units, Cartesian).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance(other.as_dvec3())
    }

    /// Squared distance, for comparisons that don't need the root.
    pub fn range_sq_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance_squared(other.as_dvec3())
    }
}

/// Coarse 3-axis discrete coordinate bucketing entities in the galaxy grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SectorIndex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SectorIndex {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The sector containing `position` for cubic sectors of edge `sector_size`.
    /// Sector (0,0,0) spans `[0, sector_size)` on each axis.
    pub fn containing(position: &Position, sector_size: f64) -> Self {
        let cell = (position.as_dvec3() / sector_size).floor();
        Self::new(cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// World-space center of this sector.
    pub fn center(&self, sector_size: f64) -> Position {
        let corner = DVec3::new(self.x as f64, self.y as f64, self.z as f64) * sector_size;
        Position::from_dvec3(corner + DVec3::splat(sector_size / 2.0))
    }

    /// Chebyshev distance in sectors; neighbours are at distance 1.
    pub fn sector_distance(&self, other: &SectorIndex) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }
}

impl fmt::Display for SectorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Time at an absolute tick.
    pub fn at(tick: u64) -> Self {
        Self {
            tick,
            elapsed_secs: tick as f64 * crate::constants::DT,
        }
    }

    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }

    /// Ticks elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn ticks_since(&self, earlier: &SimTime) -> u64 {
        self.tick.saturating_sub(earlier.tick)
    }
}

/// Coverage level last confirmed by direct observation, and when.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedCoverage {
    pub level: IntelCoverage,
    pub as_of: SimTime,
}

/// What a faction believes about an entity, read as one unit.
///
/// `dated` is `None` when the faction has never observed the entity;
/// there is no fabricated timestamp in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageReading {
    pub current: IntelCoverage,
    pub dated: Option<DatedCoverage>,
}

impl CoverageReading {
    pub const NEVER_OBSERVED: CoverageReading = CoverageReading {
        current: IntelCoverage::Unknown,
        dated: None,
    };

    pub fn is_never_observed(&self) -> bool {
        self.dated.is_none()
    }

    /// Levels lost to staleness since the last confirmed observation.
    pub fn staleness(&self) -> u8 {
        self.dated
            .map(|d| d.level.rank().saturating_sub(self.current.rank()))
            .unwrap_or(0)
    }
}
