//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 10;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Galaxy grid ---

/// Edge length of a cubic sector.
pub const SECTOR_SIZE: f64 = 1_200.0;

/// Radius of the populated galaxy around the universe center.
pub const GALAXY_RADIUS: f64 = 6_000.0;

// --- Radii ---

pub const SHIP_RADIUS: f64 = 0.5;
pub const FACILITY_RADIUS: f64 = 1.0;
pub const COMMAND_RADIUS: f64 = 0.25;
pub const PLANET_RADIUS: f64 = 6.0;
pub const MOON_RADIUS: f64 = 1.5;
pub const STAR_RADIUS: f64 = 30.0;
pub const ORDNANCE_RADIUS: f64 = 0.05;
pub const UNIVERSE_CENTER_RADIUS: f64 = 80.0;

// --- Weapons ---

/// Default weapons range for a newly built ship.
pub const SHIP_WEAPONS_RANGE: f64 = 10.0;

/// Default weapons range for a newly built facility.
pub const FACILITY_WEAPONS_RANGE: f64 = 16.0;

// --- Alerts ---

/// A known hostile within this multiple of weapons range raises Yellow alert.
pub const ALERT_YELLOW_RANGE_FACTOR: f64 = 2.0;
