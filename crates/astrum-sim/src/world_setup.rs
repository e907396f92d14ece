//! Entity spawn factories for setting up the galaxy.
//!
//! Each factory attaches exactly the component bundle its kind's capability
//! set calls for; see [`astrum_core::capabilities`].

use hecs::EntityBuilder;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use astrum_core::capabilities::*;
use astrum_core::components::*;
use astrum_core::constants::*;
use astrum_core::enums::{EntityKind, IntelCoverage};
use astrum_core::error::ContractViolation;
use astrum_core::events::Outbox;
use astrum_core::types::{EntityId, PlayerId, Position, SectorIndex, SimTime};
use astrum_intel::IntelRecord;

use crate::composition::{attach, designate_hq};
use crate::observation::observe;
use crate::registry::Registry;

fn locate(builder: &mut EntityBuilder, position: Position, radius: f64, is_movable: bool) {
    builder.add(Placement {
        position,
        is_movable,
        radius,
        is_active: true,
    });
    builder.add(SectorIndex::containing(&position, SECTOR_SIZE));
}

fn track(builder: &mut EntityBuilder, id: EntityId) {
    builder.add(IntelRecord::new(id));
}

fn combatant(builder: &mut EntityBuilder, owner: PlayerId, max_weapons_range: f64) {
    builder.add(Vitals::default());
    builder.add(Ownership { owner });
    builder.add(Armament { max_weapons_range });
    builder.add(TargetMarker);
}

/// Spawn a ship with the default weapons fit, unattached.
pub fn spawn_ship(
    registry: &mut Registry,
    name: impl Into<String>,
    owner: PlayerId,
    position: Position,
) -> Handle<Ship> {
    registry.spawn::<Ship>(name, |id, b| {
        locate(b, position, SHIP_RADIUS, true);
        combatant(b, owner, SHIP_WEAPONS_RANGE);
        b.add(Membership::default());
        track(b, id);
    })
}

/// Spawn a stationary facility, unattached.
pub fn spawn_facility(
    registry: &mut Registry,
    name: impl Into<String>,
    owner: PlayerId,
    position: Position,
) -> Handle<Facility> {
    registry.spawn::<Facility>(name, |id, b| {
        locate(b, position, FACILITY_RADIUS, false);
        combatant(b, owner, FACILITY_WEAPONS_RANGE);
        b.add(Membership::default());
        track(b, id);
    })
}

/// Commands start empty, with no reach until elements attach.
fn command_bundle(b: &mut EntityBuilder, id: EntityId, owner: PlayerId, position: Position, is_movable: bool) {
    locate(b, position, COMMAND_RADIUS, is_movable);
    combatant(b, owner, 0.0);
    b.add(Roster::default());
    track(b, id);
}

pub fn spawn_fleet(
    registry: &mut Registry,
    name: impl Into<String>,
    owner: PlayerId,
    position: Position,
) -> Handle<Fleet> {
    registry.spawn::<Fleet>(name, |id, b| command_bundle(b, id, owner, position, true))
}

pub fn spawn_starbase(
    registry: &mut Registry,
    name: impl Into<String>,
    owner: PlayerId,
    position: Position,
) -> Handle<Starbase> {
    registry.spawn::<Starbase>(name, |id, b| command_bundle(b, id, owner, position, false))
}

pub fn spawn_settlement(
    registry: &mut Registry,
    name: impl Into<String>,
    owner: PlayerId,
    position: Position,
) -> Handle<Settlement> {
    registry.spawn::<Settlement>(name, |id, b| command_bundle(b, id, owner, position, false))
}

fn body_bundle(b: &mut EntityBuilder, id: EntityId, position: Position, radius: f64, targetable: bool) {
    locate(b, position, radius, false);
    b.add(Vitals::default());
    if targetable {
        b.add(TargetMarker);
    }
    track(b, id);
}

pub fn spawn_planet(registry: &mut Registry, name: impl Into<String>, position: Position) -> Handle<Planet> {
    registry.spawn::<Planet>(name, |id, b| body_bundle(b, id, position, PLANET_RADIUS, true))
}

pub fn spawn_moon(registry: &mut Registry, name: impl Into<String>, position: Position) -> Handle<Moon> {
    registry.spawn::<Moon>(name, |id, b| body_bundle(b, id, position, MOON_RADIUS, true))
}

/// Stars can die but are never targeting candidates.
pub fn spawn_star(registry: &mut Registry, name: impl Into<String>, position: Position) -> Handle<Star> {
    registry.spawn::<Star>(name, |id, b| body_bundle(b, id, position, STAR_RADIUS, false))
}

/// Spawn an ownership claim over the grid cell `index`.
pub fn spawn_sector(registry: &mut Registry, index: SectorIndex, owner: PlayerId) -> Handle<Sector> {
    let center = index.center(SECTOR_SIZE);
    registry.spawn::<Sector>(format!("Sector {index}"), |id, b| {
        b.add(Placement {
            position: center,
            is_movable: false,
            radius: SECTOR_SIZE / 2.0,
            is_active: true,
        });
        b.add(index);
        b.add(Ownership { owner });
        track(b, id);
    })
}

/// Spawn the galactic center at the origin. Fails if one already exists.
pub fn spawn_universe_center(registry: &mut Registry) -> Result<Handle<UniverseCenter>, ContractViolation> {
    if registry.ids_of(EntityKind::UniverseCenter).next().is_some() {
        return Err(ContractViolation::DuplicateSingleton(EntityKind::UniverseCenter));
    }
    Ok(registry.spawn::<UniverseCenter>("Galactic Core", |id, b| {
        locate(b, Position::ORIGIN, UNIVERSE_CENTER_RADIUS, false);
        b.add(CenterMarker);
        track(b, id);
    }))
}

/// Spawn ordnance in flight. It is owned and targetable but cannot target.
pub fn spawn_ordnance(
    registry: &mut Registry,
    name: impl Into<String>,
    owner: PlayerId,
    position: Position,
) -> Handle<Ordnance> {
    registry.spawn::<Ordnance>(name, |id, b| {
        locate(b, position, ORDNANCE_RADIUS, true);
        b.add(Vitals::default());
        b.add(Ownership { owner });
        b.add(TargetMarker);
        track(b, id);
    })
}

/// What one player starts the game with.
#[derive(Debug, Clone, Copy)]
pub struct Homeworld {
    pub player: PlayerId,
    pub sector: Handle<Sector>,
    pub star: Handle<Star>,
    pub planet: Handle<Planet>,
    pub moon: Handle<Moon>,
    pub settlement: Handle<Settlement>,
    pub starbase: Handle<Starbase>,
    pub fleet: Handle<Fleet>,
}

/// Seed a small galaxy: the galactic center and one home system per player,
/// each with a settlement, a starbase and a fleet of three ships.
///
/// Stars are bright: every player starts with Broad coverage of every star.
pub fn seed_demo_galaxy(
    registry: &mut Registry,
    rng: &mut ChaCha8Rng,
    players: u16,
    outbox: &mut Outbox,
) -> Result<Vec<Homeworld>, ContractViolation> {
    spawn_universe_center(registry)?;

    let mut homeworlds = Vec::with_capacity(players as usize);
    for p in 0..players {
        let player = PlayerId(p);
        homeworlds.push(seed_home_system(registry, rng, player, outbox)?);
    }

    let genesis = SimTime::default();
    for home in &homeworlds {
        for p in 0..players {
            observe(registry, home.star, PlayerId(p), IntelCoverage::Broad, genesis, genesis)?;
        }
    }

    tracing::info!(target: "astrum::setup", players, entities = registry.len(), "galaxy.seeded");
    Ok(homeworlds)
}

fn seed_home_system(
    registry: &mut Registry,
    rng: &mut ChaCha8Rng,
    player: PlayerId,
    outbox: &mut Outbox,
) -> Result<Homeworld, ContractViolation> {
    let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let range: f64 = rng.gen_range(0.3_f64..0.9) * GALAXY_RADIUS;
    let star_pos = Position::new(range * bearing.cos(), range * bearing.sin(), rng.gen_range(-50.0_f64..50.0));
    let offset = |dx: f64, dy: f64| Position::new(star_pos.x + dx, star_pos.y + dy, star_pos.z);

    let star = spawn_star(registry, format!("{player} Prime"), star_pos);
    let sector = spawn_sector(registry, SectorIndex::containing(&star_pos, SECTOR_SIZE), player);
    let planet_pos = offset(rng.gen_range(120.0_f64..200.0), 0.0);
    let planet = spawn_planet(registry, format!("{player} Prime II"), planet_pos);
    let moon = spawn_moon(
        registry,
        format!("{player} Prime IIa"),
        Position::new(planet_pos.x + 12.0, planet_pos.y, planet_pos.z),
    );

    let settlement = spawn_settlement(registry, format!("{player} Colony"), player, planet_pos);
    for i in 0..2 {
        let facility = spawn_facility(
            registry,
            format!("{player} Colony Battery {}", i + 1),
            player,
            Position::new(planet_pos.x, planet_pos.y + PLANET_RADIUS + i as f64, planet_pos.z),
        );
        attach(registry, facility, settlement, outbox)?;
    }

    let base_pos = offset(0.0, rng.gen_range(60.0_f64..90.0));
    let starbase = spawn_starbase(registry, format!("{player} Station"), player, base_pos);
    let battery = spawn_facility(registry, format!("{player} Station Battery"), player, base_pos);
    attach(registry, battery, starbase, outbox)?;
    designate_hq(registry, starbase, battery, outbox)?;

    let fleet_pos = offset(-rng.gen_range(40.0_f64..80.0), 0.0);
    let fleet = spawn_fleet(registry, format!("{player} Home Fleet"), player, fleet_pos);
    for i in 0..3 {
        let ship = spawn_ship(
            registry,
            format!("{player} Escort {}", i + 1),
            player,
            Position::new(fleet_pos.x + i as f64 * 2.0, fleet_pos.y, fleet_pos.z),
        );
        attach(registry, ship, fleet, outbox)?;
        if i == 0 {
            designate_hq(registry, fleet, ship, outbox)?;
        }
    }

    Ok(Homeworld {
        player,
        sector,
        star,
        planet,
        moon,
        settlement,
        starbase,
        fleet,
    })
}
