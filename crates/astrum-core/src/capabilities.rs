//! Capability traits and concrete kind markers.
//!
//! A concrete kind is a zero-sized marker that implements exactly the
//! capabilities it supports. Operations elsewhere are generic over a
//! capability bound and take a typed [`Handle`], so asking for an absent
//! capability (the owner of a star, the weapons range of a planet) fails
//! to compile instead of falling back at runtime.
//!
//! | Kind            | Sector | Mortal | Owned | Combat | Target | Element | Command | Intel |
//! |-----------------|:------:|:------:|:-----:|:------:|:------:|:-------:|:-------:|:-----:|
//! | Ship            |   x    |   x    |   x   |   x    |   x    |    x    |         |   x   |
//! | Facility        |   x    |   x    |   x   |   x    |   x    |    x    |         |   x   |
//! | Fleet           |   x    |   x    |   x   |   x    |   x    |         |    x    |   x   |
//! | Starbase        |   x    |   x    |   x   |   x    |   x    |         |    x    |   x   |
//! | Settlement      |   x    |   x    |   x   |   x    |   x    |         |    x    |   x   |
//! | Planet, Moon    |   x    |   x    |       |        |   x    |         |         |   x   |
//! | Star            |   x    |   x    |       |        |        |         |         |   x   |
//! | Sector          |   x    |        |   x   |        |        |         |         |   x   |
//! | UniverseCenter  |   x    |        |       |        |        |         |         |   x   |
//! | Ordnance        |   x    |   x    |   x   |        |   x    |         |         |   x   |

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::enums::EntityKind;
use crate::types::EntityId;

/// Base contract: every entity kind names itself.
pub trait Kind: Copy + Send + Sync + 'static {
    const KIND: EntityKind;
}

/// Carries a `SectorIndex`.
pub trait SectorLocated: Kind {}

/// Carries `Vitals`; dies exactly once.
pub trait Mortal: SectorLocated {}

/// Carries `Ownership`; the owner is always set.
pub trait Owned: Kind {}

/// Carries an `IntelRecord` observed per faction.
pub trait IntelTracked: Kind {}

/// Carries `Armament`; may request targets.
pub trait CombatCapable: Mortal + Owned {}

/// May appear in a targeting candidate pool.
pub trait Targetable: Mortal + IntelTracked {}

/// Carries `Membership`; belongs to at most one command.
pub trait ElementCapable: Mortal + Owned {}

/// Carries a `Roster` of elements of a single accepted kind.
pub trait CommandCapable: CombatCapable {
    const ELEMENT_KIND: EntityKind;
}

macro_rules! kind_marker {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Kind for $name {
            const KIND: EntityKind = EntityKind::$name;
        }
    };
}

kind_marker!(
    /// A mobile combat element.
    Ship
);
kind_marker!(
    /// A stationary combat element of a base or settlement.
    Facility
);
kind_marker!(
    /// Mobile command of ships.
    Fleet
);
kind_marker!(
    /// Stationary command of facilities.
    Starbase
);
kind_marker!(
    /// Planet-bound command of facilities.
    Settlement
);
kind_marker!(Planet);
kind_marker!(Moon);
kind_marker!(Star);
kind_marker!(
    /// Ownership claim over a galaxy grid cell.
    Sector
);
kind_marker!(
    /// The galactic center. There is exactly one.
    UniverseCenter
);
kind_marker!(
    /// Launched weapons (missiles, torpedoes) in flight.
    Ordnance
);

impl SectorLocated for Ship {}
impl Mortal for Ship {}
impl Owned for Ship {}
impl IntelTracked for Ship {}
impl CombatCapable for Ship {}
impl Targetable for Ship {}
impl ElementCapable for Ship {}

impl SectorLocated for Facility {}
impl Mortal for Facility {}
impl Owned for Facility {}
impl IntelTracked for Facility {}
impl CombatCapable for Facility {}
impl Targetable for Facility {}
impl ElementCapable for Facility {}

impl SectorLocated for Fleet {}
impl Mortal for Fleet {}
impl Owned for Fleet {}
impl IntelTracked for Fleet {}
impl CombatCapable for Fleet {}
impl Targetable for Fleet {}
impl CommandCapable for Fleet {
    const ELEMENT_KIND: EntityKind = EntityKind::Ship;
}

impl SectorLocated for Starbase {}
impl Mortal for Starbase {}
impl Owned for Starbase {}
impl IntelTracked for Starbase {}
impl CombatCapable for Starbase {}
impl Targetable for Starbase {}
impl CommandCapable for Starbase {
    const ELEMENT_KIND: EntityKind = EntityKind::Facility;
}

impl SectorLocated for Settlement {}
impl Mortal for Settlement {}
impl Owned for Settlement {}
impl IntelTracked for Settlement {}
impl CombatCapable for Settlement {}
impl Targetable for Settlement {}
impl CommandCapable for Settlement {
    const ELEMENT_KIND: EntityKind = EntityKind::Facility;
}

impl SectorLocated for Planet {}
impl Mortal for Planet {}
impl IntelTracked for Planet {}
impl Targetable for Planet {}

impl SectorLocated for Moon {}
impl Mortal for Moon {}
impl IntelTracked for Moon {}
impl Targetable for Moon {}

impl SectorLocated for Star {}
impl Mortal for Star {}
impl IntelTracked for Star {}

impl SectorLocated for Sector {}
impl Owned for Sector {}
impl IntelTracked for Sector {}

impl SectorLocated for UniverseCenter {}
impl IntelTracked for UniverseCenter {}

impl SectorLocated for Ordnance {}
impl Mortal for Ordnance {}
impl Owned for Ordnance {}
impl IntelTracked for Ordnance {}
impl Targetable for Ordnance {}

/// Identity tagged with its kind at the type level.
///
/// Handles are issued by the registry on spawn. A handle built with
/// [`Handle::from_raw`] is re-checked against the registry's kind index
/// on every use.
pub struct Handle<K: Kind> {
    id: EntityId,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Handle<K> {
    pub fn from_raw(id: EntityId) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        K::KIND
    }
}

impl<K: Kind> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Kind> Copy for Handle<K> {}

impl<K: Kind> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: Kind> Eq for Handle<K> {}

impl<K: Kind> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<K: Kind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{:?}>({})", K::KIND, self.id)
    }
}

impl<K: Kind> From<Handle<K>> for EntityId {
    fn from(handle: Handle<K>) -> Self {
        handle.id
    }
}
