//! Monster type table and spawning.

use rand::Rng;

/// A base stat line. Spawned monsters vary slightly around these.
struct MonsterType {
    name: &'static str,
    hp: i32,
    atk: i32,
    def: i32,
}

const TYPES: [MonsterType; 5] = [
    MonsterType {
        name: "Goblin",
        hp: 12,
        atk: 4,
        def: 1,
    },
    MonsterType {
        name: "Skeleton",
        hp: 14,
        atk: 5,
        def: 1,
    },
    MonsterType {
        name: "Slime",
        hp: 10,
        atk: 3,
        def: 0,
    },
    MonsterType {
        name: "Orc",
        hp: 18,
        atk: 6,
        def: 2,
    },
    MonsterType {
        name: "Warlock",
        hp: 16,
        atk: 7,
        def: 1,
    },
];

/// One live monster in a fight.
#[derive(Debug, Clone)]
pub struct Monster {
    /// Species name for narration.
    pub name: &'static str,
    /// Remaining hit points.
    pub hp: i32,
    /// Attack rating.
    pub atk: i32,
    /// Defense rating.
    pub def: i32,
}

impl Monster {
    /// Roll a random monster: a random type with jittered stats.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let ty = &TYPES[rng.random_range(0..TYPES.len())];
        Self {
            name: ty.name,
            hp: ty.hp + rng.random_range(-2..=2),
            atk: ty.atk + rng.random_range(0..=1),
            def: ty.def + rng.random_range(0..=1),
        }
    }
}
