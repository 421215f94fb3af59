//! Grid map generation and tile queries.
//!
//! Maps are a fixed 25x12 grid: solid border walls, scattered interior
//! walls, a cleared pocket around the spawn, one exit, and a handful of
//! monster and chest tiles. Exit, monsters, and chests are placed only on
//! cells flood-fill-reachable from the spawn, so every generated map can
//! be won.

use std::collections::HashSet;

use rand::Rng;

/// Map width in tiles, border included.
pub const WIDTH: usize = 25;
/// Map height in tiles, border included.
pub const HEIGHT: usize = 12;
/// Probability that an interior cell starts as a wall.
const WALL_DENSITY: f64 = 0.12;
/// How many monster tiles a fresh map carries.
pub const MONSTER_COUNT: usize = 6;
/// How many chest tiles a fresh map carries.
pub const CHEST_COUNT: usize = 5;

/// A tile coordinate. `x` grows rightward, `y` downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

/// The symbolic content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Impassable.
    Wall,
    /// Walkable, nothing on it.
    Floor,
    /// Walkable; stepping on it starts a fight and clears the tile.
    Monster,
    /// Walkable; stepping on it grants loot and clears the tile.
    Chest,
    /// Walkable; stepping on it wins the run.
    Exit,
}

/// The dungeon grid, mutated in place as tiles are consumed.
#[derive(Debug, Clone)]
pub struct DungeonMap {
    tiles: Vec<Vec<Tile>>,
}

impl DungeonMap {
    /// Where the player spawns. The surrounding pocket is always clear.
    pub const START: Pos = Pos { x: 2, y: 2 };

    /// Generate a fresh map.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Needed floor cells: spawn, exit, monsters, chests, and a little
        // room to walk. Re-carve on the (rare) degenerate layout.
        let needed = 2 + MONSTER_COUNT + CHEST_COUNT + 4;
        loop {
            let mut map = Self::carve(rng);
            let mut open: Vec<Pos> = map
                .reachable_from(Self::START)
                .into_iter()
                .filter(|&p| p != Self::START)
                .collect();
            if open.len() < needed {
                continue;
            }
            // Deterministic candidate order before random sampling.
            open.sort_by_key(|p| (p.y, p.x));

            let mut place = |map: &mut Self, tile: Tile| {
                let idx = rng.random_range(0..open.len());
                let pos = open.swap_remove(idx);
                map.set(pos, tile);
            };
            place(&mut map, Tile::Exit);
            for _ in 0..MONSTER_COUNT {
                place(&mut map, Tile::Monster);
            }
            for _ in 0..CHEST_COUNT {
                place(&mut map, Tile::Chest);
            }
            return map;
        }
    }

    /// Border walls, random interior walls, cleared spawn pocket.
    fn carve<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = vec![vec![Tile::Floor; WIDTH]; HEIGHT];
        for (y, row) in tiles.iter_mut().enumerate() {
            for (x, tile) in row.iter_mut().enumerate() {
                if y == 0 || y == HEIGHT - 1 || x == 0 || x == WIDTH - 1 {
                    *tile = Tile::Wall;
                } else if rng.random::<f64>() < WALL_DENSITY {
                    *tile = Tile::Wall;
                }
            }
        }
        let s = Self::START;
        tiles[s.y][s.x] = Tile::Floor;
        tiles[s.y][s.x + 1] = Tile::Floor;
        tiles[s.y + 1][s.x] = Tile::Floor;
        Self { tiles }
    }

    /// The tile at a position. Out-of-bounds reads as wall.
    pub fn tile(&self, pos: Pos) -> Tile {
        self.tiles
            .get(pos.y)
            .and_then(|row| row.get(pos.x))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    /// Overwrite the tile at a position. Out-of-bounds is a no-op.
    pub fn set(&mut self, pos: Pos, tile: Tile) {
        if let Some(cell) = self.tiles.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *cell = tile;
        }
    }

    /// All non-wall cells reachable from `start` by 4-directional moves.
    pub fn reachable_from(&self, start: Pos) -> HashSet<Pos> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            if self.tile(pos) == Tile::Wall || !seen.insert(pos) {
                continue;
            }
            if pos.x > 0 {
                stack.push(Pos { x: pos.x - 1, ..pos });
            }
            if pos.y > 0 {
                stack.push(Pos { y: pos.y - 1, ..pos });
            }
            stack.push(Pos { x: pos.x + 1, ..pos });
            stack.push(Pos { y: pos.y + 1, ..pos });
        }
        seen
    }

    /// Count tiles of a given kind.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }
}
