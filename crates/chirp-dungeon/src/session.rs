//! The game session state machine.
//!
//! [`GameState`] owns the map, the player, the scrolling log, and the
//! current fight if one is running. The frontend feeds it [`Command`]s and
//! renders whatever comes out.

use rand::Rng;

use crate::combat::{Combat, PlayerAction};
use crate::log::{LogKind, LogLine};
use crate::map::{DungeonMap, HEIGHT, Pos, Tile, WIDTH};
use crate::monster::Monster;
use crate::player::{ClassKind, POTION_HEAL, Player};

/// Chance of a surprise encounter when stepping onto plain floor.
const ENCOUNTER_CHANCE: f64 = 0.06;

/// A movement direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Toward column 0.
    Left,
    /// Away from column 0.
    Right,
}

/// One player input, already decoded from whatever the frontend reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step one tile. Ignored during a fight.
    Move(Direction),
    /// A combat action. Ignored outside a fight.
    Combat(PlayerAction),
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player reached the exit.
    Won,
    /// The player's hit points ran out.
    Dead,
}

/// A full dungeon run in progress.
#[derive(Debug)]
pub struct GameState {
    /// The grid, with tiles consumed as the player steps on them.
    pub map: DungeonMap,
    /// The player character.
    pub player: Player,
    combat: Option<Combat>,
    /// Narration lines, oldest first. The frontend tails this.
    pub log: Vec<LogLine>,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Start a fresh run with the given class.
    pub fn new<R: Rng + ?Sized>(class: ClassKind, rng: &mut R) -> Self {
        let map = DungeonMap::generate(rng);
        let player = Player::new(class, DungeonMap::START);
        let log = vec![LogLine::new(
            LogKind::Info,
            "You descend into the dungeon. Find the exit!",
        )];
        Self {
            map,
            player,
            combat: None,
            log,
            outcome: None,
        }
    }

    /// True while a fight is running.
    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// The monster currently being fought, if any.
    pub fn monster(&self) -> Option<&Monster> {
        self.combat.as_ref().map(Combat::monster)
    }

    /// How the run ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Apply one command. Does nothing once the run is over.
    pub fn handle<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) {
        if self.outcome.is_some() {
            return;
        }
        match command {
            Command::Move(dir) => self.step(dir, rng),
            Command::Combat(action) => self.fight(action, rng),
        }
    }

    fn step<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) {
        if self.in_combat() {
            return;
        }
        let Pos { x, y } = self.player.pos;
        let target = match dir {
            Direction::Up => Pos { x, y: y.saturating_sub(1).max(1) },
            Direction::Down => Pos { x, y: (y + 1).min(HEIGHT - 2) },
            Direction::Left => Pos { x: x.saturating_sub(1).max(1), y },
            Direction::Right => Pos { x: (x + 1).min(WIDTH - 2), y },
        };
        if self.map.tile(target) == Tile::Wall {
            self.log
                .push(LogLine::new(LogKind::Dim, "You bump into a wall."));
            return;
        }
        self.player.pos = target;
        match self.map.tile(target) {
            Tile::Monster => {
                self.map.set(target, Tile::Floor);
                self.start_combat(rng);
            }
            Tile::Chest => {
                self.map.set(target, Tile::Floor);
                self.open_chest(rng);
            }
            Tile::Exit => {
                self.outcome = Some(Outcome::Won);
                self.log.push(LogLine::new(
                    LogKind::Good,
                    "You found the exit! You escape the dungeon.",
                ));
            }
            Tile::Floor => {
                if rng.random::<f64>() < ENCOUNTER_CHANCE {
                    self.start_combat(rng);
                }
            }
            Tile::Wall => {}
        }
    }

    fn start_combat<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let monster = Monster::spawn(rng);
        self.log.push(LogLine::new(
            LogKind::Notice,
            format!("A {} appears!", monster.name),
        ));
        self.combat = Some(Combat::new(monster));
    }

    fn open_chest<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match rng.random_range(0..3) {
            0 => {
                self.player.heal(POTION_HEAL);
                self.log.push(LogLine::new(
                    LogKind::Notice,
                    format!(
                        "The chest holds a potion. You drink it. {}/{} hp.",
                        self.player.hp, self.player.max_hp
                    ),
                ));
            }
            1 => {
                self.player.atk += 2;
                self.log.push(LogLine::new(
                    LogKind::Notice,
                    "The chest holds a sharper blade. +2 atk.",
                ));
            }
            _ => {
                self.player.gold += 10;
                self.log.push(LogLine::new(
                    LogKind::Notice,
                    "The chest holds a gem. +10 gold.",
                ));
            }
        }
    }

    fn fight<R: Rng + ?Sized>(&mut self, action: PlayerAction, rng: &mut R) {
        let Some(combat) = self.combat.as_mut() else {
            return;
        };
        let resolution = combat.step(&mut self.player, action, rng, &mut self.log);
        if resolution.is_some() {
            // Victory and flight lines were already logged by the fight.
            self.combat = None;
        }
        if self.player.is_dead() {
            self.combat = None;
            self.outcome = Some(Outcome::Dead);
            self.log.push(LogLine::new(
                LogKind::Bad,
                "You have fallen. The dungeon claims another adventurer.",
            ));
        }
    }
}
