//! Turn-based combat resolution.
//!
//! A [`Combat`] holds the monster being fought. Each call to [`Combat::step`]
//! applies one player action, and if the fight is still going, one monster
//! swing back. Player death is left for the session to notice, so a fatal
//! blow still produces its log line.

use rand::Rng;

use crate::log::{LogKind, LogLine};
use crate::monster::Monster;
use crate::player::Player;

/// Damage multiplier applied to critical hits.
const CRIT_MULTIPLIER: f64 = 1.7;
/// Experience awarded for a kill.
const VICTORY_XP: u32 = 10;

/// What the player does with their combat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// A plain weapon swing.
    Attack,
    /// The class skill.
    Skill,
    /// Drink a potion. Costs the turn only if a potion was held.
    Potion,
    /// Try to flee. 50/50.
    Run,
}

/// How a fight ended, if it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The monster died.
    Victory {
        /// Gold looted.
        gold: u32,
        /// Experience gained.
        xp: u32,
        /// Levels gained from that experience.
        levels: u32,
    },
    /// The player escaped.
    Fled,
}

/// One fight in progress.
#[derive(Debug, Clone)]
pub struct Combat {
    monster: Monster,
}

/// A damage roll: attack minus defense, floored at 1, plus a small swing.
fn attack_roll<R: Rng + ?Sized>(atk: f64, def: i32, rng: &mut R) -> i32 {
    let base = (atk - f64::from(def)).max(1.0);
    let swing = f64::from(rng.random_range(-1..=2));
    (base + swing).max(1.0).floor() as i32
}

impl Combat {
    /// Start a fight against the given monster.
    pub fn new(monster: Monster) -> Self {
        Self { monster }
    }

    /// The monster being fought.
    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    /// Apply one player action. Returns `Some` once the fight is over.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        player: &mut Player,
        action: PlayerAction,
        rng: &mut R,
        log: &mut Vec<LogLine>,
    ) -> Option<Resolution> {
        match action {
            PlayerAction::Attack => {
                self.player_swing(player, 1.0, 0.0, rng, log);
            }
            PlayerAction::Skill => {
                let skill = player.class.stats().skill;
                log.push(LogLine::new(LogKind::Notice, format!("{skill}!")));
                let (mult, crit_bonus) = match player.class {
                    crate::player::ClassKind::Knight => {
                        // Shield Bash dazes: the monster swings softer from
                        // here on.
                        self.monster.atk = (self.monster.atk - 1).max(1);
                        (1.1, 0.0)
                    }
                    crate::player::ClassKind::Wizard => (1.4, 0.05),
                    crate::player::ClassKind::Rogue => (1.0, 0.25),
                };
                self.player_swing(player, mult, crit_bonus, rng, log);
            }
            PlayerAction::Potion => {
                if player.drink_potion() {
                    log.push(LogLine::new(
                        LogKind::Good,
                        format!("You drink a potion. {}/{} hp.", player.hp, player.max_hp),
                    ));
                } else {
                    log.push(LogLine::new(LogKind::Dim, "No potions left!"));
                    // The turn is not spent; the monster does not get a swing.
                    return None;
                }
            }
            PlayerAction::Run => {
                if rng.random::<f64>() < 0.5 {
                    log.push(LogLine::new(
                        LogKind::Info,
                        format!("You slip away from the {}.", self.monster.name),
                    ));
                    return Some(Resolution::Fled);
                }
                log.push(LogLine::new(LogKind::Bad, "You fail to escape!"));
            }
        }

        if self.monster.hp <= 0 {
            let gold = rng.random_range(8..=16);
            player.gold += gold;
            let levels = player.gain_xp(VICTORY_XP);
            log.push(LogLine::new(
                LogKind::Good,
                format!(
                    "You defeated the {}! +{gold} gold, +{VICTORY_XP} xp.",
                    self.monster.name
                ),
            ));
            if levels > 0 {
                log.push(LogLine::new(
                    LogKind::Notice,
                    format!("Level up! You are now level {}.", player.level),
                ));
            }
            return Some(Resolution::Victory {
                gold,
                xp: VICTORY_XP,
                levels,
            });
        }

        self.monster_swing(player, rng, log);
        None
    }

    fn player_swing<R: Rng + ?Sized>(
        &mut self,
        player: &Player,
        mult: f64,
        crit_bonus: f64,
        rng: &mut R,
        log: &mut Vec<LogLine>,
    ) {
        let crit = rng.random::<f64>() < player.crit + crit_bonus;
        let mut dmg = attack_roll(f64::from(player.atk) * mult, self.monster.def, rng);
        if crit {
            dmg = (f64::from(dmg) * CRIT_MULTIPLIER).floor() as i32;
        }
        self.monster.hp -= dmg;
        let name = self.monster.name;
        if crit {
            log.push(LogLine::new(
                LogKind::Good,
                format!("Critical hit! You strike the {name} for {dmg}."),
            ));
        } else {
            log.push(LogLine::new(
                LogKind::Good,
                format!("You hit the {name} for {dmg}."),
            ));
        }
    }

    fn monster_swing<R: Rng + ?Sized>(
        &mut self,
        player: &mut Player,
        rng: &mut R,
        log: &mut Vec<LogLine>,
    ) {
        let dmg = attack_roll(f64::from(self.monster.atk), player.def, rng);
        player.hp -= dmg;
        log.push(LogLine::new(
            LogKind::Bad,
            format!("The {} hits you for {dmg}.", self.monster.name),
        ));
    }
}
