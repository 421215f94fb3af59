//! Player classes, stats, and leveling.

use crate::map::Pos;

/// Hit points restored by one potion (or a chest potion).
pub const POTION_HEAL: i32 = 12;

/// Experience needed to go from `level` to `level + 1`.
fn xp_threshold(level: u32) -> u32 {
    level * 20
}

/// The three playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// High defense, steady damage.
    Knight,
    /// High attack, low defense.
    Wizard,
    /// High crit chance.
    Rogue,
}

/// Starting stats for a class.
#[derive(Debug, Clone, Copy)]
pub struct ClassStats {
    /// Starting (and max) hit points.
    pub hp: i32,
    /// Attack rating.
    pub atk: i32,
    /// Defense rating.
    pub def: i32,
    /// Critical hit chance in [0, 1].
    pub crit: f64,
    /// Display name of the class skill.
    pub skill: &'static str,
}

impl ClassKind {
    /// All classes, menu order.
    pub const ALL: [ClassKind; 3] = [ClassKind::Knight, ClassKind::Wizard, ClassKind::Rogue];

    /// The class's starting stat block.
    pub fn stats(&self) -> ClassStats {
        match self {
            ClassKind::Knight => ClassStats {
                hp: 30,
                atk: 7,
                def: 3,
                crit: 0.05,
                skill: "Shield Bash",
            },
            ClassKind::Wizard => ClassStats {
                hp: 24,
                atk: 9,
                def: 1,
                crit: 0.07,
                skill: "Fireball",
            },
            ClassKind::Rogue => ClassStats {
                hp: 26,
                atk: 6,
                def: 2,
                crit: 0.18,
                skill: "Backstab",
            },
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ClassKind::Knight => "knight",
            ClassKind::Wizard => "wizard",
            ClassKind::Rogue => "rogue",
        };
        f.write_str(name)
    }
}

/// The player character for one dungeon run.
#[derive(Debug, Clone)]
pub struct Player {
    /// Chosen class.
    pub class: ClassKind,
    /// Current tile.
    pub pos: Pos,
    /// Current hit points; at or below zero the run ends.
    pub hp: i32,
    /// Hit point cap.
    pub max_hp: i32,
    /// Attack rating.
    pub atk: i32,
    /// Defense rating.
    pub def: i32,
    /// Critical hit chance in [0, 1].
    pub crit: f64,
    /// Potions held.
    pub potions: u32,
    /// Gold collected this run.
    pub gold: u32,
    /// Experience toward the next level.
    pub xp: u32,
    /// Current level, starting at 1.
    pub level: u32,
}

impl Player {
    /// A fresh level-1 player of the given class, holding one potion.
    pub fn new(class: ClassKind, pos: Pos) -> Self {
        let stats = class.stats();
        Self {
            class,
            pos,
            hp: stats.hp,
            max_hp: stats.hp,
            atk: stats.atk,
            def: stats.def,
            crit: stats.crit,
            potions: 1,
            gold: 0,
            xp: 0,
            level: 1,
        }
    }

    /// True once hit points have dropped to zero or below.
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Restore hit points, capped at max. Returns the amount actually
    /// restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Drink one potion if any are held. Returns false on an empty pouch.
    pub fn drink_potion(&mut self) -> bool {
        if self.potions == 0 {
            return false;
        }
        self.potions -= 1;
        self.heal(POTION_HEAL);
        true
    }

    /// Add experience and apply any level-ups. Returns levels gained.
    ///
    /// Each level costs `level * 20` xp, raises max hp by 3 (refilling hp),
    /// attack by 1, and defense by 1 on every even level.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= xp_threshold(self.level) {
            self.xp -= xp_threshold(self.level);
            self.level += 1;
            self.max_hp += 3;
            self.hp = self.max_hp;
            self.atk += 1;
            if self.level % 2 == 0 {
                self.def += 1;
            }
            gained += 1;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Player {
        Player::new(ClassKind::Knight, Pos { x: 2, y: 2 })
    }

    #[test]
    fn class_table_matches_design() {
        let w = ClassKind::Wizard.stats();
        assert_eq!((w.hp, w.atk, w.def), (24, 9, 1));
        assert_eq!(w.skill, "Fireball");
        let r = ClassKind::Rogue.stats();
        assert!((r.crit - 0.18).abs() < f64::EPSILON);
    }

    #[test]
    fn xp_below_threshold_does_not_level() {
        let mut p = knight();
        p.xp = 9;
        assert_eq!(p.gain_xp(10), 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 19);
    }

    #[test]
    fn crossing_threshold_levels_exactly_once() {
        let mut p = knight();
        p.xp = 19;
        let (atk, def, max_hp) = (p.atk, p.def, p.max_hp);

        assert_eq!(p.gain_xp(1), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 0);
        assert_eq!(p.max_hp, max_hp + 3);
        assert_eq!(p.hp, p.max_hp);
        assert_eq!(p.atk, atk + 1);
        // Level 2 is even: defense rises too.
        assert_eq!(p.def, def + 1);
    }

    #[test]
    fn big_xp_grants_can_level_twice() {
        let mut p = knight();
        // 20 to reach level 2, then 40 more for level 3.
        assert_eq!(p.gain_xp(60), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 0);
        // Level 3 is odd: defense rose only once (at level 2).
        assert_eq!(p.def, ClassKind::Knight.stats().def + 1);
    }

    #[test]
    fn potions_heal_capped_at_max() {
        let mut p = knight();
        p.hp = 25;
        assert!(p.drink_potion());
        assert_eq!(p.hp, 30);
        assert_eq!(p.potions, 0);
        assert!(!p.drink_potion());
    }

    #[test]
    fn death_is_at_or_below_zero() {
        let mut p = knight();
        p.hp = 0;
        assert!(p.is_dead());
        p.hp = -3;
        assert!(p.is_dead());
    }
}
