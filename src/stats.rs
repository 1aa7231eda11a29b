//! The upgrade economy: ten levelled stats bought with score.
//!
//! A [`Stat`] starts at level 1 and climbs one level per purchase up to its
//! maximum.  Its effective value is linear in the level and the price of the
//! next level is linear in the current one:
//!
//! ```text
//! value(level) = base + increment × (level − 1)
//! cost(level)  = base_cost × level          (0 once level == max_level)
//! ```
//!
//! [`PlayerStats`] is the fixed, ordered catalog.  The order is the order of
//! rows in the upgrade menu; nothing indexes it by position except the menu.
//! The craft reads stats live every tick, so a purchase takes effect at once.

use bevy::prelude::*;

/// One upgradeable numeric attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    base: f32,
    increment: f32,
    max_level: u32,
    level: u32,
    name: &'static str,
    base_cost: f32,
}

impl Stat {
    pub fn new(base: f32, increment: f32, max_level: u32, name: &'static str, base_cost: f32) -> Self {
        Self {
            base,
            increment,
            max_level: max_level.max(1),
            level: 1,
            name,
            base_cost,
        }
    }

    /// Effective value at the current level.
    #[inline]
    pub fn value(&self) -> f32 {
        self.base + self.increment * (self.level - 1) as f32
    }

    /// Score needed to buy the next level; `0.0` once the stat is maxed out.
    #[inline]
    pub fn next_level_cost(&self) -> f32 {
        if self.is_maxed() {
            0.0
        } else {
            self.base_cost * self.level as f32
        }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    /// Spend score and increment the level.  Returns the amount spent, or
    /// `None` if the stat is maxed out or `score` cannot cover the cost.
    ///
    /// A maxed stat is rejected regardless of score, even though its quoted
    /// cost is zero.
    pub fn try_upgrade(&mut self, score: &mut f32) -> Option<f32> {
        if self.is_maxed() {
            return None;
        }
        let cost = self.next_level_cost();
        if cost > *score {
            return None;
        }
        *score -= cost;
        self.level += 1;
        Some(cost)
    }
}

/// Names the ten stats in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    TurnRate,
    EngineForce,
    ShotDelay,
    ShotRange,
    ShotSpeed,
    ShotDamage,
    MaxShield,
    ShieldRegenDelay,
    ShieldRegenSpeed,
    Hull,
}

impl StatKind {
    /// Every stat, in upgrade-menu order.
    pub const ALL: [StatKind; 10] = [
        StatKind::TurnRate,
        StatKind::EngineForce,
        StatKind::ShotDelay,
        StatKind::ShotRange,
        StatKind::ShotSpeed,
        StatKind::ShotDamage,
        StatKind::MaxShield,
        StatKind::ShieldRegenDelay,
        StatKind::ShieldRegenSpeed,
        StatKind::Hull,
    ];

    /// Level-1 definition of this stat.
    fn initial(self) -> Stat {
        match self {
            // Radians per second.
            StatKind::TurnRate => Stat::new(1.0, 0.1, 10, "Turning Rate", 25.0),
            StatKind::EngineForce => Stat::new(1000.0, 100.0, 10, "Engine Force", 50.0),
            // Milliseconds between auto-repeat shots.
            StatKind::ShotDelay => Stat::new(400.0, -30.0, 10, "Delay Between Shots", 50.0),
            StatKind::ShotRange => Stat::new(500.0, 100.0, 5, "Range of Shots", 75.0),
            StatKind::ShotSpeed => Stat::new(1000.0, 200.0, 10, "Speed of Each Shot", 50.0),
            StatKind::ShotDamage => Stat::new(1.0, 1.0, 3, "Shot Damage", 150.0),
            StatKind::MaxShield => Stat::new(50.0, 10.0, 10, "Shield Capacity", 100.0),
            // Seconds without damage before the shield starts to recharge.
            StatKind::ShieldRegenDelay => Stat::new(6.0, -0.3, 10, "Shield Regen Delay", 150.0),
            // Shield points per second.
            StatKind::ShieldRegenSpeed => Stat::new(25.0, 15.0, 10, "Shield Regen Speed", 125.0),
            StatKind::Hull => Stat::new(50.0, 10.0, 10, "Hull Strength", 75.0),
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// The fixed catalog of ten stats, rebuilt at level 1 on every reset.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerStats {
    stats: [Stat; 10],
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            stats: StatKind::ALL.map(StatKind::initial),
        }
    }
}

impl PlayerStats {
    #[inline]
    pub fn get(&self, kind: StatKind) -> &Stat {
        &self.stats[kind.index()]
    }

    /// Shorthand for `get(kind).value()`.
    #[inline]
    pub fn value(&self, kind: StatKind) -> f32 {
        self.get(kind).value()
    }

    /// Stat at a menu row, if the row exists.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&Stat> {
        self.stats.get(index)
    }

    /// Stats in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Buy the next level of the stat at menu row `index`.
    ///
    /// Returns the score spent, or `None` when the row does not exist, the stat
    /// is maxed out, or `score` is short of the cost.
    pub fn purchase(&mut self, index: usize, score: &mut f32) -> Option<f32> {
        self.stats.get_mut(index)?.try_upgrade(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_linear_in_level() {
        let mut stat = Stat::new(50.0, 10.0, 10, "Hull Strength", 75.0);
        assert_eq!(stat.value(), 50.0);
        let mut score = 1_000.0;
        stat.try_upgrade(&mut score).unwrap();
        stat.try_upgrade(&mut score).unwrap();
        assert_eq!(stat.level(), 3);
        assert_eq!(stat.value(), 70.0);
    }

    #[test]
    fn cost_scales_with_level_and_is_zero_at_max() {
        let mut stat = Stat::new(1.0, 1.0, 3, "Shot Damage", 150.0);
        assert_eq!(stat.next_level_cost(), 150.0);
        let mut score = 10_000.0;
        stat.try_upgrade(&mut score).unwrap();
        assert_eq!(stat.next_level_cost(), 300.0);
        stat.try_upgrade(&mut score).unwrap();
        assert!(stat.is_maxed());
        assert_eq!(stat.next_level_cost(), 0.0);
    }

    #[test]
    fn value_never_decreases_for_non_negative_increment() {
        let mut stats = PlayerStats::default();
        let mut score = f32::MAX;
        for (index, kind) in StatKind::ALL.iter().enumerate() {
            let stat = stats.get(*kind).clone();
            if stat.increment < 0.0 {
                continue;
            }
            let mut last = stat.value();
            while stats.purchase(index, &mut score).is_some() {
                let now = stats.get(*kind).value();
                assert!(now >= last, "{} dropped from {last} to {now}", stat.name());
                last = now;
            }
            assert_eq!(stats.get(*kind).next_level_cost(), 0.0);
        }
    }

    #[test]
    fn maxed_stat_rejects_upgrade_regardless_of_score() {
        let mut stat = Stat::new(500.0, 100.0, 5, "Range of Shots", 75.0);
        let mut score = f32::MAX;
        while stat.try_upgrade(&mut score).is_some() {}
        assert_eq!(stat.level(), 5);

        let mut plenty = 1.0e9;
        assert_eq!(stat.try_upgrade(&mut plenty), None);
        assert_eq!(plenty, 1.0e9, "rejected purchase must not spend score");
        assert_eq!(stat.level(), 5);
    }

    #[test]
    fn purchase_deducts_cost_and_raises_one_level() {
        let mut stats = PlayerStats::default();
        let mut score = 120.0;
        let spent = stats.purchase(1, &mut score);
        assert_eq!(spent, Some(50.0));
        assert_eq!(score, 70.0);
        assert_eq!(stats.get(StatKind::EngineForce).level(), 2);
        assert_eq!(stats.value(StatKind::EngineForce), 1100.0);
    }

    #[test]
    fn purchase_rejects_when_score_is_short() {
        let mut stats = PlayerStats::default();
        let mut score = 24.0;
        assert_eq!(stats.purchase(0, &mut score), None);
        assert_eq!(score, 24.0);
        assert_eq!(stats.get(StatKind::TurnRate).level(), 1);
    }

    #[test]
    fn purchase_out_of_range_row_is_rejected() {
        let mut stats = PlayerStats::default();
        let mut score = 1_000.0;
        assert_eq!(stats.purchase(10, &mut score), None);
        assert_eq!(score, 1_000.0);
    }

    #[test]
    fn catalog_order_matches_menu() {
        let stats = PlayerStats::default();
        let names: Vec<_> = stats.iter().map(Stat::name).collect();
        assert_eq!(
            names,
            [
                "Turning Rate",
                "Engine Force",
                "Delay Between Shots",
                "Range of Shots",
                "Speed of Each Shot",
                "Shot Damage",
                "Shield Capacity",
                "Shield Regen Delay",
                "Shield Regen Speed",
                "Hull Strength",
            ]
        );
        assert!(stats.iter().all(|s| s.level() == 1));
    }
}
