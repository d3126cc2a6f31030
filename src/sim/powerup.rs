//! Power-ups: field pickups, timed effects, and the stacking rules
//!
//! A field pickup becomes either an instant heal or an `ActivePowerUp`.
//! Active effects hold at most one entry per kind; picking up the same kind
//! again refreshes the countdown. `PowerStats` folds the active set into
//! the multipliers the rest of the frame reads.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clamp_to_playfield;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    SpreadShot,
    DamageBoost,
    SpeedBoost,
    Shield,
    RocketLauncher,
    HealthPack,
}

impl PowerUpKind {
    /// Effect duration in seconds (0 for the instant heal)
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::RapidFire => 8.0,
            PowerUpKind::SpreadShot => 10.0,
            PowerUpKind::DamageBoost => 8.0,
            PowerUpKind::SpeedBoost => 6.0,
            PowerUpKind::Shield => 12.0,
            PowerUpKind::RocketLauncher => 12.0,
            PowerUpKind::HealthPack => 0.0,
        }
    }

    pub fn color(self) -> [u8; 4] {
        match self {
            PowerUpKind::RapidFire => [255, 161, 0, 255],
            PowerUpKind::SpreadShot => [120, 220, 120, 255],
            PowerUpKind::DamageBoost => [255, 80, 110, 255],
            PowerUpKind::SpeedBoost => [90, 200, 255, 255],
            PowerUpKind::Shield => [150, 240, 255, 255],
            PowerUpKind::RocketLauncher => [255, 150, 60, 255],
            PowerUpKind::HealthPack => [80, 230, 120, 255],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "Rapid",
            PowerUpKind::SpreadShot => "Spread",
            PowerUpKind::DamageBoost => "Damage",
            PowerUpKind::SpeedBoost => "Speed",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::RocketLauncher => "Rocket",
            PowerUpKind::HealthPack => "Health",
        }
    }

    /// Field pickup radius
    pub fn pickup_radius(self) -> f32 {
        match self {
            PowerUpKind::Shield | PowerUpKind::RocketLauncher => LARGE_PICKUP_RADIUS,
            _ => PICKUP_RADIUS,
        }
    }

    /// Applied instantly instead of tracked as a timed effect
    pub fn is_instant(self) -> bool {
        self == PowerUpKind::HealthPack
    }
}

/// Non-health kinds available on a wave (Shield from wave 2, Rocket from wave 3)
pub fn drop_pool(wave: u32) -> Vec<PowerUpKind> {
    let mut pool = vec![
        PowerUpKind::RapidFire,
        PowerUpKind::SpreadShot,
        PowerUpKind::DamageBoost,
        PowerUpKind::SpeedBoost,
    ];
    if wave >= 2 {
        pool.push(PowerUpKind::Shield);
    }
    if wave >= 3 {
        pool.push(PowerUpKind::RocketLauncher);
    }
    pool
}

/// Uniform pick from the wave's pool
pub fn random_kind<R: Rng>(rng: &mut R, wave: u32) -> PowerUpKind {
    let pool = drop_pool(wave);
    pool[rng.random_range(0..pool.len())]
}

/// Chance that a drop is a health pack, given the missing health fraction
pub fn health_drop_chance(missing_ratio: f32) -> f32 {
    (HEALTH_DROP_BIAS + missing_ratio * HEALTH_DROP_MISSING_WEIGHT)
        .clamp(0.0, MAX_HEALTH_DROP_CHANCE)
}

/// `true` with probability `chance`, in thousandths like the rest of the drop rolls
fn roll_thousandths<R: Rng>(rng: &mut R, chance: f32) -> bool {
    rng.random_range(0..=999) < (chance * 1000.0) as i32
}

/// Decide what (if anything) a dead enemy leaves behind.
///
/// One roll gates any drop. A hurt player then gets a second roll for a
/// health pack; otherwise a random kind from the wave's pool.
pub fn roll_drop<R: Rng>(
    rng: &mut R,
    drop_chance: f32,
    health_ratio: f32,
    wave: u32,
) -> Option<PowerUpKind> {
    if !roll_thousandths(rng, drop_chance.clamp(0.0, 1.0)) {
        return None;
    }
    if health_ratio < 1.0 {
        let missing = (1.0 - health_ratio).clamp(0.0, 1.0);
        if roll_thousandths(rng, health_drop_chance(missing)) {
            return Some(PowerUpKind::HealthPack);
        }
    }
    Some(random_kind(rng, wave))
}

/// A pickup lying on the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Effect duration granted on pickup (display)
    pub duration: f32,
}

impl PowerUp {
    /// Create a pickup, nudged fully inside the playfield
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        let radius = kind.pickup_radius();
        Self {
            id,
            kind,
            pos: clamp_to_playfield(pos, radius),
            radius,
            duration: kind.duration(),
        }
    }
}

/// A running timed effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining: f32,
}

/// Multipliers and flags derived from the active effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerStats {
    pub speed_multiplier: f32,
    pub fire_rate_multiplier: f32,
    pub damage_multiplier: f32,
    /// 0 = single shot, 1 = three-way spread
    pub spread_level: u32,
    /// Longest remaining shield duration
    pub shield_remaining: f32,
    pub rocket_launcher: bool,
}

impl Default for PowerStats {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            fire_rate_multiplier: 1.0,
            damage_multiplier: 1.0,
            spread_level: 0,
            shield_remaining: 0.0,
            rocket_launcher: false,
        }
    }
}

impl PowerStats {
    pub const RAPID_FIRE_MULTIPLIER: f32 = 1.75;
    pub const DAMAGE_BOOST_MULTIPLIER: f32 = 1.6;
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.35;

    /// Fold a set of active effects into one stat block
    pub fn compute(effects: &[ActivePowerUp]) -> Self {
        let mut stats = Self::default();
        for effect in effects {
            match effect.kind {
                PowerUpKind::RapidFire => {
                    stats.fire_rate_multiplier *= Self::RAPID_FIRE_MULTIPLIER
                }
                PowerUpKind::SpreadShot => stats.spread_level = stats.spread_level.max(1),
                PowerUpKind::DamageBoost => {
                    stats.damage_multiplier *= Self::DAMAGE_BOOST_MULTIPLIER
                }
                PowerUpKind::SpeedBoost => stats.speed_multiplier *= Self::SPEED_BOOST_MULTIPLIER,
                PowerUpKind::Shield => {
                    stats.shield_remaining = stats.shield_remaining.max(effect.remaining)
                }
                PowerUpKind::RocketLauncher => stats.rocket_launcher = true,
                PowerUpKind::HealthPack => {}
            }
        }
        stats
    }
}

/// The set of running timed effects (one entry per kind)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    effects: Vec<ActivePowerUp>,
}

impl ActiveEffects {
    /// Start or refresh an effect. Returns `true` if it was newly added.
    ///
    /// Instant kinds are never tracked.
    pub fn activate(&mut self, kind: PowerUpKind) -> bool {
        if kind.is_instant() {
            return false;
        }
        let duration = kind.duration();
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = duration;
            false
        } else {
            self.effects.push(ActivePowerUp {
                kind,
                remaining: duration,
            });
            true
        }
    }

    /// Count down and drop finished effects; returns the kinds that ended
    pub fn tick(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining -= dt;
            if effect.remaining <= 0.0 {
                expired.push(effect.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Remove an effect immediately
    pub fn cancel(&mut self, kind: PowerUpKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    pub fn get(&self, kind: PowerUpKind) -> Option<&ActivePowerUp> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn as_slice(&self) -> &[ActivePowerUp] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn stats(&self) -> PowerStats {
        PowerStats::compute(&self.effects)
    }
}
