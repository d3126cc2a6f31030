//! Enemy variants and their per-frame behavior
//!
//! All per-variant numbers live in one table (`EnemyKind::params`); the
//! movement policy is data in that table, not a code branch per variant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline pursuer
    Grunt,
    /// Fast, weaving
    Runner,
    /// Slow, heavy, pulsing
    Tank,
}

/// How an enemy steers toward the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePolicy {
    /// Straight at the player
    Pursue,
    /// Pursuit plus a sideways sine sway
    Weave { frequency: f32, amplitude: f32 },
    /// Pursuit with a sine-modulated speed
    Pulse { frequency: f32, amplitude: f32 },
}

/// Fixed per-variant parameters (before wave scaling)
#[derive(Debug, Clone, Copy)]
pub struct EnemyParams {
    pub base_health: f32,
    pub base_speed: f32,
    /// Extra speed factor applied after wave scaling
    pub speed_factor: f32,
    pub radius: f32,
    pub contact_damage: f32,
    pub knockback_resistance: f32,
    pub policy: MovePolicy,
    pub base_color: [u8; 4],
    pub flash_color: [u8; 4],
}

const GRUNT: EnemyParams = EnemyParams {
    base_health: 45.0,
    base_speed: 90.0,
    speed_factor: 1.0,
    radius: 16.0,
    contact_damage: 12.0,
    knockback_resistance: 0.25,
    policy: MovePolicy::Pursue,
    base_color: [200, 60, 60, 255],
    flash_color: [255, 200, 120, 255],
};

const RUNNER: EnemyParams = EnemyParams {
    base_health: 28.0,
    base_speed: 140.0,
    speed_factor: 1.0,
    radius: 12.0,
    contact_damage: 9.0,
    knockback_resistance: 0.05,
    policy: MovePolicy::Weave {
        frequency: 6.0,
        amplitude: 0.55,
    },
    base_color: [80, 200, 255, 255],
    flash_color: [240, 255, 255, 255],
};

const TANK: EnemyParams = EnemyParams {
    base_health: 110.0,
    base_speed: 60.0,
    speed_factor: 0.85,
    radius: 22.0,
    contact_damage: 20.0,
    knockback_resistance: 0.7,
    policy: MovePolicy::Pulse {
        frequency: 1.5,
        amplitude: 0.12,
    },
    base_color: [90, 70, 150, 255],
    flash_color: [190, 160, 255, 255],
};

/// Per-wave growth rates. Damage outpaces health, health outpaces speed.
pub const HEALTH_SCALE_PER_WAVE: f32 = 0.18;
pub const DAMAGE_SCALE_PER_WAVE: f32 = 0.10;
pub const SPEED_SCALE_PER_WAVE: f32 = 0.05;

impl EnemyKind {
    pub fn params(self) -> &'static EnemyParams {
        match self {
            EnemyKind::Grunt => &GRUNT,
            EnemyKind::Runner => &RUNNER,
            EnemyKind::Tank => &TANK,
        }
    }
}

/// Wave multipliers for (health, speed, damage)
pub fn wave_scales(wave: u32) -> (f32, f32, f32) {
    let w = wave.saturating_sub(1) as f32;
    (
        1.0 + w * HEALTH_SCALE_PER_WAVE,
        1.0 + w * SPEED_SCALE_PER_WAVE,
        1.0 + w * DAMAGE_SCALE_PER_WAVE,
    )
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// Unit heading, for drawing
    pub facing: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub radius: f32,
    pub contact_damage: u32,
    pub knockback_resistance: f32,
    pub flash_timer: f32,
    /// Phase for weave/pulse motion, randomized at spawn
    pub behavior_timer: f32,
    /// Removed at the end of the frame (contact kill)
    #[serde(skip)]
    pub removed: bool,
}

impl Enemy {
    /// Create an enemy of `kind` scaled for `wave`
    pub fn spawn(id: u32, kind: EnemyKind, pos: Vec2, wave: u32, phase: f32) -> Self {
        let p = kind.params();
        let (health_scale, speed_scale, damage_scale) = wave_scales(wave);
        let health = ((p.base_health * health_scale).round() as u32).max(1);
        Self {
            id,
            kind,
            pos,
            facing: Vec2::X,
            health,
            max_health: health,
            speed: p.base_speed * speed_scale * p.speed_factor,
            radius: p.radius,
            contact_damage: ((p.contact_damage * damage_scale).round() as u32).max(1),
            knockback_resistance: p.knockback_resistance,
            flash_timer: 0.0,
            behavior_timer: phase,
            removed: false,
        }
    }

    /// Steer toward the player using the variant's movement policy
    pub fn update(&mut self, dt: f32, player_pos: Vec2) {
        self.behavior_timer += dt;
        let to_player = player_pos - self.pos;
        let distance = to_player.length();
        let dir = if distance > 0.001 {
            to_player / distance
        } else {
            Vec2::ZERO
        };

        let move_dir = match self.kind.params().policy {
            MovePolicy::Pursue => dir,
            MovePolicy::Weave {
                frequency,
                amplitude,
            } => {
                if distance > 0.001 {
                    let perp = dir.perp();
                    let sway = (self.behavior_timer * frequency).sin() * amplitude;
                    (dir + perp * sway).normalize_or_zero()
                } else {
                    dir
                }
            }
            MovePolicy::Pulse {
                frequency,
                amplitude,
            } => dir * (1.0 + (self.behavior_timer * frequency).sin() * amplitude),
        };

        if move_dir.length() > 0.001 {
            self.facing = move_dir.normalize();
        }
        self.pos += move_dir * self.speed * dt;

        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
    }

    /// Take damage and get shoved along `knockback_dir`
    pub fn apply_hit(&mut self, damage: u32, knockback_dir: Vec2, knockback_strength: f32) {
        self.health = self.health.saturating_sub(damage);
        self.flash_timer = ENEMY_FLASH_TIME;
        let resistance = self
            .knockback_resistance
            .clamp(0.0, MAX_KNOCKBACK_RESISTANCE);
        if knockback_strength > 0.0 && knockback_dir != Vec2::ZERO {
            let scaled = knockback_strength * (1.0 - resistance);
            self.pos += knockback_dir.normalize() * scaled;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Still on the field this frame
    pub fn is_active(&self) -> bool {
        !self.removed && self.health > 0
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    /// Current draw color (flash while recently hit)
    pub fn color(&self) -> [u8; 4] {
        let p = self.kind.params();
        if self.is_flashing() {
            p.flash_color
        } else {
            p.base_color
        }
    }
}
