//! Firing: cooldown, damage, projectile speed and spread
//!
//! Everything the gun does on a given frame is resolved into a
//! `FireProfile` from the active power-up stats and the permanent
//! multipliers, then turned into projectiles by `volley`.

use glam::Vec2;

use super::powerup::PowerStats;
use super::projectile::{Projectile, ProjectileKind};
use crate::consts::*;
use crate::heading;

const ROCKET_COLOR: [u8; 4] = [255, 130, 60, 255];
const SPREAD_COLOR: [u8; 4] = [255, 220, 140, 255];
const BOOSTED_COLOR: [u8; 4] = [255, 161, 0, 255];
const BULLET_COLOR: [u8; 4] = [253, 249, 0, 255];

/// Speed bonus per unit of fire-rate multiplier above 1
const BULLET_SPEED_BONUS: f32 = 0.25;
const ROCKET_SPEED_BONUS: f32 = 0.2;

/// Resolved weapon parameters for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FireProfile {
    pub kind: ProjectileKind,
    /// Seconds until the next shot after firing
    pub cooldown: f32,
    pub damage: u32,
    pub speed: f32,
    /// Angle offsets (radians) of each projectile in a volley
    pub offsets: Vec<f32>,
    pub color: [u8; 4],
}

impl FireProfile {
    pub fn resolve(stats: &PowerStats, permanent_fire_rate: f32, permanent_damage: f32) -> Self {
        let kind = if stats.rocket_launcher {
            ProjectileKind::Rocket
        } else {
            ProjectileKind::Bullet
        };

        let fire_rate =
            (stats.fire_rate_multiplier * permanent_fire_rate).max(MIN_FIRE_RATE_MULTIPLIER);
        let damage_multiplier = stats.damage_multiplier * permanent_damage;

        let (base_cooldown, base_damage, base_speed, speed_bonus) = match kind {
            ProjectileKind::Bullet => {
                (BULLET_COOLDOWN, BULLET_DAMAGE, BULLET_SPEED, BULLET_SPEED_BONUS)
            }
            ProjectileKind::Rocket => {
                (ROCKET_COOLDOWN, ROCKET_DAMAGE, ROCKET_SPEED, ROCKET_SPEED_BONUS)
            }
        };

        let cooldown = (base_cooldown / fire_rate).max(MIN_FIRE_COOLDOWN);
        let damage = ((base_damage as f32 * damage_multiplier).round() as u32).max(1);
        let speed = if fire_rate > 1.0 {
            base_speed * (1.0 + (fire_rate - 1.0) * speed_bonus)
        } else {
            base_speed
        };

        let spread = kind == ProjectileKind::Bullet && stats.spread_level > 0;
        let offsets = if spread {
            vec![0.0, SPREAD_OFFSET, -SPREAD_OFFSET]
        } else {
            vec![0.0]
        };

        let color = match kind {
            ProjectileKind::Rocket => ROCKET_COLOR,
            ProjectileKind::Bullet if spread => SPREAD_COLOR,
            ProjectileKind::Bullet if damage_multiplier > 1.01 => BOOSTED_COLOR,
            ProjectileKind::Bullet => BULLET_COLOR,
        };

        Self {
            kind,
            cooldown,
            damage,
            speed,
            offsets,
            color,
        }
    }
}

/// Gun muzzle position: `GUN_DISTANCE` from the player toward the aim point
pub fn muzzle(player_pos: Vec2, aim: Vec2) -> Vec2 {
    let to_aim = aim - player_pos;
    let angle = to_aim.y.atan2(to_aim.x);
    player_pos + heading(angle) * GUN_DISTANCE
}

/// Heading (radians) from the muzzle to the aim point; +x when degenerate
pub fn aim_angle(origin: Vec2, aim: Vec2) -> f32 {
    let dir = (aim - origin).normalize_or_zero();
    if dir.length() <= 0.001 {
        0.0
    } else {
        dir.y.atan2(dir.x)
    }
}

/// Build the projectiles of one trigger pull
pub fn volley(
    profile: &FireProfile,
    player_pos: Vec2,
    aim: Vec2,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Projectile> {
    let origin = muzzle(player_pos, aim);
    let base_angle = aim_angle(origin, aim);
    profile
        .offsets
        .iter()
        .map(|offset| {
            Projectile::new(
                next_id(),
                profile.kind,
                origin,
                base_angle + offset,
                profile.speed,
                profile.damage,
                profile.color,
            )
        })
        .collect()
}
