//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_to_playfield;
use crate::consts::*;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub base_max_health: u32,
    pub speed: f32,
    pub base_speed: f32,
    pub radius: f32,
    /// Contact hits the shield can still absorb
    pub shield_charges: u32,
    /// Seconds until the shield charges lapse
    pub shield_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            health: PLAYER_BASE_MAX_HEALTH,
            max_health: PLAYER_BASE_MAX_HEALTH,
            base_max_health: PLAYER_BASE_MAX_HEALTH,
            speed: PLAYER_BASE_SPEED,
            base_speed: PLAYER_BASE_SPEED,
            radius: PLAYER_RADIUS,
            shield_charges: 0,
            shield_timer: 0.0,
        }
    }
}

impl Player {
    pub fn reset_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
    }

    /// Drop speed modifiers and shield
    pub fn reset_status(&mut self) {
        self.speed = self.base_speed;
        self.shield_charges = 0;
        self.shield_timer = 0.0;
    }

    /// Rescale max health, keeping the current health *ratio*
    pub fn set_max_health_multiplier(&mut self, multiplier: f32) {
        let multiplier = multiplier.max(1.0);
        let new_max = ((self.base_max_health as f32 * multiplier).round() as u32)
            .max(self.base_max_health)
            .max(1);
        let ratio = if self.max_health > 0 {
            self.health as f32 / self.max_health as f32
        } else {
            1.0
        };
        self.max_health = new_max;
        self.health = ((ratio * new_max as f32).round().max(0.0) as u32).min(new_max);
    }

    /// Recompute speed from a stacked speed multiplier, clamped around base speed
    pub fn apply_speed_multiplier(&mut self, multiplier: f32) {
        self.speed = (self.base_speed * multiplier).clamp(
            self.base_speed * PLAYER_MIN_SPEED_FACTOR,
            self.base_speed * PLAYER_MAX_SPEED_FACTOR,
        );
    }

    /// Heal up to max health; returns the amount actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Spend one shield charge; false if none were left
    pub fn consume_shield_charge(&mut self) -> bool {
        if self.shield_charges == 0 {
            return false;
        }
        self.shield_charges -= 1;
        if self.shield_charges == 0 {
            self.shield_timer = 0.0;
        }
        true
    }

    /// Add shield charges (capped) and set the shield duration
    pub fn grant_shield(&mut self, duration: f32) {
        self.shield_charges =
            (self.shield_charges + SHIELD_CHARGES_PER_PICKUP).min(MAX_SHIELD_CHARGES);
        self.shield_timer = duration;
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_charges > 0
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }

    /// Shield countdown; charges lapse when it runs out
    pub fn update_shield(&mut self, dt: f32) {
        if self.shield_timer > 0.0 {
            self.shield_timer -= dt;
            if self.shield_timer <= 0.0 {
                self.shield_timer = 0.0;
                self.shield_charges = 0;
            }
        }
    }

    /// Move along the input direction and keep the whole body on the playfield
    pub fn update(&mut self, dt: f32, input_dir: Vec2) {
        let dir = if input_dir.length() > 1.0 {
            input_dir.normalize()
        } else {
            input_dir
        };
        self.pos = clamp_to_playfield(self.pos + dir * self.speed * dt, self.radius);
        self.update_shield(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_normalizes_and_clamps() {
        let mut p = Player::default();
        p.update(0.1, Vec2::new(3.0, 4.0));
        // Normalized (0.6, 0.8) * 300 * 0.1
        assert!((p.pos.x - 518.0).abs() < 1e-3);
        assert!((p.pos.y - 524.0).abs() < 1e-3);

        p.update(100.0, Vec2::new(-1.0, 0.0));
        assert_eq!(p.pos.x, p.radius);
    }

    #[test]
    fn test_short_input_not_normalized() {
        let mut p = Player::default();
        p.update(1.0, Vec2::new(0.5, 0.0));
        assert!((p.pos.x - 650.0).abs() < 1e-3);
    }

    #[test]
    fn test_max_health_rescale_keeps_ratio() {
        let mut p = Player::default();
        p.health = 50;
        p.set_max_health_multiplier(1.15);
        assert_eq!(p.max_health, 115);
        assert_eq!(p.health, 58); // round(0.5 * 115) = 57.5 -> 58
    }

    #[test]
    fn test_max_health_multiplier_floor() {
        let mut p = Player::default();
        p.set_max_health_multiplier(0.5);
        assert_eq!(p.max_health, 100);
        assert_eq!(p.health, 100);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = Player::default();
        p.health = 50;
        assert_eq!(p.heal(30), 30);
        assert_eq!(p.health, 80);
        assert_eq!(p.heal(30), 20);
        assert_eq!(p.health, 100);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut p = Player::default();
        p.take_damage(250);
        assert_eq!(p.health, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_speed_clamp() {
        let mut p = Player::default();
        p.apply_speed_multiplier(1.35);
        assert!((p.speed - 405.0).abs() < 1e-3);
        p.apply_speed_multiplier(10.0);
        assert!((p.speed - 660.0).abs() < 1e-3);
        p.apply_speed_multiplier(0.1);
        assert!((p.speed - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_shield_charges_and_timer() {
        let mut p = Player::default();
        p.grant_shield(12.0);
        p.grant_shield(12.0);
        p.grant_shield(12.0);
        assert_eq!(p.shield_charges, MAX_SHIELD_CHARGES);

        p.update_shield(11.0);
        assert_eq!(p.shield_charges, 4);
        p.update_shield(1.5);
        assert_eq!(p.shield_charges, 0);
        assert_eq!(p.shield_timer, 0.0);
        assert!(!p.consume_shield_charge());
    }
}
