//! WaveBreaker - A top-down wave-survival arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, combat, waves, session state)
//! - `tuning`: Externally supplied balance parameters (daily seed / remote config)
//! - `input`: Per-frame input commands and the virtual joystick
//! - `audio`: Sound trigger boundary
//! - `ui`: Overlay button layout and hit-testing

pub mod audio;
pub mod input;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1000.0;

    /// Splash screen duration (seconds)
    pub const SPLASH_DURATION: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 500.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const PLAYER_BASE_MAX_HEALTH: u32 = 100;
    pub const PLAYER_BASE_SPEED: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Speed clamp relative to base speed while modifiers are active
    pub const PLAYER_MIN_SPEED_FACTOR: f32 = 0.6;
    pub const PLAYER_MAX_SPEED_FACTOR: f32 = 2.2;
    /// Extra reach when touching a field pickup
    pub const PICKUP_REACH: f32 = 6.0;
    pub const MAX_SHIELD_CHARGES: u32 = 4;
    pub const SHIELD_CHARGES_PER_PICKUP: u32 = 2;

    /// Gun muzzle distance from the player center
    pub const GUN_DISTANCE: f32 = 40.0;

    /// Weapon defaults
    pub const BULLET_COOLDOWN: f32 = 0.22;
    pub const BULLET_DAMAGE: u32 = 20;
    pub const BULLET_SPEED: f32 = 520.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_KNOCKBACK: f32 = 40.0;
    pub const ROCKET_COOLDOWN: f32 = 0.65;
    pub const ROCKET_DAMAGE: u32 = 70;
    pub const ROCKET_SPEED: f32 = 360.0;
    pub const ROCKET_RADIUS: f32 = 8.0;
    pub const ROCKET_KNOCKBACK: f32 = 70.0;
    pub const ROCKET_EXPLOSION_RADIUS: f32 = 110.0;
    pub const MIN_FIRE_COOLDOWN: f32 = 0.05;
    pub const MIN_FIRE_RATE_MULTIPLIER: f32 = 0.1;
    /// Spread shot side-shot offset (radians)
    pub const SPREAD_OFFSET: f32 = 0.18;

    /// Explosion defaults
    pub const EXPLOSION_LIFETIME: f32 = 0.35;
    pub const EXPLOSION_KNOCKBACK: f32 = 90.0;

    /// Enemy hit flash (seconds)
    pub const ENEMY_FLASH_TIME: f32 = 0.12;
    pub const MAX_KNOCKBACK_RESISTANCE: f32 = 0.95;

    /// Power-up defaults
    pub const MAX_FIELD_POWER_UPS: usize = 3;
    pub const HEALTH_PICKUP_AMOUNT: u32 = 30;
    pub const HEALTH_DROP_BIAS: f32 = 0.55;
    /// Extra health-pack bias per unit of missing health ratio
    pub const HEALTH_DROP_MISSING_WEIGHT: f32 = 0.35;
    pub const MAX_HEALTH_DROP_CHANCE: f32 = 0.95;
    pub const PICKUP_RADIUS: f32 = 18.0;
    pub const LARGE_PICKUP_RADIUS: f32 = 20.0;
    /// Margin kept from the playfield edge by periodic spawns
    pub const POWER_UP_SPAWN_MARGIN: f32 = 80.0;
    pub const POWER_UP_PLAYER_CLEARANCE: f32 = 140.0;
    pub const POWER_UP_SPACING: f32 = 50.0;
    pub const POWER_UP_SPAWN_ATTEMPTS: u32 = 12;

    /// Wave defaults
    pub const WAVE_BASE_ENEMIES: f32 = 8.0;
    pub const WAVE_ENEMIES_PER_WAVE: f32 = 3.0;
    pub const WAVE_MAX_ENEMIES: u32 = 45;
    /// Enemies spawn this far outside the playfield edge
    pub const SPAWN_EDGE_OFFSET: f32 = 60.0;
    pub const SPAWN_SAFE_RADIUS: f32 = 180.0;

    /// Permanent upgrade step (+15% per pick)
    pub const PERMANENT_UPGRADE_PERCENT: f32 = 0.15;
}

/// True when two circles touch or overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// True when a point lies outside the playfield rectangle
#[inline]
pub fn outside_playfield(p: Vec2) -> bool {
    p.x < 0.0 || p.x > consts::PLAYFIELD_WIDTH || p.y < 0.0 || p.y > consts::PLAYFIELD_HEIGHT
}

/// Clamp a circle center so the whole circle stays inside the playfield
#[inline]
pub fn clamp_to_playfield(p: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        p.x.clamp(radius, consts::PLAYFIELD_WIDTH - radius),
        p.y.clamp(radius, consts::PLAYFIELD_HEIGHT - radius),
    )
}

/// Unit vector from an angle (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
