//! Wave director
//!
//! Decides how many enemies a wave has, which variants, and where they
//! enter. Also owns the periodic field power-up spawner, since both draw
//! from the wave's active tuning.

use glam::Vec2;
use rand::Rng;

use super::enemy::{Enemy, EnemyKind};
use super::powerup::{self, PowerUp};
use super::state::{GameEvent, GameState};
use crate::Tuning;
use crate::consts::*;

/// Enemies in wave `wave` for a count multiplier, clamped to [1, 45]
pub fn enemy_count(wave: u32, multiplier: f32) -> u32 {
    let base = WAVE_BASE_ENEMIES + wave.saturating_sub(1) as f32 * WAVE_ENEMIES_PER_WAVE;
    let scaled = (base * multiplier).round();
    if scaled.is_nan() {
        return 1;
    }
    (scaled.max(1.0) as u32).min(WAVE_MAX_ENEMIES)
}

/// Weighted variant bag for a wave: three grunts, two runners from wave 2,
/// one tank from wave 4
pub fn enemy_bag(wave: u32) -> Vec<EnemyKind> {
    let mut bag = vec![EnemyKind::Grunt; 3];
    if wave >= 2 {
        bag.extend([EnemyKind::Runner; 2]);
    }
    if wave >= 4 {
        bag.push(EnemyKind::Tank);
    }
    bag
}

/// A point just outside a random playfield edge
pub fn edge_spawn_point<R: Rng>(rng: &mut R) -> Vec2 {
    let w = PLAYFIELD_WIDTH as i32;
    let h = PLAYFIELD_HEIGHT as i32;
    match rng.random_range(0..=3) {
        0 => Vec2::new(-SPAWN_EDGE_OFFSET, rng.random_range(0..=h) as f32),
        1 => Vec2::new(PLAYFIELD_WIDTH + SPAWN_EDGE_OFFSET, rng.random_range(0..=h) as f32),
        2 => Vec2::new(rng.random_range(0..=w) as f32, -SPAWN_EDGE_OFFSET),
        _ => Vec2::new(rng.random_range(0..=w) as f32, PLAYFIELD_HEIGHT + SPAWN_EDGE_OFFSET),
    }
}

/// Push a spawn point out to `SPAWN_SAFE_RADIUS` from the player
pub fn push_clear_of_player(spawn: Vec2, player_pos: Vec2) -> Vec2 {
    let to_player = player_pos - spawn;
    let distance = to_player.length();
    if distance >= SPAWN_SAFE_RADIUS {
        return spawn;
    }
    let dir = if distance == 0.0 {
        Vec2::X
    } else {
        to_player / distance
    };
    spawn - dir * (SPAWN_SAFE_RADIUS - distance)
}

/// Seconds until the next periodic power-up, drawn in tenths of a second
pub fn draw_power_up_interval<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    let lo = (tuning.power_up_interval_min * 10.0) as i32;
    let hi = ((tuning.power_up_interval_max * 10.0) as i32).max(lo);
    rng.random_range(lo..=hi) as f32 / 10.0
}

/// Pick a spot for a periodic pickup away from the player and other pickups
pub fn find_power_up_spot<R: Rng>(rng: &mut R, player_pos: Vec2, pickups: &[PowerUp]) -> Vec2 {
    let random_spot = |rng: &mut R| {
        let lo = POWER_UP_SPAWN_MARGIN as i32;
        Vec2::new(
            rng.random_range(lo..=(PLAYFIELD_WIDTH - POWER_UP_SPAWN_MARGIN) as i32) as f32,
            rng.random_range(lo..=(PLAYFIELD_HEIGHT - POWER_UP_SPAWN_MARGIN) as i32) as f32,
        )
    };

    for _ in 0..POWER_UP_SPAWN_ATTEMPTS {
        let spot = random_spot(&mut *rng);
        let near_player = spot.distance(player_pos) < POWER_UP_PLAYER_CLEARANCE;
        let crowded = pickups
            .iter()
            .any(|p| spot.distance(p.pos) < p.radius + POWER_UP_SPACING);
        if !near_player && !crowded {
            return spot;
        }
    }
    random_spot(&mut *rng)
}

/// Clear the field and populate wave `wave`.
///
/// This is one of the two points where pending tuning becomes active.
pub fn spawn_wave(state: &mut GameState, wave: u32) {
    let wave = wave.max(1);
    state.active = state.tuning.sanitized();
    state.wave = wave;

    state.enemies.clear();
    state.projectiles.clear();
    state.pickups.clear();
    state.effects.clear();
    state.explosions.clear();

    state.player.set_max_health_multiplier(state.upgrades.health);
    if wave == 1 {
        state.player.reset_health();
        state.player.reset_position();
    }
    state.player.reset_status();
    state.stick.reset();
    state.fire_timer = 0.0;
    state.power_up_timer = draw_power_up_interval(&mut state.rng, &state.active);

    let count = enemy_count(wave, state.active.enemy_count_multiplier);
    let bag = enemy_bag(wave);
    for _ in 0..count {
        let pos = push_clear_of_player(edge_spawn_point(&mut state.rng), state.player.pos);
        let kind = bag[state.rng.random_range(0..bag.len())];
        let phase = (state.rng.random_range(0..=360) as f32).to_radians();
        let id = state.next_entity_id();
        state.enemies.push(Enemy::spawn(id, kind, pos, wave, phase));
    }
    state.enemies_remaining = count;

    log::info!(
        "Wave {}: {} enemies (count x{:.2}, drop {:.2})",
        wave,
        count,
        state.active.enemy_count_multiplier,
        state.active.enemy_drop_chance
    );
    state.events.push(GameEvent::WaveStarted {
        wave,
        enemies: count,
    });
}

/// Count down the periodic spawner and place a pickup when it fires.
///
/// At the field cap the timer stays expired until a slot frees up.
pub fn update_power_up_spawner(state: &mut GameState, dt: f32) {
    if state.power_up_timer > 0.0 {
        state.power_up_timer -= dt;
    }
    if state.power_up_timer > 0.0 || state.pickups.len() >= MAX_FIELD_POWER_UPS {
        return;
    }

    let spot = find_power_up_spot(&mut state.rng, state.player.pos, &state.pickups);
    let kind = powerup::random_kind(&mut state.rng, state.wave);
    state.place_pickup(kind, spot);
    state.power_up_timer = draw_power_up_interval(&mut state.rng, &state.active);
}
