//! End-to-end session scenarios driven through `tick`

use glam::Vec2;

use wavebreaker::Tuning;
use wavebreaker::consts::*;
use wavebreaker::sim::combat;
use wavebreaker::sim::{
    Enemy, EnemyKind, GameEvent, GameState, PowerUpKind, Projectile, ProjectileKind,
    SessionPhase, TickInput, UpgradeChoice, autopilot_input, enemy_count, tick,
};
use wavebreaker::ui::{self, UiAction};

fn press(phase: SessionPhase, action: UiAction) -> TickInput {
    TickInput {
        pointer: ui::button_center(phase, action).unwrap(),
        select: true,
        ..Default::default()
    }
}

/// Skip the splash and press Play
fn new_run(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    tick(
        &mut state,
        &TickInput {
            confirm: true,
            ..Default::default()
        },
        FRAME_DT,
    );
    assert_eq!(state.phase, SessionPhase::Menu);
    tick(&mut state, &press(SessionPhase::Menu, UiAction::Play), FRAME_DT);
    assert_eq!(state.phase, SessionPhase::Playing);
    state
}

#[test]
fn test_first_wave_clear_reaches_upgrade() {
    let mut state = new_run(17);
    assert_eq!(state.wave, 1);
    assert_eq!(state.enemies_remaining, 8);

    // Line every enemy up on a stationary bullet far from the player
    let spot = Vec2::new(150.0, 150.0);
    for enemy in &mut state.enemies {
        enemy.pos = spot;
        enemy.health = 1;
    }
    for _ in 0..8 {
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, ProjectileKind::Bullet, spot, 0.0, 0.0, 20, [255; 4]));
    }

    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert!(state.player.health > 0);
    assert_eq!(state.enemies_remaining, 0);
    assert_eq!(state.phase, SessionPhase::Upgrade);
    assert_eq!(state.pending_wave, 2);
    assert!(state.drain_events().contains(&GameEvent::WaveCleared { wave: 1 }));
}

#[test]
fn test_health_pack_heals_to_cap() {
    let mut state = new_run(3);
    state.player.health = 50;
    let pos = state.player.pos;
    state.place_pickup(PowerUpKind::HealthPack, pos);
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.player.health, 80);
    assert!(state.effects.is_empty());

    state.player.health = 90;
    state.place_pickup(PowerUpKind::HealthPack, pos);
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.player.health, 100);
}

#[test]
fn test_unshielded_contact_costs_exact_damage() {
    let mut state = new_run(5);
    assert_eq!(state.player.shield_charges, 0);
    let before = state.player.health;
    let remaining = state.enemies_remaining;
    let target = state.enemies[0].id;
    state.enemies[0].pos = state.player.pos + Vec2::new(10.0, 0.0);

    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.player.health, before - 12);
    assert!(state.enemies.iter().all(|e| e.id != target));
    assert_eq!(state.enemies_remaining, remaining - 1);
}

#[test]
fn test_damage_upgrade_twice() {
    let mut state = new_run(9);
    for expected_wave in [2, 3] {
        state.enemies.clear();
        state.enemies_remaining = 0;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, SessionPhase::Upgrade);
        tick(
            &mut state,
            &press(SessionPhase::Upgrade, UiAction::Upgrade(UpgradeChoice::Damage)),
            FRAME_DT,
        );
        assert_eq!(state.wave, expected_wave);
    }
    assert!((state.upgrades.damage - 1.3225).abs() < 1e-5);
    assert_eq!(state.upgrades.health, 1.0);
    assert_eq!(state.upgrades.fire_rate, 1.0);
}

#[test]
fn test_wave_five_count() {
    assert_eq!(enemy_count(1, 1.0), 8);
    assert_eq!(enemy_count(5, 1.0), 20);

    let mut state = GameState::with_tuning(
        1,
        Tuning {
            starting_wave: 5,
            ..Tuning::default()
        },
    );
    state.start_run();
    assert_eq!(state.enemies.len(), 20);
    assert_eq!(state.enemies_remaining, 20);
    assert!(state.events.contains(&GameEvent::WaveStarted { wave: 5, enemies: 20 }));
}

#[test]
fn test_rocket_explodes_exactly_once_off_screen() {
    let mut state = new_run(21);
    state.enemies.clear();
    state.enemies_remaining = 1;
    let id = state.next_entity_id();
    state.projectiles.push(Projectile::new(
        id,
        ProjectileKind::Rocket,
        Vec2::new(990.0, 40.0),
        0.0,
        ROCKET_SPEED,
        70,
        [255; 4],
    ));
    state.drain_events();

    for _ in 0..30 {
        tick(&mut state, &TickInput::default(), FRAME_DT);
    }
    let explosions = state
        .drain_events()
        .into_iter()
        .filter(|e| *e == GameEvent::Explosion)
        .count();
    assert_eq!(explosions, 1);
    assert!(state.projectiles.is_empty());
}

#[test]
fn test_rocket_impact_explodes_and_bullet_does_not() {
    let mut state = new_run(22);
    state.enemies.truncate(2);
    state.enemies_remaining = 2;
    let spot = Vec2::new(120.0, 880.0);
    state.enemies[0].pos = spot;
    state.enemies[1].pos = Vec2::new(880.0, 120.0);
    state.drain_events();

    let id = state.next_entity_id();
    let far = Vec2::new(880.0, 120.0);
    state
        .projectiles
        .push(Projectile::new(id, ProjectileKind::Bullet, far, 0.0, 0.0, 1, [255; 4]));
    let id = state.next_entity_id();
    state
        .projectiles
        .push(Projectile::new(id, ProjectileKind::Rocket, spot, 0.0, 0.0, 1, [255; 4]));

    tick(&mut state, &TickInput::default(), FRAME_DT);
    let events = state.drain_events();
    assert_eq!(events.iter().filter(|e| **e == GameEvent::EnemyHit).count(), 2);
    assert_eq!(events.iter().filter(|e| **e == GameEvent::Explosion).count(), 1);
    assert_eq!(state.explosions.len(), 1);
}

#[test]
fn test_shield_pickup_blocks_one_hit_per_charge() {
    let mut state = new_run(30);
    state.active.enemy_drop_chance = 0.0;
    let pos = state.player.pos;
    state.place_pickup(PowerUpKind::Shield, pos);
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert_eq!(state.player.shield_charges, 2);

    for expected in [1, 0] {
        let target = state.player.pos;
        state.enemies[0].pos = target;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.player.shield_charges, expected);
        assert_eq!(state.player.health, 100);
    }
    assert!(!state.effects.is_active(PowerUpKind::Shield));

    let target = state.player.pos;
    state.enemies[0].pos = target;
    tick(&mut state, &TickInput::default(), FRAME_DT);
    assert!(state.player.health < 100);
}

#[test]
fn test_explosion_damage_applies_once_across_frames() {
    let mut state = new_run(40);
    state.enemies.truncate(1);
    state.enemies_remaining = 1;
    let blast_at = Vec2::new(200.0, 200.0);
    state.enemies[0] = Enemy::spawn(999, EnemyKind::Tank, blast_at, 1, 0.0);
    state.spawn_explosion(blast_at, ROCKET_EXPLOSION_RADIUS, 30);

    combat::resolve(&mut state, 0.0);
    let after = state.enemies[0].health;
    assert_eq!(after, 80);
    for _ in 0..3 {
        state.enemies[0].pos = blast_at;
        combat::resolve(&mut state, 0.05);
    }
    assert_eq!(state.enemies[0].health, after);
}

#[test]
fn test_same_seed_same_session() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);
    for _ in 0..3_000 {
        let input_a = autopilot_input(&a);
        let input_b = autopilot_input(&b);
        tick(&mut a, &input_a, FRAME_DT);
        tick(&mut b, &input_b, FRAME_DT);
    }
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.wave, b.wave);
    assert_eq!(a.player.pos, b.player.pos);
    assert_eq!(a.player.health, b.player.health);
    assert_eq!(a.enemies.len(), b.enemies.len());
    assert_eq!(a.pickups.len(), b.pickups.len());
}

#[test]
fn test_pause_restart_resets_run() {
    let mut state = new_run(50);
    state.upgrades.apply(UpgradeChoice::FireRate);
    tick(
        &mut state,
        &TickInput {
            pause: true,
            ..Default::default()
        },
        FRAME_DT,
    );
    assert_eq!(state.phase, SessionPhase::Paused);
    tick(&mut state, &press(SessionPhase::Paused, UiAction::Restart), FRAME_DT);
    assert_eq!(state.phase, SessionPhase::Playing);
    assert_eq!(state.upgrades.fire_rate, 1.0);
    assert_eq!(state.wave, 1);
    assert_eq!(state.enemies_remaining, 8);
}
