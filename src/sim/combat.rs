//! Per-frame combat resolution
//!
//! Order within a frame:
//! 1. projectiles advance; rockets that left the playfield detonate
//! 2. each enemy moves, then checks player contact, then the first live
//!    projectile touching it
//! 3. unapplied explosions deal area damage once
//! 4. dead enemies and spent projectiles are compacted out
//! 5. explosions age and expire
//!
//! Entities are only ever marked during the passes and removed in step 4,
//! so no collection is mutated while it is being walked.

use glam::Vec2;

use super::powerup::{PowerUpKind, roll_drop};
use super::state::{GameEvent, GameState};
use crate::circles_overlap;
use crate::consts::*;

/// Run the full combat pass for one frame
pub fn resolve(state: &mut GameState, dt: f32) {
    advance_projectiles(state, dt);
    resolve_enemies(state, dt);
    apply_explosions(state);
    state.enemies.retain(|e| !e.removed);
    state.projectiles.retain(|p| !p.spent);
    age_explosions(state, dt);
}

/// Collect every field pickup the player touches. Returns true if any.
pub fn collect_pickups(state: &mut GameState) -> bool {
    let reach = state.player.radius + PICKUP_REACH;
    let player_pos = state.player.pos;
    let (touched, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pickups)
        .into_iter()
        .partition(|p| circles_overlap(player_pos, reach, p.pos, p.radius));
    state.pickups = kept;

    for pickup in &touched {
        log::debug!("Collected {}", pickup.kind.label());
        state.activate_power_up(pickup.kind);
    }
    !touched.is_empty()
}

/// Offer a kill position to the drop roll
pub fn try_drop(state: &mut GameState, pos: Vec2) {
    if state.pickups.len() >= MAX_FIELD_POWER_UPS {
        return;
    }
    let drop = roll_drop(
        &mut state.rng,
        state.active.enemy_drop_chance,
        state.player.health_ratio(),
        state.wave,
    );
    if let Some(kind) = drop {
        log::debug!("Enemy dropped {}", kind.label());
        state.place_pickup(kind, pos);
    }
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    let mut detonations = Vec::new();
    for projectile in &mut state.projectiles {
        projectile.update(dt);
        if projectile.is_off_screen() && !projectile.spent {
            projectile.spent = true;
            if let Some(radius) = projectile.blast_radius() {
                detonations.push((projectile.pos, radius, projectile.damage));
            }
        }
    }
    for (pos, radius, damage) in detonations {
        state.spawn_explosion(pos, radius, damage);
    }
}

fn resolve_enemies(state: &mut GameState, dt: f32) {
    for i in 0..state.enemies.len() {
        if !state.enemies[i].is_active() {
            continue;
        }
        let player_pos = state.player.pos;
        state.enemies[i].update(dt, player_pos);

        let (pos, radius, contact_damage) = {
            let e = &state.enemies[i];
            (e.pos, e.radius, e.contact_damage)
        };

        if circles_overlap(player_pos, state.player.radius, pos, radius) {
            state.enemies[i].removed = true;
            player_contact(state, contact_damage);
            try_drop(state, pos);
            state.enemies_remaining = state.enemies_remaining.saturating_sub(1);
            continue;
        }

        let hit = state
            .projectiles
            .iter()
            .position(|p| p.is_live() && circles_overlap(p.pos, p.radius, pos, radius));
        let Some(j) = hit else {
            continue;
        };

        let projectile = &mut state.projectiles[j];
        projectile.spent = true;
        let (impact, kind, damage, blast) = (
            projectile.pos,
            projectile.kind,
            projectile.damage,
            projectile.blast_radius(),
        );

        let enemy = &mut state.enemies[i];
        let knockback = (enemy.pos - impact).normalize_or_zero();
        enemy.apply_hit(damage, knockback, kind.knockback());
        let (hit_pos, dead) = (enemy.pos, enemy.is_dead());
        state.events.push(GameEvent::EnemyHit);

        if let Some(blast_radius) = blast {
            state.spawn_explosion(hit_pos, blast_radius, damage);
        }
        if dead {
            kill_enemy(state, i);
        }
    }
}

/// Contact with an enemy: a shield charge absorbs it, otherwise damage lands
fn player_contact(state: &mut GameState, damage: u32) {
    let blocked = state.player.consume_shield_charge();
    if blocked {
        if state.player.shield_charges == 0 {
            state.effects.cancel(PowerUpKind::Shield);
        }
    } else {
        state.player.take_damage(damage);
    }
    state.events.push(GameEvent::PlayerHit { blocked });

    if !state.player.is_shielded() && state.player.is_dead() && !state.game_over {
        state.game_over = true;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over on wave {}", state.wave);
    }
}

fn kill_enemy(state: &mut GameState, index: usize) {
    let pos = state.enemies[index].pos;
    state.enemies[index].removed = true;
    try_drop(state, pos);
    state.enemies_remaining = state.enemies_remaining.saturating_sub(1);
}

fn apply_explosions(state: &mut GameState) {
    for k in 0..state.explosions.len() {
        if state.explosions[k].applied {
            continue;
        }
        let blast = state.explosions[k].clone();
        for i in 0..state.enemies.len() {
            let enemy = &mut state.enemies[i];
            if !enemy.is_active() || !blast.reaches(enemy.pos, enemy.radius) {
                continue;
            }
            let knockback = (enemy.pos - blast.pos).normalize_or_zero();
            enemy.apply_hit(blast.damage, knockback, EXPLOSION_KNOCKBACK);
            if enemy.is_dead() {
                kill_enemy(state, i);
            }
        }
        state.explosions[k].applied = true;
    }
}

fn age_explosions(state: &mut GameState, dt: f32) {
    for explosion in &mut state.explosions {
        explosion.age(dt);
    }
    state.explosions.retain(|e| !e.is_expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::projectile::{Projectile, ProjectileKind};

    /// Session with an empty field and the player at the center
    fn empty_field() -> GameState {
        let mut state = GameState::new(1);
        state.start_run();
        state.enemies.clear();
        state.enemies_remaining = 0;
        state.events.clear();
        state
    }

    fn add_enemy(state: &mut GameState, kind: EnemyKind, pos: Vec2) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::spawn(id, kind, pos, 1, 0.0));
        state.enemies_remaining += 1;
    }

    fn add_projectile(state: &mut GameState, kind: ProjectileKind, pos: Vec2, damage: u32) {
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, kind, pos, 0.0, 0.0, damage, [255; 4]));
    }

    #[test]
    fn test_contact_damage_removes_enemy() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 0.0;
        let spawn = state.player.pos + Vec2::new(30.0, 0.0);
        add_enemy(&mut state, EnemyKind::Grunt, spawn);
        resolve(&mut state, FRAME_DT);
        assert_eq!(state.player.health, 88);
        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_remaining, 0);
        assert!(state.events.contains(&GameEvent::PlayerHit { blocked: false }));
    }

    #[test]
    fn test_shield_blocks_and_cancels_effect() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 0.0;
        state.activate_power_up(PowerUpKind::Shield);
        state.player.shield_charges = 1;
        let spawn = state.player.pos + Vec2::new(30.0, 0.0);
        add_enemy(&mut state, EnemyKind::Tank, spawn);
        resolve(&mut state, FRAME_DT);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.shield_charges, 0);
        assert!(!state.effects.is_active(PowerUpKind::Shield));
        assert!(state.enemies.is_empty());
        assert!(state.events.contains(&GameEvent::PlayerHit { blocked: true }));
    }

    #[test]
    fn test_lethal_contact_sets_game_over() {
        let mut state = empty_field();
        state.player.health = 5;
        let spawn = state.player.pos;
        add_enemy(&mut state, EnemyKind::Grunt, spawn);
        resolve(&mut state, FRAME_DT);
        assert_eq!(state.player.health, 0);
        assert!(state.game_over);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_bullet_hits_first_enemy_only() {
        let mut state = empty_field();
        let far = Vec2::new(100.0, 100.0);
        add_enemy(&mut state, EnemyKind::Grunt, far);
        add_enemy(&mut state, EnemyKind::Grunt, far);
        add_projectile(&mut state, ProjectileKind::Bullet, far, 20);
        resolve(&mut state, 0.0);
        let healths: Vec<u32> = state.enemies.iter().map(|e| e.health).collect();
        assert_eq!(healths, vec![25, 45]);
        assert!(state.projectiles.is_empty());
        assert!(state.explosions.is_empty());
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::EnemyHit).count(),
            1
        );
    }

    #[test]
    fn test_rocket_impact_explodes_once() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 0.0;
        let target = Vec2::new(100.0, 100.0);
        add_enemy(&mut state, EnemyKind::Tank, target);
        add_enemy(&mut state, EnemyKind::Grunt, target + Vec2::new(60.0, 0.0));
        add_projectile(&mut state, ProjectileKind::Rocket, target, 70);
        resolve(&mut state, 0.0);

        assert_eq!(state.explosions.len(), 1);
        assert!(state.explosions[0].applied);
        // Impact leaves the tank at 40, the blast finishes it and the grunt
        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_remaining, 0);
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::Explosion).count(),
            1
        );
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::EnemyHit).count(),
            1
        );
    }

    #[test]
    fn test_off_screen_rocket_detonates() {
        let mut state = empty_field();
        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            ProjectileKind::Rocket,
            Vec2::new(995.0, 300.0),
            0.0,
            360.0,
            70,
            [255; 4],
        ));
        resolve(&mut state, 0.1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.explosions.len(), 1);

        let id = state.next_entity_id();
        state.projectiles.push(Projectile::new(
            id,
            ProjectileKind::Bullet,
            Vec2::new(995.0, 300.0),
            0.0,
            520.0,
            20,
            [255; 4],
        ));
        resolve(&mut state, 0.1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_explosion_applies_once() {
        let mut state = empty_field();
        let pos = Vec2::new(150.0, 150.0);
        state.spawn_explosion(pos, 110.0, 10);
        add_enemy(&mut state, EnemyKind::Tank, pos + Vec2::new(50.0, 0.0));
        resolve(&mut state, 0.0);
        let after_first = state.enemies[0].health;
        assert_eq!(after_first, 100);

        // Move it back into the blast: no second application
        state.enemies[0].pos = pos;
        resolve(&mut state, 0.0);
        assert_eq!(state.enemies[0].health, after_first);
    }

    #[test]
    fn test_explosions_expire() {
        let mut state = empty_field();
        state.spawn_explosion(Vec2::new(100.0, 100.0), 110.0, 10);
        resolve(&mut state, 0.2);
        assert_eq!(state.explosions.len(), 1);
        resolve(&mut state, 0.2);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_drop_respects_cap_and_chance() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 1.0;
        try_drop(&mut state, Vec2::new(200.0, 200.0));
        assert_eq!(state.pickups.len(), 1);

        state.active.enemy_drop_chance = 0.0;
        try_drop(&mut state, Vec2::new(200.0, 200.0));
        assert_eq!(state.pickups.len(), 1);

        state.active.enemy_drop_chance = 1.0;
        for _ in 0..10 {
            try_drop(&mut state, Vec2::new(200.0, 200.0));
        }
        assert_eq!(state.pickups.len(), MAX_FIELD_POWER_UPS);
    }

    #[test]
    fn test_unblocked_contact_drops_at_enemy() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 1.0;
        let spawn = state.player.pos + Vec2::new(30.0, 0.0);
        add_enemy(&mut state, EnemyKind::Grunt, spawn);
        resolve(&mut state, 0.0);
        assert_eq!(state.player.health, 88);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos, spawn);
    }

    #[test]
    fn test_blocked_contact_still_drops() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 1.0;
        state.player.grant_shield(12.0);
        let spawn = state.player.pos + Vec2::new(0.0, -30.0);
        add_enemy(&mut state, EnemyKind::Runner, spawn);
        resolve(&mut state, 0.0);
        assert_eq!(state.player.health, 100);
        assert!(state.events.contains(&GameEvent::PlayerHit { blocked: true }));
        assert!(state.enemies.is_empty());
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos, spawn);
    }

    #[test]
    fn test_blast_kill_drops_at_kill_position() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 1.0;
        let center = Vec2::new(200.0, 200.0);
        let spawn = center + Vec2::new(50.0, 0.0);
        add_enemy(&mut state, EnemyKind::Grunt, spawn);
        let mut expected = state.enemies[0].clone();
        expected.apply_hit(100, Vec2::X, EXPLOSION_KNOCKBACK);

        state.spawn_explosion(center, ROCKET_EXPLOSION_RADIUS, 100);
        resolve(&mut state, 0.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_remaining, 0);
        assert_eq!(state.pickups.len(), 1);
        assert!(state.pickups[0].pos.distance(expected.pos) < 1e-3);
    }

    #[test]
    fn test_kills_do_not_drop_past_cap() {
        let mut state = empty_field();
        state.active.enemy_drop_chance = 1.0;
        for i in 0..MAX_FIELD_POWER_UPS {
            state.place_pickup(PowerUpKind::RapidFire, Vec2::new(100.0 + i as f32 * 60.0, 900.0));
        }
        let contact = state.player.pos + Vec2::new(30.0, 0.0);
        add_enemy(&mut state, EnemyKind::Grunt, contact);
        let center = Vec2::new(200.0, 200.0);
        add_enemy(&mut state, EnemyKind::Grunt, center);
        state.spawn_explosion(center, ROCKET_EXPLOSION_RADIUS, 100);

        resolve(&mut state, 0.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.pickups.len(), MAX_FIELD_POWER_UPS);
        assert!(state.pickups.iter().all(|p| p.kind == PowerUpKind::RapidFire));
    }

    #[test]
    fn test_collect_pickups_with_reach() {
        let mut state = empty_field();
        state.player.health = 50;
        let pos = state.player.pos + Vec2::new(43.0, 0.0);
        state.place_pickup(PowerUpKind::HealthPack, pos);
        state.place_pickup(PowerUpKind::RapidFire, Vec2::new(100.0, 100.0));
        assert!(collect_pickups(&mut state));
        assert_eq!(state.player.health, 80);
        assert_eq!(state.pickups.len(), 1);
        assert!(!collect_pickups(&mut state));
    }
}
