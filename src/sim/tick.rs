//! Frame-stepped session tick
//!
//! One call advances the session by one frame. The phase decides which
//! pipeline runs; overlays only hit-test buttons, and the simulation clock
//! only moves while PLAYING.

use super::combat;
use super::powerup::{PowerStats, PowerUpKind};
use super::state::{GameEvent, GameState, SessionPhase};
use super::weapon::{self, FireProfile};
use super::wave;
use crate::consts::*;
use crate::input::{Controls, TickInput, resolve_controls};
use crate::ui::{self, UiAction};

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.frame += 1;

    match state.phase {
        SessionPhase::Splash => tick_splash(state, input, dt),
        SessionPhase::Menu => tick_menu(state, input),
        SessionPhase::Playing => tick_playing(state, input, dt),
        SessionPhase::Paused => tick_paused(state, input),
        SessionPhase::Upgrade => tick_upgrade(state, input),
        SessionPhase::GameOver => tick_game_over(state, input),
    }
}

/// Button pressed this frame on the current overlay
fn pressed(state: &GameState, input: &TickInput) -> Option<UiAction> {
    if !input.select {
        return None;
    }
    ui::hit_test(&ui::buttons_for(state.phase), input.pointer)
}

fn go_to_menu(state: &mut GameState) {
    state.events.push(GameEvent::ButtonPress);
    state.reset_permanent_upgrades();
    state.pending_wave = 0;
    state.phase = SessionPhase::Menu;
}

fn restart(state: &mut GameState) {
    state.start_run();
    state.events.push(GameEvent::ButtonPress);
}

fn tick_splash(state: &mut GameState, input: &TickInput, dt: f32) {
    state.splash_timer += dt;
    if state.splash_timer >= SPLASH_DURATION || input.any_press() {
        state.phase = SessionPhase::Menu;
    }
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    match pressed(state, input) {
        Some(UiAction::Play) => restart(state),
        Some(UiAction::Quit) => {
            state.events.push(GameEvent::ButtonPress);
            state.quit_requested = true;
            log::info!("Quit requested from menu");
        }
        _ => {}
    }
}

/// The pause key resumes, and the overlay buttons are still hit-tested the
/// same frame
fn tick_paused(state: &mut GameState, input: &TickInput) {
    let action = pressed(state, input);
    if input.pause {
        state.phase = SessionPhase::Playing;
    }
    match action {
        Some(UiAction::Resume) => {
            state.events.push(GameEvent::ButtonPress);
            state.phase = SessionPhase::Playing;
        }
        Some(UiAction::Restart) => restart(state),
        Some(UiAction::QuitToMenu) => go_to_menu(state),
        _ => {}
    }
}

fn tick_upgrade(state: &mut GameState, input: &TickInput) {
    if let Some(UiAction::Upgrade(choice)) = pressed(state, input) {
        state.choose_upgrade(choice);
    }
}

fn tick_game_over(state: &mut GameState, input: &TickInput) {
    match pressed(state, input) {
        Some(UiAction::Replay) => restart(state),
        Some(UiAction::Menu) => go_to_menu(state),
        _ => {}
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.phase = SessionPhase::Paused;
        return;
    }
    state.play_time += dt;
    if state.fire_timer > 0.0 {
        state.fire_timer = (state.fire_timer - dt).max(0.0);
    }

    wave::update_power_up_spawner(state, dt);

    let expired = state.effects.tick(dt);
    if expired.contains(&PowerUpKind::Shield) {
        state.player.shield_charges = 0;
        state.player.shield_timer = 0.0;
    }

    let mut stats = state.power_stats();
    state.sync_player_stats(&stats);
    let controls = resolve_controls(&mut state.stick, input);
    state.player.update(dt, controls.move_dir);

    if combat::collect_pickups(state) {
        stats = state.power_stats();
        state.sync_player_stats(&stats);
    }
    if stats.shield_remaining > 0.0 {
        state.player.shield_timer = stats.shield_remaining;
    } else if state.player.shield_charges == 0 {
        state.player.shield_timer = 0.0;
    }

    fire(state, &controls, &stats);
    combat::resolve(state, dt);

    if state.game_over {
        state.phase = SessionPhase::GameOver;
        return;
    }
    if state.enemies_remaining == 0 {
        state.pending_wave = state.wave + 1;
        state.events.push(GameEvent::WaveCleared { wave: state.wave });
        log::info!("Wave {} cleared after {:.1}s", state.wave, state.play_time);
        state.phase = SessionPhase::Upgrade;
    }
}

/// Pull the trigger if it is held and the gun is ready
fn fire(state: &mut GameState, controls: &Controls, stats: &PowerStats) {
    if !controls.fire || state.fire_timer > 0.0 {
        return;
    }
    let profile = FireProfile::resolve(stats, state.upgrades.fire_rate, state.upgrades.damage);
    let player_pos = state.player.pos;
    let shots = weapon::volley(&profile, player_pos, controls.aim, || state.next_entity_id());
    state.projectiles.extend(shots);
    state.events.push(GameEvent::Shoot);
    state.fire_timer = profile.cooldown;
}
