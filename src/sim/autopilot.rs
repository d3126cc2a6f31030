//! Autopilot - scripted input that plays the game
//!
//! Drives the headless runner and long-running tests. It reads the state
//! and produces the same `TickInput` a player would.

use glam::Vec2;

use super::state::{GameState, SessionPhase, UpgradeChoice};
use crate::consts::*;
use crate::input::TickInput;
use crate::ui::{self, UiAction};

/// Enemies closer than this push the autopilot away
const THREAT_RADIUS: f32 = 220.0;
/// Only go for pickups when nothing is this close
const SAFE_RADIUS: f32 = 160.0;

/// Input that presses `action` on the current overlay
fn press(phase: SessionPhase, action: UiAction) -> TickInput {
    match ui::button_center(phase, action) {
        Some(pointer) => TickInput {
            pointer,
            select: true,
            ..Default::default()
        },
        None => TickInput::default(),
    }
}

/// Produce this frame's input for `state`
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        SessionPhase::Splash => TickInput {
            confirm: true,
            ..Default::default()
        },
        SessionPhase::Menu => press(state.phase, UiAction::Play),
        SessionPhase::Paused => press(state.phase, UiAction::Resume),
        SessionPhase::Upgrade => {
            // Rotate through the upgrades so long runs get a mix
            let choice = UpgradeChoice::ALL[state.wave as usize % UpgradeChoice::ALL.len()];
            press(state.phase, UiAction::Upgrade(choice))
        }
        SessionPhase::GameOver => press(state.phase, UiAction::Replay),
        SessionPhase::Playing => play(state),
    }
}

fn play(state: &GameState) -> TickInput {
    let me = state.player.pos;

    // Aim at the nearest enemy
    let target = state
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(me)
                .partial_cmp(&b.pos.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    // Back away from anything close, weighted by how close
    let mut flee = Vec2::ZERO;
    let mut nearest = f32::MAX;
    for enemy in &state.enemies {
        let away = me - enemy.pos;
        let dist = away.length();
        nearest = nearest.min(dist);
        if dist < THREAT_RADIUS && dist > 0.001 {
            flee += away / dist * (1.0 - dist / THREAT_RADIUS);
        }
    }

    let move_dir = if flee.length() > 0.001 {
        // Slide sideways a bit so we do not back into a wall
        let time_factor = state.frame as f32 * 0.01;
        let sway = flee.perp() * (time_factor.sin() * 0.5);
        let to_center = (Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT) * 0.5 - me) / PLAYFIELD_WIDTH;
        (flee.normalize() + sway + to_center).normalize_or_zero()
    } else if nearest > SAFE_RADIUS {
        // Safe: grab the nearest pickup
        state
            .pickups
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(me)
                    .partial_cmp(&b.pos.distance_squared(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| (p.pos - me).normalize_or_zero())
            .unwrap_or(Vec2::ZERO)
    } else {
        Vec2::ZERO
    };

    TickInput {
        move_dir,
        aim: target.unwrap_or(me + Vec2::X),
        fire: target.is_some(),
        pointer: target.unwrap_or(me),
        ..Default::default()
    }
}
