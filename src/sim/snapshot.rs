//! Read-only render snapshots
//!
//! The renderer never touches `GameState` directly. Each frame it gets a
//! `RenderSnapshot` with everything it needs to draw, already in display
//! terms (colors, ratios, fades, labels).

use glam::Vec2;
use serde::Serialize;

use super::enemy::EnemyKind;
use super::powerup::PowerUpKind;
use super::projectile::ProjectileKind;
use super::state::{GameState, SessionPhase, UpgradeChoice};
use crate::consts::*;
use crate::ui::{self, Button};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    pub health_ratio: f32,
    pub shield_charges: u32,
    pub shield_timer: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub facing: Vec2,
    pub radius: f32,
    pub color: [u8; 4],
    pub flashing: bool,
    pub health_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionView {
    pub pos: Vec2,
    pub radius: f32,
    /// 0 at detonation, 1 when gone
    pub progress: f32,
    /// Alpha factor
    pub fade: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub label: &'static str,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectView {
    pub kind: PowerUpKind,
    pub label: &'static str,
    pub remaining: f32,
    pub duration: f32,
    pub color: [u8; 4],
}

/// Touch joystick overlay
#[derive(Debug, Clone, Serialize)]
pub struct StickView {
    pub anchor: Vec2,
    pub knob: Vec2,
    pub base_radius: f32,
    pub knob_radius: f32,
    /// A finger is steering
    pub active: bool,
}

/// One box on the upgrade screen
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeView {
    pub choice: UpgradeChoice,
    pub label: &'static str,
    /// Bonus granted by picking it
    pub step_percent: f32,
    /// Bonus accumulated so far this run
    pub total_bonus_percent: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: SessionPhase,
    pub frame: u64,
    pub wave: u32,
    pub enemies_remaining: u32,
    pub pending_wave: u32,
    pub banner: String,
    /// 0..1 through the splash screen
    pub splash_progress: f32,
    /// 0 when the gun is ready
    pub fire_cooldown: f32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub pickups: Vec<PickupView>,
    pub effects: Vec<EffectView>,
    pub stick: StickView,
    pub upgrades: Vec<UpgradeView>,
    /// Overlay buttons for the current phase
    pub buttons: Vec<Button>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            phase: state.phase,
            frame: state.frame,
            wave: state.wave,
            enemies_remaining: state.enemies_remaining,
            pending_wave: state.pending_wave,
            banner: state.tuning.motd.clone(),
            splash_progress: (state.splash_timer / SPLASH_DURATION).clamp(0.0, 1.0),
            fire_cooldown: state.fire_timer,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                health: player.health,
                max_health: player.max_health,
                health_ratio: player.health_ratio(),
                shield_charges: player.shield_charges,
                shield_timer: player.shield_timer,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    facing: e.facing,
                    radius: e.radius,
                    color: e.color(),
                    flashing: e.is_flashing(),
                    health_ratio: if e.max_health == 0 {
                        0.0
                    } else {
                        e.health as f32 / e.max_health as f32
                    },
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    radius: p.radius,
                    color: p.color,
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    pos: e.pos,
                    radius: e.radius,
                    progress: e.progress(),
                    fade: e.fade(),
                })
                .collect(),
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupView {
                    id: p.id,
                    kind: p.kind,
                    label: p.kind.label(),
                    pos: p.pos,
                    radius: p.radius,
                    color: p.kind.color(),
                })
                .collect(),
            effects: state
                .effects
                .as_slice()
                .iter()
                .map(|e| EffectView {
                    kind: e.kind,
                    label: e.kind.label(),
                    remaining: e.remaining,
                    duration: e.kind.duration(),
                    color: e.kind.color(),
                })
                .collect(),
            stick: StickView {
                anchor: state.stick.anchor,
                knob: state.stick.position,
                base_radius: state.stick.base_radius,
                knob_radius: state.stick.knob_radius,
                active: state.stick.is_active(),
            },
            upgrades: UpgradeChoice::ALL
                .iter()
                .map(|&choice| UpgradeView {
                    choice,
                    label: choice.label(),
                    step_percent: PERMANENT_UPGRADE_PERCENT * 100.0,
                    total_bonus_percent: state.upgrades.total_bonus_percent(choice),
                })
                .collect(),
            buttons: ui::buttons_for(state.phase),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_playing() {
        let mut state = GameState::new(2);
        state.start_run();
        state.activate_power_up(PowerUpKind::SpeedBoost);
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.phase, SessionPhase::Playing);
        assert_eq!(snap.enemies.len(), 8);
        assert_eq!(snap.player.health_ratio, 1.0);
        assert_eq!(snap.effects.len(), 1);
        assert_eq!(snap.effects[0].label, "Speed");
        assert!(snap.buttons.is_empty());
        assert_eq!(snap.upgrades.len(), 3);
        assert!(!snap.stick.active);
        assert_eq!(snap.stick.knob, snap.stick.anchor);
    }

    #[test]
    fn test_snapshot_json() {
        let mut state = GameState::new(2);
        state.phase = SessionPhase::Menu;
        let json = RenderSnapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Menu");
        assert_eq!(value["buttons"].as_array().unwrap().len(), 2);
        assert_eq!(value["banner"], "Welcome!");
    }
}
