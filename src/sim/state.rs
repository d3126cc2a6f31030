//! Session state and core simulation types
//!
//! `GameState` is the explicit context every per-frame operation takes.
//! Nothing in the simulation reaches for globals: tuning, the RNG and the
//! event queue all live here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::powerup::{ActiveEffects, PowerStats, PowerUp, PowerUpKind};
use super::projectile::{Explosion, Projectile};
use super::wave;
use crate::Tuning;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::input::VirtualStick;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title card, skippable
    Splash,
    /// Main menu
    Menu,
    /// Active gameplay
    Playing,
    /// Pause overlay (simulation halted)
    Paused,
    /// Wave cleared, choosing a permanent upgrade (simulation halted)
    Upgrade,
    /// Run ended
    GameOver,
}

/// Permanent upgrade offered between waves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeChoice {
    Health,
    FireRate,
    Damage,
}

impl UpgradeChoice {
    /// Display order on the upgrade screen
    pub const ALL: [UpgradeChoice; 3] = [
        UpgradeChoice::Health,
        UpgradeChoice::FireRate,
        UpgradeChoice::Damage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UpgradeChoice::Health => "Max Health",
            UpgradeChoice::FireRate => "Fire Rate",
            UpgradeChoice::Damage => "Damage",
        }
    }
}

/// Permanent multipliers for the current run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Upgrades {
    pub health: f32,
    pub fire_rate: f32,
    pub damage: f32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            health: 1.0,
            fire_rate: 1.0,
            damage: 1.0,
        }
    }
}

impl Upgrades {
    /// Compound the chosen multiplier by one step. Returns the new value.
    pub fn apply(&mut self, choice: UpgradeChoice) -> f32 {
        let slot = match choice {
            UpgradeChoice::Health => &mut self.health,
            UpgradeChoice::FireRate => &mut self.fire_rate,
            UpgradeChoice::Damage => &mut self.damage,
        };
        *slot *= 1.0 + PERMANENT_UPGRADE_PERCENT;
        *slot
    }

    pub fn get(&self, choice: UpgradeChoice) -> f32 {
        match choice {
            UpgradeChoice::Health => self.health,
            UpgradeChoice::FireRate => self.fire_rate,
            UpgradeChoice::Damage => self.damage,
        }
    }

    /// Accumulated bonus in percent (for the upgrade screen)
    pub fn total_bonus_percent(&self, choice: UpgradeChoice) -> f32 {
        (self.get(choice) - 1.0) * 100.0
    }
}

/// Discrete things that happened during a frame, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shoot,
    EnemyHit,
    PlayerHit { blocked: bool },
    Explosion,
    ButtonPress,
    GameOver,
    PowerUpCollected(PowerUpKind),
    WaveStarted { wave: u32, enemies: u32 },
    WaveCleared { wave: u32 },
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::Shoot => Some(SoundEffect::Shoot),
            GameEvent::EnemyHit | GameEvent::PowerUpCollected(_) => Some(SoundEffect::EnemyHit),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::Explosion => Some(SoundEffect::Explosion),
            GameEvent::ButtonPress => Some(SoundEffect::ButtonPress),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::WaveStarted { .. } | GameEvent::WaveCleared { .. } => None,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    /// Seconds spent on the splash screen
    pub splash_timer: f32,
    /// Frames ticked since creation
    pub frame: u64,
    /// Seconds of unpaused gameplay this run
    pub play_time: f32,
    pub player: Player,
    /// Enemies (spawn order)
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Field pickups
    pub pickups: Vec<PowerUp>,
    /// Running timed effects
    pub effects: ActiveEffects,
    /// Touch joystick, re-homed every wave
    pub stick: VirtualStick,
    pub wave: u32,
    pub enemies_remaining: u32,
    /// Wave queued while the upgrade screen is up (0 = none)
    pub pending_wave: u32,
    pub upgrades: Upgrades,
    pub game_over: bool,
    /// Menu Quit pressed; the host should close
    pub quit_requested: bool,
    /// Seconds until the gun may fire again
    pub fire_timer: f32,
    /// Seconds until the next periodic pickup
    pub power_up_timer: f32,
    /// Latest tuning from the provider (may change any frame)
    pub tuning: Tuning,
    /// Tuning in effect for the current wave
    pub active: Tuning,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session on the splash screen with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Splash,
            splash_timer: 0.0,
            frame: 0,
            play_time: 0.0,
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            pickups: Vec::new(),
            effects: ActiveEffects::default(),
            stick: VirtualStick::default(),
            wave: tuning.starting_wave,
            enemies_remaining: 0,
            pending_wave: 0,
            upgrades: Upgrades::default(),
            game_over: false,
            quit_requested: false,
            fire_timer: 0.0,
            power_up_timer: 0.0,
            active: tuning.clone(),
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Hand over new tuning. It takes effect at the next session or wave start.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.sanitized();
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop permanent upgrades and restore the player to base max health
    pub fn reset_permanent_upgrades(&mut self) {
        self.upgrades = Upgrades::default();
        self.player.set_max_health_multiplier(self.upgrades.health);
        self.player.reset_health();
    }

    /// Begin a fresh run at the configured starting wave
    pub fn start_run(&mut self) {
        self.reset_permanent_upgrades();
        self.pending_wave = 0;
        self.game_over = false;
        self.play_time = 0.0;
        self.active = self.tuning.clone();
        let start = self.active.starting_wave;
        log::info!(
            "Starting run at wave {} with seed {} ({})",
            start,
            self.seed,
            self.active.motd
        );
        wave::spawn_wave(self, start);
        self.phase = SessionPhase::Playing;
    }

    /// Apply a permanent upgrade and move on to the queued wave
    pub fn choose_upgrade(&mut self, choice: UpgradeChoice) {
        let value = self.upgrades.apply(choice);
        if choice == UpgradeChoice::Health {
            self.player.set_max_health_multiplier(self.upgrades.health);
        }
        log::info!("Upgrade {:?} -> x{:.4}", choice, value);

        self.fire_timer = 0.0;
        if self.pending_wave <= self.wave {
            self.pending_wave = self.wave + 1;
        }
        let next = self.pending_wave;
        self.pending_wave = 0;
        wave::spawn_wave(self, next);
        self.phase = SessionPhase::Playing;
    }

    /// Current aggregated power-up stats
    pub fn power_stats(&self) -> PowerStats {
        self.effects.stats()
    }

    /// Push power-up stats onto the player (speed and shield timer)
    pub fn sync_player_stats(&mut self, stats: &PowerStats) {
        self.player.apply_speed_multiplier(stats.speed_multiplier);
        if stats.shield_remaining > 0.0 {
            self.player.shield_timer = stats.shield_remaining;
        }
    }

    /// Apply a collected pickup
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::HealthPack => {
                let healed = self.player.heal(HEALTH_PICKUP_AMOUNT);
                log::debug!("Health pack restored {}", healed);
            }
            PowerUpKind::Shield => {
                self.effects.activate(kind);
                self.player.grant_shield(kind.duration());
            }
            PowerUpKind::RocketLauncher => {
                self.effects.activate(kind);
                self.fire_timer = 0.0;
            }
            _ => {
                self.effects.activate(kind);
            }
        }
        self.events.push(GameEvent::PowerUpCollected(kind));
    }

    /// Put a pickup on the field unless the field is full
    pub fn place_pickup(&mut self, kind: PowerUpKind, pos: Vec2) -> Option<u32> {
        if self.pickups.len() >= MAX_FIELD_POWER_UPS {
            return None;
        }
        let id = self.next_entity_id();
        self.pickups.push(PowerUp::new(id, kind, pos));
        Some(id)
    }

    /// Start a rocket blast
    pub fn spawn_explosion(&mut self, pos: Vec2, radius: f32, damage: u32) {
        log::debug!("Explosion at ({:.0}, {:.0}) r={} dmg={}", pos.x, pos.y, radius, damage);
        self.explosions.push(Explosion::new(pos, radius, damage));
        self.events.push(GameEvent::Explosion);
    }
}
