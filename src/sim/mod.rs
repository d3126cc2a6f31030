//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform concerns:
//! - Caller-supplied frame delta
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Removals are marked during a pass and compacted once per frame

pub mod autopilot;
pub mod combat;
pub mod enemy;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;
pub mod weapon;

pub use crate::input::TickInput;
pub use autopilot::autopilot_input;
pub use enemy::{Enemy, EnemyKind, MovePolicy};
pub use player::Player;
pub use powerup::{ActiveEffects, ActivePowerUp, PowerStats, PowerUp, PowerUpKind};
pub use projectile::{Explosion, Projectile, ProjectileKind};
pub use snapshot::RenderSnapshot;
pub use state::{GameEvent, GameState, SessionPhase, UpgradeChoice, Upgrades};
pub use tick::tick;
pub use wave::{enemy_count, spawn_wave};
pub use weapon::FireProfile;
