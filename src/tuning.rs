//! Balance parameters supplied from outside the simulation
//!
//! The daily seed (or any remote config) produces a `Tuning` value. The
//! session only reads it at run start and wave start; see
//! `GameState::set_tuning`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Moods shown in the daily-seed banner
const DAILY_MOODS: [&str; 4] = ["Solar Storm", "Ion Drift", "Nebula Surge", "Quantum Tide"];

/// Errors for tuning documents that cannot be read at all.
///
/// Individual bad fields never produce an error; they fall back to defaults.
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Not valid JSON
    #[error("Malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object
    #[error("Tuning document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scales the per-wave enemy count (default 1.0, range 0.1 - 5.0)
    pub enemy_count_multiplier: f32,
    /// Probability that a dead enemy drops anything (default 0.22, range 0 - 1)
    pub enemy_drop_chance: f32,
    /// Shortest periodic power-up interval in seconds (default 8, range 0.5 - 120)
    pub power_up_interval_min: f32,
    /// Longest periodic power-up interval in seconds (default 14, at least the minimum)
    pub power_up_interval_max: f32,
    /// Wave a new run starts at (default 1, range 1 - 99)
    pub starting_wave: u32,
    /// Banner shown on the menu
    pub motd: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_count_multiplier: 1.0,
            enemy_drop_chance: 0.22,
            power_up_interval_min: 8.0,
            power_up_interval_max: 14.0,
            starting_wave: 1,
            motd: "Welcome!".to_string(),
        }
    }
}

impl Tuning {
    pub const MAX_STARTING_WAVE: u32 = 99;
    pub const MAX_INTERVAL: f32 = 120.0;

    /// Derive the day's parameters from a days-since-epoch seed.
    ///
    /// Effects stay mild: 0.9-1.3x enemies, 18-34% drops, start wave 1-3.
    pub fn from_daily_seed(day: u32) -> Self {
        let enemy_count_multiplier = 0.9 + (day % 9) as f32 * 0.05;
        let enemy_drop_chance = 0.18 + ((day / 7) % 9) as f32 * 0.02;
        let power_up_interval_min = 6.0 + ((day / 97) % 4) as f32 * 0.5;
        let power_up_interval_max =
            (10.0 + ((day / 37) % 5) as f32 * 0.5).max(power_up_interval_min + 1.0);
        let mood = DAILY_MOODS[(day % 4) as usize];

        Self {
            enemy_count_multiplier,
            enemy_drop_chance,
            power_up_interval_min,
            power_up_interval_max,
            starting_wave: 1 + day % 3,
            motd: format!("Daily Seed {} • {}", day, mood),
        }
    }

    /// Parse a JSON object, falling back per field on missing or bad values
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let value: Value = serde_json::from_str(json)?;
        let map = match value {
            Value::Object(map) => map,
            other => return Err(TuningError::NotAnObject(json_kind(&other))),
        };

        let defaults = Self::default();
        let tuning = Self {
            enemy_count_multiplier: read_f32(
                &map,
                "enemy_count_multiplier",
                defaults.enemy_count_multiplier,
            ),
            enemy_drop_chance: read_f32(&map, "enemy_drop_chance", defaults.enemy_drop_chance),
            power_up_interval_min: read_f32(
                &map,
                "power_up_interval_min",
                defaults.power_up_interval_min,
            ),
            power_up_interval_max: read_f32(
                &map,
                "power_up_interval_max",
                defaults.power_up_interval_max,
            ),
            starting_wave: read_u32(&map, "starting_wave", defaults.starting_wave),
            motd: match map.get("motd") {
                Some(Value::String(s)) => s.clone(),
                Some(_) => {
                    log::warn!("Tuning field 'motd' is not a string, using default");
                    defaults.motd
                }
                None => defaults.motd,
            },
        };

        Ok(tuning.sanitized())
    }

    /// Parse a JSON document, using defaults if it cannot be read at all
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning: {:?}", tuning);
                tuning
            }
            Err(e) => {
                log::warn!("{}, using default tuning", e);
                Self::default()
            }
        }
    }

    /// Clamp every field into its safe range
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let enemy_count_multiplier =
            finite_or(self.enemy_count_multiplier, defaults.enemy_count_multiplier).clamp(0.1, 5.0);
        let enemy_drop_chance =
            finite_or(self.enemy_drop_chance, defaults.enemy_drop_chance).clamp(0.0, 1.0);
        let power_up_interval_min = finite_or(
            self.power_up_interval_min,
            defaults.power_up_interval_min,
        )
        .clamp(0.5, Self::MAX_INTERVAL);
        let power_up_interval_max = finite_or(
            self.power_up_interval_max,
            defaults.power_up_interval_max,
        )
        .clamp(power_up_interval_min, Self::MAX_INTERVAL);

        Self {
            enemy_count_multiplier,
            enemy_drop_chance,
            power_up_interval_min,
            power_up_interval_max,
            starting_wave: self.starting_wave.clamp(1, Self::MAX_STARTING_WAVE),
            motd: self.motd.clone(),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn read_f32(map: &Map<String, Value>, key: &str, fallback: f32) -> f32 {
    let Some(value) = map.get(key) else {
        return fallback;
    };
    match value.as_f64() {
        Some(v) if v.is_finite() => v as f32,
        _ => {
            log::warn!("Tuning field '{}' is not a number ({}), using default", key, value);
            fallback
        }
    }
}

fn read_u32(map: &Map<String, Value>, key: &str, fallback: u32) -> u32 {
    let Some(value) = map.get(key) else {
        return fallback;
    };
    match value.as_f64() {
        Some(v) if v.is_finite() => v.round().clamp(0.0, u32::MAX as f64) as u32,
        _ => {
            log::warn!("Tuning field '{}' is not a number ({}), using default", key, value);
            fallback
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
