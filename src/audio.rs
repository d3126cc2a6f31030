//! Sound trigger boundary
//!
//! The simulation only names sounds. A host plugs in an `AudioSink` that
//! plays them (or ignores them); `AudioManager` applies volume settings.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Weapon fired
    Shoot,
    /// Projectile or pickup connected
    EnemyHit,
    /// Enemy touched the player
    PlayerHit,
    /// Rocket detonated
    Explosion,
    /// Menu button pressed
    ButtonPress,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Per-effect mix level (0.0 - 1.0)
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.5,
            SoundEffect::EnemyHit => 0.7,
            SoundEffect::PlayerHit => 0.8,
            SoundEffect::Explosion => 0.7,
            SoundEffect::ButtonPress => 0.6,
            SoundEffect::GameOver => 0.9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::EnemyHit => "enemy-hit",
            SoundEffect::PlayerHit => "player-hit",
            SoundEffect::Explosion => "explosion",
            SoundEffect::ButtonPress => "button-press",
            SoundEffect::GameOver => "game-over",
        }
    }
}

/// Something that can play a sound at a given volume
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Keeps every played sound, for tests and replay tooling
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<(SoundEffect, f32)>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }
}

/// Volume settings in front of a sink
pub struct AudioManager<S: AudioSink> {
    sink: S,
    /// Overall level (0.0 - 1.0)
    volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            volume: 0.8,
            muted: false,
        }
    }

    /// Overall level, clamped to 0.0 - 1.0
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let vol = self.volume * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the sounds for a frame's drained events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(GameEvent::sound) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;

    #[test]
    fn test_play_events_maps_sounds() {
        let mut audio = AudioManager::new(RecordingAudio::default());
        audio.set_volume(1.0);
        audio.play_events(&[
            GameEvent::Shoot,
            GameEvent::WaveCleared { wave: 1 },
            GameEvent::PowerUpCollected(PowerUpKind::Shield),
            GameEvent::GameOver,
        ]);
        let played: Vec<_> = audio.sink().played.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            played,
            vec![SoundEffect::Shoot, SoundEffect::EnemyHit, SoundEffect::GameOver]
        );
        assert!((audio.sink().played[0].1 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(RecordingAudio::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Explosion);
        assert!(audio.sink().played.is_empty());
    }

    #[test]
    fn test_volume_scales_and_silences() {
        let mut audio = AudioManager::new(RecordingAudio::default());
        audio.set_volume(0.5);
        audio.play(SoundEffect::GameOver);
        assert!((audio.sink().played[0].1 - 0.45).abs() < 1e-6);

        audio.set_volume(f32::NAN);
        audio.play(SoundEffect::GameOver);
        assert_eq!(audio.sink().played.len(), 1);
    }
}
