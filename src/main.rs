//! WaveBreaker headless runner
//!
//! Plays a session with the autopilot at a fixed 60 Hz step and reports how
//! far it got. Useful for balance checks against a tuning file or a daily
//! seed.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use wavebreaker::Tuning;
    use wavebreaker::audio::{AudioManager, RecordingAudio, SoundEffect};
    use wavebreaker::consts::FRAME_DT;
    use wavebreaker::sim::{GameState, RenderSnapshot, SessionPhase, autopilot_input, tick};

    #[derive(Parser, Debug)]
    #[command(name = "wavebreaker")]
    #[command(about = "Run a WaveBreaker session headless with the autopilot")]
    struct Cli {
        /// RNG seed for the session
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Frames to simulate (60 per second)
        #[arg(long, default_value_t = 36_000)]
        frames: u64,
        /// Tuning JSON file
        #[arg(long, conflicts_with = "daily_seed")]
        tuning: Option<PathBuf>,
        /// Derive tuning from a day number instead of a file
        #[arg(long)]
        daily_seed: Option<u32>,
        /// Keep replaying after game over instead of stopping
        #[arg(long, default_value_t = false)]
        keep_going: bool,
        /// Sound level for the recorded effects (0.0 - 1.0)
        #[arg(long, default_value_t = 0.8)]
        volume: f32,
        /// Print the final render snapshot as JSON
        #[arg(long, default_value_t = false)]
        snapshot: bool,
    }

    fn load_tuning(cli: &Cli) -> Result<Tuning> {
        if let Some(day) = cli.daily_seed {
            return Ok(Tuning::from_daily_seed(day));
        }
        let Some(path) = &cli.tuning else {
            return Ok(Tuning::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&text).with_context(|| format!("parsing tuning file {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        if cli.frames == 0 {
            bail!("--frames must be at least 1");
        }

        let tuning = load_tuning(&cli)?;
        log::info!("{}", tuning.motd);
        let mut state = GameState::with_tuning(cli.seed, tuning);
        let mut audio = AudioManager::new(RecordingAudio::default());
        audio.set_volume(cli.volume);
        let mut best_wave = 0;
        let mut runs = 0;

        for _ in 0..cli.frames {
            let input = autopilot_input(&state);
            let before = state.phase;
            tick(&mut state, &input, FRAME_DT);
            audio.play_events(&state.drain_events());

            if state.phase == SessionPhase::Playing
                && matches!(before, SessionPhase::Menu | SessionPhase::GameOver)
            {
                runs += 1;
            }
            best_wave = best_wave.max(state.wave);

            if state.phase == SessionPhase::GameOver && before == SessionPhase::Playing {
                log::info!(
                    "Run {} ended on wave {} after {:.1}s",
                    runs,
                    state.wave,
                    state.play_time
                );
                if !cli.keep_going {
                    break;
                }
            }
            if state.quit_requested {
                break;
            }
        }

        let played = &audio.sink().played;
        let count = |effect: SoundEffect| played.iter().filter(|(e, _)| *e == effect).count();
        log::info!(
            "Frames {}: best wave {}, {} shots, {} hits, {} explosions",
            state.frame,
            best_wave,
            count(SoundEffect::Shoot),
            count(SoundEffect::EnemyHit),
            count(SoundEffect::Explosion)
        );
        println!(
            "seed={} frames={} phase={:?} wave={} best_wave={} health={}/{}",
            state.seed,
            state.frame,
            state.phase,
            state.wave,
            best_wave,
            state.player.health,
            state.player.max_health
        );

        if cli.snapshot {
            let json = RenderSnapshot::capture(&state)
                .to_json()
                .context("serializing snapshot")?;
            println!("{}", json);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web; nothing to run here
}
