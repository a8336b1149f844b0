use anyhow::{Context, Result};
use boid_core::{Flock, FlockConfig, FrameSink};
use boid_shared::SettingsUpdate;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A flock plus the frame clock driving it
pub struct Simulation {
    flock: Flock,
    frame: u64,
    time: f64,
}

impl Simulation {
    /// Spawn the flock. The same seed always yields the same flock.
    pub fn new(config: FlockConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let flock = Flock::spawn_with_rng(config, &mut rng).context("Failed to spawn flock")?;
        log::info!("Spawned {} boids (seed {})", flock.len(), seed);

        Ok(Self {
            flock,
            frame: 0,
            time: 0.0,
        })
    }

    pub fn from_flock(flock: Flock) -> Self {
        Self {
            flock,
            frame: 0,
            time: 0.0,
        }
    }

    /// Step the flock by `dt`, then present the frame.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, dt: f32, sink: &mut S) -> Result<()> {
        self.flock
            .step(dt)
            .with_context(|| format!("Step failed at frame {}", self.frame))?;
        self.frame += 1;
        self.time += f64::from(dt);
        self.flock.present(sink);
        Ok(())
    }

    pub fn run<S: FrameSink + ?Sized>(&mut self, frames: u64, dt: f32, sink: &mut S) -> Result<()> {
        log::info!("Running {} frames at dt={}", frames, dt);
        for _ in 0..frames {
            self.tick(dt, sink)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, update: SettingsUpdate) -> Result<()> {
        let config = update
            .settings
            .into_config()
            .context("Rejected settings update")?;
        self.flock.reconfigure(config)?;
        log::debug!("Applied settings update at frame {}", self.frame);
        Ok(())
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}
