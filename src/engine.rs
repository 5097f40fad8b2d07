use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::{
    config::ResortConfig,
    resort::Resort,
    rng::{RngManager, SystemRng},
    systems::{LiftSystem, SafetySystem, SlopeSystem, WeatherSystem},
};

pub struct EngineSettings {
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
        }
    }
}

/// Single-writer simulation driver. Systems run in registration order every
/// tick, each drawing from its own named RNG stream, so later systems see
/// the outputs of earlier ones within the same tick.
pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
}

impl Engine {
    /// The standard resort engine: weather, then lifts, then safety, then
    /// slopes. The order is load-bearing (safety reads this tick's weather,
    /// slopes read both).
    pub fn standard(config: &ResortConfig) -> Self {
        EngineBuilder::new(EngineSettings { seed: config.seed })
            .with_system(WeatherSystem::new(config.weather.clone()))
            .with_system(LiftSystem::new(config.lifts.clone()))
            .with_system(SafetySystem::new(config.safety.clone()))
            .with_system(SlopeSystem::new(config.slopes.clone()))
            .build()
    }

    /// Build the resort this engine will drive, drawing its randomized
    /// starting conditions from the master stream.
    pub fn build_resort(&mut self, config: &ResortConfig) -> Resort {
        Resort::from_config(config, self.rng.master())
    }

    /// Advance the simulation by exactly one tick.
    pub fn tick(&mut self, resort: &mut Resort) -> Result<()> {
        resort.begin_tick(Utc::now());
        let ctx = SystemContext {
            tick: resort.tick(),
            now: resort.current_time(),
        };
        for system in &mut self.systems {
            let mut rng_stream = self.rng.stream(system.name());
            system.run(&ctx, resort, &mut rng_stream)?;
        }
        Ok(())
    }

    pub fn run(&mut self, resort: &mut Resort, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick(resort)?;
        }
        Ok(())
    }
}

pub struct SystemContext {
    pub tick: u64,
    pub now: DateTime<Utc>,
}

pub trait System: Send {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        resort: &mut Resort,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}
