use anyhow::Result;

use crate::{
    config::SlopeParams,
    engine::{System, SystemContext},
    models::{round1, SlopeData, SlopeDifficulty},
    resort::Resort,
    rng::SystemRng,
};

/// Snow-depth evolution, weather/avalanche closures, and grooming. Runs
/// last in the tick so it sees this tick's weather and safety values.
pub struct SlopeSystem {
    params: SlopeParams,
}

impl SlopeSystem {
    pub fn new(params: SlopeParams) -> Self {
        Self { params }
    }
}

/// A black slope under extreme avalanche risk must stay closed.
fn avalanche_closure(slope: &SlopeData, avalanche_risk_index: f64) -> bool {
    slope.difficulty == SlopeDifficulty::Black && avalanche_risk_index > 0.8
}

/// Advanced terrain closes in storm-force wind.
fn wind_closure(slope: &SlopeData, wind_speed: f64) -> bool {
    slope.difficulty.is_advanced() && wind_speed > 60.0
}

impl System for SlopeSystem {
    fn name(&self) -> &str {
        "slopes"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        resort: &mut Resort,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let snow_intensity = resort.weather.snow_intensity;
        let wind_speed = resort.weather.wind_speed;
        let avalanche_risk_index = resort.avalanche_risk_index;

        for slope in &mut resort.slopes {
            let mut delta = rng.drift(self.params.depth_drift);
            if snow_intensity > 1.0 {
                delta += snow_intensity * 0.1;
            }
            slope.snow_depth_cm = round1((slope.snow_depth_cm + delta).max(0.0));

            // Forced closures run before the reopen attempt; within one tick
            // a still-standing closure condition always wins.
            if avalanche_closure(slope, avalanche_risk_index) {
                slope.is_open = false;
            }
            if wind_closure(slope, wind_speed) {
                slope.is_open = false;
            }

            if !slope.is_open
                && rng.chance(self.params.reopen_probability)
                && !avalanche_closure(slope, avalanche_risk_index)
                && !wind_closure(slope, wind_speed)
            {
                slope.is_open = true;
            }

            // Groom attempt first; only on a failed or inapplicable groom
            // attempt may an ungroom roll happen.
            if slope.difficulty.is_groomable() && rng.chance(self.params.groom_probability) {
                slope.groomed = true;
            } else if slope.groomed && rng.chance(self.params.ungroom_probability) {
                slope.groomed = false;
            }

            slope.timestamp = ctx.now;
        }
        Ok(())
    }
}
