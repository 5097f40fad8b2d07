use anyhow::Result;

use crate::{
    config::WeatherParams,
    engine::{System, SystemContext},
    resort::Resort,
    rng::SystemRng,
};

/// Random-walk weather evolution. Each field drifts independently and is
/// clamped to its domain; visibility additionally degrades under heavy snow
/// and high wind, so low-visibility conditions compound.
pub struct WeatherSystem {
    params: WeatherParams,
}

impl WeatherSystem {
    pub fn new(params: WeatherParams) -> Self {
        Self { params }
    }
}

impl System for WeatherSystem {
    fn name(&self) -> &str {
        "weather"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        resort: &mut Resort,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let weather = &mut resort.weather;

        let delta = rng.drift(self.params.temperature_drift);
        weather.temperature = (weather.temperature + delta).clamp(-15.0, 5.0);

        let delta = rng.drift(self.params.wind_speed_drift);
        weather.wind_speed = (weather.wind_speed + delta).clamp(0.0, 80.0);

        let delta = rng.drift(self.params.snow_intensity_drift);
        weather.snow_intensity = (weather.snow_intensity + delta).clamp(0.0, 5.0);

        // Visibility sees this tick's snow and wind values.
        let d = self.params.visibility_drift;
        let mut delta = rng.drift(d);
        if weather.snow_intensity > 2.0 {
            delta -= d * 2.0;
        }
        if weather.wind_speed > 40.0 {
            delta -= d * 1.5;
        }
        weather.visibility = (weather.visibility + delta).clamp(50.0, 10000.0);

        weather.timestamp = ctx.now;
        Ok(())
    }
}
