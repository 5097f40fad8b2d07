use anyhow::{anyhow, Result};
use rand::{seq::SliceRandom, Rng};

use crate::{
    config::SafetyParams,
    engine::{System, SystemContext},
    models::{IncidentReport, IncidentType, Severity},
    resort::Resort,
    rng::SystemRng,
};

/// Avalanche risk index above which avalanche warnings enter the incident
/// pool at double weight.
pub const HIGH_AVALANCHE_RISK: f64 = 0.7;

/// Candidate incident types with selection weights. Baseline types always
/// carry weight 1; under high avalanche risk the warning type joins at
/// weight 2, biasing selection without excluding anything else.
pub fn incident_type_pool(avalanche_risk_index: f64) -> Vec<(IncidentType, u32)> {
    let mut pool = vec![
        (IncidentType::MinorInjury, 1),
        (IncidentType::Collision, 1),
        (IncidentType::LostPerson, 1),
        (IncidentType::EquipmentFailure, 1),
    ];
    if avalanche_risk_index > HIGH_AVALANCHE_RISK {
        pool.push((IncidentType::AvalancheWarning, 2));
    }
    pool
}

/// Severities allowed for each incident type.
pub fn allowed_severities(incident_type: IncidentType) -> &'static [Severity] {
    use Severity::{Critical, High, Low, Medium};
    match incident_type {
        IncidentType::MinorInjury => &[Low, Medium],
        IncidentType::Collision => &[Low, Medium, High],
        IncidentType::LostPerson => &[Medium, High],
        IncidentType::EquipmentFailure => &[Low, Medium, High],
        IncidentType::AvalancheWarning => &[High, Critical],
    }
}

/// Avalanche-risk random walk plus occasional incident generation into the
/// bounded history. Reads this tick's weather.
pub struct SafetySystem {
    params: SafetyParams,
}

impl SafetySystem {
    pub fn new(params: SafetyParams) -> Self {
        Self { params }
    }

    fn generate_incident(
        &self,
        ctx: &SystemContext,
        resort: &Resort,
        rng: &mut SystemRng<'_>,
    ) -> Result<IncidentReport> {
        let pool = incident_type_pool(resort.avalanche_risk_index);
        let total: u32 = pool.iter().map(|(_, weight)| weight).sum();
        let mut pick = rng.gen_range(0..total);
        let mut incident_type = pool[0].0;
        for (candidate, weight) in &pool {
            if pick < *weight {
                incident_type = *candidate;
                break;
            }
            pick -= weight;
        }

        let severity = *allowed_severities(incident_type)
            .choose(rng)
            .ok_or_else(|| anyhow!("no severities for {incident_type:?}"))?;

        // One flat pool of display names, slopes and lifts alike.
        let locations: Vec<&str> = resort
            .slopes
            .iter()
            .map(|slope| slope.name.as_str())
            .chain(resort.lifts.iter().map(|lift| lift.name.as_str()))
            .collect();
        let location = locations
            .choose(rng)
            .ok_or_else(|| anyhow!("resort has no slopes or lifts"))?
            .to_string();

        Ok(IncidentReport {
            incident_type,
            location,
            severity,
            timestamp: ctx.now,
        })
    }
}

impl System for SafetySystem {
    fn name(&self) -> &str {
        "safety"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        resort: &mut Resort,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let d = self.params.risk_drift;
        let mut delta = rng.drift(d);
        if resort.weather.wind_speed > 50.0 {
            delta += d * 0.5;
        }
        if resort.weather.snow_intensity > 3.0 {
            delta += d * 0.5;
        }
        resort.avalanche_risk_index = (resort.avalanche_risk_index + delta).clamp(0.0, 1.0);

        if rng.chance(self.params.incident_probability) {
            let incident = self.generate_incident(ctx, resort, rng)?;
            resort.push_incident(incident);
        }

        resort.safety_timestamp = ctx.now;
        Ok(())
    }
}
