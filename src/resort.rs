//! The owned mutable aggregate: all live simulation state for one resort.
//!
//! Exactly one writer mutates a `Resort` (the engine's tick); everything
//! leaves through copy-out accessors, so callers can never alias live state.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::{
    config::ResortConfig,
    models::{
        round1, IncidentReport, LiftData, LiftStatus, ResortState, SafetyData, SlopeData,
        WeatherData,
    },
    systems::lifts::expected_wait_minutes,
};

/// Incident history is truncated to this many entries, oldest evicted first.
pub const INCIDENT_HISTORY_CAP: usize = 20;

pub struct Resort {
    tick: u64,
    current_time: DateTime<Utc>,
    pub(crate) weather: WeatherData,
    pub(crate) lifts: Vec<LiftData>,
    pub(crate) slopes: Vec<SlopeData>,
    pub(crate) avalanche_risk_index: f64,
    pub(crate) safety_timestamp: DateTime<Utc>,
    incidents: VecDeque<IncidentReport>,
}

impl Resort {
    /// Build the resort from its catalog with randomized starting conditions.
    pub fn from_config(config: &ResortConfig, rng: &mut impl Rng) -> Self {
        let now = Utc::now();

        let lifts = config
            .lift_catalog
            .iter()
            .map(|spec| {
                let queue_length = rng.gen_range(10..=80);
                LiftData {
                    lift_id: spec.id.clone(),
                    name: spec.name.clone(),
                    status: LiftStatus::Open,
                    queue_length,
                    wait_time_minutes: expected_wait_minutes(
                        LiftStatus::Open,
                        queue_length,
                        spec.throughput_rate,
                    ),
                    throughput_rate: spec.throughput_rate,
                    timestamp: now,
                }
            })
            .collect();

        let slopes = config
            .slope_catalog
            .iter()
            .map(|spec| SlopeData {
                slope_id: spec.id.clone(),
                name: spec.name.clone(),
                difficulty: spec.difficulty,
                is_open: spec.is_open,
                groomed: spec.groomed,
                snow_depth_cm: round1(spec.base_depth_cm + rng.gen_range(-10.0..=10.0)),
                timestamp: now,
            })
            .collect();

        let weather = WeatherData {
            temperature: rng.gen_range(-10.0..=0.0),
            wind_speed: rng.gen_range(5.0..=25.0),
            snow_intensity: rng.gen_range(0.0..=2.0),
            visibility: rng.gen_range(5000.0..=10000.0),
            timestamp: now,
        };

        Self {
            tick: 0,
            current_time: now,
            weather,
            lifts,
            slopes,
            avalanche_risk_index: rng.gen_range(0.1..=0.4),
            safety_timestamp: now,
            incidents: VecDeque::new(),
        }
    }

    /// Start a new tick: advance the counter and stamp the tick time the
    /// systems will propagate to every entity they touch.
    pub(crate) fn begin_tick(&mut self, now: DateTime<Utc>) {
        self.tick += 1;
        self.current_time = now;
    }

    pub(crate) fn push_incident(&mut self, incident: IncidentReport) {
        self.incidents.push_back(incident);
        while self.incidents.len() > INCIDENT_HISTORY_CAP {
            self.incidents.pop_front();
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn current_time(&self) -> DateTime<Utc> {
        self.current_time
    }

    pub fn weather(&self) -> &WeatherData {
        &self.weather
    }

    pub fn weather_mut(&mut self) -> &mut WeatherData {
        &mut self.weather
    }

    pub fn lifts_mut(&mut self) -> &mut [LiftData] {
        &mut self.lifts
    }

    pub fn slopes_mut(&mut self) -> &mut [SlopeData] {
        &mut self.slopes
    }

    pub fn avalanche_risk_index(&self) -> f64 {
        self.avalanche_risk_index
    }

    pub fn set_avalanche_risk_index(&mut self, value: f64) {
        self.avalanche_risk_index = value.clamp(0.0, 1.0);
    }

    pub fn lifts(&self) -> &[LiftData] {
        &self.lifts
    }

    pub fn slopes(&self) -> &[SlopeData] {
        &self.slopes
    }

    pub fn lift(&self, lift_id: &str) -> Option<&LiftData> {
        self.lifts.iter().find(|lift| lift.lift_id == lift_id)
    }

    /// Safety view with a copy of the bounded incident history, never a
    /// live alias.
    pub fn safety(&self) -> SafetyData {
        SafetyData {
            avalanche_risk_index: self.avalanche_risk_index,
            incident_reports: self.incidents.iter().cloned().collect(),
            timestamp: self.safety_timestamp,
        }
    }

    /// Aggregate read-only view of the whole resort.
    pub fn state(&self) -> ResortState {
        ResortState {
            weather: self.weather.clone(),
            lifts: self.lifts.clone(),
            safety: self.safety(),
            slopes: self.slopes.clone(),
            timestamp: self.current_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncidentType, Severity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn build_resort(seed: u64) -> Resort {
        let config = ResortConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Resort::from_config(&config, &mut rng)
    }

    fn incident(n: usize, at: DateTime<Utc>) -> IncidentReport {
        IncidentReport {
            incident_type: IncidentType::MinorInjury,
            location: format!("slope-{n}"),
            severity: Severity::Low,
            timestamp: at,
        }
    }

    #[test]
    fn initial_values_are_in_documented_ranges() {
        let resort = build_resort(1);
        assert!((-10.0..=0.0).contains(&resort.weather().temperature));
        assert!((5.0..=25.0).contains(&resort.weather().wind_speed));
        assert!((0.0..=2.0).contains(&resort.weather().snow_intensity));
        assert!((5000.0..=10000.0).contains(&resort.weather().visibility));
        assert!((0.1..=0.4).contains(&resort.safety().avalanche_risk_index));
        for lift in resort.lifts() {
            assert!((10..=80).contains(&lift.queue_length));
            assert_eq!(lift.status, LiftStatus::Open);
        }
        assert!(resort.safety().incident_reports.is_empty());
    }

    #[test]
    fn incident_history_evicts_oldest_first() {
        let mut resort = build_resort(2);
        let now = Utc::now();
        for n in 0..25 {
            resort.push_incident(incident(n, now));
        }
        let reports = resort.safety().incident_reports;
        assert_eq!(reports.len(), INCIDENT_HISTORY_CAP);
        assert_eq!(reports.first().unwrap().location, "slope-5");
        assert_eq!(reports.last().unwrap().location, "slope-24");
    }

    #[test]
    fn lift_lookup_by_id() {
        let resort = build_resort(3);
        assert_eq!(resort.lift("gondola-1").unwrap().name, "Summit Gondola");
        assert!(resort.lift("gondola-99").is_none());
    }

    #[test]
    fn safety_view_is_a_copy() {
        let mut resort = build_resort(4);
        resort.push_incident(incident(0, Utc::now()));
        let mut view = resort.safety();
        view.incident_reports.clear();
        assert_eq!(resort.safety().incident_reports.len(), 1);
    }
}
