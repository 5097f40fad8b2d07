//! Resort configuration: named drift magnitudes, transition probabilities,
//! the lift and slope catalogs, and runtime settings. Everything has a
//! default, so the binary runs with no config file at all.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::SlopeDifficulty;

fn default_name() -> String {
    "alpine-resort".to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_min_interval_secs() -> f64 {
    1.0
}

fn default_max_interval_secs() -> f64 {
    3.0
}

fn default_temperature_drift() -> f64 {
    0.5
}

fn default_wind_speed_drift() -> f64 {
    3.0
}

fn default_snow_intensity_drift() -> f64 {
    0.3
}

fn default_visibility_drift() -> f64 {
    200.0
}

fn default_queue_drift() -> i32 {
    10
}

fn default_status_change_probability() -> f64 {
    0.05
}

fn default_risk_drift() -> f64 {
    0.05
}

fn default_incident_probability() -> f64 {
    0.1
}

fn default_depth_drift() -> f64 {
    0.5
}

fn default_reopen_probability() -> f64 {
    0.3
}

fn default_groom_probability() -> f64 {
    0.1
}

fn default_ungroom_probability() -> f64 {
    0.05
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResortConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cadence: CadenceConfig,
    #[serde(default)]
    pub weather: WeatherParams,
    #[serde(default)]
    pub lifts: LiftParams,
    #[serde(default)]
    pub safety: SafetyParams,
    #[serde(default)]
    pub slopes: SlopeParams,
    #[serde(default = "default_lift_catalog")]
    pub lift_catalog: Vec<LiftSpec>,
    #[serde(default = "default_slope_catalog")]
    pub slope_catalog: Vec<SlopeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Update-loop cadence: one tick every uniformly random interval drawn
/// from [min_interval_secs, max_interval_secs].
#[derive(Debug, Clone, Deserialize)]
pub struct CadenceConfig {
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: f64,
    #[serde(default = "default_max_interval_secs")]
    pub max_interval_secs: f64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval_secs(),
            max_interval_secs: default_max_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherParams {
    #[serde(default = "default_temperature_drift")]
    pub temperature_drift: f64,
    #[serde(default = "default_wind_speed_drift")]
    pub wind_speed_drift: f64,
    #[serde(default = "default_snow_intensity_drift")]
    pub snow_intensity_drift: f64,
    #[serde(default = "default_visibility_drift")]
    pub visibility_drift: f64,
}

impl Default for WeatherParams {
    fn default() -> Self {
        Self {
            temperature_drift: default_temperature_drift(),
            wind_speed_drift: default_wind_speed_drift(),
            snow_intensity_drift: default_snow_intensity_drift(),
            visibility_drift: default_visibility_drift(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiftParams {
    #[serde(default = "default_queue_drift")]
    pub queue_drift: i32,
    #[serde(default = "default_status_change_probability")]
    pub status_change_probability: f64,
}

impl Default for LiftParams {
    fn default() -> Self {
        Self {
            queue_drift: default_queue_drift(),
            status_change_probability: default_status_change_probability(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SafetyParams {
    #[serde(default = "default_risk_drift")]
    pub risk_drift: f64,
    #[serde(default = "default_incident_probability")]
    pub incident_probability: f64,
}

impl Default for SafetyParams {
    fn default() -> Self {
        Self {
            risk_drift: default_risk_drift(),
            incident_probability: default_incident_probability(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlopeParams {
    #[serde(default = "default_depth_drift")]
    pub depth_drift: f64,
    #[serde(default = "default_reopen_probability")]
    pub reopen_probability: f64,
    #[serde(default = "default_groom_probability")]
    pub groom_probability: f64,
    #[serde(default = "default_ungroom_probability")]
    pub ungroom_probability: f64,
}

impl Default for SlopeParams {
    fn default() -> Self {
        Self {
            depth_drift: default_depth_drift(),
            reopen_probability: default_reopen_probability(),
            groom_probability: default_groom_probability(),
            ungroom_probability: default_ungroom_probability(),
        }
    }
}

/// Static identity of one lift. Identity and throughput never change
/// once the resort is built.
#[derive(Debug, Clone, Deserialize)]
pub struct LiftSpec {
    pub id: String,
    pub name: String,
    pub throughput_rate: u32,
}

/// Static identity of one slope.
#[derive(Debug, Clone, Deserialize)]
pub struct SlopeSpec {
    pub id: String,
    pub name: String,
    pub difficulty: SlopeDifficulty,
    pub is_open: bool,
    pub groomed: bool,
    pub base_depth_cm: f64,
}

fn lift(id: &str, name: &str, throughput_rate: u32) -> LiftSpec {
    LiftSpec {
        id: id.to_string(),
        name: name.to_string(),
        throughput_rate,
    }
}

fn slope(
    id: &str,
    name: &str,
    difficulty: SlopeDifficulty,
    groomed: bool,
    base_depth_cm: f64,
) -> SlopeSpec {
    SlopeSpec {
        id: id.to_string(),
        name: name.to_string(),
        difficulty,
        is_open: true,
        groomed,
        base_depth_cm,
    }
}

fn default_lift_catalog() -> Vec<LiftSpec> {
    vec![
        lift("gondola-1", "Summit Gondola", 2400),
        lift("chairlift-alpha", "Alpine Express", 1800),
        lift("chairlift-bravo", "Eagle Chair", 1600),
        lift("t-bar-1", "Beginner T-Bar", 800),
        lift("magic-carpet-1", "Kids Magic Carpet", 400),
    ]
}

fn default_slope_catalog() -> Vec<SlopeSpec> {
    use SlopeDifficulty::{Black, Blue, Green, Red};
    vec![
        slope("valley-run", "Valley Run", Green, true, 85.0),
        slope("sunrise-trail", "Sunrise Trail", Green, true, 90.0),
        slope("alpine-meadow", "Alpine Meadow", Blue, true, 105.0),
        slope("eagle-ridge", "Eagle Ridge", Blue, false, 95.0),
        slope("timber-bowl", "Timber Bowl", Blue, false, 110.0),
        slope("north-face", "North Face", Red, false, 120.0),
        slope("summit-chute", "Summit Chute", Black, false, 130.0),
        slope("avalanche-alley", "Avalanche Alley", Black, false, 125.0),
    ]
}

impl Default for ResortConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            seed: default_seed(),
            server: ServerConfig::default(),
            cadence: CadenceConfig::default(),
            weather: WeatherParams::default(),
            lifts: LiftParams::default(),
            safety: SafetyParams::default(),
            slopes: SlopeParams::default(),
            lift_catalog: default_lift_catalog(),
            slope_catalog: default_slope_catalog(),
        }
    }
}

impl ResortConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ResortConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.lift_catalog.is_empty(),
            "config must define at least one lift"
        );
        anyhow::ensure!(
            !self.slope_catalog.is_empty(),
            "config must define at least one slope"
        );
        anyhow::ensure!(
            self.cadence.min_interval_secs > 0.0
                && self.cadence.max_interval_secs >= self.cadence.min_interval_secs,
            "cadence interval range is inverted or non-positive"
        );
        let mut seen: Vec<&str> = Vec::new();
        for spec in &self.lift_catalog {
            anyhow::ensure!(
                !seen.contains(&spec.id.as_str()),
                "lift id '{}' defined more than once",
                spec.id
            );
            seen.push(&spec.id);
        }
        seen.clear();
        for spec in &self.slope_catalog {
            anyhow::ensure!(
                !seen.contains(&spec.id.as_str()),
                "slope id '{}' defined more than once",
                spec.id
            );
            seen.push(&spec.id);
        }
        Ok(())
    }
}
