//! Wire-level records for resort telemetry.
//!
//! Every record carries the timestamp of the tick that last touched it.
//! Enums serialize as their lowercase snake_case labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resort-wide weather conditions.
///
/// Bounded domains: temperature [-15, 5] °C, wind_speed [0, 80] km/h,
/// snow_intensity [0, 5] cm/h, visibility [50, 10000] m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub temperature: f64,
    pub wind_speed: f64,
    pub snow_intensity: f64,
    pub visibility: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiftStatus {
    Open,
    Closed,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftData {
    pub lift_id: String,
    pub name: String,
    pub status: LiftStatus,
    /// People in queue, clamped to [0, 200].
    pub queue_length: u32,
    /// Derived from queue_length and throughput_rate every tick, never
    /// drifted independently. Rounded to 1 decimal.
    pub wait_time_minutes: f64,
    /// People per hour. Immutable after construction.
    pub throughput_rate: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeDifficulty {
    Green,
    Blue,
    Red,
    Black,
}

impl SlopeDifficulty {
    pub fn is_advanced(self) -> bool {
        matches!(self, SlopeDifficulty::Red | SlopeDifficulty::Black)
    }

    pub fn is_groomable(self) -> bool {
        matches!(self, SlopeDifficulty::Green | SlopeDifficulty::Blue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeData {
    pub slope_id: String,
    pub name: String,
    /// Immutable after construction.
    pub difficulty: SlopeDifficulty,
    pub is_open: bool,
    pub groomed: bool,
    /// Non-negative, rounded to 1 decimal.
    pub snow_depth_cm: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    MinorInjury,
    Collision,
    LostPerson,
    EquipmentFailure,
    AvalancheWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A generated safety event. Immutable once created; append-only until
/// evicted from the bounded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub incident_type: IncidentType,
    /// Display name of a slope or lift.
    pub location: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyData {
    /// 0.0 (safe) to 1.0 (extreme).
    pub avalanche_risk_index: f64,
    /// Most-recent-last copy of the bounded incident history.
    pub incident_reports: Vec<IncidentReport>,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate read-only view of the whole resort, assembled on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortState {
    pub weather: WeatherData,
    pub lifts: Vec<LiftData>,
    pub safety: SafetyData,
    pub slopes: Vec<SlopeData>,
    pub timestamp: DateTime<Utc>,
}

/// Round to 1 decimal place, the precision used for derived float fields.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
