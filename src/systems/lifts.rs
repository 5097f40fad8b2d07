use anyhow::Result;
use rand::Rng;

use crate::{
    config::LiftParams,
    engine::{System, SystemContext},
    models::{round1, LiftStatus},
    resort::Resort,
    rng::SystemRng,
};

/// Expected wait in minutes for the given queue and capacity, rounded to
/// 1 decimal. Zero whenever the lift is not running.
pub fn expected_wait_minutes(status: LiftStatus, queue_length: u32, throughput_rate: u32) -> f64 {
    if status == LiftStatus::Open && throughput_rate > 0 {
        round1(f64::from(queue_length) / f64::from(throughput_rate) * 60.0)
    } else {
        0.0
    }
}

/// Per-lift queue drift and occasional status flips. Wait time is derived
/// state: it is recomputed unconditionally every tick, never drifted.
pub struct LiftSystem {
    params: LiftParams,
}

impl LiftSystem {
    pub fn new(params: LiftParams) -> Self {
        Self { params }
    }
}

impl System for LiftSystem {
    fn name(&self) -> &str {
        "lifts"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        resort: &mut Resort,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let d = self.params.queue_drift.max(0);
        for lift in &mut resort.lifts {
            let delta = rng.gen_range(-d..=d);
            let queue = i64::from(lift.queue_length) + i64::from(delta);
            lift.queue_length = queue.clamp(0, 200) as u32;

            if rng.chance(self.params.status_change_probability) {
                lift.status = match lift.status {
                    LiftStatus::Open => {
                        if rng.gen_bool(0.5) {
                            LiftStatus::Closed
                        } else {
                            LiftStatus::Maintenance
                        }
                    }
                    LiftStatus::Closed | LiftStatus::Maintenance => LiftStatus::Open,
                };
            }

            lift.wait_time_minutes =
                expected_wait_minutes(lift.status, lift.queue_length, lift.throughput_rate);
            lift.timestamp = ctx.now;
        }
        Ok(())
    }
}
