//! Control policies driven by the radar
//!
//! A policy sees only the sensor vector and answers one question per tick: flap or not.

use serde::{Deserialize, Serialize};

use crate::consts::SENSOR_RAYS;
use crate::sim::{SensorReading, TickInput, World, tick};

pub trait Policy {
    fn name(&self) -> &str;
    fn decide(&mut self, reading: &SensorReading) -> bool;
}

/// Policy that never flaps - useful for testing.
pub struct NeverFlap;

impl Policy for NeverFlap {
    fn name(&self) -> &str {
        "never_flap"
    }

    fn decide(&mut self, _reading: &SensorReading) -> bool {
        false
    }
}

/// Flaps when the lower half of the fan reads closer than the upper half.
pub struct ReflexPolicy {
    /// How much more the lower half must read before flapping
    pub bias: f32,
}

impl Default for ReflexPolicy {
    fn default() -> Self {
        Self { bias: 0.05 }
    }
}

impl Policy for ReflexPolicy {
    fn name(&self) -> &str {
        "reflex"
    }

    fn decide(&mut self, reading: &SensorReading) -> bool {
        let half = SENSOR_RAYS / 2;
        let values = reading.values();
        let above: f32 = values[..half].iter().sum();
        let below: f32 = values[half + 1..].iter().sum();
        below > above + self.bias
    }
}

/// How a headless session ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub policy: String,
    pub seed: Option<u64>,
    pub ticks: u64,
    pub score: u32,
    pub downed: bool,
}

/// Let `policy` fly `world` until the agent goes down or `max_ticks` pass
pub fn run_session(world: &mut World, policy: &mut dyn Policy, max_ticks: u64) -> SessionSummary {
    let radius = world.settings().sensor_radius;

    if world.is_paused() {
        log::debug!("Resuming paused world for session");
        tick(world, &TickInput { flap: false, pause: true });
    }

    while world.time_ticks() < max_ticks && !world.is_downed() {
        let reading = world.query_sensor(radius);
        let flap = policy.decide(&reading);
        tick(world, &TickInput { flap, pause: false });
    }

    log::info!(
        "Session over: policy={} ticks={} score={} downed={}",
        policy.name(),
        world.time_ticks(),
        world.score(),
        world.is_downed()
    );

    SessionSummary {
        policy: policy.name().to_string(),
        seed: world.seed(),
        ticks: world.time_ticks(),
        score: world.score(),
        downed: world.is_downed(),
    }
}
