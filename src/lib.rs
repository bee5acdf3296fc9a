//! Flappy Radar - a side-scrolling obstacle course with a proximity sensor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (course, scrolling, kinematics, collisions, sensor)
//! - `settings`: World dimensions and tuning loaded at startup
//! - `policy`: Control policies fed by the sensor vector
//! - `error`: Configuration errors

pub mod error;
pub mod policy;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Course starts this far from the origin
    pub const COURSE_START_X: i32 = 300;
    /// Generation stops once the next position passes this horizon
    pub const COURSE_HORIZON_X: i32 = 20_000;
    /// Random part of obstacle spacing (half-open range)
    pub const SPACING_JITTER_MIN: i32 = 94;
    pub const SPACING_JITTER_MAX: i32 = 124;
    /// Extra spacing term, shrinks after every placement
    pub const SPACING_TERM_START: i32 = 110;
    pub const SPACING_TERM_DECAY: i32 = 3;
    /// Lowest value the spacing term may shrink to
    pub const SPACING_TERM_FLOOR: i32 = 2;
    /// Gap centers are drawn from [GAP_CENTER_MIN, world_height - GAP_CENTER_BOTTOM_MARGIN)
    pub const GAP_CENTER_MIN: i32 = 30;
    pub const GAP_CENTER_BOTTOM_MARGIN: i32 = 140;

    /// Background moves one unit per this many foreground units
    pub const PARALLAX_RATIO: i32 = 4;

    /// Upward acceleration while flapping
    pub const FLAP_ACCELERATION: f32 = 0.08;
    /// Subtracted from acceleration every tick
    pub const GRAVITY: f32 = 0.001;
    pub const MIN_ACCELERATION: f32 = -1.0;
    pub const MIN_VELOCITY: f32 = -2.0;
    pub const MAX_VELOCITY: f32 = 3.0;
    pub const MIN_ALTITUDE: f32 = 0.0;
    pub const MAX_ALTITUDE: f32 = 285.0;

    /// Safe rectangle around a gap center: half height, width and horizontal probe inset
    pub const COLLISION_GAP_HALF_HEIGHT: i32 = 30;
    pub const COLLISION_RECT_WIDTH: i32 = 39;
    pub const COLLISION_EDGE_INSET: i32 = 2;

    /// Obstacles up to this far behind the agent are still reported as nearby
    pub const NEARBY_LOOKBEHIND: i32 = 40;
    /// Most obstacles handed to the sensor at once
    pub const MAX_NEARBY_OBSTACLES: usize = 3;

    /// Fan-beam sensor
    pub const SENSOR_RAYS: usize = 32;
    pub const SENSOR_START_DEGREES: f32 = -80.0;
    pub const SENSOR_STEP_DEGREES: f32 = 5.0;
    pub const SENSOR_RANGE: f32 = 250.0;
    /// Sensor sits this far back from the agent's leading edge, and this far above its position
    pub const SENSOR_FORWARD_INSET: f32 = 3.0;
    pub const SENSOR_RAISE: f32 = 4.0;
}

/// Degrees to radians
#[inline]
pub fn degrees_to_radians(angle: f32) -> f32 {
    std::f32::consts::PI * angle / 180.0
}

/// Unit direction for an angle in degrees (screen space, +y points down)
#[inline]
pub fn direction_from_degrees(angle: f32) -> Vec2 {
    let theta = degrees_to_radians(angle);
    Vec2::new(theta.cos(), theta.sin())
}

/// Clamp `value` to `[min, max]`. Works for any partially ordered type and never fails.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}
