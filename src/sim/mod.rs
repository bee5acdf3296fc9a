//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host timer interval
//! - Seeded RNG only, and only at course generation
//! - Obstacles kept sorted by position
//! - No rendering or platform dependencies

pub mod collision;
pub mod course;
pub mod geom;
pub mod sensor;
pub mod state;
pub mod tick;

pub use collision::{Contact, check_collision};
pub use course::{Course, NearbyObstacle, Obstacle, ObstacleSprite, SolidKind, spacing_terms};
pub use geom::{Rect, Segment, distance, segment_intersection};
pub use sensor::{Radar, RayHit, SensorReading, SensorScan};
pub use state::{Agent, ScrollState, World, initialize_course};
pub use tick::{FlapLatch, TickInput, TickOutcome, tick};
