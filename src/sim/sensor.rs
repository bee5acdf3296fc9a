//! Fan-beam proximity sensor ("radar")
//!
//! Casts `SENSOR_RAYS` rays from a single origin at evenly spaced angles and reports,
//! per ray, how close the nearest obstacle edge or floor is:
//!
//! ```text
//!   closeness = 1 - clamp(distance, 0, range) / range
//! ```
//!
//! Ray `i` always points at `SENSOR_START_DEGREES + i * SENSOR_STEP_DEGREES`. Policies
//! trained on the reading rely on that index-to-angle mapping, so it never changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, Segment, distance};
use crate::consts::{SENSOR_RANGE, SENSOR_RAYS, SENSOR_START_DEGREES, SENSOR_STEP_DEGREES};
use crate::{clamp, direction_from_degrees};

/// One closeness value per ray, in sweep order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading(pub [f32; SENSOR_RAYS]);

impl Default for SensorReading {
    fn default() -> Self {
        Self([0.0; SENSOR_RAYS])
    }
}

impl SensorReading {
    pub fn values(&self) -> &[f32; SENSOR_RAYS] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    pub const fn len(&self) -> usize {
        SENSOR_RAYS
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }

    /// Angle of ray `index` in degrees
    pub fn angle_of(index: usize) -> f32 {
        SENSOR_START_DEGREES + SENSOR_STEP_DEGREES * index as f32
    }
}

/// Winning hit of one ray (diagnostic overlay)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub index: usize,
    pub origin: Vec2,
    pub point: Vec2,
    pub closeness: f32,
}

/// A reading plus, when requested, the hit points behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorScan {
    pub reading: SensorReading,
    /// Only rays with nonzero closeness, in sweep order
    pub hits: Option<Vec<RayHit>>,
}

/// Sweep parameters. Fixed at construction so the ray index mapping cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Radar {
    start_degrees: f32,
    step_degrees: f32,
    /// Ray length; hits at or beyond it read as 0
    range: f32,
}

impl Default for Radar {
    fn default() -> Self {
        Self {
            start_degrees: SENSOR_START_DEGREES,
            step_degrees: SENSOR_STEP_DEGREES,
            range: SENSOR_RANGE,
        }
    }
}

impl Radar {
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Direction of ray `index` in degrees
    pub fn ray_angle(&self, index: usize) -> f32 {
        self.start_degrees + self.step_degrees * index as f32
    }

    fn closeness(&self, origin: Vec2, hit: Vec2) -> f32 {
        1.0 - clamp(distance(origin, hit), 0.0, self.range) / self.range
    }

    /// Sweep the fan from `origin` against `obstacles` and the `floor`.
    ///
    /// Only the leading, bottom and top edges of each rectangle are tested; the
    /// trailing edge always faces away from the agent.
    pub fn sense(
        &self,
        origin: Vec2,
        obstacles: &[Rect],
        floor: &Segment,
        include_diagnostics: bool,
    ) -> SensorScan {
        let mut reading = SensorReading::default();
        let mut hits = include_diagnostics.then(Vec::new);

        for (index, slot) in reading.0.iter_mut().enumerate() {
            let far = origin + direction_from_degrees(self.ray_angle(index)) * self.range;
            let ray = Segment::new(origin, far);

            let mut best = 0.0;
            let mut best_point = None;

            let edges = obstacles
                .iter()
                .flat_map(|rect| rect.facing_edges())
                .chain(std::iter::once(*floor));

            for edge in edges {
                if let Some(point) = ray.intersect(&edge) {
                    let closeness = self.closeness(origin, point);
                    if closeness > best {
                        best = closeness;
                        best_point = Some(point);
                    }
                }
            }

            *slot = best;

            if let (Some(hits), Some(point)) = (hits.as_mut(), best_point) {
                hits.push(RayHit {
                    index,
                    origin,
                    point,
                    closeness: best,
                });
            }
        }

        SensorScan { reading, hits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Segment {
        Segment::horizontal(300.0, 0.0, 800.0)
    }

    #[test]
    fn test_angles_cover_sweep() {
        assert_eq!(SensorReading::angle_of(0), -80.0);
        assert_eq!(SensorReading::angle_of(16), 0.0);
        assert_eq!(SensorReading::angle_of(SENSOR_RAYS - 1), 75.0);
        let radar = Radar::default();
        assert_eq!(radar.range(), SENSOR_RANGE);
        for i in 0..SENSOR_RAYS {
            assert_eq!(radar.ray_angle(i), SensorReading::angle_of(i));
        }
    }

    #[test]
    fn test_floor_only() {
        let radar = Radar::default();
        let origin = Vec2::new(50.0, 150.0);
        let scan = radar.sense(origin, &[], &floor(), true);
        let reading = scan.reading;

        for i in 0..SENSOR_RAYS {
            let angle = SensorReading::angle_of(i);
            let value = reading.values()[i];
            // Floor is 150 below; a ray reaches it once 250 * sin(angle) >= 150
            let reach = SENSOR_RANGE * angle.to_radians().sin();
            if reach > 150.0 + 1e-3 {
                let expected = 1.0 - (150.0 / angle.to_radians().sin()) / SENSOR_RANGE;
                assert!(
                    (value - expected).abs() < 1e-4,
                    "ray {i} ({angle}°): {value} vs {expected}"
                );
            } else if reach < 150.0 - 1e-3 {
                assert_eq!(value, 0.0, "ray {i} ({angle}°) should miss the floor");
            }
        }

        // Every upward ray is blind to the floor
        assert!(reading.values()[..16].iter().all(|&v| v == 0.0));
        // Steepest downward ray sees it closest
        assert!(reading.values()[SENSOR_RAYS - 1] > reading.values()[SENSOR_RAYS - 2]);

        let hits = scan.hits.expect("diagnostics requested");
        assert!(!hits.is_empty());
        for hit in &hits {
            assert!((hit.point.y - 300.0).abs() < 1e-3);
            assert_eq!(hit.closeness, reading.values()[hit.index]);
        }
    }

    #[test]
    fn test_floor_at_exact_range_reads_zero() {
        // Floor 250 below the origin: nothing in the sweep points straight down
        let radar = Radar::default();
        let scan = radar.sense(Vec2::new(50.0, 50.0), &[], &floor(), true);
        assert!(scan.reading.iter().all(|v| v == 0.0));
        assert_eq!(scan.hits, Some(Vec::new()));
    }

    #[test]
    fn test_wall_ahead() {
        let radar = Radar::default();
        let origin = Vec2::new(50.0, 150.0);
        // Tall solid 100 units ahead, spanning the whole sweep's vertical reach
        let wall = Rect::new(150.0, -200.0, 40.0, 700.0);
        let reading = radar.sense(origin, &[wall], &floor(), false).reading;
        // Straight-ahead ray hits the leading edge at distance 100
        assert!((reading.values()[16] - (1.0 - 100.0 / SENSOR_RANGE)).abs() < 1e-5);
        // Near-vertical rays reach the floor (down) or nothing (up) before the wall
        assert!(reading.values()[0] == 0.0 || reading.values()[0] < reading.values()[16]);
    }

    #[test]
    fn test_nearest_edge_wins() {
        let radar = Radar::default();
        let origin = Vec2::new(0.0, 100.0);
        let near = Rect::new(60.0, 50.0, 40.0, 100.0);
        let far = Rect::new(150.0, 0.0, 40.0, 200.0);
        let both = radar.sense(origin, &[far, near], &floor(), false).reading;
        let only_near = radar.sense(origin, &[near], &floor(), false).reading;
        assert_eq!(both.values()[16], only_near.values()[16]);
        assert!((both.values()[16] - (1.0 - 60.0 / SENSOR_RANGE)).abs() < 1e-5);
    }

    #[test]
    fn test_trailing_edge_ignored() {
        let radar = Radar::default();
        // Origin sits inside the solid; only its right edge lies ahead
        let origin = Vec2::new(20.0, 100.0);
        let rect = Rect::new(0.0, 0.0, 40.0, 200.0);
        let scan = radar.sense(origin, &[rect], &floor(), true);
        assert_eq!(scan.reading.values()[16], 0.0);
    }

    #[test]
    fn test_reading_is_stable() {
        let radar = Radar::default();
        let origin = Vec2::new(41.0, 120.0);
        let rects = [
            Rect::new(120.0, 0.0, 40.0, 80.0),
            Rect::new(120.0, 160.0, 40.0, 140.0),
        ];
        let a = radar.sense(origin, &rects, &floor(), false).reading;
        let b = radar.sense(origin, &rects, &floor(), true).reading;
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_values_in_unit_range() {
        let radar = Radar::default();
        let origin = Vec2::new(41.0, 280.0);
        let rects = [Rect::new(60.0, 0.0, 40.0, 250.0)];
        let reading = radar.sense(origin, &rects, &floor(), false).reading;
        assert_eq!(reading.len(), SENSOR_RAYS);
        assert!(reading.iter().all(|v| (0.0..=1.0).contains(&v)));
    }
}
