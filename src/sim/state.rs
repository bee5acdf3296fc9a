//! World state and core simulation types
//!
//! The `World` is the single owner of the course, scroll position and agent. Hosts hold
//! one and drive it through `tick`; everything else is a read-only query.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use glam::Vec2;

use super::collision::{Contact, check_collision};
use super::course::{Course, NearbyObstacle, ObstacleSprite};
use super::geom::{Rect, Segment};
use super::sensor::{Radar, SensorReading, SensorScan};
use crate::clamp;
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// Foreground scroll position plus the slower background layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollState {
    offset: i32,
    background_offset: i32,
}

impl ScrollState {
    /// Move the course one unit left; the background follows every `PARALLAX_RATIO` units
    pub fn advance(&mut self) {
        self.offset += 1;
        if self.offset % PARALLAX_RATIO == 0 {
            self.background_offset += 1;
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn background_offset(&self) -> i32 {
        self.background_offset
    }

    /// World-space `(left, right)` of a view `width` wide
    pub fn visible_window(&self, width: i32) -> (i32, i32) {
        (self.offset, self.offset.saturating_add(width))
    }

    /// Phase of a floor tile strip `tile_width` wide
    pub fn floor_phase(&self, tile_width: i32) -> i32 {
        if tile_width <= 0 {
            return 0;
        }
        self.offset % tile_width
    }

    /// Phase of a background tile strip `tile_width` wide
    pub fn background_phase(&self, tile_width: i32) -> i32 {
        if tile_width <= 0 {
            return 0;
        }
        self.background_offset % tile_width
    }
}

/// The flying agent. Only moves vertically; the world scrolls past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Screen x of the agent's trailing edge (fixed)
    pub x: f32,
    /// Vertical position, 0 = top of the playfield
    pub y: f32,
    /// Positive = moving down
    pub velocity: f32,
    /// Positive = lifting
    pub acceleration: f32,
    pub width: f32,
    pub height: f32,
    /// Hit an obstacle; control is gone for good
    pub downed: bool,
    /// Obstacles horizontally reached so far
    pub score: u32,
}

impl Agent {
    pub fn new(settings: &Settings) -> Self {
        Self {
            x: settings.agent_start_x,
            y: settings.agent_start_y,
            velocity: 0.0,
            acceleration: 0.0,
            width: settings.agent_width as f32,
            height: settings.agent_height as f32,
            downed: false,
            score: 0,
        }
    }

    /// Integrate one tick of vertical motion
    pub fn tick(&mut self, flap: bool) {
        if self.downed {
            // Velocity and acceleration are pinned at zero; only the position clamp applies.
            self.y = clamp(self.y + self.velocity, MIN_ALTITUDE, MAX_ALTITUDE);
            return;
        }

        self.acceleration = if flap { FLAP_ACCELERATION } else { 0.0 };

        self.acceleration -= GRAVITY;
        if self.acceleration < MIN_ACCELERATION {
            self.acceleration = MIN_ACCELERATION;
        }

        self.velocity = clamp(self.velocity - self.acceleration, MIN_VELOCITY, MAX_VELOCITY);
        self.y = clamp(self.y + self.velocity, MIN_ALTITUDE, MAX_ALTITUDE);
    }

    /// Enter the terminal state
    pub fn down(&mut self) {
        self.downed = true;
        self.acceleration = 0.0;
        self.velocity = 0.0;
    }

    /// Where the radar sits: near the leading edge, slightly above the body
    pub fn sensor_origin(&self) -> Vec2 {
        Vec2::new(
            self.x + self.width - SENSOR_FORWARD_INSET,
            self.y - SENSOR_RAISE,
        )
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) settings: Settings,
    /// Run seed, if the course came from the generator
    pub(crate) seed: Option<u64>,
    pub(crate) course: Course,
    pub(crate) scroll: ScrollState,
    pub(crate) agent: Agent,
    pub(crate) radar: Radar,
    pub(crate) paused: bool,
    /// Ticks simulated (pauses excluded)
    pub(crate) time_ticks: u64,
}

/// Generate a course for the given settings
pub fn initialize_course<R: Rng>(settings: &Settings, rng: &mut R) -> Result<Course, SimError> {
    Course::generate(settings, rng)
}

impl World {
    /// Create a world with a course generated from `seed`
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SimError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let course = initialize_course(&settings, &mut rng)?;
        log::info!("Course generated: {} obstacles (seed {})", course.len(), seed);
        let mut world = Self::with_course(settings, course)?;
        world.seed = Some(seed);
        Ok(world)
    }

    /// Create a world with a fresh random seed
    pub fn from_entropy(settings: Settings) -> Result<Self, SimError> {
        let seed: u64 = rand::rng().random();
        Self::new(settings, seed)
    }

    /// Create a world around an existing course
    pub fn with_course(settings: Settings, course: Course) -> Result<Self, SimError> {
        settings.validate()?;
        let agent = Agent::new(&settings);
        Ok(Self {
            settings,
            seed: None,
            course,
            scroll: ScrollState::default(),
            agent,
            radar: Radar::default(),
            paused: false,
            time_ticks: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn agent_position(&self) -> Vec2 {
        Vec2::new(self.agent.x, self.agent.y)
    }

    pub fn score(&self) -> u32 {
        self.agent.score
    }

    pub fn is_downed(&self) -> bool {
        self.agent.downed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn advance_scroll(&mut self) {
        self.scroll.advance();
    }

    pub fn tick_agent(&mut self, flap: bool) {
        self.agent.tick(flap);
    }

    /// Test the agent against the course, record the score, and down the agent on impact
    pub fn check_collision(&mut self) -> Contact {
        let contact = check_collision(&self.agent, self.course.obstacles(), self.scroll.offset());
        self.agent.score = contact.score;
        if contact.collided && !self.agent.downed {
            self.agent.down();
        }
        contact
    }

    /// Obstacles the sensor should consider, nearest first
    pub fn nearby_obstacles(&self, radius: i32) -> Vec<NearbyObstacle> {
        self.course.nearby(&self.settings, self.scroll.offset(), self.agent.x, radius)
    }

    /// Sprites the host should draw for a view `view_width` wide
    pub fn visible_obstacles(&self, view_width: i32) -> Vec<ObstacleSprite> {
        self.course.visible(&self.settings, self.scroll.offset(), view_width)
    }

    /// The floor as the sensor sees it
    pub fn floor_plane(&self) -> Segment {
        Segment::horizontal(
            self.settings.floor_y as f32,
            0.0,
            self.settings.world_width as f32,
        )
    }

    fn sensor_targets(&self, radius: i32) -> Vec<Rect> {
        self.nearby_obstacles(radius)
            .iter()
            .flat_map(|n| [n.upper, n.lower])
            .collect()
    }

    /// Read the radar against obstacles within `radius`
    pub fn query_sensor(&self, radius: i32) -> SensorReading {
        let targets = self.sensor_targets(radius);
        self.radar
            .sense(self.agent.sensor_origin(), &targets, &self.floor_plane(), false)
            .reading
    }

    /// Read the radar and keep each ray's winning hit point
    pub fn query_sensor_with_diagnostics(&self, radius: i32) -> SensorScan {
        let targets = self.sensor_targets(radius);
        self.radar
            .sense(self.agent.sensor_origin(), &targets, &self.floor_plane(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_parallax() {
        let mut scroll = ScrollState::default();
        for _ in 0..3 {
            scroll.advance();
        }
        assert_eq!(scroll.offset(), 3);
        assert_eq!(scroll.background_offset(), 0);
        scroll.advance();
        assert_eq!(scroll.background_offset(), 1);
        for _ in 0..17 {
            scroll.advance();
        }
        assert_eq!(scroll.offset(), 21);
        assert_eq!(scroll.background_offset(), 21 / PARALLAX_RATIO);
        assert_eq!(scroll.visible_window(800), (21, 821));
        assert_eq!(scroll.visible_window(i32::MAX), (21, i32::MAX));
        assert_eq!(scroll.floor_phase(10), 1);
        assert_eq!(scroll.background_phase(4), 1);
        assert_eq!(scroll.floor_phase(0), 0);
    }

    #[test]
    fn test_agent_falls_without_input() {
        let mut agent = Agent::new(&Settings::default());
        agent.tick(false);
        assert!((agent.acceleration + GRAVITY).abs() < 1e-6);
        assert!(agent.velocity > 0.0);
        assert!(agent.y > 100.0);
    }

    #[test]
    fn test_flap_lifts() {
        let mut agent = Agent::new(&Settings::default());
        for _ in 0..10 {
            agent.tick(true);
        }
        assert!((agent.acceleration - (FLAP_ACCELERATION - GRAVITY)).abs() < 1e-6);
        assert!(agent.velocity < 0.0);
        assert!(agent.y < 100.0);
    }

    #[test]
    fn test_velocity_and_position_clamped() {
        let mut agent = Agent::new(&Settings::default());
        for _ in 0..500 {
            agent.tick(true);
            assert!(agent.velocity >= MIN_VELOCITY && agent.velocity <= MAX_VELOCITY);
            assert!(agent.y >= MIN_ALTITUDE && agent.y <= MAX_ALTITUDE);
        }
        assert_eq!(agent.y, MIN_ALTITUDE);
        assert_eq!(agent.velocity, MIN_VELOCITY);
    }

    #[test]
    fn test_downed_is_sticky() {
        let mut agent = Agent::new(&Settings::default());
        agent.tick(true);
        agent.down();
        let y = agent.y;
        for _ in 0..50 {
            agent.tick(true);
            assert_eq!(agent.acceleration, 0.0);
            assert_eq!(agent.velocity, 0.0);
            assert!(agent.downed);
        }
        assert_eq!(agent.y, y);
    }

    #[test]
    fn test_sensor_origin() {
        let agent = Agent::new(&Settings::default());
        assert_eq!(agent.sensor_origin(), Vec2::new(10.0 + 34.0 - 3.0, 96.0));
    }

    #[test]
    fn test_world_rejects_bad_settings() {
        let settings = Settings {
            world_height: 100,
            floor_y: 90,
            ..Default::default()
        };
        assert!(World::new(settings, 1).is_err());
    }

    #[test]
    fn test_world_from_seed_is_reproducible() {
        let a = World::new(Settings::default(), 5).unwrap();
        let b = World::new(Settings::default(), 5).unwrap();
        assert_eq!(a.course().obstacles(), b.course().obstacles());
        assert_eq!(a.seed(), Some(5));
        assert!(!a.is_downed());
        assert_eq!(a.score(), 0);
    }
}
