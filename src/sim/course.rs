//! Obstacle course generation and spatial queries
//!
//! A course is generated once per run and never changes afterwards. Obstacles are kept
//! sorted by horizontal position so every query can stop early.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// An upper/lower solid pair with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// World x of the leading edge
    pub x: i32,
    /// World y of the gap center
    pub gap_y: i32,
}

impl Obstacle {
    pub fn new(x: i32, gap_y: i32) -> Self {
        Self { x, gap_y }
    }

    /// Upper solid in scroll-corrected coordinates (world top down to the gap)
    pub fn upper_solid(&self, settings: &Settings, scroll_offset: i32) -> Rect {
        Rect::new(
            (self.x - scroll_offset) as f32,
            0.0,
            settings.obstacle_width as f32,
            (self.gap_y - settings.solid_half_gap) as f32,
        )
    }

    /// Lower solid in scroll-corrected coordinates (gap down to the floor)
    pub fn lower_solid(&self, settings: &Settings, scroll_offset: i32) -> Rect {
        let top = self.gap_y + settings.solid_half_gap;
        Rect::new(
            (self.x - scroll_offset) as f32,
            top as f32,
            settings.obstacle_width as f32,
            (settings.floor_y - top) as f32,
        )
    }
}

/// An obstacle near the agent with its two solids, ready for the sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyObstacle {
    pub obstacle: Obstacle,
    pub upper: Rect,
    pub lower: Rect,
}

/// Which half of an obstacle a sprite draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    /// Hangs from the top (opening faces down)
    Upper,
    /// Rises from the floor (opening faces up)
    Lower,
}

/// Where the host should draw one obstacle sprite, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSprite {
    pub kind: SolidKind,
    pub x: i32,
    pub y: i32,
}

/// Spacing terms applied after each placement, in order: shrinks by
/// `SPACING_TERM_DECAY` per obstacle and holds at `SPACING_TERM_FLOOR`.
pub fn spacing_terms() -> impl Iterator<Item = i32> {
    std::iter::successors(Some(SPACING_TERM_START), |term| {
        Some((term - SPACING_TERM_DECAY).max(SPACING_TERM_FLOOR))
    })
    .skip(1)
}

/// The full, pregenerated obstacle sequence for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Course {
    obstacles: Vec<Obstacle>,
}

impl Course {
    /// Generate a course. Obstacles get denser with distance until the spacing term
    /// reaches its floor.
    pub fn generate<R: Rng>(settings: &Settings, rng: &mut R) -> Result<Self, SimError> {
        settings.validate()?;

        let gap_max = settings.gap_center_max();
        let mut obstacles = Vec::new();
        let mut x = COURSE_START_X;

        for spacing in spacing_terms() {
            if x >= COURSE_HORIZON_X {
                break;
            }
            let gap_y = rng.random_range(GAP_CENTER_MIN..gap_max);
            obstacles.push(Obstacle::new(x, gap_y));
            x += rng.random_range(SPACING_JITTER_MIN..SPACING_JITTER_MAX) + spacing;
        }

        log::debug!(
            "Generated {} obstacles between x={} and x={}",
            obstacles.len(),
            COURSE_START_X,
            obstacles.last().map(|o| o.x).unwrap_or(COURSE_START_X)
        );

        Ok(Self { obstacles })
    }

    /// Build a course from explicit placements (must be strictly increasing in x)
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Result<Self, SimError> {
        if let Some(index) = obstacles
            .windows(2)
            .position(|pair| pair[1].x <= pair[0].x)
        {
            return Err(SimError::UnorderedCourse { index: index + 1 });
        }
        Ok(Self { obstacles })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Up to `MAX_NEARBY_OBSTACLES` obstacles from just behind the agent to `radius`
    /// past its leading edge, nearest first.
    pub fn nearby(
        &self,
        settings: &Settings,
        scroll_offset: i32,
        agent_x: f32,
        radius: i32,
    ) -> Vec<NearbyObstacle> {
        let agent_left = scroll_offset.saturating_add(agent_x as i32);
        let left = agent_left.saturating_sub(NEARBY_LOOKBEHIND);
        let right = agent_left
            .saturating_add(settings.agent_width)
            .saturating_add(radius);

        self.obstacles
            .iter()
            .skip_while(|o| o.x < left)
            .take_while(|o| o.x <= right)
            .take(MAX_NEARBY_OBSTACLES)
            .map(|&obstacle| NearbyObstacle {
                obstacle,
                upper: obstacle.upper_solid(settings, scroll_offset),
                lower: obstacle.lower_solid(settings, scroll_offset),
            })
            .collect()
    }

    /// Sprites for every obstacle overlapping the view `[scroll, scroll + view_width]`
    pub fn visible(
        &self,
        settings: &Settings,
        scroll_offset: i32,
        view_width: i32,
    ) -> Vec<ObstacleSprite> {
        let left = scroll_offset;
        let right = scroll_offset.saturating_add(view_width);

        let mut sprites = Vec::new();
        for o in &self.obstacles {
            if o.x > right {
                break;
            }
            if o.x < left.saturating_sub(settings.obstacle_width) {
                continue;
            }
            let x = o.x - left;
            sprites.push(ObstacleSprite {
                kind: SolidKind::Upper,
                x,
                y: o.gap_y - settings.obstacle_sprite_height - settings.solid_half_gap,
            });
            sprites.push(ObstacleSprite {
                kind: SolidKind::Lower,
                x,
                y: o.gap_y + settings.solid_half_gap,
            });
        }
        sprites
    }
}
