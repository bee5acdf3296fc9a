//! Agent-versus-course collision and pass counting
//!
//! Each obstacle carries a safe rectangle around its gap center. While the agent is
//! horizontally in contact with an obstacle, its vertical position must stay inside
//! that rectangle.

use serde::{Deserialize, Serialize};

use super::course::Obstacle;
use super::state::Agent;
use crate::consts::{COLLISION_EDGE_INSET, COLLISION_GAP_HALF_HEIGHT, COLLISION_RECT_WIDTH};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Agent is outside the gap of an obstacle it is touching
    pub collided: bool,
    /// Obstacles passed or currently being passed
    pub score: u32,
}

/// Safe rectangle of one obstacle, half-open on its right and bottom sides
#[derive(Debug, Clone, Copy)]
struct GapZone {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl GapZone {
    fn for_obstacle(obstacle: &Obstacle) -> Self {
        Self {
            left: obstacle.x,
            top: obstacle.gap_y - COLLISION_GAP_HALF_HEIGHT,
            width: COLLISION_RECT_WIDTH,
            height: 2 * COLLISION_GAP_HALF_HEIGHT,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Walk the course in order and report whether the agent hit something.
///
/// Obstacles fully behind the scroll position count as passed. An obstacle in
/// horizontal contact counts as passed too, whether or not the agent clears it.
pub fn check_collision(agent: &Agent, obstacles: &[Obstacle], scroll_offset: i32) -> Contact {
    let left = scroll_offset;
    let right = left + agent.width as i32;

    let mut contact = Contact::default();

    for obstacle in obstacles {
        if obstacle.x < left {
            contact.score += 1;
            continue;
        }

        if obstacle.x > right {
            break;
        }

        // Not reached yet
        if agent.x + left as f32 + agent.width < obstacle.x as f32 {
            continue;
        }

        contact.score += 1;

        let zone = GapZone::for_obstacle(obstacle);
        if !zone.contains(obstacle.x + COLLISION_EDGE_INSET, agent.y as i32) {
            contact.collided = true;
            break;
        }
    }

    contact
}
