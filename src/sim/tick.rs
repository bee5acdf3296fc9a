//! Fixed-rate simulation tick
//!
//! One tick scrolls the course, integrates the agent and checks for contact, in that
//! order. The host calls `tick` once per timer interval.

use serde::{Deserialize, Serialize};

use super::state::World;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap held this tick
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Turns raw key-down/key-up style flap events into a held state
#[derive(Debug, Clone, Copy, Default)]
pub struct FlapLatch {
    held: bool,
}

impl FlapLatch {
    pub fn flap_start(&mut self) {
        self.held = true;
    }

    pub fn flap_stop(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Input for the next tick
    pub fn input(&self) -> TickInput {
        TickInput {
            flap: self.held,
            pause: false,
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// False when paused
    pub advanced: bool,
    pub collided: bool,
    pub score: u32,
    /// Agent went down on this tick
    pub downed_this_tick: bool,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickOutcome {
    if input.pause {
        world.paused = !world.paused;
        log::debug!("Paused: {}", world.paused);
    }

    if world.paused {
        return TickOutcome {
            score: world.score(),
            ..Default::default()
        };
    }

    world.time_ticks += 1;
    world.advance_scroll();

    let was_downed = world.is_downed();
    world.tick_agent(input.flap);

    let mut outcome = TickOutcome {
        advanced: true,
        score: world.score(),
        ..Default::default()
    };

    if !was_downed {
        let contact = world.check_collision();
        outcome.collided = contact.collided;
        outcome.score = contact.score;
        outcome.downed_this_tick = contact.collided;

        if contact.collided {
            log::info!(
                "Agent down at tick {} (scroll {}, score {})",
                world.time_ticks,
                world.scroll.offset(),
                contact.score
            );
        }
    }

    log::trace!(
        "tick {}: y={:.2} v={:.3} score={}",
        world.time_ticks,
        world.agent.y,
        world.agent.velocity,
        outcome.score
    );

    outcome
}
