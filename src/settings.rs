//! World settings
//!
//! Dimensions the simulation needs up front. The host supplies these once at startup;
//! nothing is derived from sprite assets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{GAP_CENTER_BOTTOM_MARGIN, GAP_CENTER_MIN};
use crate::error::SimError;

/// World and agent dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Viewport width (also the length of the sensor's floor segment)
    pub world_width: i32,
    /// Viewport height, bounds the gap-center range
    pub world_height: i32,
    /// Floor plane; bottom of every lower solid
    pub floor_y: i32,

    // === Agent ===
    pub agent_start_x: f32,
    pub agent_start_y: f32,
    pub agent_width: i32,
    pub agent_height: i32,

    // === Obstacles ===
    /// Thickness of each solid
    pub obstacle_width: i32,
    /// Sprite height, only used for render descriptors
    pub obstacle_sprite_height: i32,
    /// Distance from gap center to each solid's inner edge
    pub solid_half_gap: i32,

    // === Sensor ===
    /// Default look-ahead when gathering obstacles for the sensor
    pub sensor_radius: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: 800,
            world_height: 400,
            floor_y: 300,

            agent_start_x: 10.0,
            agent_start_y: 100.0,
            agent_width: 34,
            agent_height: 24,

            obstacle_width: 40,
            obstacle_sprite_height: 320,
            solid_half_gap: 40,

            sensor_radius: 300,
        }
    }
}

impl Settings {
    /// Reject dimensions that would produce an inconsistent world
    pub fn validate(&self) -> Result<(), SimError> {
        if self.world_width <= 0 || self.world_height <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "world must have positive size, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if self.world_height - GAP_CENTER_BOTTOM_MARGIN <= GAP_CENTER_MIN {
            return Err(SimError::InvalidConfig(format!(
                "world height {} leaves no room for gap centers (needs more than {})",
                self.world_height,
                GAP_CENTER_MIN + GAP_CENTER_BOTTOM_MARGIN
            )));
        }
        if self.floor_y <= 0 || self.floor_y > self.world_height {
            return Err(SimError::InvalidConfig(format!(
                "floor {} must lie inside world height {}",
                self.floor_y, self.world_height
            )));
        }
        if self.agent_width <= 0 || self.agent_height <= 0 {
            return Err(SimError::InvalidConfig("agent size must be positive".into()));
        }
        if self.obstacle_width <= 0 || self.obstacle_sprite_height <= 0 {
            return Err(SimError::InvalidConfig("obstacle size must be positive".into()));
        }
        if self.solid_half_gap < 0 || self.sensor_radius < 0 {
            return Err(SimError::InvalidConfig(
                "half gap and sensor radius must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Exclusive upper bound for generated gap centers
    pub fn gap_center_max(&self) -> i32 {
        self.world_height - GAP_CENTER_BOTTOM_MARGIN
    }

    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}
