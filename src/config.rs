//! Simulation configuration
//!
//! Loaded from JSON; any field left out falls back to the values in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::PhysicsParams;

/// Parameters for the quad-concentric arena layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Grid rows inside each quadrant
    pub rows_per_quad: i32,
    /// Grid columns inside each quadrant
    pub cols_per_quad: i32,
    /// Wall thickness in tiles
    pub thickness: i32,
    /// Extra concentric boxes inside each cell
    pub rings: i32,
    /// Tiles between rings
    pub ring_step: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            rows_per_quad: 2,
            cols_per_quad: 2,
            thickness: 3,
            rings: 0,
            ring_step: 2,
        }
    }
}

/// Initial population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Bodies per open zone
    pub per_zone: usize,
    pub radius: f32,
    pub speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            per_zone: SPAWN_PER_ZONE,
            radius: SPAWN_RADIUS,
            speed: SPAWN_SPEED,
        }
    }
}

/// Everything needed to build and run a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible runs
    pub seed: u64,

    // === World ===
    /// World width in pixels
    pub width: f32,
    /// World height in pixels
    pub height: f32,
    /// Wall tile edge length in pixels
    pub tile_size: f32,
    /// Integration slices per frame
    pub substeps: u32,

    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Restitution against world edges
    pub bounce: f32,
    /// Restitution between same-species bodies
    pub restitution: f32,
    /// Mass lost per wall contact
    pub bite_mass: f32,
    /// Health of freshly built wall tiles
    pub wall_health: u32,

    pub arena: ArenaConfig,
    pub spawn: SpawnConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,

            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            tile_size: TILE_SIZE,
            substeps: SUBSTEPS,

            gravity: GRAVITY,
            bounce: BOUNCE,
            restitution: RESTITUTION,
            bite_mass: BITE_MASS,
            wall_health: WALL_HEALTH,

            arena: ArenaConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Physics constants for the integrator and resolvers
    pub fn physics(&self) -> PhysicsParams {
        PhysicsParams {
            gravity: self.gravity,
            bounce: self.bounce,
            restitution: self.restitution,
            bite_mass: self.bite_mass,
        }
    }

    /// Reject values the physics cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let unit = |v: f32| (0.0..=1.0).contains(&v);

        if !positive(self.width) || !positive(self.height) {
            return Err(SimError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if !positive(self.tile_size) || self.tile_size > self.width.min(self.height) {
            return Err(SimError::InvalidTileSize(self.tile_size));
        }
        if self.substeps == 0 {
            return Err(invalid("substeps must be at least 1"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity must be finite"));
        }
        if !unit(self.bounce) {
            return Err(invalid(format!("bounce {} is outside [0, 1]", self.bounce)));
        }
        if !unit(self.restitution) {
            return Err(invalid(format!(
                "restitution {} is outside [0, 1]",
                self.restitution
            )));
        }
        if !(self.bite_mass.is_finite() && self.bite_mass >= 0.0) {
            return Err(invalid(format!("bite_mass {} must be >= 0", self.bite_mass)));
        }
        if !positive(self.spawn.radius) {
            return Err(invalid(format!("spawn radius {} must be > 0", self.spawn.radius)));
        }
        if !(self.spawn.speed.is_finite() && self.spawn.speed >= 0.0) {
            return Err(invalid(format!("spawn speed {} must be >= 0", self.spawn.speed)));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidConfig(msg.into())
}
