//! Particle Fight - circles that bounce, bite walls and eat each other
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, wall grid, collisions, frame tick)
//! - `arena`: Wall layout builders run once before the simulation starts
//! - `scenario`: Assembles a ready-to-run world from a `SimConfig`
//! - `config`: Data-driven tuning loaded from JSON
//! - `theme`: Colors handed to whatever draws the world

pub mod arena;
pub mod config;
pub mod error;
pub mod scenario;
pub mod sim;
pub mod theme;

pub use config::SimConfig;
pub use error::{Result, SimError};

/// Simulation configuration constants
pub mod consts {
    /// Default world dimensions in pixels
    pub const WORLD_WIDTH: f32 = 1080.0;
    pub const WORLD_HEIGHT: f32 = 1920.0;
    /// Size of one wall tile in pixels
    pub const TILE_SIZE: f32 = 20.0;
    /// Integration slices per frame
    pub const SUBSTEPS: u32 = 40;
    /// Longest frame the runner will feed the simulation, in seconds
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 300.0;
    /// Restitution applied when a body hits a world edge
    pub const BOUNCE: f32 = 0.9;
    /// Restitution for same-species body collisions (1.0 = perfectly elastic)
    pub const RESTITUTION: f32 = 1.0;

    /// Mass a body loses per wall contact
    pub const BITE_MASS: f32 = 10.0;
    /// Health of a freshly built wall tile
    pub const WALL_HEALTH: u32 = 10;

    /// Spawn defaults
    pub const SPAWN_RADIUS: f32 = 10.0;
    pub const SPAWN_SPEED: f32 = 200.0;
    pub const SPAWN_PER_ZONE: usize = 2;
    /// Random placements tried per body before giving up on a region
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}
