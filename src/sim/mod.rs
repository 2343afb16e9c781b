//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only, split into fixed substeps
//! - Seeded RNG only (spawning)
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod grid;
pub mod integrator;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod walls;

pub use body::{Body, Species, mass_for_radius, radius_for_mass};
pub use bounds::resolve_bounds;
pub use collision::{PairOutcome, Side, resolve_all_pairs, resolve_pair};
pub use grid::{TileBox, TileRect, TileSpan, WallGrid};
pub use integrator::{StepContext, advance};
pub use spawn::{SpawnSpec, spawn_in_pixels, spawn_in_tiles};
pub use state::{
    BodySnapshot, Bounds, Edge, GridSnapshot, PhysicsParams, SimEvent, SimState, SpeciesTally,
};
pub use tick::{FrameSummary, audible_count, tick};
pub use walls::{Axis, resolve_wall, separating_axis};
