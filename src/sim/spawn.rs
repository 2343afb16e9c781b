//! Body placement
//!
//! Picks uniformly random positions inside a region, retrying until the body
//! clears every wall tile. Attempts are bounded so a walled-in region fails
//! loudly instead of spinning forever.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Species};
use super::grid::TileRect;
use super::state::SimState;
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::error::{Result, SimError};

/// What to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSpec {
    pub count: usize,
    pub radius: f32,
    pub speed: f32,
    pub species: Species,
    /// Launch direction (scaled by `speed`), random heading if `None`
    pub direction: Option<Vec2>,
}

/// Spawn bodies anywhere inside the pixel rectangle spanned by `a` and `b` (inclusive)
pub fn spawn_in_pixels(
    state: &mut SimState,
    a: Vec2,
    b: Vec2,
    spec: SpawnSpec,
) -> Result<Vec<u32>> {
    let lo = a.min(b);
    let hi = a.max(b);
    let mut ids = Vec::with_capacity(spec.count);

    for _ in 0..spec.count {
        let mut placed = None;
        for attempt in 1..=MAX_SPAWN_ATTEMPTS {
            let pos = Vec2::new(
                state.rng.random_range(lo.x..=hi.x),
                state.rng.random_range(lo.y..=hi.y),
            );
            if !state.grid.intersects_wall(pos, spec.radius) {
                if attempt > MAX_SPAWN_ATTEMPTS / 10 {
                    log::warn!(
                        "Spawn region ({}, {})..({}, {}) is crowded: {} attempts for one body",
                        lo.x,
                        lo.y,
                        hi.x,
                        hi.y,
                        attempt
                    );
                }
                placed = Some(pos);
                break;
            }
        }

        let Some(pos) = placed else {
            return Err(SimError::SpawnExhausted {
                radius: spec.radius,
                min_x: lo.x,
                min_y: lo.y,
                max_x: hi.x,
                max_y: hi.y,
                attempts: MAX_SPAWN_ATTEMPTS,
            });
        };

        let body = match spec.direction {
            Some(dir) => Body::new(0, pos, dir * spec.speed, spec.radius, spec.species),
            None => {
                let heading = state.rng.random_range(0.0..std::f32::consts::TAU);
                Body::with_heading(0, pos, heading, spec.speed, spec.radius, spec.species)
            }
        };
        ids.push(state.add_body(body));
    }

    Ok(ids)
}

/// Spawn bodies inside an inclusive tile rectangle (covering whole tiles)
pub fn spawn_in_tiles(state: &mut SimState, rect: TileRect, spec: SpawnSpec) -> Result<Vec<u32>> {
    let ts = state.grid.tile_size();
    let a = Vec2::new(rect.x1 as f32, rect.y1 as f32) * ts;
    let b = Vec2::new((rect.x2 + 1) as f32, (rect.y2 + 1) as f32) * ts;
    spawn_in_pixels(state, a, b, spec)
}
