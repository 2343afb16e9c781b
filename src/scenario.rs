//! World assembly
//!
//! Turns a `SimConfig` into a ready-to-run `SimState`: walls first, then one
//! species per quadrant spawned into the open zones.

use crate::arena::{ArenaBuilder, group_by_quadrant, inner_zones};
use crate::config::SimConfig;
use crate::error::Result;
use crate::sim::{SimState, SpawnSpec, Species, spawn_in_tiles};

/// Build the quad-concentric arena and populate it
pub fn build_quad_arena(config: &SimConfig) -> Result<SimState> {
    let mut state = SimState::new(config)?;
    let arena = &config.arena;

    let cells = ArenaBuilder::new(&mut state.grid, config.wall_health).quad_concentric(
        arena.rows_per_quad,
        arena.cols_per_quad,
        arena.thickness,
        arena.rings,
        arena.ring_step,
        true,
    );

    // With rings, only the innermost box of each cell is reachable
    let zones = if arena.rings > 0 {
        inner_zones(&cells, arena.rings, arena.ring_step, 1)
    } else {
        cells
    };

    let quads = group_by_quadrant(&state.grid, &zones);
    for (qi, rects) in quads.iter().enumerate() {
        let spec = SpawnSpec {
            count: config.spawn.per_zone,
            radius: config.spawn.radius,
            speed: config.spawn.speed,
            species: Species(qi as u8),
            direction: None,
        };
        for rect in rects {
            spawn_in_tiles(&mut state, *rect, spec)?;
        }
    }

    log::info!(
        "Spawned {} bodies in {} zones (seed {})",
        state.bodies.len(),
        zones.len(),
        config.seed
    );
    Ok(state)
}
