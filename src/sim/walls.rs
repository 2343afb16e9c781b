//! Body vs wall tile collision
//!
//! Each overlapping tile is handled on its own, in raster order, with an
//! axis-separated push-out. There is no combined solve across tiles.

use glam::Vec2;

use super::body::Body;
use super::grid::WallGrid;
use super::state::SimEvent;

/// Axis a wall contact is resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Pick the axis with the smaller penetration. Ties go to Y.
#[inline]
pub fn separating_axis(penetration: Vec2) -> Axis {
    if penetration.y <= penetration.x {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Resolve a body against every wall tile its bounding box touches.
///
/// Each contact costs the body `bite_mass` and the tile one point of health.
/// Returns the number of contacts.
pub fn resolve_wall(
    body: &mut Body,
    grid: &mut WallGrid,
    bite_mass: f32,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let Some(span) = grid.tile_span(body.pos, body.radius()) else {
        return 0;
    };

    let mut contacts = 0;
    for (tx, ty) in span.iter() {
        if !grid.is_solid(tx, ty) {
            continue;
        }

        let closest = grid.tile_box(tx, ty).closest_point(body.pos);
        let offset = body.pos - closest;
        let r = body.radius();
        if offset.length_squared() >= r * r {
            continue;
        }

        body.change_mass(-bite_mass);

        // Penetration uses the radius left after the bite
        let r = body.radius();
        let penetration = Vec2::new(r - offset.x.abs(), r - offset.y.abs());
        match separating_axis(penetration) {
            Axis::X => {
                body.vel.x = -body.vel.x;
                body.pos.x += penetration.x.copysign(offset.x);
            }
            Axis::Y => {
                body.vel.y = -body.vel.y;
                body.pos.y += penetration.y.copysign(offset.y);
            }
        }

        let health_left = grid.bite(tx, ty);
        contacts += 1;
        events.push(SimEvent::WallBitten {
            body: body.id,
            tx,
            ty,
            health_left,
        });
    }
    contacts
}
