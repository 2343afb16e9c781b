//! World edge reflection

use super::body::Body;
use super::state::{Bounds, Edge, SimEvent};

/// Keep a body inside the world rectangle.
///
/// Each axis is checked independently, so a body in a corner can be corrected
/// twice. Every correction emits one `Bounce` event. Returns the number of
/// edges corrected.
pub fn resolve_bounds(
    body: &mut Body,
    bounds: Bounds,
    bounce: f32,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let r = body.radius();
    let mut corrected = 0;

    let x_edge = if body.pos.x + r > bounds.width {
        body.pos.x = bounds.width - r;
        Some(Edge::Right)
    } else if body.pos.x - r < 0.0 {
        body.pos.x = r;
        Some(Edge::Left)
    } else {
        None
    };
    if let Some(edge) = x_edge {
        body.vel.x *= -bounce;
        events.push(SimEvent::Bounce { body: body.id, edge });
        corrected += 1;
    }

    let y_edge = if body.pos.y + r > bounds.height {
        body.pos.y = bounds.height - r;
        Some(Edge::Bottom)
    } else if body.pos.y - r < 0.0 {
        body.pos.y = r;
        Some(Edge::Top)
    } else {
        None
    };
    if let Some(edge) = y_edge {
        body.vel.y *= -bounce;
        events.push(SimEvent::Bounce { body: body.id, edge });
        corrected += 1;
    }

    corrected
}
