//! Explicit Euler substep integration
//!
//! Velocity first, then position, then walls, then world edges.

use super::body::Body;
use super::bounds::resolve_bounds;
use super::grid::WallGrid;
use super::state::{Bounds, PhysicsParams, SimEvent};
use super::walls::resolve_wall;

/// Shared world a body is advanced through
pub struct StepContext<'a> {
    pub grid: &'a mut WallGrid,
    pub bounds: Bounds,
    pub physics: &'a PhysicsParams,
    pub events: &'a mut Vec<SimEvent>,
}

/// Advance one body by `dt` seconds.
///
/// A body with no mass left is marked dead and does not move. Wall bites are
/// visible to bodies advanced later in the same substep.
pub fn advance(body: &mut Body, dt: f32, ctx: &mut StepContext<'_>) {
    if body.mass() <= 0.0 {
        body.alive = false;
        return;
    }

    body.vel.y += ctx.physics.gravity * dt;
    body.pos += body.vel * dt;

    resolve_wall(body, ctx.grid, ctx.physics.bite_mass, ctx.events);
    resolve_bounds(body, ctx.bounds, ctx.physics.bounce, ctx.events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Species;
    use glam::Vec2;

    fn physics(gravity: f32) -> PhysicsParams {
        PhysicsParams {
            gravity,
            bounce: 0.5,
            restitution: 1.0,
            bite_mass: 10.0,
        }
    }

    #[test]
    fn test_gravity_then_position() {
        let mut grid = WallGrid::new(10, 10, 20.0).unwrap();
        let params = physics(100.0);
        let mut events = Vec::new();
        let mut ctx = StepContext {
            grid: &mut grid,
            bounds: Bounds::new(200.0, 200.0).unwrap(),
            physics: &params,
            events: &mut events,
        };
        let mut body =
            Body::new(1, Vec2::new(100.0, 50.0), Vec2::new(10.0, 0.0), 5.0, Species(0));

        advance(&mut body, 0.1, &mut ctx);

        // v.y = 0 + 100 * 0.1 = 10, then p += v * 0.1
        assert!((body.vel.y - 10.0).abs() < 1e-5);
        assert!((body.pos.x - 101.0).abs() < 1e-4);
        assert!((body.pos.y - 51.0).abs() < 1e-4);
        assert!(body.alive);
        assert!(events.is_empty());
    }

    #[test]
    fn test_massless_body_dies_in_place() {
        let mut grid = WallGrid::new(10, 10, 20.0).unwrap();
        let params = physics(100.0);
        let mut events = Vec::new();
        let mut ctx = StepContext {
            grid: &mut grid,
            bounds: Bounds::new(200.0, 200.0).unwrap(),
            physics: &params,
            events: &mut events,
        };
        let mut body =
            Body::from_mass(1, Vec2::new(100.0, 50.0), Vec2::new(10.0, 0.0), 0.0, Species(0));

        advance(&mut body, 0.1, &mut ctx);

        assert!(!body.alive);
        assert_eq!(body.pos, Vec2::new(100.0, 50.0));
        assert_eq!(body.vel, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_wall_resolved_before_edges() {
        // Tile (9,5) hugs the right edge; the body hits it, then the edge sees nothing
        let mut grid = WallGrid::new(10, 10, 20.0).unwrap();
        grid.set_health(9, 5, 2);
        let params = physics(0.0);
        let mut events = Vec::new();
        let mut body =
            Body::new(1, Vec2::new(168.0, 110.0), Vec2::new(100.0, 0.0), 5.0, Species(0));

        {
            let mut ctx = StepContext {
                grid: &mut grid,
                bounds: Bounds::new(200.0, 200.0).unwrap(),
                physics: &params,
                events: &mut events,
            };
            advance(&mut body, 0.1, &mut ctx);
        }

        assert!(body.vel.x < 0.0);
        assert!(body.pos.x < 180.0);
        assert_eq!(grid.health(9, 5), 1);
        assert!(matches!(events.as_slice(), [SimEvent::WallBitten { tx: 9, ty: 5, .. }]));
    }

    #[test]
    fn test_bitten_wall_gone_for_later_bodies() {
        // Both bodies touch tile (4,4) with one point of health left
        let mut grid = WallGrid::new(10, 10, 20.0).unwrap();
        grid.set_health(4, 4, 1);
        let params = physics(0.0);
        let mut events = Vec::new();
        let mut a = Body::new(1, Vec2::new(75.0, 90.0), Vec2::ZERO, 10.0, Species(0));
        let mut b = Body::new(2, Vec2::new(105.0, 90.0), Vec2::ZERO, 10.0, Species(1));
        let (mass_a, mass_b) = (a.mass(), b.mass());

        {
            let mut ctx = StepContext {
                grid: &mut grid,
                bounds: Bounds::new(200.0, 200.0).unwrap(),
                physics: &params,
                events: &mut events,
            };
            advance(&mut a, 0.01, &mut ctx);
            advance(&mut b, 0.01, &mut ctx);
        }

        assert!((mass_a - a.mass() - 10.0).abs() < 1e-3);
        assert_eq!(b.mass(), mass_b);
        assert_eq!(b.pos, Vec2::new(105.0, 90.0));
        assert_eq!(grid.health(4, 4), 0);
        assert!(matches!(
            events.as_slice(),
            [SimEvent::WallBitten { body: 1, health_left: 0, .. }]
        ));
    }
}
