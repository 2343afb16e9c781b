//! Body entity: a circle whose radius is always derived from its mass

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque species tag. Bodies of the same species bounce, others eat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Species(pub u8);

/// Radius of a disc with the given mass (area density 1)
#[inline]
pub fn radius_for_mass(mass: f32) -> f32 {
    (mass / PI).sqrt()
}

/// Mass of a disc with the given radius
#[inline]
pub fn mass_for_radius(radius: f32) -> f32 {
    PI * radius * radius
}

/// A circular physics body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub species: Species,
    /// Cleared by the integrator once mass has run out
    pub alive: bool,
    mass: f32,
    radius: f32,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, species: Species) -> Self {
        let radius = radius.max(0.0);
        Self::from_mass(id, pos, vel, mass_for_radius(radius), species)
    }

    pub fn from_mass(id: u32, pos: Vec2, vel: Vec2, mass: f32, species: Species) -> Self {
        let mass = mass.max(0.0);
        Self {
            id,
            pos,
            vel,
            species,
            alive: true,
            mass,
            radius: radius_for_mass(mass),
        }
    }

    /// Launch a body along `heading` (radians, screen space) at `speed`
    pub fn with_heading(
        id: u32,
        pos: Vec2,
        heading: f32,
        speed: f32,
        radius: f32,
        species: Species,
    ) -> Self {
        Self::new(id, pos, Vec2::from_angle(heading) * speed, radius, species)
    }

    /// An infinitely heavy body: never pushed by impulses, never gains or loses mass.
    ///
    /// Its radius is given explicitly since `sqrt(∞)` is not a usable size.
    pub fn immovable(id: u32, pos: Vec2, radius: f32, species: Species) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            species,
            alive: true,
            mass: f32::INFINITY,
            radius: radius.max(0.0),
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_immovable(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Inverse mass for impulse weighting (0 for immovable or empty bodies)
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_immovable() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Add `dm` to the mass, clamping at zero, and return the change actually applied.
    ///
    /// Immovable bodies absorb nothing and lose nothing, so they always return 0.
    pub fn change_mass(&mut self, dm: f32) -> f32 {
        if self.is_immovable() {
            return 0.0;
        }
        let old = self.mass;
        self.mass = (self.mass + dm).max(0.0);
        self.radius = radius_for_mass(self.mass);
        self.mass - old
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Potential energy measured from the bottom edge of a world `height` tall
    pub fn potential_energy(&self, gravity: f32, height: f32) -> f32 {
        self.mass * gravity * (height - self.pos.y)
    }

    pub fn total_energy(&self, gravity: f32, height: f32) -> f32 {
        self.kinetic_energy() + self.potential_energy(gravity, height)
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(mass: f32) -> Body {
        Body::from_mass(1, Vec2::ZERO, Vec2::ZERO, mass, Species(0))
    }

    #[test]
    fn test_radius_follows_mass() {
        let b = Body::new(1, Vec2::ZERO, Vec2::ZERO, 10.0, Species(0));
        assert!((b.mass() - PI * 100.0).abs() < 1e-3);
        assert!((b.radius() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_change_mass_returns_actual_delta() {
        let mut b = body(100.0);
        assert_eq!(b.change_mass(25.0), 25.0);
        assert_eq!(b.mass(), 125.0);
        assert!((b.radius() - radius_for_mass(125.0)).abs() < 1e-6);
    }

    #[test]
    fn test_change_mass_clamps_at_zero() {
        let mut b = body(7.0);
        let delta = b.change_mass(-10.0);
        assert_eq!(delta, -7.0);
        assert_eq!(b.mass(), 0.0);
        assert_eq!(b.radius(), 0.0);
    }

    #[test]
    fn test_immovable_ignores_mass_changes() {
        let mut b = Body::immovable(1, Vec2::ZERO, 15.0, Species(0));
        assert_eq!(b.change_mass(50.0), 0.0);
        assert_eq!(b.change_mass(-50.0), 0.0);
        assert!(b.is_immovable());
        assert_eq!(b.radius(), 15.0);
        assert_eq!(b.inverse_mass(), 0.0);
    }

    #[test]
    fn test_heading_sets_velocity() {
        let heading = std::f32::consts::FRAC_PI_2;
        let b = Body::with_heading(1, Vec2::ZERO, heading, 200.0, 5.0, Species(1));
        assert!(b.vel.x.abs() < 1e-3);
        assert!((b.vel.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_energy() {
        let mut b = body(2.0);
        b.vel = Vec2::new(3.0, 4.0);
        b.pos = Vec2::new(0.0, 40.0);
        assert!((b.kinetic_energy() - 25.0).abs() < 1e-5);
        assert!((b.potential_energy(10.0, 100.0) - 1200.0).abs() < 1e-3);
        assert!((b.total_energy(10.0, 100.0) - 1225.0).abs() < 1e-3);
    }
}
