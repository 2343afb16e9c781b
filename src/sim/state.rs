//! Simulation state and core types
//!
//! Everything a frame reads or writes lives in `SimState` and is passed
//! explicitly to the physics functions. There is no global state.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, Species};
use super::grid::WallGrid;
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::theme::{self, Palette, Rgb};

/// A world edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Fire-and-forget notifications for audio, rendering and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Body was reflected off a world edge
    Bounce { body: u32, edge: Edge },
    /// Two same-species bodies bounced off each other
    Clack { a: u32, b: u32 },
    /// Body bit a wall tile
    WallBitten {
        body: u32,
        tx: usize,
        ty: usize,
        health_left: u32,
    },
    /// Body `winner` ate `mass` from body `loser`
    Consumed { winner: u32, loser: u32, mass: f32 },
    /// Body ran out of mass and was removed
    Died { body: u32 },
}

impl SimEvent {
    /// Events that should make a sound
    pub fn is_audible(&self) -> bool {
        matches!(self, SimEvent::Bounce { .. } | SimEvent::Clack { .. })
    }
}

/// The reflection rectangle `[0, width] × [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// True if a circle lies entirely inside the rectangle
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x >= radius
            && center.x <= self.width - radius
            && center.y >= radius
            && center.y <= self.height - radius
    }
}

/// Constants the integrator and resolvers read every substep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Edge restitution
    pub bounce: f32,
    /// Same-species body restitution
    pub restitution: f32,
    /// Mass lost per wall contact
    pub bite_mass: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            gravity: GRAVITY,
            bounce: BOUNCE,
            restitution: RESTITUTION,
            bite_mass: BITE_MASS,
        }
    }
}

/// Count and mass held by one species
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTally {
    pub count: usize,
    pub mass: f32,
}

/// What a renderer needs to draw one body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub species: Species,
    pub color: Rgb,
}

/// What a renderer needs to draw the walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cols: usize,
    pub rows: usize,
    pub tile_size: f32,
    /// Health a fresh tile starts with
    pub max_health: u32,
    /// Row-major tile health
    pub health: Vec<u32>,
}

impl GridSnapshot {
    /// Color for tile `(tx, ty)`, or `None` if it is open or off the grid
    pub fn tile_color(&self, tx: usize, ty: usize, palette: &Palette) -> Option<Rgb> {
        if tx >= self.cols || ty >= self.rows {
            return None;
        }
        match self.health[ty * self.cols + tx] {
            0 => None,
            hp => Some(theme::wall_color(hp, self.max_health, palette)),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub physics: PhysicsParams,
    pub bounds: Bounds,
    /// Integration slices per frame
    pub substeps: u32,
    /// Health a freshly built wall tile starts with
    pub wall_health: u32,
    pub grid: WallGrid,
    /// Live bodies (sorted by id for determinism)
    pub bodies: Vec<Body>,
    /// Events raised since the last drain
    pub events: Vec<SimEvent>,
    /// Frames stepped so far
    pub frame: u64,
    /// Simulated seconds so far
    pub time: f64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Create an empty world (no walls, no bodies) from a validated config
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let bounds = Bounds::new(config.width, config.height)?;
        let grid = WallGrid::for_world(config.width, config.height, config.tile_size)?;
        log::info!(
            "World {}x{} px, {}x{} tiles of {} px, {} substeps",
            bounds.width,
            bounds.height,
            grid.cols(),
            grid.rows(),
            grid.tile_size(),
            config.substeps
        );
        Ok(Self {
            seed: config.seed,
            physics: config.physics(),
            bounds,
            substeps: config.substeps,
            wall_health: config.wall_health,
            grid,
            bodies: Vec::new(),
            events: Vec::new(),
            frame: 0,
            time: 0.0,
            rng: Pcg32::seed_from_u64(config.seed),
            next_id: 1,
        })
    }

    /// Allocate a new body ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a body built elsewhere, giving it a fresh ID
    pub fn add_body(&mut self, mut body: Body) -> u32 {
        body.id = self.next_entity_id();
        let id = body.id;
        self.bodies.push(body);
        id
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// True if a circle would overlap any standing wall tile
    pub fn intersects_wall(&self, center: Vec2, radius: f32) -> bool {
        self.grid.intersects_wall(center, radius)
    }

    /// Mark bodies without mass as dead and drop every dead body.
    ///
    /// Returns how many were removed.
    pub fn prune_dead(&mut self) -> usize {
        let before = self.bodies.len();
        let events = &mut self.events;
        self.bodies.retain_mut(|b| {
            if b.mass() <= 0.0 {
                b.alive = false;
            }
            if !b.alive {
                events.push(SimEvent::Died { body: b.id });
            }
            b.alive
        });
        before - self.bodies.len()
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f32 {
        let (g, h) = (self.physics.gravity, self.bounds.height);
        self.bodies.iter().map(|b| b.potential_energy(g, h)).sum()
    }

    pub fn total_energy(&self) -> f32 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn total_mass(&self) -> f32 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn species_tally(&self) -> BTreeMap<Species, SpeciesTally> {
        let mut tally: BTreeMap<Species, SpeciesTally> = BTreeMap::new();
        for body in &self.bodies {
            let entry = tally.entry(body.species).or_default();
            entry.count += 1;
            entry.mass += body.mass();
        }
        tally
    }

    pub fn body_snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .map(|b| BodySnapshot {
                id: b.id,
                pos: b.pos,
                radius: b.radius(),
                species: b.species,
                color: theme::species_color(b.species.0 as usize, &theme::NEON),
            })
            .collect()
    }

    pub fn grid_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            tile_size: self.grid.tile_size(),
            max_health: self.wall_health,
            health: self.grid.health_values().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        SimConfig {
            width: 200.0,
            height: 100.0,
            tile_size: 10.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_new_builds_empty_world() {
        let state = SimState::new(&small_config()).unwrap();
        assert_eq!(state.grid.cols(), 20);
        assert_eq!(state.grid.rows(), 10);
        assert_eq!(state.grid.solid_count(), 0);
        assert!(state.bodies.is_empty());
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_bad_bounds_rejected() {
        assert!(Bounds::new(0.0, 10.0).is_err());
        assert!(Bounds::new(10.0, f32::NAN).is_err());
        assert!(Bounds::new(10.0, 10.0).is_ok());
    }

    #[test]
    fn test_add_body_assigns_ids() {
        let mut state = SimState::new(&small_config()).unwrap();
        let a = state.add_body(Body::new(0, Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, Species(0)));
        let b = state.add_body(Body::new(0, Vec2::new(80.0, 50.0), Vec2::ZERO, 5.0, Species(1)));
        assert_eq!((a, b), (1, 2));
        assert_eq!(state.body(2).unwrap().species, Species(1));
    }

    #[test]
    fn test_prune_dead_reports_deaths() {
        let mut state = SimState::new(&small_config()).unwrap();
        state.add_body(Body::new(0, Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, Species(0)));
        let empty = Body::from_mass(0, Vec2::new(80.0, 50.0), Vec2::ZERO, 0.0, Species(0));
        let doomed = state.add_body(empty);

        assert_eq!(state.prune_dead(), 1);
        assert_eq!(state.bodies.len(), 1);
        assert_eq!(state.drain_events(), vec![SimEvent::Died { body: doomed }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_bodies_stay_in_id_order() {
        let mut state = SimState::new(&small_config()).unwrap();
        for i in 0..6 {
            let mass = if i % 2 == 0 { 0.0 } else { 20.0 };
            let pos = Vec2::new(20.0 + 25.0 * i as f32, 50.0);
            state.add_body(Body::from_mass(0, pos, Vec2::ZERO, mass, Species(0)));
        }

        assert_eq!(state.prune_dead(), 3);
        state.add_body(Body::new(0, Vec2::new(10.0, 10.0), Vec2::ZERO, 2.0, Species(1)));

        let ids: Vec<u32> = state.bodies.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 4, 6, 7]);
    }

    #[test]
    fn test_tally_and_energy() {
        let mut state = SimState::new(&small_config()).unwrap();
        state.physics.gravity = 10.0;
        let mut a = Body::from_mass(0, Vec2::new(50.0, 40.0), Vec2::new(1.0, 0.0), 4.0, Species(0));
        a.vel = Vec2::new(3.0, 4.0);
        state.add_body(a);
        state.add_body(Body::from_mass(0, Vec2::new(80.0, 100.0), Vec2::ZERO, 6.0, Species(0)));
        state.add_body(Body::from_mass(0, Vec2::new(20.0, 50.0), Vec2::ZERO, 1.0, Species(3)));

        let tally = state.species_tally();
        assert_eq!(tally[&Species(0)], SpeciesTally { count: 2, mass: 10.0 });
        assert_eq!(tally[&Species(3)].count, 1);
        assert_eq!(state.total_mass(), 11.0);
        assert!((state.kinetic_energy() - 50.0).abs() < 1e-4);
        // 4*10*60 + 6*10*0 + 1*10*50
        assert!((state.potential_energy() - 2900.0).abs() < 1e-2);
    }

    #[test]
    fn test_snapshots() {
        let mut state = SimState::new(&small_config()).unwrap();
        state.grid.set_health(3, 4, 7);
        state.add_body(Body::new(0, Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, Species(1)));

        let grid = state.grid_snapshot();
        assert_eq!(grid.health[4 * grid.cols + 3], 7);
        assert_eq!(grid.max_health, state.wall_health);
        assert_eq!(
            grid.tile_color(3, 4, &theme::NEON),
            Some(theme::wall_color(7, state.wall_health, &theme::NEON))
        );
        assert_eq!(grid.tile_color(0, 0, &theme::NEON), None);
        assert_eq!(grid.tile_color(99, 0, &theme::NEON), None);

        let bodies = state.body_snapshots();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].color, theme::NEON.species[1]);
        assert!((bodies[0].radius - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_event_audibility() {
        assert!(SimEvent::Bounce { body: 1, edge: Edge::Top }.is_audible());
        assert!(SimEvent::Clack { a: 1, b: 2 }.is_audible());
        assert!(!SimEvent::Died { body: 1 }.is_audible());
    }
}
