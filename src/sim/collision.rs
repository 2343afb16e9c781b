//! Body vs body collision: predation between species, elastic bounce within one
//!
//! Narrow phase only. Every unordered pair is tested once per frame.

use glam::Vec2;

use super::body::Body;
use super::state::SimEvent;

/// Which side of a pair came out ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// What `resolve_pair` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Circles do not overlap
    Apart,
    /// Centers coincide, no contact normal exists
    Coincident,
    /// One of the pair has no mass left
    Empty,
    /// Different species: the heavier side took `mass` from the other
    Consumed { winner: Side, mass: f32 },
    /// Different species with equal mass: nothing happens
    Stalemate,
    /// Same species, both immovable
    Immovable,
    /// Same species, pushed apart but already separating
    Separated,
    /// Same species, pushed apart and bounced with impulse magnitude `impulse`
    Bounced { impulse: f32 },
}

/// Resolve a single pair of bodies.
///
/// `restitution` of 1.0 is perfectly elastic.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f32) -> PairOutcome {
    let disp = a.pos - b.pos;
    let dist = disp.length();

    if dist > a.radius() + b.radius() {
        return PairOutcome::Apart;
    }
    if dist == 0.0 {
        return PairOutcome::Coincident;
    }
    if a.mass() <= 0.0 || b.mass() <= 0.0 {
        return PairOutcome::Empty;
    }

    if a.species != b.species {
        return if a.mass() > b.mass() {
            PairOutcome::Consumed {
                winner: Side::First,
                mass: devour(a, b),
            }
        } else if b.mass() > a.mass() {
            PairOutcome::Consumed {
                winner: Side::Second,
                mass: devour(b, a),
            }
        } else {
            PairOutcome::Stalemate
        };
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let denom = inv_a + inv_b;
    if denom == 0.0 {
        return PairOutcome::Immovable;
    }

    // Positional correction, split by inverse mass
    let overlap = a.radius() + b.radius() - dist;
    let correction = disp / dist * (overlap / denom);
    a.pos += correction * inv_a;
    b.pos -= correction * inv_b;

    let normal = contact_normal(a.pos - b.pos, disp / dist);
    let vn = (a.vel - b.vel).dot(normal);
    if vn >= 0.0 {
        return PairOutcome::Separated;
    }

    let j = -(1.0 + restitution) * vn / denom;
    let impulse = normal * j;
    a.vel += impulse * inv_a;
    b.vel -= impulse * inv_b;

    PairOutcome::Bounced { impulse: j }
}

/// Move all of `prey`'s mass into `predator`, returning the amount moved
fn devour(predator: &mut Body, prey: &mut Body) -> f32 {
    let taken = -prey.change_mass(-prey.mass());
    predator.change_mass(taken);
    taken
}

/// Unit normal from `sep`, or `fallback` if `sep` has no length
#[inline]
fn contact_normal(sep: Vec2, fallback: Vec2) -> Vec2 {
    let len = sep.length();
    if len > 0.0 { sep / len } else { fallback }
}

/// Resolve every unordered pair in `bodies`, in index order.
///
/// Bounces emit `Clack`, predation emits `Consumed`. Returns the number of
/// pairs that bounced.
pub fn resolve_all_pairs(
    bodies: &mut [Body],
    restitution: f32,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut bounced = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            match resolve_pair(a, b, restitution) {
                PairOutcome::Bounced { .. } => {
                    bounced += 1;
                    events.push(SimEvent::Clack { a: a.id, b: b.id });
                }
                PairOutcome::Consumed { winner, mass } => {
                    let (winner, loser) = match winner {
                        Side::First => (a.id, b.id),
                        Side::Second => (b.id, a.id),
                    };
                    events.push(SimEvent::Consumed {
                        winner,
                        loser,
                        mass,
                    });
                }
                _ => {}
            }
        }
    }
    bounced
}
