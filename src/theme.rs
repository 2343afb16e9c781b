//! Color palette
//!
//! The simulation never draws anything; snapshots carry these colors so a
//! frontend can.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors for walls and species
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Wall at full health
    pub wall_full: Rgb,
    /// Wall about to break
    pub wall_broken: Rgb,
    pub species: [Rgb; 4],
}

pub const NEON: Palette = Palette {
    wall_full: Rgb(38, 48, 66),
    wall_broken: Rgb(230, 60, 60),
    species: [
        Rgb(0, 255, 200),  // cyan
        Rgb(255, 80, 160), // magenta
        Rgb(160, 255, 60), // lime
        Rgb(255, 190, 0),  // amber
    ],
};

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

pub fn lerp_color(c1: Rgb, c2: Rgb, t: f32) -> Rgb {
    let channel = |a: u8, b: u8| lerp(a as f32, b as f32, t) as u8;
    Rgb(channel(c1.0, c2.0), channel(c1.1, c2.1), channel(c1.2, c2.2))
}

/// Wall color fading from `wall_full` to `wall_broken` as health drops
pub fn wall_color(hp: u32, max_hp: u32, palette: &Palette) -> Rgb {
    let max_hp = max_hp.max(1);
    let t = 1.0 - hp.min(max_hp) as f32 / max_hp as f32;
    lerp_color(palette.wall_full, palette.wall_broken, t)
}

/// Species color; indices wrap around the palette
pub fn species_color(i: usize, palette: &Palette) -> Rgb {
    palette.species[i % palette.species.len()]
}
