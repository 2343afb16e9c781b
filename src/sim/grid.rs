//! Wall tile grid
//!
//! A fixed-size array of tile health values. Tile `(tx, ty)` covers the pixel
//! square `[tx * tile_size, (tx + 1) * tile_size] × [ty * tile_size, (ty + 1) * tile_size]`.
//! Health 0 means open space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Inclusive rectangle in tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl TileRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2).div_euclid(2), (self.y1 + self.y2).div_euclid(2))
    }
}

/// Pixel-space box of a single tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl TileBox {
    /// Point on (or in) the box closest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Range of tiles a circle's bounding box touches, clamped to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl TileSpan {
    /// Tiles in raster order: top-to-bottom, then left-to-right
    pub fn iter(self) -> impl Iterator<Item = (usize, usize)> {
        let (left, right) = (self.left, self.right);
        (self.top..=self.bottom).flat_map(move |ty| (left..=right).map(move |tx| (tx, ty)))
    }
}

/// The destructible wall grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallGrid {
    cols: usize,
    rows: usize,
    tile_size: f32,
    /// Row-major tile health
    health: Vec<u32>,
}

impl WallGrid {
    /// Create an empty (all open) grid
    pub fn new(cols: usize, rows: usize, tile_size: f32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(SimError::InvalidGrid { cols, rows });
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(SimError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            cols,
            rows,
            tile_size,
            health: vec![0; cols * rows],
        })
    }

    /// Grid covering a `width × height` pixel world (partial tiles at the edges are dropped)
    pub fn for_world(width: f32, height: f32, tile_size: f32) -> Result<Self> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(SimError::InvalidTileSize(tile_size));
        }
        let cols = (width / tile_size).floor().max(0.0) as usize;
        let rows = (height / tile_size).floor().max(0.0) as usize;
        Self::new(cols, rows, tile_size)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    fn index(&self, tx: usize, ty: usize) -> Option<usize> {
        (tx < self.cols && ty < self.rows).then_some(ty * self.cols + tx)
    }

    /// Health of a tile; out-of-range tiles read as open
    pub fn health(&self, tx: usize, ty: usize) -> u32 {
        self.index(tx, ty).map_or(0, |i| self.health[i])
    }

    /// Set a tile's health. Out-of-range writes are ignored.
    pub fn set_health(&mut self, tx: usize, ty: usize, hp: u32) {
        if let Some(i) = self.index(tx, ty) {
            self.health[i] = hp;
        }
    }

    /// Signed-coordinate variant of `set_health` for layout code that works past the edges
    pub fn set_health_clipped(&mut self, tx: i32, ty: i32, hp: u32) {
        if tx >= 0 && ty >= 0 {
            self.set_health(tx as usize, ty as usize, hp);
        }
    }

    /// Knock one point of health off a tile, returning what is left
    pub fn bite(&mut self, tx: usize, ty: usize) -> u32 {
        match self.index(tx, ty) {
            Some(i) => {
                self.health[i] = self.health[i].saturating_sub(1);
                self.health[i]
            }
            None => 0,
        }
    }

    #[inline]
    pub fn is_solid(&self, tx: usize, ty: usize) -> bool {
        self.health(tx, ty) > 0
    }

    /// Open every tile
    pub fn clear(&mut self) {
        self.health.fill(0);
    }

    pub fn solid_count(&self) -> usize {
        self.health.iter().filter(|&&hp| hp > 0).count()
    }

    pub fn total_health(&self) -> u64 {
        self.health.iter().map(|&hp| hp as u64).sum()
    }

    /// Row-major health values
    pub fn health_values(&self) -> &[u32] {
        &self.health
    }

    pub fn tile_box(&self, tx: usize, ty: usize) -> TileBox {
        let min = Vec2::new(tx as f32, ty as f32) * self.tile_size;
        TileBox {
            min,
            max: min + Vec2::splat(self.tile_size),
        }
    }

    /// Tiles touched by the bounding box of a circle, or `None` if it lies off the grid
    pub fn tile_span(&self, center: Vec2, radius: f32) -> Option<TileSpan> {
        let ts = self.tile_size;
        let left = ((center.x - radius) / ts).floor() as i64;
        let right = ((center.x + radius) / ts).floor() as i64;
        let top = ((center.y - radius) / ts).floor() as i64;
        let bottom = ((center.y + radius) / ts).floor() as i64;

        let left = left.max(0);
        let top = top.max(0);
        let right = right.min(self.cols as i64 - 1);
        let bottom = bottom.min(self.rows as i64 - 1);
        if right < left || bottom < top {
            return None;
        }
        Some(TileSpan {
            left: left as usize,
            right: right as usize,
            top: top as usize,
            bottom: bottom as usize,
        })
    }

    /// True if the circle overlaps any tile with health > 0
    pub fn intersects_wall(&self, center: Vec2, radius: f32) -> bool {
        let Some(span) = self.tile_span(center, radius) else {
            return false;
        };
        let r2 = radius * radius;
        span.iter()
            .filter(|&(tx, ty)| self.is_solid(tx, ty))
            .any(|(tx, ty)| {
                let closest = self.tile_box(tx, ty).closest_point(center);
                center.distance_squared(closest) < r2
            })
    }
}
