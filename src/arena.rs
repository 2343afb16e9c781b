//! Arena layout builders
//!
//! Run once before the simulation starts. All coordinates are inclusive tile
//! coordinates; writes that fall off the grid are dropped.

use crate::sim::{TileRect, WallGrid};

/// Draws walls of a fixed starting health into a grid
pub struct ArenaBuilder<'a> {
    grid: &'a mut WallGrid,
    health: u32,
}

impl<'a> ArenaBuilder<'a> {
    pub fn new(grid: &'a mut WallGrid, health: u32) -> Self {
        Self { grid, health }
    }

    fn width(&self) -> i32 {
        self.grid.cols() as i32
    }

    fn height(&self) -> i32 {
        self.grid.rows() as i32
    }

    /// Outline (or fill) the box with corners `(x1, y1)` and `(x2, y2)`
    pub fn wall_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, filled: bool) {
        let (lx, hx) = (x1.min(x2), x1.max(x2));
        let (ly, hy) = (y1.min(y2), y1.max(y2));
        let hp = self.health;

        if filled {
            for y in ly..=hy {
                for x in lx..=hx {
                    self.grid.set_health_clipped(x, y, hp);
                }
            }
            return;
        }

        for x in lx..=hx {
            self.grid.set_health_clipped(x, ly, hp);
            self.grid.set_health_clipped(x, hy, hp);
        }
        for y in ly..=hy {
            self.grid.set_health_clipped(lx, y, hp);
            self.grid.set_health_clipped(hx, y, hp);
        }
    }

    /// Split a box into `rows × cols` cells with single-tile walls
    #[allow(clippy::too_many_arguments)]
    pub fn wall_grid(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        rows: i32,
        cols: i32,
        border: bool,
    ) {
        if border {
            self.wall_box(x1, y1, x2, y2, false);
        }
        let rows = rows.max(1);
        let cols = cols.max(1);
        let row_size = (y2 - y1).div_euclid(rows);
        let col_size = (x2 - x1).div_euclid(cols);

        for i in 1..rows {
            let y = y1 + row_size * i;
            self.wall_box(x1, y, x2, y, false);
        }
        for i in 1..cols {
            let x = x1 + col_size * i;
            self.wall_box(x, y1, x, y2, false);
        }
    }

    /// Vertical line `t` tiles thick, centered on `x`
    fn thick_vline(&mut self, x: i32, y1: i32, y2: i32, t: i32) {
        let (w, h) = (self.width(), self.height());
        let half = t / 2;
        for dx in -half..(t - half) {
            let col = x + dx;
            self.wall_box(col.max(0), y1.max(0), col.min(w - 1), y2.min(h - 1), false);
        }
    }

    /// Horizontal line `t` tiles thick, centered on `y`
    fn thick_hline(&mut self, x1: i32, x2: i32, y: i32, t: i32) {
        let (w, h) = (self.width(), self.height());
        let half = t / 2;
        for dy in -half..(t - half) {
            let row = y + dy;
            self.wall_box(x1.max(0), row.max(0), x2.min(w - 1), row.min(h - 1), false);
        }
    }

    /// Build the quad-concentric arena.
    ///
    /// Outer border, a thick central cross splitting the map into quadrants,
    /// each quadrant bordered and split into a `rows_per_quad × cols_per_quad`
    /// grid, with optional concentric rings inside every cell. Nothing has a
    /// door. Returns the open cell interiors, quadrant by quadrant.
    pub fn quad_concentric(
        &mut self,
        rows_per_quad: i32,
        cols_per_quad: i32,
        thickness: i32,
        rings: i32,
        ring_step: i32,
        reset: bool,
    ) -> Vec<TileRect> {
        let (w, h) = (self.width(), self.height());
        let rows_per_quad = rows_per_quad.max(1);
        let cols_per_quad = cols_per_quad.max(1);
        let thickness = thickness.max(1);
        let rings = rings.max(0);
        let ring_step = ring_step.max(1);

        if reset {
            self.grid.clear();
        }

        self.wall_box(0, 0, w - 1, h - 1, false);

        let (midx, midy) = (w / 2, h / 2);
        self.thick_vline(midx, 1, h - 2, thickness);
        self.thick_hline(1, w - 2, midy, thickness);

        let quads = [
            TileRect::new(0, 0, midx - 1, midy - 1),
            TileRect::new(midx + 1, 0, w - 1, midy - 1),
            TileRect::new(0, midy + 1, midx - 1, h - 1),
            TileRect::new(midx + 1, midy + 1, w - 1, h - 1),
        ];

        let mut all_cells = Vec::new();
        for q in quads {
            if q.x2 - q.x1 < 2 || q.y2 - q.y1 < 2 {
                continue;
            }

            // Seal each quadrant on its own
            self.wall_box(q.x1, q.y1, q.x2, q.y2, false);

            let xs = splits(q.x1, q.x2, cols_per_quad);
            let ys = splits(q.y1, q.y2, rows_per_quad);
            for &x in &xs[1..xs.len() - 1] {
                self.thick_vline(x, q.y1, q.y2, thickness);
            }
            for &y in &ys[1..ys.len() - 1] {
                self.thick_hline(q.x1, q.x2, y, thickness);
            }

            let cells = cell_interiors(&xs, &ys, thickness);
            if rings > 0 {
                for cell in &cells {
                    for r in 1..=rings {
                        let pad = r * ring_step;
                        if cell.x2 - cell.x1 > pad * 2 + 1 && cell.y2 - cell.y1 > pad * 2 + 1 {
                            self.wall_box(
                                cell.x1 + pad,
                                cell.y1 + pad,
                                cell.x2 - pad,
                                cell.y2 - pad,
                                false,
                            );
                        }
                    }
                }
            }
            all_cells.extend(cells);
        }

        log::info!(
            "Quad arena: {} cells, {} wall tiles",
            all_cells.len(),
            self.grid.solid_count()
        );
        all_cells
    }
}

/// `n + 1` evenly spaced integer stops from `a` to `b` (ties round to even)
fn splits(a: i32, b: i32, n: i32) -> Vec<i32> {
    (0..=n)
        .map(|i| (a as f64 + (b - a) as f64 * i as f64 / n as f64).round_ties_even() as i32)
        .collect()
}

/// Interiors of the grid cells bounded by `xs` × `ys`, shrunk by the wall thickness
fn cell_interiors(xs: &[i32], ys: &[i32], thickness: i32) -> Vec<TileRect> {
    let mut cells = Vec::new();
    for row in ys.windows(2) {
        for col in xs.windows(2) {
            let cell = TileRect::new(
                col[0] + thickness,
                row[0] + thickness,
                col[1] - thickness,
                row[1] - thickness,
            );
            if cell.x2 > cell.x1 && cell.y2 > cell.y1 {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Innermost open area of each cell, inside the deepest ring plus `inset`
pub fn inner_zones(cells: &[TileRect], rings: i32, ring_step: i32, inset: i32) -> Vec<TileRect> {
    let pad = (rings * ring_step.max(1)).max(0) + inset.max(0);
    cells
        .iter()
        .map(|c| TileRect::new(c.x1 + pad, c.y1 + pad, c.x2 - pad, c.y2 - pad))
        .filter(|z| z.x2 > z.x1 && z.y2 > z.y1)
        .collect()
}

/// Group zones by quadrant of the grid: top-left, top-right, bottom-left, bottom-right
pub fn group_by_quadrant(grid: &WallGrid, zones: &[TileRect]) -> [Vec<TileRect>; 4] {
    let midx = grid.cols() as i32 / 2;
    let midy = grid.rows() as i32 / 2;
    let mut quads: [Vec<TileRect>; 4] = Default::default();
    for zone in zones {
        let (cx, cy) = zone.center();
        let qi = match (cx <= midx, cy <= midy) {
            (true, true) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (false, false) => 3,
        };
        quads[qi].push(*zone);
    }
    quads
}
