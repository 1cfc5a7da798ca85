//! Grid topology and the double-buffered simulation driver.
//!
//! [`GridIndexer`] resolves all neighbor addressing (including the
//! border policy) in one place; [`FieldGrid`] owns the two cell
//! generations and runs the per-frame phases:
//! 1. seed — initialize every cell from its normalized coordinates,
//! 2. step — evolve every cell from the previous generation into the
//!    write buffer, then swap,
//! 3. colorize — map the current generation to RGBA pixels.
//!
//! Steps 2 and 3 only ever read the generation they do not write, so
//! both run cell-parallel with no locking.

use rayon::prelude::*;

use crate::cell::Cell;
use crate::color;
use crate::config::{EdgePolicy, SimConfig};
use crate::stencil;

/// The four axis-aligned stencil neighbors. `Up` is one row toward
/// smaller row indices, `Down` one row toward larger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Grid topology: dimensions plus the border policy, resolved once at
/// construction. All neighbor lookups go through
/// [`GridIndexer::neighbor`] instead of ad-hoc offset arithmetic.
#[derive(Clone, Copy, Debug)]
pub struct GridIndexer {
    pub width: usize,
    pub height: usize,
    pub edge: EdgePolicy,
}

impl GridIndexer {
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of the cell at column `x`, row `y`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Column and row of a flat index.
    #[inline]
    pub fn coords(&self, i: usize) -> (usize, usize) {
        (i % self.width, i / self.width)
    }

    /// Flat index of the neighbor of `i` in direction `dir`, under the
    /// grid's edge policy.
    #[inline]
    pub fn neighbor(&self, i: usize, dir: Direction) -> usize {
        let (x, y) = self.coords(i);
        match dir {
            Direction::Left => self.index(self.shift(x, -1, self.width), y),
            Direction::Right => self.index(self.shift(x, 1, self.width), y),
            Direction::Up => self.index(x, self.shift(y, -1, self.height)),
            Direction::Down => self.index(x, self.shift(y, 1, self.height)),
        }
    }

    #[inline]
    fn shift(&self, v: usize, step: isize, len: usize) -> usize {
        match self.edge {
            EdgePolicy::Wrap => (v as isize + step).rem_euclid(len as isize) as usize,
            EdgePolicy::Clamp => (v as isize + step).clamp(0, len as isize - 1) as usize,
        }
    }
}

/// Double-buffered cell grid.
///
/// One buffer holds the generation being read, the other receives the
/// next generation; [`FieldGrid::step`] fills the write buffer in
/// parallel and swaps, so neighbor reads never observe a partially
/// updated generation.
#[derive(Debug)]
pub struct FieldGrid {
    cfg: SimConfig,
    indexer: GridIndexer,
    cells: Vec<Cell>,
    next: Vec<Cell>,
    generation: u64,
}

impl FieldGrid {
    /// Allocates a grid for `cfg` and seeds it over `[-1, 1] × [-1, 1]`.
    pub fn new(cfg: SimConfig) -> Self {
        let indexer = GridIndexer {
            width: cfg.width,
            height: cfg.height,
            edge: cfg.edge,
        };
        let mut grid = Self {
            cfg,
            indexer,
            cells: vec![Cell::cleared(); indexer.len()],
            next: vec![Cell::cleared(); indexer.len()],
            generation: 0,
        };
        grid.seed();
        grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn indexer(&self) -> GridIndexer {
        self.indexer
    }

    /// The current generation's cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of steps since the last seeding.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reseeds every cell over the default `[-1, 1]` square and
    /// restarts the generation counter.
    pub fn seed(&mut self) {
        let (w, h) = (self.cfg.width, self.cfg.height);
        let to_unit = move |i: usize, n: usize| {
            if n > 1 {
                (i as f64 / (n - 1) as f64) * 2.0 - 1.0
            } else {
                0.0
            }
        };
        self.seed_with(move |x, y| (to_unit(x, w), to_unit(y, h)));
    }

    /// Reseeds every cell, mapping grid indices to normalized
    /// coordinates through `map`.
    pub fn seed_with(&mut self, map: impl Fn(usize, usize) -> (f64, f64) + Sync) {
        let indexer = self.indexer;
        let model = self.cfg.gravity;
        self.cells.par_iter_mut().enumerate().for_each(|(i, cell)| {
            let (col, row) = indexer.coords(i);
            let (x, y) = map(col, row);
            *cell = Cell::seeded(x, y, model);
        });
        self.generation = 0;
    }

    /// Advances the whole grid by one generation.
    pub fn step(&mut self) {
        let indexer = self.indexer;
        let cfg = self.cfg;
        let cells = &self.cells;
        self.next.par_iter_mut().enumerate().for_each(|(i, out)| {
            let left = &cells[indexer.neighbor(i, Direction::Left)];
            let right = &cells[indexer.neighbor(i, Direction::Right)];
            let up = &cells[indexer.neighbor(i, Direction::Up)];
            let down = &cells[indexer.neighbor(i, Direction::Down)];
            *out = stencil::step(&cells[i], left, right, up, down, &cfg);
        });
        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
    }

    /// Fills `pixels` (RGBA, `4 * width * height` bytes) from the
    /// current generation.
    ///
    /// ### Panics
    /// Panics if `pixels` has the wrong length.
    pub fn colorize_into(&self, pixels: &mut [u8]) {
        assert_eq!(pixels.len(), self.indexer.len() * 4);
        pixels
            .par_chunks_exact_mut(4)
            .zip(self.cells.par_iter())
            .for_each(|(px, cell)| {
                px.copy_from_slice(&color::colorize(cell.field));
            });
    }

    /// Largest field magnitude in the current generation.
    pub fn peak_magnitude(&self) -> f64 {
        self.cells
            .par_iter()
            .map(|c| c.field.norm())
            .reduce(|| 0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityModel;

    fn small_cfg() -> SimConfig {
        SimConfig {
            width: 3,
            height: 3,
            gravity: GravityModel::None,
            ..SimConfig::default()
        }
    }

    #[test]
    fn wrap_addressing_links_opposite_borders() {
        let ix = GridIndexer {
            width: 3,
            height: 3,
            edge: EdgePolicy::Wrap,
        };
        assert_eq!(ix.neighbor(ix.index(0, 1), Direction::Left), ix.index(2, 1));
        assert_eq!(ix.neighbor(ix.index(2, 1), Direction::Right), ix.index(0, 1));
        assert_eq!(ix.neighbor(ix.index(1, 0), Direction::Up), ix.index(1, 2));
        assert_eq!(ix.neighbor(ix.index(1, 2), Direction::Down), ix.index(1, 0));
    }

    #[test]
    fn clamp_addressing_reuses_border_cells() {
        let ix = GridIndexer {
            width: 3,
            height: 3,
            edge: EdgePolicy::Clamp,
        };
        assert_eq!(ix.neighbor(ix.index(0, 1), Direction::Left), ix.index(0, 1));
        assert_eq!(ix.neighbor(ix.index(2, 1), Direction::Right), ix.index(2, 1));
        assert_eq!(ix.neighbor(ix.index(1, 0), Direction::Up), ix.index(1, 0));
        assert_eq!(ix.neighbor(ix.index(1, 2), Direction::Down), ix.index(1, 2));
    }

    #[test]
    fn interior_neighbors_are_adjacent() {
        let ix = GridIndexer {
            width: 3,
            height: 3,
            edge: EdgePolicy::Wrap,
        };
        let c = ix.index(1, 1);
        assert_eq!(ix.neighbor(c, Direction::Left), ix.index(0, 1));
        assert_eq!(ix.neighbor(c, Direction::Right), ix.index(2, 1));
        assert_eq!(ix.neighbor(c, Direction::Up), ix.index(1, 0));
        assert_eq!(ix.neighbor(c, Direction::Down), ix.index(1, 2));
    }

    #[test]
    fn seeding_restarts_the_generation_counter() {
        let mut grid = FieldGrid::new(small_cfg());
        grid.step();
        grid.step();
        assert_eq!(grid.generation(), 2);
        grid.seed();
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn center_cell_steps_by_the_unweighted_laplacian_in_flat_space() {
        // The end-to-end reference scenario: a 3×3 patch seeded at
        // spacing 0.1 around the origin with no gravity, stepped once
        // under the wave equation. With zero bias and unit lapse the
        // update must equal the plain four-neighbor prediction.
        let mut grid = FieldGrid::new(small_cfg());
        grid.seed_with(|col, row| ((col as f64 - 1.0) * 0.1, (row as f64 - 1.0) * 0.1));

        let ix = grid.indexer();
        let c = ix.index(1, 1);
        let before = grid.cells().to_vec();

        grid.step();

        let lap = before[ix.index(0, 1)].field
            + before[ix.index(2, 1)].field
            + before[ix.index(1, 0)].field
            + before[ix.index(1, 2)].field
            - before[c].field * 4.0;
        let rate = before[c].rate + (lap - before[c].field) * grid.config().dt;
        let field = before[c].field + rate * grid.config().dt;

        let after = grid.cells()[c];
        assert!((after.rate - rate).norm() < 1e-12);
        assert!((after.field - field).norm() < 1e-12);
        assert_eq!(after.gravity, before[c].gravity);
    }

    #[test]
    fn step_reads_only_the_previous_generation() {
        // Two grids seeded identically must agree after a step no
        // matter how the write buffer was previously filled; this
        // would fail if any cell read a freshly-written neighbor.
        let mut a = FieldGrid::new(small_cfg());
        let mut b = FieldGrid::new(small_cfg());
        b.step();
        b.seed();

        a.step();
        b.step();

        for (ca, cb) in a.cells().iter().zip(b.cells()) {
            assert_eq!(ca, cb);
        }
    }

    #[test]
    fn colorize_fills_opaque_pixels() {
        let grid = FieldGrid::new(small_cfg());
        let mut pixels = vec![0u8; grid.indexer().len() * 4];
        grid.colorize_into(&mut pixels);
        assert!(pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn peak_magnitude_sees_the_seed_envelope() {
        // Seed a single-column grid on the origin where the envelope
        // peaks at 6·exp(-1) and check the reduce finds it.
        let mut grid = FieldGrid::new(SimConfig {
            width: 1,
            height: 1,
            gravity: GravityModel::None,
            ..SimConfig::default()
        });
        grid.seed_with(|_, _| (0.0, 0.0));
        let expected = 6.0 * (-1.0f64).exp();
        assert!((grid.peak_magnitude() - expected).abs() < 1e-12);
    }
}
