// src/services/boundary_grid.rs
//
// The jittered lattice the triangulator works on.
//
// Every cell has four boundary points, one on each side. Neighbouring
// cells share a side, so the points are stored per side rather than per
// cell: `horizontal` holds the points on the horizontal grid lines
// (row 0 is the rectangle's top edge, row `rows` its bottom edge) and
// `vertical` the points on the vertical grid lines. A cell's bottom point
// and the top point of the cell below are the same slot, which keeps the
// mesh free of cracks.

use nannou::geom::{pt2, Point2};
use rand::Rng;

use crate::models::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub rows: usize,
    pub columns: usize,
}

/// Largest lattice a single surface is cut into, whatever the estimate.
pub const MAX_CELLS: usize = 1 << 20;

/// Relative slack allowed between the mesh size and the estimate. The mesh
/// grows in steps of four triangles, so small estimates also get +/- 2.
pub const COUNT_TOLERANCE: f64 = 0.2;

impl GridDimensions {
    pub const MINIMAL: Self = Self { rows: 1, columns: 1 };

    /// Picks a lattice whose mesh (4 * rows * columns + 2 triangles) lands
    /// within `tolerance(estimate)` of the estimate, preferring the most
    /// square cells among those that do.
    ///
    /// Candidates are the floor/ceil neighbours of the square-cell lattice
    /// plus a single strip of cells along the long side, which always meets
    /// the estimate, so extreme aspect ratios degrade to a strip instead of
    /// exploding the cell count.
    pub fn for_bounds(bounds: &Rect, estimated_count: usize) -> Self {
        let width = bounds.width as f64;
        let height = bounds.height as f64;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Self::MINIMAL;
        }

        let cells = (estimated_count.saturating_sub(2) as f64 / 4.0).clamp(1.0, MAX_CELLS as f64);
        let wanted = 4.0 * cells + 2.0;
        let tolerance = Self::tolerance(wanted);
        let aspect = height / width;

        // lattice sides that would give square cells
        let ideal_columns = (cells / aspect).sqrt().clamp(1.0, cells);
        let ideal_rows = (cells * aspect).sqrt().clamp(1.0, cells);

        let mut candidates = Vec::with_capacity(17);
        for columns in neighbours(ideal_columns) {
            for rows in neighbours(cells / columns as f64) {
                candidates.push(Self { rows, columns });
            }
        }
        for rows in neighbours(ideal_rows) {
            for columns in neighbours(cells / rows as f64) {
                candidates.push(Self { rows, columns });
            }
        }
        let strip = (cells.round() as usize).max(1);
        candidates.push(if aspect >= 1.0 {
            Self { rows: strip, columns: 1 }
        } else {
            Self { rows: 1, columns: strip }
        });

        candidates
            .into_iter()
            .min_by(|a, b| {
                let (error_a, error_b) = (a.count_error(wanted), b.count_error(wanted));
                (error_a > tolerance)
                    .cmp(&(error_b > tolerance))
                    .then(a.distortion(width, height).total_cmp(&b.distortion(width, height)))
                    .then(error_a.total_cmp(&error_b))
            })
            .unwrap_or(Self::MINIMAL)
    }

    /// Allowed distance between a mesh size and `estimate` triangles.
    pub fn tolerance(estimate: f64) -> f64 {
        (estimate * COUNT_TOLERANCE).max(2.0)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    pub fn triangle_count(&self) -> usize {
        self.cell_count().saturating_mul(4).saturating_add(2)
    }

    fn count_error(&self, wanted: f64) -> f64 {
        (self.triangle_count() as f64 - wanted).abs()
    }

    // 0 for square cells, growing with either elongation.
    fn distortion(&self, width: f64, height: f64) -> f64 {
        let cell_ratio = (width * self.rows as f64) / (height * self.columns as f64);
        cell_ratio.ln().abs()
    }
}

fn neighbours(x: f64) -> [usize; 2] {
    let clamp = |v: f64| v.clamp(1.0, MAX_CELLS as f64) as usize;
    [clamp(x.floor()), clamp(x.ceil())]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub top: Point2,
    pub bottom: Point2,
    pub left: Point2,
    pub right: Point2,
}

#[derive(Debug, Clone)]
pub struct BoundaryGrid {
    bounds: Rect,
    dimensions: GridDimensions,
    horizontal: Vec<Point2>, // (rows + 1) x columns
    vertical: Vec<Point2>,   // rows x (columns + 1)
}

impl BoundaryGrid {
    pub fn generate<R: Rng + ?Sized>(bounds: Rect, dimensions: GridDimensions, rng: &mut R) -> Self {
        let GridDimensions { rows, columns } = dimensions;
        let cell_width = bounds.width / columns as f32;
        let cell_height = bounds.height / rows as f32;
        let x_jitter = cell_width / 4.0;
        let y_jitter = cell_height / 4.0;

        let mut grid = Self {
            bounds,
            dimensions,
            horizontal: vec![Point2::ZERO; (rows + 1) * columns],
            vertical: vec![Point2::ZERO; rows * (columns + 1)],
        };

        let ox = bounds.x;
        let oy = bounds.y;

        // Only the top edge and the left edge are generated on their own;
        // everything else is produced as some cell's bottom or right point.
        for row in 0..rows {
            for column in 0..columns {
                let mid_x = (column as f32 + 0.5) * cell_width;
                let mid_y = (row as f32 + 0.5) * cell_height;

                if row == 0 {
                    let x = mid_x + jitter(rng, x_jitter);
                    *grid.horizontal_mut(0, column) = pt2(ox + x, oy);
                }

                if column == 0 {
                    let y = mid_y + jitter(rng, y_jitter);
                    *grid.vertical_mut(row, 0) = pt2(ox, oy + y);
                }

                let bottom_x = mid_x + jitter(rng, x_jitter);
                let bottom_y = if row == rows - 1 {
                    oy + bounds.height
                } else {
                    oy + (row + 1) as f32 * cell_height + jitter(rng, y_jitter)
                };
                *grid.horizontal_mut(row + 1, column) = pt2(ox + bottom_x, bottom_y);

                let right_x = if column == columns - 1 {
                    ox + bounds.width
                } else {
                    ox + (column + 1) as f32 * cell_width + jitter(rng, x_jitter)
                };
                let right_y = mid_y + jitter(rng, y_jitter);
                *grid.vertical_mut(row, column + 1) = pt2(right_x, oy + right_y);
            }
        }

        grid
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    pub fn columns(&self) -> usize {
        self.dimensions.columns
    }

    // Point on horizontal grid line `line` (0..=rows) inside column `column`.
    pub fn horizontal(&self, line: usize, column: usize) -> Point2 {
        self.horizontal[line * self.dimensions.columns + column]
    }

    // Point on vertical grid line `line` (0..=columns) inside row `row`.
    pub fn vertical(&self, row: usize, line: usize) -> Point2 {
        self.vertical[row * (self.dimensions.columns + 1) + line]
    }

    fn horizontal_mut(&mut self, line: usize, column: usize) -> &mut Point2 {
        let columns = self.dimensions.columns;
        &mut self.horizontal[line * columns + column]
    }

    fn vertical_mut(&mut self, row: usize, line: usize) -> &mut Point2 {
        let stride = self.dimensions.columns + 1;
        &mut self.vertical[row * stride + line]
    }

    pub fn cell(&self, row: usize, column: usize) -> GridCell {
        GridCell {
            row,
            column,
            top: self.horizontal(row, column),
            bottom: self.horizontal(row + 1, column),
            left: self.vertical(row, column),
            right: self.vertical(row, column + 1),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let columns = self.dimensions.columns;
        (0..self.dimensions.rows)
            .flat_map(move |row| (0..columns).map(move |column| (row, column)))
            .map(|(row, column)| self.cell(row, column))
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> f32 {
    if radius > 0.0 && radius.is_finite() {
        rng.gen_range(-radius..=radius)
    } else {
        0.0
    }
}
