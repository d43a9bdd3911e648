// src/services/triangulator.rs
//
// Turns a BoundaryGrid into a triangle mesh that tiles the rectangle.
//
// The mesh is made of diamonds: one per cell (its four boundary points)
// and one around every interior lattice vertex (the four points of the
// cells meeting there). The strips along the rectangle's edges and the
// four corners are closed with single triangles.

use log::{debug, trace};
use nannou::geom::Point2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boundary_grid::{BoundaryGrid, GridDimensions};
use crate::models::{Direction, Rect, Triangle};

/// How each diamond is cut into two triangles.
///
/// `Alternating` flips a coin per diamond and cuts along either diagonal.
/// `Legacy` still flips the coin but always cuts along the vertical
/// diagonal, reproducing meshes made before the diagonals alternated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagonalSplit {
    #[default]
    Alternating,
    Legacy,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Triangulator {
    pub split: DiagonalSplit,
}

impl Triangulator {
    pub fn new(split: DiagonalSplit) -> Self {
        Self { split }
    }

    pub fn triangulate<R: Rng + ?Sized>(
        &self,
        bounds: Rect,
        estimated_count: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<Triangle> {
        if bounds.is_empty() {
            debug!("skipping triangulation of empty bounds {:?}", bounds);
            return Vec::new();
        }

        let dimensions = GridDimensions::for_bounds(&bounds, estimated_count);
        let grid = BoundaryGrid::generate(bounds, dimensions, rng);
        let mut triangles = self.mesh(&grid, rng);

        direction.sort(&mut triangles, &bounds);

        debug!(
            "triangulated {}x{} into {} triangles ({}x{} cells, estimate {})",
            bounds.width,
            bounds.height,
            triangles.len(),
            dimensions.rows,
            dimensions.columns,
            estimated_count
        );
        triangles
    }

    // Unsorted mesh in emission order.
    pub fn mesh<R: Rng + ?Sized>(&self, grid: &BoundaryGrid, rng: &mut R) -> Vec<Triangle> {
        let rows = grid.rows();
        let columns = grid.columns();
        let bounds = grid.bounds();
        let mut triangles = Vec::with_capacity(grid.dimensions().triangle_count());

        // corners
        let first = grid.cell(0, 0);
        let last_in_first_row = grid.cell(0, columns - 1);
        let first_in_last_row = grid.cell(rows - 1, 0);
        let last = grid.cell(rows - 1, columns - 1);
        triangles.push(Triangle::new(bounds.top_left(), first.top, first.left));
        triangles.push(Triangle::new(
            bounds.bottom_left(),
            first_in_last_row.left,
            first_in_last_row.bottom,
        ));
        triangles.push(Triangle::new(
            bounds.top_right(),
            last_in_first_row.top,
            last_in_first_row.right,
        ));
        triangles.push(Triangle::new(bounds.bottom_right(), last.bottom, last.right));
        trace!("corners: {} triangles", triangles.len());

        // cell diamonds
        for cell in grid.cells() {
            self.split_diamond(
                &mut triangles,
                [cell.top, cell.right, cell.bottom, cell.left],
                rng,
            );
        }
        trace!("cells: {} triangles", triangles.len());

        // top and bottom edge strips, then the diamonds around interior vertices
        for column in 1..columns {
            triangles.push(Triangle::new(
                grid.horizontal(0, column - 1),
                grid.vertical(0, column),
                grid.horizontal(0, column),
            ));
            triangles.push(Triangle::new(
                grid.horizontal(rows, column - 1),
                grid.vertical(rows - 1, column),
                grid.horizontal(rows, column),
            ));

            for row in 1..rows {
                let up = grid.vertical(row - 1, column);
                let right = grid.horizontal(row, column);
                let down = grid.vertical(row, column);
                let left = grid.horizontal(row, column - 1);
                self.split_diamond(&mut triangles, [up, right, down, left], rng);
            }
        }

        // left and right edge strips
        for row in 1..rows {
            triangles.push(Triangle::new(
                grid.vertical(row - 1, 0),
                grid.horizontal(row, 0),
                grid.vertical(row, 0),
            ));
            triangles.push(Triangle::new(
                grid.vertical(row - 1, columns),
                grid.horizontal(row, columns - 1),
                grid.vertical(row, columns),
            ));
        }
        trace!("total: {} triangles", triangles.len());

        triangles
    }

    // Diamond points in order: top, right, bottom, left.
    fn split_diamond<R: Rng + ?Sized>(
        &self,
        triangles: &mut Vec<Triangle>,
        [top, right, bottom, left]: [Point2; 4],
        rng: &mut R,
    ) {
        let flip: bool = rng.gen();
        let vertical = match self.split {
            DiagonalSplit::Alternating => flip,
            DiagonalSplit::Legacy => true,
        };

        if vertical {
            triangles.push(Triangle::new(top, left, bottom));
            triangles.push(Triangle::new(top, right, bottom));
        } else {
            triangles.push(Triangle::new(left, top, right));
            triangles.push(Triangle::new(left, bottom, right));
        }
    }
}

/// Tiles `bounds` with roughly `estimated_count` triangles sorted for `direction`.
/// Empty bounds give an empty mesh.
pub fn triangulate<R: Rng + ?Sized>(
    bounds: Rect,
    estimated_count: usize,
    direction: Direction,
    rng: &mut R,
) -> Vec<Triangle> {
    Triangulator::default().triangulate(bounds, estimated_count, direction, rng)
}
