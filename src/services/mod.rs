pub mod boundary_grid;
pub mod plan;
pub mod triangulator;

pub use boundary_grid::{BoundaryGrid, GridCell, GridDimensions};
pub use plan::{plan, DisintegrationPlan, PlannedPiece};
pub use triangulator::{triangulate, DiagonalSplit, Triangulator};
