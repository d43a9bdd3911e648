pub mod direction;
pub mod geometry;

pub use direction::{Direction, ParseDirectionError};
pub use geometry::{distance, Rect, Triangle};
