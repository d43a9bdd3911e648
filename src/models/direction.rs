// src/models/direction.rs
//
// The eight directions the pieces can fly off in.
// Each one knows its travel vector and how to order the triangles
// so that the pieces nearest the leading side leave first.

use nannou::geom::{pt2, Point2};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f32::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use super::geometry::{distance, Rect, Triangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpperLeft,
        Direction::UpperRight,
        Direction::LowerLeft,
        Direction::LowerRight,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.gen()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpperLeft => "upper-left",
            Direction::UpperRight => "upper-right",
            Direction::LowerLeft => "lower-left",
            Direction::LowerRight => "lower-right",
        }
    }

    // The "down" vector (y grows downward) rotated by 0, pi, pi/2, -pi/2,
    // pi/4, -pi/4, 3pi/4 and -3pi/4, written out so the axes stay exact.
    fn unit(&self) -> (f32, f32) {
        let d = FRAC_1_SQRT_2;
        match self {
            Direction::Down => (0.0, 1.0),
            Direction::Up => (0.0, -1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::LowerLeft => (-d, d),
            Direction::LowerRight => (d, d),
            Direction::UpperLeft => (-d, -d),
            Direction::UpperRight => (d, -d),
        }
    }

    /// Displacement every piece travels, with length `min(width, height)`.
    pub fn travel_vector(&self, bounds: &Rect) -> Point2 {
        let magnitude = bounds.shortest_side();
        let (x, y) = self.unit();
        pt2(x * magnitude, y * magnitude)
    }

    // Corner the diagonal directions measure from.
    fn corner(&self, bounds: &Rect) -> Option<Point2> {
        match self {
            Direction::LowerLeft => Some(bounds.bottom_left()),
            Direction::LowerRight => Some(bounds.bottom_right()),
            Direction::UpperLeft => Some(bounds.top_left()),
            Direction::UpperRight => Some(bounds.top_right()),
            _ => None,
        }
    }

    /// Sort key: smaller keys animate first.
    pub fn ordering_key(&self, triangle: &Triangle, bounds: &Rect) -> f32 {
        let centroid = triangle.centroid();
        match self {
            Direction::Up => centroid.y,
            Direction::Down => -centroid.y,
            Direction::Left => centroid.x,
            Direction::Right => -centroid.x,
            _ => self
                .corner(bounds)
                .map(|corner| distance(centroid, corner))
                .unwrap_or(0.0),
        }
    }

    pub fn compare(&self, a: &Triangle, b: &Triangle, bounds: &Rect) -> Ordering {
        self.ordering_key(a, bounds)
            .total_cmp(&self.ordering_key(b, bounds))
    }

    // Stable, so equal keys keep emission order.
    pub fn sort(&self, triangles: &mut [Triangle], bounds: &Rect) {
        triangles.sort_by_cached_key(|t| OrderedKey(self.ordering_key(t, bounds)));
    }
}

// total_cmp wrapper so keys can be cached during the sort
#[derive(PartialEq)]
struct OrderedKey(f32);

impl Eq for OrderedKey {}

impl PartialOrd for OrderedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}
