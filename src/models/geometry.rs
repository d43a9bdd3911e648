// src/models/geometry.rs
// Rectangles and triangles in surface coordinates (top-left origin, y down)

use nannou::geom::{pt2, Point2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    // Smallest rect containing every point. Empty input gives a zero rect.
    pub fn bounding(points: &[Point2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn min_y(&self) -> f32 {
        self.y
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point2 {
        pt2(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point2 {
        pt2(self.min_x(), self.min_y())
    }

    pub fn top_right(&self) -> Point2 {
        pt2(self.max_x(), self.min_y())
    }

    pub fn bottom_left(&self) -> Point2 {
        pt2(self.min_x(), self.max_y())
    }

    pub fn bottom_right(&self) -> Point2 {
        pt2(self.max_x(), self.max_y())
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// True when the rect cannot be tiled: non-positive or non-finite extent.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn shortest_side(&self) -> f32 {
        self.width.min(self.height)
    }

    // Converts logical points to device pixels.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point2; 3],
}

impl Triangle {
    /// Presentation-only enlargement that hides hairline seams between
    /// neighbouring pieces once they are rasterized separately.
    pub const SEAM_SCALE: f32 = 1.1;

    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    fn signed_double_area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)
    }

    pub fn area(&self) -> f32 {
        self.signed_double_area().abs() / 2.0
    }

    pub fn centroid(&self) -> Point2 {
        let [a, b, c] = self.vertices;
        pt2((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::bounding(&self.vertices)
    }

    pub fn scaled_vertices(&self) -> [Point2; 3] {
        let center = self.centroid();
        self.vertices
            .map(|v| center + (v - center) * Self::SEAM_SCALE)
    }

    // The particle's frame: bounds of the seam-scaled vertices.
    pub fn frame(&self) -> Rect {
        Rect::bounding(&self.scaled_vertices())
    }

    pub fn anchor(&self) -> Point2 {
        self.frame().center()
    }

    // Scaled vertices relative to the frame's top-left corner.
    pub fn clip_path(&self) -> [Point2; 3] {
        let origin = self.frame().top_left();
        self.scaled_vertices().map(|v| v - origin)
    }

    pub fn barycentric(&self, p: Point2) -> Option<[f32; 3]> {
        let [a, b, c] = self.vertices;
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if det == 0.0 {
            return None;
        }
        let l1 = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
        let l2 = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
        Some([l1, l2, 1.0 - l1 - l2])
    }

    // Inside or within `epsilon` (barycentric units) of an edge.
    pub fn contains(&self, p: Point2, epsilon: f32) -> bool {
        self.barycentric(p)
            .map(|weights| weights.iter().all(|w| *w >= -epsilon))
            .unwrap_or(false)
    }
}

pub fn distance(a: Point2, b: Point2) -> f32 {
    (a - b).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rect_tests {
        use super::*;

        #[test]
        fn test_rect_calculations() {
            let rect = Rect::new(10.0, 20.0, 100.0, 200.0);

            assert_eq!(rect.max_x(), 110.0);
            assert_eq!(rect.max_y(), 220.0);
            assert_eq!(rect.center(), pt2(60.0, 120.0));
            assert_eq!(rect.bottom_left(), pt2(10.0, 220.0));
            assert_eq!(rect.area(), 20000.0);
            assert_eq!(rect.shortest_side(), 100.0);
        }

        #[test]
        fn test_empty_rects() {
            assert!(Rect::from_size(0.0, 10.0).is_empty());
            assert!(Rect::from_size(10.0, -1.0).is_empty());
            assert!(Rect::from_size(f32::NAN, 10.0).is_empty());
            assert!(Rect::from_size(f32::INFINITY, 10.0).is_empty());
            assert!(!Rect::from_size(0.5, 0.5).is_empty());
        }

        #[test]
        fn test_bounding_and_scaled() {
            let rect = Rect::bounding(&[pt2(3.0, 9.0), pt2(-1.0, 2.0), pt2(5.0, 4.0)]);
            assert_eq!(rect, Rect::new(-1.0, 2.0, 6.0, 7.0));
            assert_eq!(rect.scaled(2.0), Rect::new(-2.0, 4.0, 12.0, 14.0));
            assert_eq!(Rect::bounding(&[]), Rect::default());
        }
    }

    mod triangle_tests {
        use super::*;

        fn right_triangle() -> Triangle {
            Triangle::new(pt2(0.0, 0.0), pt2(30.0, 0.0), pt2(0.0, 30.0))
        }

        #[test]
        fn test_area_ignores_winding() {
            let t = right_triangle();
            let reversed = Triangle::new(t.vertices[2], t.vertices[1], t.vertices[0]);
            assert_eq!(t.area(), 450.0);
            assert_eq!(reversed.area(), 450.0);
        }

        #[test]
        fn test_centroid_and_bounds() {
            let t = right_triangle();
            assert_eq!(t.centroid(), pt2(10.0, 10.0));
            assert_eq!(t.bounding_rect(), Rect::new(0.0, 0.0, 30.0, 30.0));
        }

        #[test]
        fn test_scaled_vertices_keep_centroid() {
            let t = right_triangle();
            let scaled = Triangle {
                vertices: t.scaled_vertices(),
            };
            let centroid = scaled.centroid();
            assert!((centroid.x - 10.0).abs() < 1e-4);
            assert!((centroid.y - 10.0).abs() < 1e-4);
            let ratio = scaled.area() / t.area();
            assert!((ratio - Triangle::SEAM_SCALE * Triangle::SEAM_SCALE).abs() < 1e-4);

            // the frame grows with the scaled vertices
            let frame = t.frame();
            assert!(frame.width > 30.0 && frame.height > 30.0);
            assert!((frame.x - -1.0).abs() < 1e-4);
        }

        #[test]
        fn test_clip_path_is_frame_local() {
            let t = Triangle::new(pt2(100.0, 50.0), pt2(130.0, 50.0), pt2(100.0, 80.0));
            let frame = t.frame();
            for p in t.clip_path() {
                assert!(p.x >= -1e-4 && p.x <= frame.width + 1e-4);
                assert!(p.y >= -1e-4 && p.y <= frame.height + 1e-4);
            }
            assert_eq!(t.anchor(), frame.center());
        }

        #[test]
        fn test_contains() {
            let t = right_triangle();
            assert!(t.contains(pt2(5.0, 5.0), 0.0));
            assert!(t.contains(pt2(15.0, 15.0), 1e-4));
            assert!(!t.contains(pt2(20.0, 20.0), 1e-4));

            let flat = Triangle::new(pt2(0.0, 0.0), pt2(1.0, 1.0), pt2(2.0, 2.0));
            assert!(!flat.contains(pt2(1.0, 1.0), 1e-4));
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(pt2(0.0, 0.0), pt2(3.0, 4.0)), 5.0);
    }
}
