//! Geometric primitives for detection results.
//!
//! Detector boxes are axis-aligned and given in absolute pixel coordinates as
//! `(x1, y1, x2, y2)`, top-left corner first.

use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: f32,
    /// Y-coordinate of the point.
    pub y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    /// Creates a bounding box from its two opposite corners.
    #[inline]
    pub fn from_xyxy(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the coordinates as `[x1, y1, x2, y2]`.
    #[inline]
    pub fn to_xyxy(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// The top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// True when every coordinate is finite and `x1 <= x2`, `y1 <= y2`.
    pub fn is_well_formed(&self) -> bool {
        self.to_xyxy().iter().all(|v| v.is_finite()) && self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Clips the box to an image of the given size and converts it to an
    /// integer rectangle for drawing.
    ///
    /// Returns `None` when nothing of the box remains inside the image.
    pub fn to_clamped_rect(&self, img_width: u32, img_height: u32) -> Option<Rect> {
        if img_width == 0 || img_height == 0 {
            return None;
        }
        let max_x = (img_width - 1) as f32;
        let max_y = (img_height - 1) as f32;

        let left = self.x1.round().clamp(0.0, max_x) as i32;
        let top = self.y1.round().clamp(0.0, max_y) as i32;
        let right = self.x2.round().clamp(0.0, max_x) as i32;
        let bottom = self.y2.round().clamp(0.0, max_y) as i32;

        let width = (right - left + 1).max(0) as u32;
        let height = (bottom - top + 1).max(0) as u32;

        // Boxes fully outside the image collapse onto an edge.
        let outside = self.x2 < 0.0
            || self.y2 < 0.0
            || self.x1 > max_x + 1.0
            || self.y1 > max_y + 1.0;

        (!outside && width > 0 && height > 0).then(|| Rect::at(left, top).of_size(width, height))
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(coords: [f32; 4]) -> Self {
        Self::from_xyxy(coords[0], coords[1], coords[2], coords[3])
    }
}
