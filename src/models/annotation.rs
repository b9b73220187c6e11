// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the plain geometry values (points, sizes, rectangles)
//! and the rectangular annotation record. None of these values carry the
//! coordinate space they live in: callers track whether a value is in image
//! space or frame space.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Width and height of something.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize two arbitrary corner points into a rectangle.
    ///
    /// A drag may proceed in any of the four diagonal directions, so the
    /// corners are sorted per axis.
    pub fn from_two_points(p1: Point, p2: Point) -> Self {
        Self {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            width: (p1.x - p2.x).abs(),
            height: (p1.y - p2.y).abs(),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, shifted by `delta`.
    pub fn translate(&self, delta: Point) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Check whether a point lies inside (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// A rectangular region of interest on an image.
///
/// Geometry is stored in image space. Any fields the store attaches that
/// this crate does not interpret (tags and the like) are kept in `extra`
/// and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(flatten)]
    pub rect: Rectangle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Annotation {
    /// Create a bare annotation covering `rect`.
    pub fn new(rect: Rectangle) -> Self {
        Self {
            rect,
            color: None,
            label: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Copy of this annotation with new geometry; metadata is kept.
    pub fn with_rect(&self, rect: Rectangle) -> Self {
        Self {
            rect,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_from_two_points_any_order() {
        let expected = Rectangle::new(10.0, 20.0, 40.0, 60.0);
        let a = Point::new(50.0, 80.0);
        let b = Point::new(10.0, 20.0);

        assert_eq!(Rectangle::from_two_points(a, b), expected);
        assert_eq!(Rectangle::from_two_points(b, a), expected);
        assert_eq!(
            Rectangle::from_two_points(Point::new(10.0, 80.0), Point::new(50.0, 20.0)),
            expected
        );
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(Size::new(0.0, 10.0).is_degenerate());
        assert!(Size::new(10.0, -1.0).is_degenerate());
        assert!(Size::new(f64::NAN, 10.0).is_degenerate());
        assert!(!Size::new(1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_annotation_keeps_unknown_fields() {
        let json = r#"{"x":1,"y":2,"width":3,"height":4,"tags":["car"]}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();

        assert_eq!(annotation.rect, Rectangle::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(annotation.color, None);
        assert_eq!(annotation.label, None);
        assert_eq!(annotation.extra["tags"], serde_json::json!(["car"]));

        let moved = annotation.with_rect(Rectangle::new(5.0, 6.0, 3.0, 4.0));
        let value = serde_json::to_value(&moved).unwrap();
        assert_eq!(value["x"], serde_json::json!(5.0));
        assert_eq!(value["tags"], serde_json::json!(["car"]));
        assert!(value.get("color").is_none());
    }
}
