// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the mapping between image space (the pixel grid of
//! the source image) and frame space (the on-screen canvas), including the
//! letterbox fit and the user's zoom/pan on top of it.

use crate::models::annotation::{Point, Rectangle, Size};

/// Uniform scale followed by a translation, image space to frame space:
/// `frame = image * scale + offset`.
///
/// `scale` is always positive, so every transformation is invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    pub offset: Point,
    pub scale: f64,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        offset: Point::ZERO,
        scale: 1.0,
    };

    /// Fit `subject` inside `frame` without cropping, keeping aspect ratio.
    ///
    /// Horizontal fit is tried first; the image is then flush with the left
    /// and right edges and centered vertically. If it would overflow
    /// vertically it is instead flush top and bottom and centered
    /// horizontally. Degenerate input yields the identity.
    pub fn fit_to_frame(frame: Size, subject: Size) -> Transformation {
        if subject.is_degenerate() {
            return Self::IDENTITY;
        }

        let scale_x = frame.width / subject.width;
        let fitted_height = subject.height * scale_x;
        let fitted = if fitted_height <= frame.height {
            Transformation {
                offset: Point::new(0.0, (frame.height - fitted_height) / 2.0),
                scale: scale_x,
            }
        } else {
            let scale_y = frame.height / subject.height;
            Transformation {
                offset: Point::new((frame.width - subject.width * scale_y) / 2.0, 0.0),
                scale: scale_y,
            }
        };

        fitted.or_identity()
    }

    /// Compose a zoom and a pan on top of this transformation.
    ///
    /// Zoom is anchored at the frame origin. The pan is added after zooming,
    /// so a given `view_offset` moves the picture by the same number of
    /// frame pixels whatever the zoom level.
    pub fn with_view_adjustment(&self, zoom: f64, view_offset: Point) -> Transformation {
        Transformation {
            offset: self.offset * zoom + view_offset,
            scale: self.scale * zoom,
        }
        .or_identity()
    }

    /// Image space to frame space.
    pub fn apply(&self, rect: &Rectangle) -> Rectangle {
        Rectangle {
            x: self.scale * rect.x + self.offset.x,
            y: self.scale * rect.y + self.offset.y,
            width: self.scale * rect.width,
            height: self.scale * rect.height,
        }
    }

    pub fn apply_point(&self, point: Point) -> Point {
        point * self.scale + self.offset
    }

    /// Frame space back to image space.
    ///
    /// With `round_to_integer` every field is rounded to the nearest pixel;
    /// that is what stored annotations use after any edit.
    pub fn revert(&self, rect: &Rectangle, round_to_integer: bool) -> Rectangle {
        let result = Rectangle {
            x: (rect.x - self.offset.x) / self.scale,
            y: (rect.y - self.offset.y) / self.scale,
            width: rect.width / self.scale,
            height: rect.height / self.scale,
        };

        if !round_to_integer {
            return result;
        }

        Rectangle {
            x: result.x.round(),
            y: result.y.round(),
            width: result.width.round(),
            height: result.height.round(),
        }
    }

    pub fn revert_point(&self, point: Point) -> Point {
        (point - self.offset) * (1.0 / self.scale)
    }

    fn or_identity(self) -> Transformation {
        let usable = self.scale.is_finite()
            && self.scale > 0.0
            && self.offset.x.is_finite()
            && self.offset.y.is_finite();
        if usable {
            self
        } else {
            log::debug!("Degenerate transformation {:?}, using identity", self);
            Self::IDENTITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_rect_close(a: &Rectangle, b: &Rectangle) {
        assert!((a.x - b.x).abs() < EPSILON, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < EPSILON, "{:?} != {:?}", a, b);
        assert!((a.width - b.width).abs() < EPSILON, "{:?} != {:?}", a, b);
        assert!((a.height - b.height).abs() < EPSILON, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_fit_square_into_wide_frame() {
        let t = Transformation::fit_to_frame(Size::new(400.0, 200.0), Size::new(800.0, 800.0));
        assert!((t.scale - 0.25).abs() < EPSILON);
        assert!((t.offset.x - 100.0).abs() < EPSILON);
        assert_eq!(t.offset.y, 0.0);
    }

    #[test]
    fn test_fit_wide_image_into_square_frame() {
        let t = Transformation::fit_to_frame(Size::new(300.0, 300.0), Size::new(600.0, 200.0));
        assert!((t.scale - 0.5).abs() < EPSILON);
        assert_eq!(t.offset.x, 0.0);
        assert!((t.offset.y - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_fit_exact_aspect_is_flush() {
        let t = Transformation::fit_to_frame(Size::new(200.0, 100.0), Size::new(400.0, 200.0));
        assert!((t.scale - 0.5).abs() < EPSILON);
        assert_eq!(t.offset, Point::ZERO);
    }

    #[test]
    fn test_fit_degenerate_input_is_identity() {
        let frame = Size::new(400.0, 200.0);
        assert_eq!(
            Transformation::fit_to_frame(frame, Size::new(0.0, 0.0)),
            Transformation::IDENTITY
        );
        assert_eq!(
            Transformation::fit_to_frame(frame, Size::new(100.0, -5.0)),
            Transformation::IDENTITY
        );
        assert_eq!(
            Transformation::fit_to_frame(Size::new(0.0, 0.0), Size::new(100.0, 100.0)),
            Transformation::IDENTITY
        );
    }

    #[test]
    fn test_round_trip_without_rounding() {
        let transforms = [
            Transformation::fit_to_frame(Size::new(400.0, 200.0), Size::new(800.0, 800.0)),
            Transformation::fit_to_frame(Size::new(1280.0, 720.0), Size::new(333.0, 1001.0)),
            Transformation::IDENTITY.with_view_adjustment(3.7, Point::new(-12.5, 40.25)),
        ];
        let rects = [
            Rectangle::new(0.0, 0.0, 1.0, 1.0),
            Rectangle::new(13.3, 77.7, 250.1, 0.5),
            Rectangle::new(-20.0, 1e4, 3.0, 999.0),
        ];

        for t in &transforms {
            for r in &rects {
                assert_rect_close(&t.revert(&t.apply(r), false), r);
            }
        }
    }

    #[test]
    fn test_revert_rounds_by_default_policy() {
        let t = Transformation {
            offset: Point::new(10.0, 0.0),
            scale: 0.3,
        };
        let frame = Rectangle::new(25.0, 7.0, 3.1, 30.0);
        let image = t.revert(&frame, true);

        assert_eq!(image, Rectangle::new(50.0, 23.0, 10.0, 100.0));
    }

    #[test]
    fn test_view_adjustment_composition() {
        let base = Transformation {
            offset: Point::new(100.0, 0.0),
            scale: 0.25,
        };
        let t = base.with_view_adjustment(2.0, Point::new(10.0, -5.0));

        assert!((t.scale - 0.5).abs() < EPSILON);
        assert_eq!(t.offset, Point::new(210.0, -5.0));
    }

    #[test]
    fn test_pan_has_constant_visual_meaning() {
        let base = Transformation::fit_to_frame(Size::new(400.0, 200.0), Size::new(800.0, 800.0));
        let image_point = Point::new(123.0, 456.0);
        let pan = Point::new(10.0, 0.0);

        for zoom in [1.0, 2.0, 0.5] {
            let unpanned = base.with_view_adjustment(zoom, Point::ZERO).apply_point(image_point);
            let panned = base.with_view_adjustment(zoom, pan).apply_point(image_point);
            let shift = panned - unpanned;
            assert!((shift.x - 10.0).abs() < EPSILON);
            assert!(shift.y.abs() < EPSILON);
        }
    }

    #[test]
    fn test_zero_zoom_falls_back_to_identity() {
        let base = Transformation::fit_to_frame(Size::new(400.0, 200.0), Size::new(800.0, 800.0));
        assert_eq!(
            base.with_view_adjustment(0.0, Point::ZERO),
            Transformation::IDENTITY
        );
    }

    #[test]
    fn test_point_round_trip() {
        let t = Transformation {
            offset: Point::new(3.0, -4.0),
            scale: 1.5,
        };
        let p = Point::new(7.0, 9.0);
        let back = t.revert_point(t.apply_point(p));
        assert!((back.x - p.x).abs() < EPSILON);
        assert!((back.y - p.y).abs() < EPSILON);
    }
}
