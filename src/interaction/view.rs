// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session-local zoom and pan.

use crate::models::annotation::{Point, Size};
use crate::models::image::ImageState;
use crate::util::geometry::Transformation;

/// User view adjustment applied on top of the fit-to-frame transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Multiplier on the fitted scale.
    pub zoom: f64,
    /// Extra translation in frame space, applied after zoom.
    pub offset: Point,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl ViewState {
    pub fn pan_by(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }

    /// Multiply the zoom, clamped to `[min_zoom, max_zoom]`.
    pub fn zoom_by(&mut self, factor: f64, min_zoom: f64, max_zoom: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(min_zoom, max_zoom);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Full image-to-frame transformation for this view.
    ///
    /// `None` while the image has no usable size (loading or failed); no
    /// transform math is done against an empty subject.
    pub fn transformation(&self, image: &ImageState, frame: Size) -> Option<Transformation> {
        let subject = image.subject_size()?;
        Some(Transformation::fit_to_frame(frame, subject).with_view_adjustment(self.zoom, self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = ViewState::default();
        view.zoom_by(100.0, 0.1, 20.0);
        assert_eq!(view.zoom, 20.0);
        view.zoom_by(1e-6, 0.1, 20.0);
        assert_eq!(view.zoom, 0.1);
        view.zoom_by(-3.0, 0.1, 20.0);
        assert_eq!(view.zoom, 0.1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut view = ViewState::default();
        view.pan_by(Point::new(3.0, 4.0));
        view.zoom_by(2.0, 0.1, 20.0);
        assert!(!view.is_default());

        view.reset();
        assert!(view.is_default());
    }

    #[test]
    fn test_no_transformation_without_loaded_image() {
        let view = ViewState::default();
        let frame = Size::new(400.0, 200.0);
        assert!(view.transformation(&ImageState::Loading, frame).is_none());

        let loaded = ImageState::Loaded {
            size: Size::new(800.0, 800.0),
        };
        let t = view.transformation(&loaded, frame).unwrap();
        assert_eq!(t.scale, 0.25);
    }
}
