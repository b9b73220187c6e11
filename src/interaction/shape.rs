// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-annotation manipulation: hit testing, body moves and corner resizes.
//!
//! Everything here works on the displayed (frame space) rectangle. Edits
//! are converted back to image space only when committed.

use crate::models::annotation::{Annotation, Point, Rectangle};
use crate::util::geometry::Transformation;

/// A corner of an annotation box, used for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Location of this corner on `rect`.
    pub fn position(&self, rect: &Rectangle) -> Point {
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;
        match self {
            Corner::TopLeft => Point::new(rect.x, rect.y),
            Corner::TopRight => Point::new(right, rect.y),
            Corner::BottomLeft => Point::new(rect.x, bottom),
            Corner::BottomRight => Point::new(right, bottom),
        }
    }

    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// What a pointer-down landed on.
///
/// `Background` is the empty canvas (the image itself counts as
/// background); anything else is an annotation's body or one of its
/// resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Background,
    Annotation(usize),
    ResizeHandle(usize, Corner),
}

impl PointerTarget {
    pub fn is_background(&self) -> bool {
        matches!(self, PointerTarget::Background)
    }
}

/// Square handle of side `handle_size` centered on `corner` of `rect`.
pub fn handle_rect(rect: &Rectangle, corner: Corner, handle_size: f64) -> Rectangle {
    let center = corner.position(rect);
    let half = handle_size / 2.0;
    Rectangle::new(center.x - half, center.y - half, handle_size, handle_size)
}

/// Resolve which displayed annotation (if any) is under `point`.
///
/// Later annotations are drawn on top, so they win. Handles exist only on
/// the selected annotation and take precedence over every body.
pub fn hit_test(
    point: Point,
    displayed: &[Rectangle],
    selected: Option<usize>,
    handle_size: f64,
) -> PointerTarget {
    if let Some(index) = selected {
        if let Some(rect) = displayed.get(index) {
            for corner in Corner::ALL {
                if handle_rect(rect, corner, handle_size).contains(point) {
                    return PointerTarget::ResizeHandle(index, corner);
                }
            }
        }
    }

    displayed
        .iter()
        .enumerate()
        .rev()
        .find(|(_, rect)| rect.contains(point))
        .map(|(index, _)| PointerTarget::Annotation(index))
        .unwrap_or(PointerTarget::Background)
}

/// Accept `proposed` only if both sides are at least `min_size`.
pub fn bound_box(old: &Rectangle, proposed: Rectangle, min_size: f64) -> Rectangle {
    if proposed.width < min_size || proposed.height < min_size {
        *old
    } else {
        proposed
    }
}

/// Body drag: new position, old size.
pub fn moved(displayed: &Rectangle, delta: Point) -> Rectangle {
    displayed.translate(delta)
}

/// An in-progress corner resize of one displayed box.
///
/// The box is tracked as scale factors relative to the size it had when the
/// gesture started. Committing folds the scale into the size and resets it
/// to 1, so committing twice does not compound.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    original: Rectangle,
    corner: Corner,
    min_size: f64,
    x: f64,
    y: f64,
    scale_x: f64,
    scale_y: f64,
}

impl ResizeGesture {
    pub fn new(original: Rectangle, corner: Corner, min_size: f64) -> Self {
        Self {
            original,
            corner,
            min_size,
            x: original.x,
            y: original.y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn original(&self) -> Rectangle {
        self.original
    }

    /// Current scale factors relative to the original size.
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Box currently shown for this gesture.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            self.x,
            self.y,
            self.original.width * self.scale_x,
            self.original.height * self.scale_y,
        )
    }

    pub fn is_resized(&self) -> bool {
        self.bounds() != self.original
    }

    /// Move the dragged corner by `delta` from where the gesture started.
    ///
    /// The opposite corner stays put. Proposals smaller than the minimum
    /// size are rejected and the previous box is kept.
    pub fn drag_to(&mut self, delta: Point) {
        let anchor = self.corner.opposite().position(&self.original);
        let dragged = self.corner.position(&self.original) + delta;
        let proposed = Rectangle::from_two_points(anchor, dragged);
        let accepted = bound_box(&self.bounds(), proposed, self.min_size);

        self.x = accepted.x;
        self.y = accepted.y;
        self.scale_x = ratio(accepted.width, self.original.width);
        self.scale_y = ratio(accepted.height, self.original.height);
    }

    /// Fold the scale into the size and reset it.
    pub fn commit(&mut self) -> Rectangle {
        let committed = Rectangle::new(
            self.x,
            self.y,
            (self.original.width * self.scale_x).max(self.min_size),
            (self.original.height * self.scale_y).max(self.min_size),
        );
        self.original = committed;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        committed
    }
}

fn ratio(new: f64, original: f64) -> f64 {
    if original > 0.0 {
        new / original
    } else {
        1.0
    }
}

/// Write an edited frame-space box back into a copy of the list.
///
/// Returns `None` when `index` is stale or the rounded image-space
/// rectangle equals what is already stored.
pub fn commit_edit(
    annotations: &[Annotation],
    index: usize,
    frame_rect: &Rectangle,
    transform: &Transformation,
) -> Option<Vec<Annotation>> {
    let stored = annotations.get(index)?;
    let image_rect = transform.revert(frame_rect, true);
    if image_rect == stored.rect {
        return None;
    }

    let mut updated = annotations.to_vec();
    updated[index] = stored.with_rect(image_rect);
    Some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_prefers_topmost() {
        let displayed = [
            Rectangle::new(0.0, 0.0, 100.0, 100.0),
            Rectangle::new(50.0, 50.0, 100.0, 100.0),
        ];
        assert_eq!(
            hit_test(Point::new(75.0, 75.0), &displayed, None, 8.0),
            PointerTarget::Annotation(1)
        );
        assert_eq!(
            hit_test(Point::new(10.0, 10.0), &displayed, None, 8.0),
            PointerTarget::Annotation(0)
        );
        assert!(hit_test(Point::new(300.0, 300.0), &displayed, None, 8.0).is_background());
    }

    #[test]
    fn test_handles_only_on_selected() {
        let displayed = [
            Rectangle::new(0.0, 0.0, 100.0, 100.0),
            Rectangle::new(50.0, 50.0, 100.0, 100.0),
        ];
        // Bottom-right corner of box 0 lies inside box 1.
        let corner = Point::new(101.0, 99.0);
        assert_eq!(
            hit_test(corner, &displayed, None, 8.0),
            PointerTarget::Annotation(1)
        );
        assert_eq!(
            hit_test(corner, &displayed, Some(0), 8.0),
            PointerTarget::ResizeHandle(0, Corner::BottomRight)
        );
    }

    #[test]
    fn test_bound_box_rejects_small_proposals() {
        let old = Rectangle::new(0.0, 0.0, 50.0, 50.0);
        assert_eq!(bound_box(&old, Rectangle::new(0.0, 0.0, 2.0, 60.0), 5.0), old);
        assert_eq!(bound_box(&old, Rectangle::new(0.0, 0.0, 60.0, 4.9), 5.0), old);
        let ok = Rectangle::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(bound_box(&old, ok, 5.0), ok);
    }

    #[test]
    fn test_resize_from_bottom_right() {
        let mut gesture = ResizeGesture::new(Rectangle::new(10.0, 10.0, 40.0, 20.0), Corner::BottomRight, 5.0);
        gesture.drag_to(Point::new(40.0, 20.0));

        assert_eq!(gesture.scale(), (2.0, 2.0));
        assert_eq!(gesture.bounds(), Rectangle::new(10.0, 10.0, 80.0, 40.0));
    }

    #[test]
    fn test_resize_from_top_left_keeps_bottom_right() {
        let mut gesture = ResizeGesture::new(Rectangle::new(10.0, 10.0, 40.0, 20.0), Corner::TopLeft, 5.0);
        gesture.drag_to(Point::new(20.0, 5.0));

        assert_eq!(gesture.bounds(), Rectangle::new(30.0, 15.0, 20.0, 15.0));
    }

    #[test]
    fn test_resize_below_floor_keeps_previous_box() {
        let original = Rectangle::new(10.0, 10.0, 40.0, 20.0);
        let mut gesture = ResizeGesture::new(original, Corner::BottomRight, 5.0);
        gesture.drag_to(Point::new(10.0, 0.0));
        let accepted = gesture.bounds();

        gesture.drag_to(Point::new(-38.0, -18.0));
        assert_eq!(gesture.bounds(), accepted);
        assert!(gesture.is_resized());

        let mut untouched = ResizeGesture::new(original, Corner::BottomRight, 5.0);
        untouched.drag_to(Point::new(-38.0, -18.0));
        assert!(!untouched.is_resized());
    }

    #[test]
    fn test_commit_does_not_compound() {
        let mut gesture = ResizeGesture::new(Rectangle::new(0.0, 0.0, 10.0, 10.0), Corner::BottomRight, 5.0);
        gesture.drag_to(Point::new(10.0, 10.0));

        let first = gesture.commit();
        assert_eq!(first, Rectangle::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(gesture.scale(), (1.0, 1.0));
        assert_eq!(gesture.commit(), first);
    }

    #[test]
    fn test_commit_edit_copies_and_skips_noops() {
        let annotations = vec![Annotation::new(Rectangle::new(10.0, 10.0, 20.0, 20.0))];
        let t = Transformation {
            offset: Point::new(5.0, 5.0),
            scale: 2.0,
        };

        let unchanged = t.apply(&annotations[0].rect);
        assert!(commit_edit(&annotations, 0, &unchanged, &t).is_none());
        assert!(commit_edit(&annotations, 3, &unchanged, &t).is_none());

        let shifted = moved(&unchanged, Point::new(10.0, 0.0));
        let updated = commit_edit(&annotations, 0, &shifted, &t).unwrap();
        assert_eq!(updated[0].rect, Rectangle::new(15.0, 10.0, 20.0, 20.0));
        assert_eq!(annotations[0].rect, Rectangle::new(10.0, 10.0, 20.0, 20.0));
    }
}
