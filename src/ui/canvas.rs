// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and annotation.
//!
//! This module draws the image fitted into the central panel with the
//! annotations on top, and turns egui pointer input into interaction
//! events. It holds no state of its own; the canvas rectangle is the frame
//! and everything is recomputed every repaint.

use crate::config::InteractionConfig;
use crate::interaction::shape::{self, Corner};
use crate::interaction::{Interaction, InteractionContext, InteractionEvent, Preview};
use crate::models::annotation::{Annotation, Point, Rectangle, Size};
use crate::models::image::ImageState;

/// Fill of unselected annotations without an explicit color.
const DEFAULT_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(77, 30, 30, 77);
/// Fill of the selected annotation without an explicit color.
const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(179, 70, 70, 179);
/// Fill of the rectangle being drawn.
const DRAFT_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 128);
const EXPLICIT_OPACITY: f32 = 0.5;

/// What the canvas saw this frame.
pub struct CanvasOutput {
    /// Size of the drawing area, i.e. the frame.
    pub frame: Size,
    pub events: Vec<InteractionEvent>,
}

/// Display the canvas and collect pointer events.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    image: &ImageState,
    annotations: &[Annotation],
    selected: Option<usize>,
    annotation_mode: bool,
    interaction: &Interaction,
) -> CanvasOutput {
    let (canvas_rect, response) =
        ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let frame = Size::new(canvas_rect.width() as f64, canvas_rect.height() as f64);
    let painter = ui.painter_at(canvas_rect);
    painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

    let ctx = InteractionContext {
        image,
        frame,
        annotations,
        annotation_mode,
        selected,
    };

    // Loading or failed: empty frame, no interaction.
    let (Some(transform), Some(subject)) = (interaction.transformation(&ctx), image.subject_size())
    else {
        return CanvasOutput {
            frame,
            events: Vec::new(),
        };
    };

    let to_screen = |r: &Rectangle| {
        egui::Rect::from_min_size(
            canvas_rect.min + egui::vec2(r.x as f32, r.y as f32),
            egui::vec2(r.width as f32, r.height as f32),
        )
    };

    if let Some(texture) = texture {
        let image_rect = transform.apply(&Rectangle::new(0.0, 0.0, subject.width, subject.height));
        painter.image(
            texture.id(),
            to_screen(&image_rect),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    let handle_size = interaction.config().handle_size;
    let preview = interaction.preview(&ctx);
    let displayed: Vec<Rectangle> = annotations
        .iter()
        .map(|a| transform.apply(&a.rect))
        .collect();

    for (i, annotation) in annotations.iter().enumerate() {
        let rect = match preview {
            Some(Preview {
                index: Some(index),
                rect,
            }) if index == i => rect,
            _ => displayed[i],
        };
        let is_selected = selected == Some(i);
        draw_annotation(&painter, annotation, to_screen(&rect), is_selected);
    }

    if let Some(Preview { index: None, rect }) = preview {
        painter.rect_filled(to_screen(&rect), 0.0, DRAFT_FILL);
    }

    if let Some(index) = selected {
        let rect = match preview {
            Some(Preview {
                index: Some(p),
                rect,
            }) if p == index => Some(rect),
            _ => displayed.get(index).copied(),
        };
        if let Some(rect) = rect {
            draw_handles(&painter, &rect, handle_size, &to_screen);
        }
    }

    let to_frame = |pos: egui::Pos2| {
        Point::new(
            (pos.x - canvas_rect.min.x) as f64,
            (pos.y - canvas_rect.min.y) as f64,
        )
    };
    let (pressed, released, pointer_pos, scroll) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
            i.smooth_scroll_delta.y,
        )
    });
    let inside = pointer_pos.filter(|p| canvas_rect.contains(*p));

    let mut events = Vec::new();
    if let Some(pos) = inside {
        let position = to_frame(pos);
        if pressed && response.hovered() {
            let target = shape::hit_test(position, &displayed, selected, handle_size);
            events.push(InteractionEvent::PointerDown { position, target });
        }
        if interaction.is_dragging() || pressed {
            events.push(InteractionEvent::PointerMove { position });
        }
        if released {
            events.push(InteractionEvent::PointerUp { position });
        }
    } else if interaction.is_dragging() {
        events.push(InteractionEvent::PointerLeave);
    }

    // The view stays put while a drag is in progress.
    if response.hovered() && scroll != 0.0 && !interaction.is_dragging() {
        events.push(InteractionEvent::Zoom {
            factor: scroll_zoom_factor(scroll as f64, interaction.config()),
        });
    }

    CanvasOutput { frame, events }
}

/// Zoom multiplier for a scroll of `scroll` points; always positive.
fn scroll_zoom_factor(scroll: f64, config: &InteractionConfig) -> f64 {
    config.zoom_step.powf(scroll / config.scroll_per_zoom_step)
}

/// Fill color: an explicit per-annotation color wins, otherwise the
/// selected/unselected default.
fn fill_color(annotation: &Annotation, is_selected: bool) -> egui::Color32 {
    let explicit = annotation
        .color
        .as_deref()
        .and_then(|hex| egui::Color32::from_hex(hex).ok());
    match explicit {
        Some(color) => color.gamma_multiply(EXPLICIT_OPACITY),
        None if is_selected => SELECTED_FILL,
        None => DEFAULT_FILL,
    }
}

/// Draw one annotation box and its label.
fn draw_annotation(
    painter: &egui::Painter,
    annotation: &Annotation,
    rect: egui::Rect,
    is_selected: bool,
) {
    painter.rect_filled(rect, 0.0, fill_color(annotation, is_selected));
    let outline = if is_selected {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_gray(200)
    };
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, outline));

    if let Some(label) = &annotation.label {
        painter.text(
            rect.left_top(),
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::proportional(12.0),
            outline,
        );
    }
}

fn draw_handles(
    painter: &egui::Painter,
    rect: &Rectangle,
    handle_size: f64,
    to_screen: &impl Fn(&Rectangle) -> egui::Rect,
) {
    for corner in Corner::ALL {
        let handle = to_screen(&shape::handle_rect(rect, corner, handle_size));
        painter.rect_filled(handle, 0.0, egui::Color32::WHITE);
        painter.rect_stroke(handle, 0.0, egui::Stroke::new(1.0, egui::Color32::from_rgb(30, 120, 255)));
    }
}
