// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar for arming annotation mode and for the
//! zoom and reset-view controls.

use crate::interaction::ViewState;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ZoomIn,
    ZoomOut,
    ResetView,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, annotation_mode: &mut bool, view: ViewState) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        if ui.selectable_label(!*annotation_mode, "✋ Pan").clicked() {
            *annotation_mode = false;
        }

        if ui.selectable_label(*annotation_mode, "⬚ Annotate").clicked() {
            *annotation_mode = true;
        }

        ui.separator();

        if ui.button("➖").on_hover_text("Zoom out").clicked() {
            action = ToolbarAction::ZoomOut;
        }
        ui.label(format!("{:.0}%", view.zoom * 100.0));
        if ui.button("➕").on_hover_text("Zoom in").clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui
            .add_enabled(!view.is_default(), egui::Button::new("Reset view"))
            .clicked()
        {
            action = ToolbarAction::ResetView;
        }

        ui.separator();

        let tool_text = if *annotation_mode {
            "Drag on the image to draw a box, click a box to select it"
        } else {
            "Drag to pan, scroll to zoom, click a box to select it"
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
