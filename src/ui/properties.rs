// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation properties panel.
//!
//! This module provides the side panel listing the annotations of the
//! current image, with selection, label editing and deletion.

use crate::models::project::ProjectData;

/// Result of properties panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    SelectAnnotation(usize),
    DeleteAnnotation(usize),
    RenameAnnotation(usize, String),
}

/// Display the properties panel.
pub fn show(
    ui: &mut egui::Ui,
    project: &Option<ProjectData>,
    selected: Option<usize>,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    let Some(project) = project else {
        ui.weak("No image loaded");
        return action;
    };

    ui.heading("Image");
    ui.label(&project.media_file);
    ui.label(format!("{} × {} px", project.image_width, project.image_height));
    if !project.tags.is_empty() {
        ui.label(format!("Tags: {}", project.tags.join(", ")));
    }

    ui.separator();
    ui.heading(format!("Annotations ({})", project.annotations.len()));

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, annotation) in project.annotations.iter().enumerate() {
            let is_selected = selected == Some(i);
            let r = &annotation.rect;

            ui.horizontal(|ui| {
                let title = format!("#{} ({}, {}) {}×{}", i, r.x, r.y, r.width, r.height);
                if ui.selectable_label(is_selected, title).clicked() {
                    action = PropertiesAction::SelectAnnotation(i);
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    action = PropertiesAction::DeleteAnnotation(i);
                }
            });

            if is_selected {
                ui.horizontal(|ui| {
                    ui.label("Label:");
                    let mut label = annotation.label.clone().unwrap_or_default();
                    if ui.text_edit_singleline(&mut label).changed() {
                        action = PropertiesAction::RenameAnnotation(i, label);
                    }
                });
            }
        }
    });

    action
}
