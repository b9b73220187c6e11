// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the annotation document and selection,
//! feeds canvas and keyboard input into the interaction core and applies
//! whatever the core hands back.

use crate::config::Config;
use crate::interaction::{
    apply_key, Direction, Interaction, InteractionAction, InteractionContext, InteractionEvent,
    KeyCommand,
};
use crate::io::media::LoadedImage;
use crate::models::annotation::Size;
use crate::models::image::ImageState;
use crate::models::project::ProjectData;
use crate::ui::{canvas, properties, toolbar};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Result of background image loading operation.
struct LoadedImageData {
    image: LoadedImage,
    project: ProjectData,
}

/// Main application state.
pub struct FrameboxApp {
    config: Config,

    /// Whether empty-area drags create annotations (otherwise they pan)
    annotation_mode: bool,

    /// Current annotation document (if an image is loaded)
    project: Option<ProjectData>,

    /// Index of currently selected annotation
    selected_annotation: Option<usize>,

    /// Loading status and natural size of the image
    image_state: ImageState,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Pointer state machine and zoom/pan
    interaction: Interaction,

    /// Canvas size seen on the last repaint
    frame_size: Size,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl Default for FrameboxApp {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FrameboxApp {
    /// Create a new application instance.
    pub fn new(config: Config) -> Self {
        let interaction = Interaction::new(config.interaction.clone());
        Self {
            config,
            annotation_mode: true,
            project: None,
            selected_annotation: None,
            image_state: ImageState::Loading,
            image_texture: None,
            interaction,
            frame_size: Size::default(),
            image_loader: None,
            loading_message: None,
        }
    }

    /// Feed one event through the interaction core and apply the result.
    fn dispatch(&mut self, event: InteractionEvent, frame: Size) {
        let annotations = self
            .project
            .as_ref()
            .map(|p| p.annotations.as_slice())
            .unwrap_or(&[]);
        let ctx = InteractionContext {
            image: &self.image_state,
            frame,
            annotations,
            annotation_mode: self.annotation_mode,
            selected: self.selected_annotation,
        };
        let actions = self.interaction.handle(event, &ctx);
        self.apply_actions(actions);
    }

    fn apply_actions(&mut self, actions: Vec<InteractionAction>) {
        for action in actions {
            match action {
                InteractionAction::AnnotationsChanged(annotations) => {
                    if let Some(ref mut project) = self.project {
                        project.annotations = annotations;
                    }
                }
                InteractionAction::SelectionChanged(selected) => {
                    self.selected_annotation = selected;
                    log::debug!("Selection: {:?}", selected);
                }
                InteractionAction::ViewChanged(view) => {
                    log::debug!("View: zoom {:.2}, offset {:?}", view.zoom, view.offset);
                }
            }
        }
    }

    /// Run a keyboard command against the selected annotation.
    fn apply_key_command(&mut self, command: KeyCommand) {
        let annotations = self
            .project
            .as_ref()
            .map(|p| p.annotations.as_slice())
            .unwrap_or(&[]);
        let result = apply_key(
            command,
            annotations,
            self.selected_annotation,
            self.config.interaction.nudge_step,
        );
        match result {
            Ok(actions) => self.apply_actions(actions),
            Err(e) => {
                log::warn!("{}, clearing selection", e);
                self.selected_annotation = None;
            }
        }
    }

    fn rename_annotation(&mut self, index: usize, label: String) {
        let Some(mut annotations) = self.project.as_ref().map(|p| p.annotations.clone()) else {
            return;
        };
        if let Some(annotation) = annotations.get_mut(index) {
            annotation.label = if label.is_empty() { None } else { Some(label) };
            self.apply_actions(vec![InteractionAction::AnnotationsChanged(annotations)]);
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Text fields (label editing) keep their keys.
        if ctx.wants_keyboard_input() {
            return;
        }

        let commands: Vec<KeyCommand> = ctx.input(|i| {
            let mut commands = Vec::new();
            if i.key_pressed(egui::Key::Escape) {
                commands.push(KeyCommand::Deselect);
            }
            if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
                commands.push(KeyCommand::DeleteSelected);
            }
            let arrows = [
                (egui::Key::ArrowLeft, Direction::Left),
                (egui::Key::ArrowRight, Direction::Right),
                (egui::Key::ArrowUp, Direction::Up),
                (egui::Key::ArrowDown, Direction::Down),
            ];
            for (key, direction) in arrows {
                if i.key_pressed(key) {
                    commands.push(KeyCommand::Nudge(direction));
                }
            }
            commands
        });

        for command in commands {
            self.apply_key_command(command);
        }
    }

    /// Export annotations to a file.
    fn export_annotations(&self, path: PathBuf) {
        if let Some(ref project) = self.project {
            match crate::io::serialization::export(project, &path) {
                Ok(_) => log::info!("Exported annotations to {}", path.display()),
                Err(e) => log::error!("Failed to export annotations: {}", e),
            }
        }
    }

    /// Import annotations from a file and load the associated image (asynchronously).
    pub fn import_annotations(&mut self, path: PathBuf) {
        self.start_loading("Loading annotations and image...", move || {
            let project = crate::io::serialization::import(&path)
                .map_err(|e| format!("Failed to import {}: {}", path.display(), e))?;

            log::info!(
                "Imported {} annotations from {}",
                project.annotations.len(),
                path.display()
            );

            // Load the referenced image file
            let image_path = PathBuf::from(&project.media_file);
            if !image_path.exists() {
                return Err(format!("Referenced image not found: {}", image_path.display()));
            }

            let image = crate::io::media::load_image(&image_path)
                .map_err(|e| format!("Failed to load image: {:#}", e))?;

            Ok(LoadedImageData { image, project })
        });
    }

    /// Load an image file and start a fresh annotation document for it (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        self.start_loading("Loading image...", move || {
            let image = crate::io::media::load_image(&path)
                .map_err(|e| format!("Failed to load image: {:#}", e))?;

            log::info!("Loaded image: {} ({}x{})", path.display(), image.width, image.height);

            let project = ProjectData::new(path.to_string_lossy().to_string(), image.width, image.height);
            Ok(LoadedImageData { image, project })
        });
    }

    fn start_loading<F>(&mut self, message: &str, load: F)
    where
        F: FnOnce() -> Result<LoadedImageData, String> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(message.to_string());
        self.image_state = ImageState::Loading;
        self.image_texture = None;
        self.project = None;
        self.selected_annotation = None;

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let _ = sender.send(load());
        });
    }

    /// Check for completed image loading.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };

        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let image = loaded.image;
                let size = Size::new(image.width as f64, image.height as f64);

                // Create egui texture from the loaded image data
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width as usize, image.height as usize],
                    &image.pixels,
                );
                self.image_texture = Some(ctx.load_texture(
                    "loaded_image",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.project = Some(loaded.project);
                self.image_state = ImageState::Loaded { size };
                self.interaction = Interaction::new(self.config.interaction.clone());
                log::info!("Image loaded successfully");
            }
            Err(e) => {
                log::error!("{}", e);
                self.image_state = ImageState::Failed { reason: e };
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Annotations...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Annotations", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_annotations(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.add_enabled_ui(self.project.is_some(), |ui| {
                        ui.menu_button("Export Annotations", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("annotations.yaml")
                                    .save_file()
                                {
                                    self.export_annotations(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("annotations.json")
                                    .save_file()
                                {
                                    self.export_annotations(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let has_selection = self.selected_annotation.is_some();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                        .clicked()
                    {
                        self.apply_key_command(KeyCommand::DeleteSelected);
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Deselect (Esc)"))
                        .clicked()
                    {
                        self.apply_key_command(KeyCommand::Deselect);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    let step = self.config.interaction.zoom_step;
                    if ui.button("Zoom In").clicked() {
                        self.dispatch(InteractionEvent::Zoom { factor: step }, self.frame_size);
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.dispatch(InteractionEvent::Zoom { factor: 1.0 / step }, self.frame_size);
                        ui.close_menu();
                    }
                    if ui.button("Reset View").clicked() {
                        self.dispatch(InteractionEvent::ResetView, self.frame_size);
                        ui.close_menu();
                    }
                });
            });
        });
    }
}

impl eframe::App for FrameboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        self.menu_bar(ctx);

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.annotation_mode, self.interaction.view())
            })
            .inner;

        let step = self.config.interaction.zoom_step;
        match toolbar_action {
            toolbar::ToolbarAction::ZoomIn => {
                self.dispatch(InteractionEvent::Zoom { factor: step }, self.frame_size)
            }
            toolbar::ToolbarAction::ZoomOut => {
                self.dispatch(InteractionEvent::Zoom { factor: 1.0 / step }, self.frame_size)
            }
            toolbar::ToolbarAction::ResetView => {
                self.dispatch(InteractionEvent::ResetView, self.frame_size)
            }
            toolbar::ToolbarAction::None => {}
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| {
                properties::show(ui, &self.project, self.selected_annotation)
            })
            .inner;

        match properties_action {
            properties::PropertiesAction::SelectAnnotation(idx) => {
                self.apply_actions(vec![InteractionAction::SelectionChanged(Some(idx))]);
            }
            properties::PropertiesAction::DeleteAnnotation(idx) => {
                self.selected_annotation = Some(idx);
                self.apply_key_command(KeyCommand::DeleteSelected);
            }
            properties::PropertiesAction::RenameAnnotation(idx, label) => {
                self.rename_annotation(idx, label);
            }
            properties::PropertiesAction::None => {}
        }

        self.handle_keyboard(ctx);

        // Main canvas (center)
        let output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    return None;
                }

                let annotations = self
                    .project
                    .as_ref()
                    .map(|p| p.annotations.as_slice())
                    .unwrap_or(&[]);
                Some(canvas::show(
                    ui,
                    self.image_texture.as_ref(),
                    &self.image_state,
                    annotations,
                    self.selected_annotation,
                    self.annotation_mode,
                    &self.interaction,
                ))
            })
            .inner;

        if let Some(output) = output {
            self.frame_size = output.frame;
            for event in output.events {
                self.dispatch(event, output.frame);
            }
        }
    }
}
