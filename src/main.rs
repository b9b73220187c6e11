// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! framebox - rectangle annotation over fitted images
//!
//! A cross-platform desktop application for drawing, selecting, moving and
//! resizing bounding boxes on an image, stored in image pixel coordinates.

use anyhow::Result;
use framebox::{Config, FrameboxApp};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::from_env().unwrap_or_else(|e| {
        log::error!("{}; using default configuration", e);
        Config::default()
    });

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("framebox"),
        ..Default::default()
    };

    let mut app = FrameboxApp::new(config);

    // Optional image or annotation file to open right away
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") | Some("yaml") | Some("yml") => app.import_annotations(path),
            _ => app.load_image_file(path),
        }
    }

    // Run the application
    eframe::run_native(
        "framebox",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
