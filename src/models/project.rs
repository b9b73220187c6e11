// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-image annotation document.
//!
//! This is the shape the annotation store reads and writes: the image it
//! belongs to, free-form image tags, and the ordered annotation list.

use super::annotation::Annotation;
use serde::{Deserialize, Serialize};

/// Complete per-image data for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub media_file: String,
    pub image_width: u32,
    pub image_height: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ProjectData {
    /// Create an empty document for the given image and dimensions.
    pub fn new(media_file: String, image_width: u32, image_height: u32) -> Self {
        Self {
            media_file,
            image_width,
            image_height,
            tags: Vec::new(),
            annotations: Vec::new(),
        }
    }
}
