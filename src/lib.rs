// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangle annotation over an image fitted into a display frame.
//!
//! The core is the transform engine in [`util::geometry`] and the pointer
//! state machine in [`interaction`]; neither depends on egui. The egui host
//! lives in [`app`] and [`ui`].

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod interaction;
pub mod io;
pub mod models;
pub mod ui;
pub mod util;

pub use app::FrameboxApp;
pub use config::Config;
pub use error::EditError;
pub use interaction::{Interaction, InteractionAction, InteractionContext, InteractionEvent};
pub use models::annotation::{Annotation, Point, Rectangle, Size};
pub use models::image::ImageState;
pub use util::geometry::Transformation;
