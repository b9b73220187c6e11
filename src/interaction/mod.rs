// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer and keyboard interaction over the annotated image.
//!
//! Nothing in here depends on egui; the canvas in `ui` translates its
//! input into [`InteractionEvent`]s and applies the returned
//! [`InteractionAction`]s.

pub mod keys;
pub mod machine;
pub mod shape;
pub mod view;

pub use keys::{apply_key, Direction, KeyCommand};
pub use machine::{
    DragMode, DragSession, Interaction, InteractionAction, InteractionContext, InteractionEvent,
    InteractionState, Preview,
};
pub use shape::{Corner, PointerTarget, ResizeGesture};
pub use view::ViewState;
