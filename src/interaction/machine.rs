// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer interaction state machine.
//!
//! Turns raw pointer-down/move/up/leave events into annotation creation,
//! moves, resizes, selection changes and panning. The machine never owns
//! the annotation list: it receives the current list with every event and
//! answers with [`InteractionAction`]s carrying a fresh copy when something
//! changed. The host decides what committing that copy means.

use super::shape::{self, Corner, PointerTarget, ResizeGesture};
use super::view::ViewState;
use crate::config::InteractionConfig;
use crate::models::annotation::{Annotation, Point, Rectangle, Size};
use crate::models::image::ImageState;
use crate::util::geometry::Transformation;

/// What an active drag is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum DragMode {
    /// Rubber-banding a new annotation.
    CreatingAnnotation,
    /// Moving the whole picture.
    Panning,
    /// Dragging the body of the selected annotation.
    MovingSelected { index: usize },
    /// Dragging a corner handle of the selected annotation.
    ResizingSelected { index: usize, gesture: ResizeGesture },
}

/// Transient state between pointer-down and pointer-up, in frame space.
///
/// `transform` is the image-to-frame mapping at pointer-down. Every point
/// and rectangle in the session is relative to it, so commits go back to
/// image space through it even if the frame was resized in between.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub origin: Point,
    pub current: Point,
    pub mode: DragMode,
    pub transform: Transformation,
}

impl DragSession {
    fn new(position: Point, mode: DragMode, transform: Transformation) -> Self {
        Self {
            origin: position,
            current: position,
            mode,
            transform,
        }
    }

    fn delta(&self) -> Point {
        self.current - self.origin
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Input to the state machine. Positions are in frame space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    PointerDown { position: Point, target: PointerTarget },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// The pointer left the interaction surface.
    PointerLeave,
    /// Explicit request to clear the selection (Escape and the like).
    Deselect,
    /// Zoom back to 1 and drop any pan. Ignored during a drag.
    ResetView,
    /// Multiply the current zoom. Ignored during a drag.
    Zoom { factor: f64 },
}

/// Output of the state machine, for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionAction {
    /// A new annotation list to store in place of the current one.
    AnnotationsChanged(Vec<Annotation>),
    /// The selected index changed; `None` clears the selection.
    SelectionChanged(Option<usize>),
    /// Zoom or pan changed.
    ViewChanged(ViewState),
}

/// Everything the host supplies alongside each event.
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub image: &'a ImageState,
    pub frame: Size,
    pub annotations: &'a [Annotation],
    /// When set, empty-area drags create annotations instead of panning.
    pub annotation_mode: bool,
    pub selected: Option<usize>,
}

/// The in-progress rectangle to draw while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    /// Annotation being moved or resized; `None` for a new rectangle.
    pub index: Option<usize>,
    /// Frame-space rectangle.
    pub rect: Rectangle,
}

/// Pointer interaction state plus the view it drives.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
    view: ViewState,
    config: InteractionConfig,
}

impl Interaction {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            view: ViewState::default(),
            config,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Current image-to-frame transformation, if the image is usable.
    pub fn transformation(&self, ctx: &InteractionContext<'_>) -> Option<Transformation> {
        self.view.transformation(ctx.image, ctx.frame)
    }

    /// Feed one event through the machine.
    pub fn handle(
        &mut self,
        event: InteractionEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<InteractionAction> {
        match event {
            InteractionEvent::PointerDown { position, target } => {
                self.pointer_down(position, target, ctx)
            }
            InteractionEvent::PointerMove { position } => self.pointer_move(position),
            InteractionEvent::PointerUp { position } => self.pointer_up(position, ctx),
            InteractionEvent::PointerLeave => {
                if self.is_dragging() {
                    log::debug!("Pointer left the canvas, dropping drag session");
                }
                self.state = InteractionState::Idle;
                Vec::new()
            }
            InteractionEvent::Deselect => match ctx.selected {
                Some(_) => vec![InteractionAction::SelectionChanged(None)],
                None => Vec::new(),
            },
            InteractionEvent::ResetView | InteractionEvent::Zoom { .. } if self.is_dragging() => {
                log::debug!("Ignoring {:?} during a drag", event);
                Vec::new()
            }
            InteractionEvent::ResetView => {
                self.view.reset();
                log::debug!("View reset");
                vec![InteractionAction::ViewChanged(self.view)]
            }
            InteractionEvent::Zoom { factor } => {
                let before = self.view;
                self.view
                    .zoom_by(factor, self.config.min_zoom, self.config.max_zoom);
                if self.view == before {
                    Vec::new()
                } else {
                    vec![InteractionAction::ViewChanged(self.view)]
                }
            }
        }
    }

    fn pointer_down(
        &mut self,
        position: Point,
        target: PointerTarget,
        ctx: &InteractionContext<'_>,
    ) -> Vec<InteractionAction> {
        // A down while dragging means the matching up was lost.
        self.state = InteractionState::Idle;

        let Some(transform) = self.transformation(ctx) else {
            return Vec::new();
        };

        match target {
            PointerTarget::Background => {
                if ctx.selected.is_some() {
                    // First click after a selection only clears it.
                    return vec![InteractionAction::SelectionChanged(None)];
                }
                let mode = if ctx.annotation_mode {
                    DragMode::CreatingAnnotation
                } else {
                    DragMode::Panning
                };
                log::debug!("Drag started at {:?} ({:?})", position, mode);
                self.state =
                    InteractionState::Dragging(DragSession::new(position, mode, transform));
                Vec::new()
            }
            PointerTarget::Annotation(index) | PointerTarget::ResizeHandle(index, _)
                if index >= ctx.annotations.len() =>
            {
                log::debug!("Ignoring pointer-down on stale annotation index {}", index);
                Vec::new()
            }
            PointerTarget::Annotation(index) => {
                if ctx.selected != Some(index) {
                    return vec![InteractionAction::SelectionChanged(Some(index))];
                }
                self.state = InteractionState::Dragging(DragSession::new(
                    position,
                    DragMode::MovingSelected { index },
                    transform,
                ));
                Vec::new()
            }
            PointerTarget::ResizeHandle(index, corner) => {
                if ctx.selected != Some(index) {
                    return vec![InteractionAction::SelectionChanged(Some(index))];
                }
                self.start_resize(position, index, corner, transform, ctx);
                Vec::new()
            }
        }
    }

    fn start_resize(
        &mut self,
        position: Point,
        index: usize,
        corner: Corner,
        transform: Transformation,
        ctx: &InteractionContext<'_>,
    ) {
        let displayed = transform.apply(&ctx.annotations[index].rect);
        let gesture = ResizeGesture::new(displayed, corner, self.config.min_shape_size);
        self.state = InteractionState::Dragging(DragSession::new(
            position,
            DragMode::ResizingSelected { index, gesture },
            transform,
        ));
    }

    fn pointer_move(&mut self, position: Point) -> Vec<InteractionAction> {
        let InteractionState::Dragging(session) = &mut self.state else {
            return Vec::new();
        };

        let previous = session.current;
        session.current = position;
        match &mut session.mode {
            DragMode::Panning => {
                let delta = position - previous;
                if delta == Point::ZERO {
                    return Vec::new();
                }
                self.view.pan_by(delta);
                vec![InteractionAction::ViewChanged(self.view)]
            }
            DragMode::ResizingSelected { gesture, .. } => {
                gesture.drag_to(position - session.origin);
                Vec::new()
            }
            DragMode::CreatingAnnotation | DragMode::MovingSelected { .. } => Vec::new(),
        }
    }

    fn pointer_up(&mut self, position: Point, ctx: &InteractionContext<'_>) -> Vec<InteractionAction> {
        let InteractionState::Dragging(mut session) =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        else {
            return Vec::new();
        };

        let previous = session.current;
        session.current = position;
        let delta = session.delta();
        let transform = session.transform;

        match session.mode {
            DragMode::Panning => {
                let step = position - previous;
                if step == Point::ZERO {
                    return Vec::new();
                }
                self.view.pan_by(step);
                vec![InteractionAction::ViewChanged(self.view)]
            }
            DragMode::CreatingAnnotation => self.finish_create(&session, ctx),
            DragMode::MovingSelected { index } => {
                let Some(stored) = ctx.annotations.get(index) else {
                    return Vec::new();
                };
                if delta == Point::ZERO {
                    return Vec::new();
                }
                let displayed = transform.apply(&stored.rect);
                let target = shape::moved(&displayed, delta);
                commit(ctx.annotations, index, &target, &transform, "Moved")
            }
            DragMode::ResizingSelected { index, mut gesture } => {
                gesture.drag_to(delta);
                if !gesture.is_resized() {
                    log::debug!("Resize of annotation {} rejected or empty", index);
                    return Vec::new();
                }
                let target = gesture.commit();
                commit(ctx.annotations, index, &target, &transform, "Resized")
            }
        }
    }

    fn finish_create(
        &self,
        session: &DragSession,
        ctx: &InteractionContext<'_>,
    ) -> Vec<InteractionAction> {
        let rect = Rectangle::from_two_points(session.origin, session.current);
        let min = self.config.min_create_size;
        if rect.width < min || rect.height < min {
            log::debug!(
                "Discarding {:.1}x{:.1} rectangle below the {} px minimum",
                rect.width,
                rect.height,
                min
            );
            return Vec::new();
        }

        let mut annotations = ctx.annotations.to_vec();
        annotations.push(Annotation::new(session.transform.revert(&rect, true)));
        let index = annotations.len() - 1;
        log::info!("Added annotation, total: {}", annotations.len());

        vec![
            InteractionAction::AnnotationsChanged(annotations),
            InteractionAction::SelectionChanged(Some(index)),
        ]
    }

    /// In-progress rectangle for the active drag, in frame space.
    pub fn preview(&self, ctx: &InteractionContext<'_>) -> Option<Preview> {
        let InteractionState::Dragging(session) = &self.state else {
            return None;
        };

        match &session.mode {
            DragMode::Panning => None,
            DragMode::CreatingAnnotation => Some(Preview {
                index: None,
                rect: Rectangle::from_two_points(session.origin, session.current),
            }),
            DragMode::MovingSelected { index } => {
                let stored = ctx.annotations.get(*index)?;
                Some(Preview {
                    index: Some(*index),
                    rect: shape::moved(&session.transform.apply(&stored.rect), session.delta()),
                })
            }
            DragMode::ResizingSelected { index, gesture } => Some(Preview {
                index: Some(*index),
                rect: gesture.bounds(),
            }),
        }
    }
}

fn commit(
    annotations: &[Annotation],
    index: usize,
    frame_rect: &Rectangle,
    transform: &Transformation,
    verb: &str,
) -> Vec<InteractionAction> {
    match shape::commit_edit(annotations, index, frame_rect, transform) {
        Some(updated) => {
            log::info!("{} annotation {} to {:?}", verb, index, updated[index].rect);
            vec![InteractionAction::AnnotationsChanged(updated)]
        }
        None => Vec::new(),
    }
}
