// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyboard commands acting on the selected annotation.

use super::machine::InteractionAction;
use crate::error::EditError;
use crate::models::annotation::{Annotation, Point};

/// Arrow-key direction. Image space grows right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Offset of one nudge of `step` image pixels.
    pub fn delta(self, step: f64) -> Point {
        match self {
            Direction::Left => Point::new(-step, 0.0),
            Direction::Right => Point::new(step, 0.0),
            Direction::Up => Point::new(0.0, -step),
            Direction::Down => Point::new(0.0, step),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Escape.
    Deselect,
    /// Backspace / Delete.
    DeleteSelected,
    /// Arrow keys.
    Nudge(Direction),
}

/// Apply a keyboard command to the annotation list.
///
/// Commands are no-ops while nothing is selected. A selection that no
/// longer points into the list is reported rather than silently ignored so
/// the host can drop it.
pub fn apply_key(
    command: KeyCommand,
    annotations: &[Annotation],
    selected: Option<usize>,
    step: f64,
) -> Result<Vec<InteractionAction>, EditError> {
    let Some(index) = selected else {
        return Ok(Vec::new());
    };

    match command {
        KeyCommand::Deselect => Ok(vec![InteractionAction::SelectionChanged(None)]),
        KeyCommand::DeleteSelected => {
            let mut updated = checked_copy(annotations, index)?;
            updated.remove(index);
            log::info!("Deleted annotation, total: {}", updated.len());
            Ok(vec![
                InteractionAction::AnnotationsChanged(updated),
                InteractionAction::SelectionChanged(None),
            ])
        }
        KeyCommand::Nudge(direction) => {
            let mut updated = checked_copy(annotations, index)?;
            updated[index].rect = updated[index].rect.translate(direction.delta(step));
            log::debug!("Nudged annotation {} {:?}", index, direction);
            Ok(vec![InteractionAction::AnnotationsChanged(updated)])
        }
    }
}

fn checked_copy(annotations: &[Annotation], index: usize) -> Result<Vec<Annotation>, EditError> {
    if index >= annotations.len() {
        return Err(EditError::StaleSelection {
            index,
            len: annotations.len(),
        });
    }
    Ok(annotations.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Rectangle;

    fn sample() -> Vec<Annotation> {
        vec![
            Annotation::new(Rectangle::new(10.0, 10.0, 20.0, 20.0)),
            Annotation::new(Rectangle::new(50.0, 50.0, 5.0, 5.0)),
        ]
    }

    #[test]
    fn test_nudge_directions() {
        let annotations = sample();
        let cases = [
            (Direction::Right, Rectangle::new(11.0, 10.0, 20.0, 20.0)),
            (Direction::Left, Rectangle::new(9.0, 10.0, 20.0, 20.0)),
            (Direction::Down, Rectangle::new(10.0, 11.0, 20.0, 20.0)),
            (Direction::Up, Rectangle::new(10.0, 9.0, 20.0, 20.0)),
        ];

        for (direction, expected) in cases {
            let actions =
                apply_key(KeyCommand::Nudge(direction), &annotations, Some(0), 1.0).unwrap();
            match &actions[..] {
                [InteractionAction::AnnotationsChanged(list)] => {
                    assert_eq!(list[0].rect, expected, "{:?}", direction);
                    assert_eq!(list[1], annotations[1]);
                }
                other => panic!("unexpected actions {:?}", other),
            }
        }
    }

    #[test]
    fn test_delete_clears_selection() {
        let annotations = sample();
        let actions = apply_key(KeyCommand::DeleteSelected, &annotations, Some(0), 1.0).unwrap();

        assert_eq!(
            actions,
            vec![
                InteractionAction::AnnotationsChanged(vec![annotations[1].clone()]),
                InteractionAction::SelectionChanged(None),
            ]
        );
        assert_eq!(annotations.len(), 2);
    }

    #[test]
    fn test_nothing_selected_is_noop() {
        let annotations = sample();
        for command in [
            KeyCommand::Deselect,
            KeyCommand::DeleteSelected,
            KeyCommand::Nudge(Direction::Up),
        ] {
            assert!(apply_key(command, &annotations, None, 1.0).unwrap().is_empty());
        }
    }

    #[test]
    fn test_stale_selection_is_reported() {
        let annotations = sample();
        assert_eq!(
            apply_key(KeyCommand::DeleteSelected, &annotations, Some(7), 1.0),
            Err(EditError::StaleSelection { index: 7, len: 2 })
        );
        assert_eq!(
            apply_key(KeyCommand::Deselect, &annotations, Some(7), 1.0).unwrap(),
            vec![InteractionAction::SelectionChanged(None)]
        );
    }
}
