// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Errors raised when editing the annotation list.

use thiserror::Error;

/// Errors that can occur while applying an edit to the annotation list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The selected index no longer points into the list, usually because
    /// the list was replaced or shortened after the selection was made.
    #[error("selected annotation {index} does not exist (list has {len})")]
    StaleSelection { index: usize, len: usize },
}
