// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Loading status of the image being annotated.

use super::annotation::Size;

/// Where the image loader currently stands.
///
/// Nothing is drawn and no interaction can start unless the image is
/// `Loaded` with a usable size.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageState {
    #[default]
    Loading,
    Loaded {
        size: Size,
    },
    Failed {
        reason: String,
    },
}

impl ImageState {
    /// Natural size of the image, if it is loaded and non-degenerate.
    pub fn subject_size(&self) -> Option<Size> {
        match self {
            ImageState::Loaded { size } if !size.is_degenerate() => Some(*size),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.subject_size().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_loaded_image_has_subject_size() {
        assert_eq!(ImageState::Loading.subject_size(), None);
        assert_eq!(
            ImageState::Failed {
                reason: "404".to_string()
            }
            .subject_size(),
            None
        );
        assert_eq!(
            ImageState::Loaded {
                size: Size::new(0.0, 0.0)
            }
            .subject_size(),
            None
        );
        assert_eq!(
            ImageState::Loaded {
                size: Size::new(640.0, 480.0)
            }
            .subject_size(),
            Some(Size::new(640.0, 480.0))
        );
    }
}
