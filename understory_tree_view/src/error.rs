// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by rendering collaborators.

use alloc::string::String;

/// Failure reported by a [`Surface`](crate::Surface) or [`TextShaper`](crate::TextShaper).
///
/// These abort the frame being drawn. Nothing is retried here: the next
/// repaint starts from scratch, so a dropped frame recovers on its own.
///
/// Degenerate geometry is never an error. Regions that run out of space simply
/// become empty and stop the layout recursion.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The backend could not create a resource (brush, clip layer, target).
    #[error("failed to create drawing resource: {0}")]
    Resource(String),
    /// Text could not be shaped or measured.
    #[error("failed to shape text {0:?}")]
    TextShaping(String),
}
