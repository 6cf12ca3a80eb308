// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator boundary: drawing surfaces, text shaping, and drawing targets.
//!
//! The tree view never talks to a graphics API directly. Hosts implement
//! [`Surface`] over their backend and [`TextShaper`] over their text stack;
//! every call is synchronous and immediate, with no batching assumed.

use kurbo::{Line, Point, Rect, Size};

use crate::{Color, FontDesc, RenderError};

/// Immediate-mode drawing surface.
pub trait Surface {
    /// Shaped text this surface can draw, produced by a matching [`TextShaper`].
    type Text;

    /// Stroke a line segment.
    fn draw_line(&mut self, line: Line, color: Color) -> Result<(), RenderError>;

    /// Stroke the outline of a rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Draw shaped text with its layout box anchored at `origin`.
    fn draw_text(&mut self, origin: Point, text: &Self::Text, color: Color)
    -> Result<(), RenderError>;

    /// Restrict subsequent drawing to `rect` until the matching [`Surface::pop_clip`].
    fn push_clip(&mut self, rect: Rect) -> Result<(), RenderError>;

    /// Remove the most recently pushed clip.
    fn pop_clip(&mut self);
}

/// How text that does not fit its box is cut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trimming {
    /// Overflowing text is left to the surface's clip.
    None,
    /// Cut at a character boundary and mark the cut with an ellipsis.
    #[default]
    CharacterEllipsis,
}

/// Text shaping and measurement.
///
/// Shaped text is treated as a value that can be requested again every frame;
/// implementations are free to cache.
pub trait TextShaper {
    /// The shaped, measured text object.
    type Text;

    /// Shape `text` to fit within `max`, trimming as requested.
    fn shape(
        &mut self,
        text: &str,
        font: &FontDesc,
        max: Size,
        trimming: Trimming,
    ) -> Result<Self::Text, RenderError>;
}

/// A region bound to a drawing surface.
///
/// Targets are cheap views. Layout code narrows them into fresh targets for
/// each sub-region it recurses into; the parent's bounds never change.
#[derive(Debug)]
pub struct Target<'a, S: ?Sized> {
    surface: &'a mut S,
    bounds: Rect,
}

impl<'a, S: Surface + ?Sized> Target<'a, S> {
    /// Bind `bounds` to `surface`.
    pub fn new(surface: &'a mut S, bounds: Rect) -> Self {
        Self { surface, bounds }
    }

    /// The region this target covers.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// A target over `bounds` on the same surface, borrowed from this one.
    pub fn narrow(&mut self, bounds: Rect) -> Target<'_, S> {
        Target {
            surface: &mut *self.surface,
            bounds,
        }
    }

    /// The underlying surface.
    pub fn surface_mut(&mut self) -> &mut S {
        self.surface
    }

    /// Fill the whole target.
    pub fn fill(&mut self, color: Color) -> Result<(), RenderError> {
        self.surface.fill_rect(self.bounds, color)
    }
}
