// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory collaborators for tests and demos.
//!
//! [`RecordingSurface`] keeps every draw call as a [`DrawOp`] instead of
//! rasterizing it, and [`FixedWidthShaper`] lays text out in a fixed-advance
//! font so trimming is predictable.
//!
//! ```
//! use kurbo::Rect;
//! use understory_tree_view::recording::{FixedWidthShaper, RecordingSurface};
//! use understory_tree_view::{Node, TreeViewDriver};
//!
//! let mut tree = Node::new("root").expanded().with_children([Node::new("child")]);
//! let mut driver = TreeViewDriver::new();
//! let mut surface = RecordingSurface::default();
//! let mut shaper = FixedWidthShaper::default();
//!
//! driver
//!     .render(&mut surface, &mut shaper, Rect::new(0.0, 0.0, 200.0, 120.0), &mut tree, 0)
//!     .unwrap();
//! assert_eq!(surface.texts(), ["root", "child", "Pointer: 0, 0"]);
//! assert_eq!(surface.clip_depth(), 0);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect, Size};

use crate::{Color, FontDesc, RenderError, Surface, TextShaper, Trimming};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`Surface::draw_line`].
    Line {
        /// Segment.
        line: Line,
        /// Stroke color.
        color: Color,
    },
    /// [`Surface::draw_rect`].
    Rect {
        /// Outline.
        rect: Rect,
        /// Stroke color.
        color: Color,
    },
    /// [`Surface::fill_rect`].
    Fill {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// [`Surface::draw_text`].
    Text {
        /// Top-left of the text's layout box.
        origin: Point,
        /// What was drawn.
        text: ShapedText,
        /// Text color.
        color: Color,
    },
    /// [`Surface::push_clip`].
    PushClip(Rect),
    /// [`Surface::pop_clip`].
    PopClip,
}

/// Text shaped by [`FixedWidthShaper`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedText {
    /// The visible characters, including a trailing ellipsis when cut.
    pub text: String,
    /// The box the text was shaped for.
    pub max: Size,
    /// Whether characters were dropped to fit.
    pub truncated: bool,
}

/// A surface that records draw calls in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Every call made so far.
    pub ops: Vec<DrawOp>,
    clips: Vec<Rect>,
    fail_clip: bool,
}

impl RecordingSurface {
    /// A surface whose [`Surface::push_clip`] always fails.
    #[must_use]
    pub fn failing_clip() -> Self {
        Self {
            fail_clip: true,
            ..Self::default()
        }
    }

    /// Number of clips pushed and not yet popped.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// Drawn strings, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Origins of drawn strings, in draw order.
    #[must_use]
    pub fn text_origins(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles, in draw order.
    #[must_use]
    pub fn fills(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Outlined rectangles, in draw order.
    #[must_use]
    pub fn rects(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Text = ShapedText;

    fn draw_line(&mut self, line: Line, color: Color) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Line { line, color });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Rect { rect, color });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Fill { rect, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &ShapedText,
        color: Color,
    ) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Text {
            origin,
            text: text.clone(),
            color,
        });
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), RenderError> {
        if self.fail_clip {
            return Err(RenderError::Resource(String::from("clip layer")));
        }
        self.clips.push(rect);
        self.ops.push(DrawOp::PushClip(rect));
        Ok(())
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_some() {
            self.ops.push(DrawOp::PopClip);
        }
    }
}

/// Shapes text as if every character had the same advance.
#[derive(Clone, Debug)]
pub struct FixedWidthShaper {
    /// Horizontal advance of one character.
    pub advance: f64,
    fail_on: Option<String>,
}

impl Default for FixedWidthShaper {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl FixedWidthShaper {
    /// A shaper with the given per-character advance.
    #[must_use]
    pub fn new(advance: f64) -> Self {
        Self {
            advance,
            fail_on: None,
        }
    }

    /// Fail with [`RenderError::TextShaping`] whenever asked to shape `text`.
    #[must_use]
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on = Some(text.into());
        self
    }

    /// How many characters fit in `width`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "truncating, saturating conversion; negative and NaN widths fit nothing"
    )]
    fn capacity(&self, width: f64) -> usize {
        (width / self.advance) as usize
    }
}

impl TextShaper for FixedWidthShaper {
    type Text = ShapedText;

    fn shape(
        &mut self,
        text: &str,
        _font: &FontDesc,
        max: Size,
        trimming: Trimming,
    ) -> Result<ShapedText, RenderError> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(RenderError::TextShaping(String::from(text)));
        }

        let capacity = self.capacity(max.width);
        let len = text.chars().count();
        let shaped = match trimming {
            Trimming::CharacterEllipsis if len > capacity => {
                let mut cut: String = text.chars().take(capacity.saturating_sub(1)).collect();
                if capacity > 0 {
                    cut.push('…');
                }
                ShapedText {
                    text: cut,
                    max,
                    truncated: true,
                }
            }
            _ => ShapedText {
                text: String::from(text),
                max,
                truncated: false,
            },
        };
        Ok(shaped)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use kurbo::{Rect, Size};
    use proptest::prelude::*;

    use super::{DrawOp, FixedWidthShaper, RecordingSurface};
    use crate::{Color, FontDesc, RenderError, Surface, TextShaper, Trimming};

    fn shape(text: &str, width: f64, trimming: Trimming) -> String {
        FixedWidthShaper::new(5.0)
            .shape(text, &FontDesc::default(), Size::new(width, 15.0), trimming)
            .unwrap()
            .text
    }

    #[test]
    fn fitting_text_is_untouched() {
        assert_eq!(shape("child1", 30.0, Trimming::CharacterEllipsis), "child1");
        assert_eq!(shape("", 0.0, Trimming::CharacterEllipsis), "");
    }

    #[test]
    fn overflow_is_cut_with_an_ellipsis() {
        assert_eq!(
            shape("grandchild1 of 2", 30.0, Trimming::CharacterEllipsis),
            "grand…"
        );
        assert_eq!(shape("abc", 5.0, Trimming::CharacterEllipsis), "…");
        assert_eq!(shape("abc", 4.0, Trimming::CharacterEllipsis), "");
        assert_eq!(shape("abc", 4.0, Trimming::None), "abc");
    }

    #[test]
    fn shaper_can_be_told_to_fail() {
        let mut shaper = FixedWidthShaper::default().failing_on("bad");
        let font = FontDesc::default();
        let max = Size::new(100.0, 15.0);
        assert!(shaper.shape("good", &font, max, Trimming::None).is_ok());
        assert_eq!(
            shaper.shape("bad", &font, max, Trimming::None),
            Err(RenderError::TextShaping(String::from("bad")))
        );
    }

    #[test]
    fn clip_stack_is_tracked() {
        let mut surface = RecordingSurface::default();
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        surface.push_clip(r).unwrap();
        assert_eq!(surface.clip_depth(), 1);
        surface.pop_clip();
        // An unbalanced pop is not recorded.
        surface.pop_clip();
        assert_eq!(surface.clip_depth(), 0);
        assert_eq!(surface.ops, [DrawOp::PushClip(r), DrawOp::PopClip]);

        let mut failing = RecordingSurface::failing_clip();
        assert!(matches!(failing.push_clip(r), Err(RenderError::Resource(_))));
        assert!(failing.ops.is_empty());
        failing.fill_rect(r, Color::BLACK).unwrap();
        assert_eq!(failing.fills(), [r]);
    }

    proptest! {
        #[test]
        fn trimmed_text_fits_and_keeps_a_prefix(text in "\\PC{0,40}", width in 0.0_f64..200.0) {
            let shaped = FixedWidthShaper::new(5.0)
                .shape(&text, &FontDesc::default(), Size::new(width, 15.0), Trimming::CharacterEllipsis)
                .unwrap();
            let chars = shaped.text.chars().count();
            prop_assert!(chars as f64 * 5.0 <= width);
            let kept = shaped.text.trim_end_matches('…');
            prop_assert!(text.starts_with(kept));
            prop_assert_eq!(shaped.truncated, shaped.text != text);
        }
    }
}
