// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The status strip along the bottom of the view.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Size};
use understory_region::Region;

use crate::layout::{LayoutCx, write_text};
use crate::{RenderError, Surface, Target, TextShaper};

/// Text shown in the status strip for the last pointer position.
///
/// Coordinates are truncated towards zero; before any pointer event the
/// position reads as the origin.
#[must_use]
pub fn status_text(pointer: Option<Point>) -> String {
    let p = pointer.unwrap_or(Point::ORIGIN);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the strip shows whole units only"
    )]
    let (x, y) = (p.x as i64, p.y as i64);
    format!("Pointer: {x}, {y}")
}

/// Draw the status strip: a separator along its top edge and the pointer
/// readout centered vertically.
pub fn draw_status<S, Sh>(
    target: &mut Target<'_, S>,
    pointer: Option<Point>,
    cx: &mut LayoutCx<'_, Sh>,
) -> Result<(), RenderError>
where
    S: Surface + ?Sized,
    Sh: TextShaper<Text = S::Text> + ?Sized,
{
    let strip = target.bounds();
    target
        .surface_mut()
        .draw_line(strip.top_edge(), cx.style.status_line)?;

    let text_box = strip.centered(Size::new(strip.width(), cx.style.status_text_height));
    let text = status_text(pointer);
    write_text(target, text_box, &text, cx.style.text_color, cx)
}
