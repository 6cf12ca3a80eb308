// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive tree layout.
//!
//! [`layout_tree`] walks a tree depth-first, drawing as it goes. Each visible
//! node takes a fixed-height header row off the top of the region it is
//! given. If its children are shown, they are laid out one after another in an
//! indented region below the header, each starting where the previous one
//! stopped. The walk stops as soon as the remaining region is empty, so a tree
//! taller than the view is truncated rather than overflowing it.
//!
//! Within a node the order is fixed: the pending click is matched against the
//! expander first, then the expander's animation is advanced, and only then
//! are children visited, left to right. A click on an expander whose
//! transition ran out while it was hidden settles that transition before
//! toggling.

use kurbo::{Affine, Line, Point, Rect, Size};
use understory_region::Region;
use understory_tree_walk::TreeNodeMut;

use crate::{
    Color, FrameContext, Item, RenderError, Step, Surface, Target, TextShaper, TreeStyle, Trimming,
};

/// Shared state threaded through one layout pass.
#[derive(Debug)]
pub struct LayoutCx<'a, Sh: ?Sized> {
    /// Shapes labels.
    pub shaper: &'a mut Sh,
    /// Metrics and colors.
    pub style: &'a TreeStyle,
    /// Time, pointer input, and transition bookkeeping for this frame.
    pub frame: &'a mut FrameContext,
}

impl<'a, Sh: TextShaper + ?Sized> LayoutCx<'a, Sh> {
    /// Bundle the collaborators for a layout pass.
    pub fn new(shaper: &'a mut Sh, style: &'a TreeStyle, frame: &'a mut FrameContext) -> Self {
        Self {
            shaper,
            style,
            frame,
        }
    }
}

/// Lay out and draw `node` and its visible descendants inside `target`.
///
/// Returns the region actually consumed: the header row alone when children
/// are hidden, otherwise the header plus the block its children used. The
/// result always lies within `target`'s bounds.
pub fn layout_tree<S, Sh, T>(
    target: &mut Target<'_, S>,
    node: &mut T,
    cx: &mut LayoutCx<'_, Sh>,
) -> Result<Rect, RenderError>
where
    S: Surface + ?Sized,
    Sh: TextShaper<Text = S::Text> + ?Sized,
    T: TreeNodeMut<Value = Item>,
{
    let region = target.bounds();
    let (item, children) = node.split_mut();

    let header = layout_header(target, item, cx)?;

    let block = region.below_rect(&header).right_of(cx.style.indent);
    let mut remaining = block;

    if item.expander.shows_children() {
        for child in children {
            if remaining.is_empty_region() {
                #[cfg(feature = "tracing")]
                tracing::trace!(parent = %item.label, "out of space, truncating children");
                break;
            }
            let consumed = layout_tree(&mut target.narrow(remaining), child, cx)?;
            remaining = remaining.below_rect(&consumed);
        }

        let group = block.above_rect(&remaining);
        if !group.is_empty_region() {
            target
                .surface_mut()
                .draw_rect(group, cx.style.group_outline)?;
        }
    }

    Ok(region.above(remaining.y0))
}

/// Draw a node's header row and route the pending click to its expander.
///
/// Returns the expander column, whose bottom edge is the bottom of the header.
pub fn layout_header<S, Sh>(
    target: &mut Target<'_, S>,
    item: &mut Item,
    cx: &mut LayoutCx<'_, Sh>,
) -> Result<Rect, RenderError>
where
    S: Surface + ?Sized,
    Sh: TextShaper<Text = S::Text> + ?Sized,
{
    let region = target.bounds();
    let style = cx.style;

    let row = region
        .right_of(style.expander_column)
        .from_top(style.header_height);
    draw_label(&mut target.narrow(row), &item.label, cx)?;

    let mut column = region.from_left(style.expander_column);
    column.y1 = row.y1;
    let hit_box = column.from_left(style.expander_hit_width);

    let now = cx.frame.now();
    if cx.frame.claim_click(hit_box) {
        if let Some(done) = item.expander.settle(now) {
            cx.frame.transition_finished(done);
        }
        let id = cx.frame.next_transition_id();
        let started = item.expander.toggle(now, id);
        if started {
            cx.frame.transition_started(id);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            label = %item.label,
            started,
            state = ?item.expander.state(),
            "expander clicked"
        );
    }

    if let Step::Finished(id) = item.expander.update(now) {
        cx.frame.transition_finished(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(label = %item.label, state = ?item.expander.state(), "transition finished");
    }

    draw_expander(
        &mut target.narrow(hit_box),
        item.expander.angle(),
        style.glyph_size,
        style.glyph_color,
    )?;

    Ok(column)
}

/// Draw the label row: hover highlight, then the trimmed label text.
fn draw_label<S, Sh>(
    target: &mut Target<'_, S>,
    label: &str,
    cx: &mut LayoutCx<'_, Sh>,
) -> Result<(), RenderError>
where
    S: Surface + ?Sized,
    Sh: TextShaper<Text = S::Text> + ?Sized,
{
    let row = target.bounds();
    if cx.frame.is_hovered(row) {
        target.fill(cx.style.hover_fill)?;
    }
    let text_box = row.centered(Size::new(row.width(), cx.style.label_height));
    write_text(target, text_box, label, cx.style.text_color, cx)
}

/// Shape `text` into `text_box` and draw it at the box's top-left corner.
pub(crate) fn write_text<S, Sh>(
    target: &mut Target<'_, S>,
    text_box: Rect,
    text: &str,
    color: Color,
    cx: &mut LayoutCx<'_, Sh>,
) -> Result<(), RenderError>
where
    S: Surface + ?Sized,
    Sh: TextShaper<Text = S::Text> + ?Sized,
{
    let shaped = cx.shaper.shape(
        text,
        &cx.style.font,
        text_box.size(),
        Trimming::CharacterEllipsis,
    )?;
    target
        .surface_mut()
        .draw_text(text_box.origin(), &shaped, color)
}

/// The expander glyph: a triangle pointing right at 0°, rotated clockwise by
/// `angle` degrees about the center of its box.
pub fn expander_glyph(hit_box: Rect, glyph: Size, angle: f64) -> [Line; 3] {
    let bounds = hit_box.centered(glyph);
    let rotate = Affine::rotate_about(angle.to_radians(), bounds.center());
    let top_left = rotate * bounds.origin();
    let tip = rotate * bounds.center();
    let bottom_left = rotate * Point::new(bounds.x0, bounds.y1);
    [
        Line::new(top_left, tip),
        Line::new(tip, bottom_left),
        Line::new(bottom_left, top_left),
    ]
}

fn draw_expander<S: Surface + ?Sized>(
    target: &mut Target<'_, S>,
    angle: f64,
    glyph: Size,
    color: Color,
) -> Result<(), RenderError> {
    for line in expander_glyph(target.bounds(), glyph, angle) {
        target.surface_mut().draw_line(line, color)?;
    }
    Ok(())
}
