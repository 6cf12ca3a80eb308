// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_region --heading-base-level=0

//! Understory Region: region-splitting operators for immediate-mode layout.
//!
//! Immediate-mode layout code tends to carve a bounded drawing region into
//! smaller pieces: a strip off the top for a header, the remainder below it for
//! content, an indented column for nested items, and so on. This crate provides
//! those operators as the [`Region`] extension trait over [`kurbo::Rect`].
//!
//! All operators are pure and total:
//!
//! - Requests that exceed the available space collapse to the boundary instead
//!   of overflowing it. Clamping is always done with `min`, so a region never
//!   grows past the one it was cut from.
//! - Degenerate inputs are accepted. A region that ends up with zero width or
//!   height, or that is inverted (for example after [`Region::inside`] with a
//!   large distance), reports `true` from [`Region::is_empty_region`], which is
//!   how callers detect that space ran out.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_region::Region;
//!
//! let client = Rect::new(0.0, 0.0, 300.0, 400.0);
//!
//! // A 20 unit status strip along the bottom, and the area above it.
//! let status = client.from_bottom(20.0);
//! let content = client.above_rect(&status).inside(5.0);
//! assert_eq!(content, Rect::new(5.0, 5.0, 295.0, 375.0));
//!
//! // A header row, and the indented area below it.
//! let header = content.from_top(20.0);
//! let body = content.below_rect(&header).right_of(10.0);
//! assert_eq!(body, Rect::new(15.0, 25.0, 295.0, 375.0));
//!
//! assert!(header.contains_point(Point::new(5.0, 5.0)));
//! assert!(!header.contains_point(Point::new(5.0, 25.0)));
//!
//! // Asking for more than is there truncates instead of overflowing.
//! let short = Rect::new(0.0, 0.0, 100.0, 8.0);
//! assert_eq!(short.from_top(20.0), short);
//! assert!(short.below(20.0).is_empty_region());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Line, Point, Rect, Size};

/// Region-splitting operators over axis-aligned rectangles.
///
/// Coordinates follow the usual screen convention: `y` grows downwards, so
/// `y0` is the top edge and `y1` the bottom edge.
pub trait Region: Sized {
    /// The top `d` units, clamped so the result never extends past the bottom.
    #[must_use]
    fn from_top(&self, d: f64) -> Self;

    /// The bottom `d` units, clamped so the result never extends past the top.
    #[must_use]
    fn from_bottom(&self, d: f64) -> Self;

    /// What remains after consuming `d` units from the top.
    #[must_use]
    fn below(&self, d: f64) -> Self;

    /// What remains below the bottom edge of `other`.
    #[must_use]
    fn below_rect(&self, other: &Rect) -> Self;

    /// The part of this region above the horizontal line `y`.
    #[must_use]
    fn above(&self, y: f64) -> Self;

    /// The part of this region above the top edge of `other`.
    #[must_use]
    fn above_rect(&self, other: &Rect) -> Self;

    /// The leftmost `d` units, clamped so the result never extends past the right edge.
    #[must_use]
    fn from_left(&self, d: f64) -> Self;

    /// What remains after consuming `d` units from the left.
    #[must_use]
    fn right_of(&self, d: f64) -> Self;

    /// What remains to the right of the right edge of `other`.
    #[must_use]
    fn right_of_rect(&self, other: &Rect) -> Self;

    /// This region shrunk by `d` on all four sides.
    ///
    /// No clamping is applied: a large `d` yields an inverted region, which
    /// [`Region::is_empty_region`] reports as empty.
    #[must_use]
    fn inside(&self, d: f64) -> Self;

    /// A region of the given size sharing this region's center.
    #[must_use]
    fn centered(&self, size: Size) -> Self;

    /// Half-open containment: left and top edges are inside, right and bottom edges are not.
    fn contains_point(&self, p: Point) -> bool;

    /// Whether the region has no area left to lay anything out in.
    ///
    /// True for zero width, zero height, or an inverted region.
    fn is_empty_region(&self) -> bool;

    /// The top edge, left to right.
    fn top_edge(&self) -> Line;

    /// The bottom edge, left to right.
    fn bottom_edge(&self) -> Line;

    /// The left edge, top to bottom.
    fn left_edge(&self) -> Line;

    /// The right edge, top to bottom.
    fn right_edge(&self) -> Line;
}

impl Region for Rect {
    fn from_top(&self, d: f64) -> Self {
        Self::new(self.x0, self.y0, self.x1, (self.y0 + d).min(self.y1))
    }

    fn from_bottom(&self, d: f64) -> Self {
        if d >= self.height() {
            return *self;
        }
        Self::new(self.x0, self.y1 - d, self.x1, self.y1)
    }

    fn below(&self, d: f64) -> Self {
        Self::new(self.x0, (self.y0 + d).min(self.y1), self.x1, self.y1)
    }

    fn below_rect(&self, other: &Rect) -> Self {
        Self::new(self.x0, other.y1.min(self.y1), self.x1, self.y1)
    }

    fn above(&self, y: f64) -> Self {
        Self::new(self.x0, self.y0, self.x1, self.y1.min(y))
    }

    fn above_rect(&self, other: &Rect) -> Self {
        self.above(other.y0)
    }

    fn from_left(&self, d: f64) -> Self {
        Self::new(self.x0, self.y0, (self.x0 + d).min(self.x1), self.y1)
    }

    fn right_of(&self, d: f64) -> Self {
        Self::new((self.x0 + d).min(self.x1), self.y0, self.x1, self.y1)
    }

    fn right_of_rect(&self, other: &Rect) -> Self {
        Self::new(other.x1.min(self.x1), self.y0, self.x1, self.y1)
    }

    fn inside(&self, d: f64) -> Self {
        Self::new(self.x0 + d, self.y0 + d, self.x1 - d, self.y1 - d)
    }

    fn centered(&self, size: Size) -> Self {
        let c = self.center();
        Self::new(
            c.x - size.width / 2.0,
            c.y - size.height / 2.0,
            c.x + size.width / 2.0,
            c.y + size.height / 2.0,
        )
    }

    fn contains_point(&self, p: Point) -> bool {
        self.x0 <= p.x && self.y0 <= p.y && self.x1 > p.x && self.y1 > p.y
    }

    #[allow(
        clippy::neg_cmp_op_on_partial_ord,
        reason = "NaN coordinates must also count as empty"
    )]
    fn is_empty_region(&self) -> bool {
        !(self.x0 < self.x1) || !(self.y0 < self.y1)
    }

    fn top_edge(&self) -> Line {
        Line::new((self.x0, self.y0), (self.x1, self.y0))
    }

    fn bottom_edge(&self) -> Line {
        Line::new((self.x0, self.y1), (self.x1, self.y1))
    }

    fn left_edge(&self) -> Line {
        Line::new((self.x0, self.y0), (self.x0, self.y1))
    }

    fn right_edge(&self) -> Line {
        Line::new((self.x1, self.y0), (self.x1, self.y1))
    }
}

/// Whether `inner` lies within `outer` (edges may coincide).
///
/// Layout code uses this to check that a consumed region never escapes the
/// region it was handed.
pub fn is_within(inner: &Rect, outer: &Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}
