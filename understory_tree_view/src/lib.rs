// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_view --heading-base-level=0

//! Understory Tree View: an immediate-mode collapsible tree.
//!
//! Each frame, the view walks a tree of labelled nodes and draws it top to
//! bottom into a bounded region. Every node gets a header row with an expander
//! glyph and a label; expanded nodes show their children in an indented block
//! below the header. Clicking an expander animates the glyph between pointing
//! right (collapsed) and pointing down (expanded) over 100 ms.
//!
//! There is no retained layout. Sizes and positions are recomputed every frame
//! from the tree and the region, which makes the layout pass also the place
//! where pointer input is matched to nodes:
//!
//! - [`layout_tree`] carves the region with the [`Region`](understory_region::Region)
//!   operators, stops as soon as space runs out, and returns the part it used.
//! - The latest pointer position highlights the row under it. The latest press
//!   is offered to each expander hit box in layout order and claimed by at
//!   most one of them ([`FrameContext::claim_click`]).
//! - [`Expander`] is a small state machine whose glyph angle is a function of
//!   wall-clock time, not of how many frames were drawn.
//!
//! The tree itself is anything implementing
//! [`TreeNodeMut`](understory_tree_walk::TreeNodeMut) with [`Item`] values.
//! [`Node`] is a ready-made owned tree.
//!
//! Drawing goes through two host-provided traits: [`Surface`] for lines,
//! rectangles, text and clipping, and [`TextShaper`] for turning labels into
//! drawable text. [`TreeViewDriver`] ties everything to an event loop: it
//! keeps the pointer slots, composes the frame, and tells the host when to
//! start and stop animation ticks.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_tree_view::recording::{FixedWidthShaper, RecordingSurface};
//! use understory_tree_view::{ExpanderState, FrameRequests, Node, TreeViewDriver};
//!
//! let mut tree = Node::new("root").with_children([
//!     Node::new("child1"),
//!     Node::new("child2"),
//! ]);
//! let client = Rect::new(0.0, 0.0, 200.0, 150.0);
//! let mut driver = TreeViewDriver::new();
//! let mut surface = RecordingSurface::default();
//! let mut shaper = FixedWidthShaper::default();
//!
//! // Click the root's expander; the next frame starts the transition.
//! driver.on_pointer_down(Point::new(8.0, 12.0));
//! let requests = driver.render(&mut surface, &mut shaper, client, &mut tree, 0).unwrap();
//! assert_eq!(requests, FrameRequests::START_TICKS);
//! assert_eq!(tree.expander().state(), ExpanderState::Expanding);
//!
//! // Ticks keep asking for redraws until the animation is over.
//! assert!(driver.on_tick(&tree, 50).contains(FrameRequests::REDRAW));
//! let requests = driver.render(&mut surface, &mut shaper, client, &mut tree, 100).unwrap();
//! assert_eq!(requests, FrameRequests::STOP_TICKS);
//! assert_eq!(tree.expander().state(), ExpanderState::Expanded);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in dependencies.
//! - `libm`: floating point support for `no_std` builds.
//! - `tracing`: emits a `tree_view.frame` span per rendered frame and debug
//!   events for clicks and transitions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod driver;
mod error;
mod expander;
mod input;
mod layout;
mod node;
pub mod recording;
mod status;
mod style;
mod surface;

pub use driver::TreeViewDriver;
pub use error::RenderError;
pub use expander::{
    EXPANDED_ANGLE, Expander, ExpanderState, Step, TRANSITION_DURATION_MS, TransitionId,
};
pub use input::{FrameContext, FrameRequests, PointerSlots};
pub use layout::{LayoutCx, expander_glyph, layout_header, layout_tree};
pub use node::{Item, Node};
pub use status::{draw_status, status_text};
pub use style::{Color, FontDesc, FontStyle, TreeStyle};
pub use surface::{Surface, Target, TextShaper, Trimming};
