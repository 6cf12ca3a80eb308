// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame driver: composes the view and tracks running transitions.
//!
//! The host owns the event loop and the clock. It forwards pointer events,
//! calls [`TreeViewDriver::render`] whenever a redraw is requested, and, while
//! [`TreeViewDriver::wants_ticks`] is true, calls [`TreeViewDriver::on_tick`]
//! periodically. Every entry point returns [`FrameRequests`] describing what
//! to schedule next.
//!
//! Running transitions are kept as a set of polls keyed by [`TransitionId`].
//! A frame that starts a transition registers it; a frame that sees it settle
//! removes it. Ticks poll the registered transitions against the clock, so a
//! transition under a node that was collapsed mid-animation, and is therefore
//! no longer laid out, still expires on time.
//!
//! Tick requests are edge-triggered against what the host was last told. A
//! frame that fails after starting a transition reports nothing, so the
//! pending `START_TICKS` goes out with the next frame that succeeds.

use hashbrown::HashSet;
use kurbo::{Point, Rect};
use understory_region::Region;
use understory_tree_walk::{TreeNode, TreeNodeMut, depth_first};

use crate::layout::{LayoutCx, layout_tree};
use crate::status::draw_status;
use crate::{
    FrameContext, FrameRequests, Item, PointerSlots, RenderError, Surface, Target, TextShaper,
    TransitionId, TreeStyle,
};

/// Drives a tree view from host events.
#[derive(Clone, Debug, Default)]
pub struct TreeViewDriver {
    style: TreeStyle,
    slots: PointerSlots,
    polls: HashSet<TransitionId>,
    next_transition: u64,
    /// Whether the host was last asked to tick.
    ticking: bool,
}

impl TreeViewDriver {
    /// A driver with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver with a custom style.
    #[must_use]
    pub fn with_style(style: TreeStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// The style in use.
    #[must_use]
    pub fn style(&self) -> &TreeStyle {
        &self.style
    }

    /// Latest pointer input.
    #[must_use]
    pub fn slots(&self) -> &PointerSlots {
        &self.slots
    }

    /// The pointer moved to `position` (client coordinates).
    pub fn on_pointer_move(&mut self, position: Point) -> FrameRequests {
        self.slots.on_pointer_move(position)
    }

    /// A button went down at `position`.
    ///
    /// The press is handed to the next frame, which gives it to the expander
    /// under it, if any.
    pub fn on_pointer_down(&mut self, position: Point) -> FrameRequests {
        self.slots.on_pointer_down(position)
    }

    /// Whether any transition is registered and ticks should keep coming.
    #[must_use]
    pub fn wants_ticks(&self) -> bool {
        !self.polls.is_empty()
    }

    /// Number of registered transitions.
    #[must_use]
    pub fn running_transitions(&self) -> usize {
        self.polls.len()
    }

    /// Draw one frame of `root` into `client` at time `now`.
    ///
    /// The frame fills the background, lays the tree out in the client area
    /// above the status strip (inset by the margin and clipped to it), then
    /// draws the status strip. The pending click is consumed by this frame
    /// whether or not an expander claims it.
    ///
    /// On error the frame is abandoned. Transitions that started before the
    /// failure stay registered, and the tick request they imply is returned
    /// by the next successful frame.
    pub fn render<S, Sh, T>(
        &mut self,
        surface: &mut S,
        shaper: &mut Sh,
        client: Rect,
        root: &mut T,
        now: u64,
    ) -> Result<FrameRequests, RenderError>
    where
        S: Surface + ?Sized,
        Sh: TextShaper<Text = S::Text> + ?Sized,
        T: TreeNodeMut<Value = Item>,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "tree_view.frame",
            now,
            width = client.width(),
            height = client.height()
        )
        .entered();

        let click = self.slots.take_click();
        let mut frame = FrameContext::new(now, self.slots.pointer(), click)
            .with_transition_seed(self.next_transition);

        let drawn = self.draw_frame(surface, shaper, client, root, &mut frame);

        #[cfg(feature = "tracing")]
        if let Some(p) = frame.pending_click() {
            tracing::trace!(x = p.x, y = p.y, "click hit no expander, dropped");
        }

        self.next_transition = frame.transition_seed();
        self.absorb(&frame);
        drawn?;
        Ok(self.sync_ticks())
    }

    fn draw_frame<S, Sh, T>(
        &self,
        surface: &mut S,
        shaper: &mut Sh,
        client: Rect,
        root: &mut T,
        frame: &mut FrameContext,
    ) -> Result<(), RenderError>
    where
        S: Surface + ?Sized,
        Sh: TextShaper<Text = S::Text> + ?Sized,
        T: TreeNodeMut<Value = Item>,
    {
        let mut target = Target::new(surface, client);
        target.fill(self.style.background)?;

        let status = client.from_bottom(self.style.status_height);
        let content = client.above_rect(&status).inside(self.style.margin);
        let mut cx = LayoutCx::new(shaper, &self.style, frame);

        if content.is_empty_region() {
            #[cfg(feature = "tracing")]
            tracing::trace!("no room for content");
        } else {
            target.surface_mut().push_clip(content)?;
            let laid_out = layout_tree(&mut target.narrow(content), root, &mut cx);
            target.surface_mut().pop_clip();
            laid_out?;
        }

        draw_status(&mut target.narrow(status), self.slots.pointer(), &mut cx)
    }

    /// Register transitions started in `frame` and drop those that finished.
    fn absorb(&mut self, frame: &FrameContext) {
        self.polls.extend(frame.started().iter().copied());
        for id in frame.finished() {
            self.polls.remove(id);
        }

        #[cfg(feature = "tracing")]
        if !frame.started().is_empty() || !frame.finished().is_empty() {
            tracing::debug!(
                started = frame.started().len(),
                finished = frame.finished().len(),
                running = self.polls.len(),
                "transition polls updated"
            );
        }

    }

    /// Tell the host to start or stop ticking if that changed since it was
    /// last told.
    fn sync_ticks(&mut self) -> FrameRequests {
        let wanted = self.wants_ticks();
        if wanted == self.ticking {
            return FrameRequests::empty();
        }
        self.ticking = wanted;
        if wanted {
            FrameRequests::START_TICKS
        } else {
            FrameRequests::STOP_TICKS
        }
    }

    /// Periodic tick at time `now`.
    ///
    /// Polls every registered transition, dropping those no longer running.
    /// Requests a redraw while anything was registered, and asks to stop
    /// ticking once nothing is left.
    pub fn on_tick<T>(&mut self, root: &T, now: u64) -> FrameRequests
    where
        T: TreeNode<Value = Item>,
    {
        if self.polls.is_empty() {
            return self.sync_ticks();
        }

        let active: HashSet<TransitionId> = depth_first(root)
            .filter(|item| item.expander.is_active_at(now))
            .filter_map(|item| item.expander.transition())
            .collect();
        #[cfg(feature = "tracing")]
        let before = self.polls.len();
        self.polls.retain(|id| active.contains(id));

        #[cfg(feature = "tracing")]
        if self.polls.len() != before {
            tracing::debug!(
                expired = before - self.polls.len(),
                running = self.polls.len(),
                "transition polls expired"
            );
        }

        FrameRequests::REDRAW | self.sync_ticks()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::TreeViewDriver;
    use crate::recording::{DrawOp, FixedWidthShaper, RecordingSurface};
    use crate::{ExpanderState, FrameRequests, Node, RenderError, TreeStyle};

    const CLIENT: Rect = Rect::new(0.0, 0.0, 200.0, 150.0);

    fn frame(
        driver: &mut TreeViewDriver,
        tree: &mut Node,
        now: u64,
    ) -> (FrameRequests, RecordingSurface) {
        let mut surface = RecordingSurface::default();
        let mut shaper = FixedWidthShaper::default();
        let requests = driver
            .render(&mut surface, &mut shaper, CLIENT, tree, now)
            .unwrap();
        (requests, surface)
    }

    fn sample() -> Node {
        Node::new("root").with_children([
            Node::new("child1").with_children([Node::new("gc1")]),
            Node::new("child2"),
        ])
    }

    // Root header sits at the content origin (5, 5); its expander box is 5..15.
    const ROOT_EXPANDER: Point = Point::new(8.0, 12.0);

    #[test]
    fn frame_composition() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample();
        let (requests, surface) = frame(&mut driver, &mut tree, 0);
        assert_eq!(requests, FrameRequests::empty());

        let content = Rect::new(5.0, 5.0, 195.0, 125.0);
        assert_eq!(
            surface.ops[0],
            DrawOp::Fill {
                rect: CLIENT,
                color: TreeStyle::default().background
            }
        );
        assert_eq!(surface.ops[1], DrawOp::PushClip(content));
        let pop = surface
            .ops
            .iter()
            .position(|op| *op == DrawOp::PopClip)
            .unwrap();
        assert_eq!(surface.clip_depth(), 0);
        // The status strip is drawn after the clip is gone.
        assert!(matches!(surface.ops[pop + 1], DrawOp::Line { .. }));
        assert_eq!(surface.texts(), ["root", "Pointer: 0, 0"]);
        assert_eq!(surface.text_origins()[0], Point::new(20.0, 7.5));
    }

    #[test]
    fn expand_runs_ticks_until_settled() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample();

        assert_eq!(driver.on_pointer_down(ROOT_EXPANDER), FrameRequests::REDRAW);
        let (requests, _) = frame(&mut driver, &mut tree, 1_000);
        assert_eq!(requests, FrameRequests::START_TICKS);
        assert!(driver.wants_ticks());
        assert_eq!(tree.expander().state(), ExpanderState::Expanding);

        assert_eq!(driver.on_tick(&tree, 1_030), FrameRequests::REDRAW);
        let (requests, surface) = frame(&mut driver, &mut tree, 1_030);
        assert_eq!(requests, FrameRequests::empty());
        assert_eq!(surface.texts().len(), 2);

        let (requests, surface) = frame(&mut driver, &mut tree, 1_100);
        assert_eq!(requests, FrameRequests::STOP_TICKS);
        assert!(!driver.wants_ticks());
        assert_eq!(surface.texts(), ["root", "child1", "child2", "Pointer: 0, 0"]);

        // Ticks after the set drained are no-ops.
        assert_eq!(driver.on_tick(&tree, 1_200), FrameRequests::empty());
    }

    #[test]
    fn tick_expires_transitions_without_a_frame() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample();
        driver.on_pointer_down(ROOT_EXPANDER);
        frame(&mut driver, &mut tree, 0);

        assert_eq!(
            driver.on_tick(&tree, 150),
            FrameRequests::REDRAW | FrameRequests::STOP_TICKS
        );
        assert!(!driver.wants_ticks());
        // The final redraw snaps the expander without asking for more ticks.
        let (requests, _) = frame(&mut driver, &mut tree, 150);
        assert_eq!(requests, FrameRequests::empty());
        assert_eq!(tree.expander().state(), ExpanderState::Expanded);
    }

    #[test]
    fn hidden_transition_still_expires() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        // child1's expander: header at y 25..45, box x 15..25.
        driver.on_pointer_down(Point::new(18.0, 30.0));
        frame(&mut driver, &mut tree, 0);
        assert_eq!(tree.children[0].expander().state(), ExpanderState::Expanding);

        // Collapse the root right away; child1 is no longer laid out after
        // the root settles.
        driver.on_pointer_down(ROOT_EXPANDER);
        frame(&mut driver, &mut tree, 10);
        assert_eq!(driver.running_transitions(), 2);
        frame(&mut driver, &mut tree, 110);
        assert_eq!(tree.expander().state(), ExpanderState::Collapsed);
        assert_eq!(driver.running_transitions(), 1);

        let requests = driver.on_tick(&tree, 120);
        assert!(requests.contains(FrameRequests::STOP_TICKS));
        assert!(!driver.wants_ticks());
    }

    #[test]
    fn transition_ids_are_unique_across_frames() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        driver.on_pointer_down(Point::new(18.0, 30.0));
        frame(&mut driver, &mut tree, 0);
        let first = tree.children[0].expander().transition();

        // child2's expander: header at y 45..65.
        driver.on_pointer_down(Point::new(18.0, 50.0));
        frame(&mut driver, &mut tree, 20);
        let second = tree.children[1].expander().transition();

        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
        assert_eq!(driver.running_transitions(), 2);
    }

    #[test]
    fn clicks_are_consumed_by_the_next_frame() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample();
        // Lands on the label, not the expander.
        driver.on_pointer_down(Point::new(60.0, 12.0));
        frame(&mut driver, &mut tree, 0);
        assert_eq!(driver.slots().pending_click(), None);

        // A stale click does not replay later.
        frame(&mut driver, &mut tree, 10);
        assert_eq!(tree.expander().state(), ExpanderState::Collapsed);
    }

    #[test]
    fn hover_and_status_follow_the_pointer() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample();
        assert_eq!(
            driver.on_pointer_move(Point::new(50.5, 10.9)),
            FrameRequests::REDRAW
        );
        let (_, surface) = frame(&mut driver, &mut tree, 0);
        assert_eq!(surface.texts()[1], "Pointer: 50, 10");
        let fills = surface.fills();
        assert_eq!(fills[1], Rect::new(20.0, 5.0, 195.0, 25.0));
    }

    #[test]
    fn tiny_client_draws_only_background_and_status() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample();
        let mut surface = RecordingSurface::default();
        let mut shaper = FixedWidthShaper::default();
        driver
            .render(
                &mut surface,
                &mut shaper,
                Rect::new(0.0, 0.0, 100.0, 25.0),
                &mut tree,
                0,
            )
            .unwrap();
        assert_eq!(surface.texts(), ["Pointer: 0, 0"]);
        assert_eq!(surface.clip_depth(), 0);
    }

    #[test]
    fn errors_abort_the_frame_and_keep_clips_balanced() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        let mut surface = RecordingSurface::default();
        let mut shaper = FixedWidthShaper::default().failing_on("child2");
        let err = driver
            .render(&mut surface, &mut shaper, CLIENT, &mut tree, 0)
            .unwrap_err();
        assert!(matches!(err, RenderError::TextShaping(_)));
        assert_eq!(surface.clip_depth(), 0);
        assert_eq!(surface.ops.last(), Some(&DrawOp::PopClip));

        let mut failing = RecordingSurface::failing_clip();
        let err = driver
            .render(&mut failing, &mut FixedWidthShaper::default(), CLIENT, &mut tree, 0)
            .unwrap_err();
        assert!(matches!(err, RenderError::Resource(_)));
        assert!(failing.texts().is_empty());
    }

    #[test]
    fn transitions_started_before_an_error_stay_registered() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        driver.on_pointer_down(Point::new(18.0, 30.0));
        let mut surface = RecordingSurface::default();
        let mut shaper = FixedWidthShaper::default().failing_on("child2");
        assert!(
            driver
                .render(&mut surface, &mut shaper, CLIENT, &mut tree, 0)
                .is_err()
        );
        assert!(driver.wants_ticks());
    }

    #[test]
    fn tick_start_lost_to_a_failed_frame_is_reported_later() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        driver.on_pointer_down(Point::new(18.0, 30.0));
        let mut surface = RecordingSurface::default();
        let mut shaper = FixedWidthShaper::default().failing_on("child2");
        assert!(
            driver
                .render(&mut surface, &mut shaper, CLIENT, &mut tree, 0)
                .is_err()
        );

        let (requests, _) = frame(&mut driver, &mut tree, 16);
        assert_eq!(requests, FrameRequests::START_TICKS);
        let (requests, _) = frame(&mut driver, &mut tree, 32);
        assert_eq!(requests, FrameRequests::empty());
        let (requests, _) = frame(&mut driver, &mut tree, 100);
        assert_eq!(requests, FrameRequests::STOP_TICKS);
    }

    #[test]
    fn transition_that_ends_before_the_next_good_frame_needs_no_ticks() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        driver.on_pointer_down(Point::new(18.0, 30.0));
        let mut shaper = FixedWidthShaper::default().failing_on("child2");
        let mut surface = RecordingSurface::default();
        assert!(
            driver
                .render(&mut surface, &mut shaper, CLIENT, &mut tree, 0)
                .is_err()
        );

        let (requests, _) = frame(&mut driver, &mut tree, 500);
        assert_eq!(requests, FrameRequests::empty());
        assert!(!driver.wants_ticks());
        assert_eq!(tree.children[0].expander().state(), ExpanderState::Expanded);
    }

    #[test]
    fn tick_stop_lost_to_a_failed_frame_comes_with_the_next_tick() {
        let mut driver = TreeViewDriver::new();
        let mut tree = sample().expanded();
        driver.on_pointer_down(Point::new(18.0, 30.0));
        assert_eq!(frame(&mut driver, &mut tree, 0).0, FrameRequests::START_TICKS);

        // This frame settles child1 and then fails.
        let mut shaper = FixedWidthShaper::default().failing_on("child2");
        let mut surface = RecordingSurface::default();
        assert!(
            driver
                .render(&mut surface, &mut shaper, CLIENT, &mut tree, 100)
                .is_err()
        );
        assert!(!driver.wants_ticks());
        assert_eq!(driver.on_tick(&tree, 116), FrameRequests::STOP_TICKS);
        assert_eq!(driver.on_tick(&tree, 132), FrameRequests::empty());
    }

    #[test]
    fn custom_style_moves_rows_and_hit_boxes() {
        let style = TreeStyle {
            header_height: 30.0,
            expander_column: 25.0,
            expander_hit_width: 20.0,
            indent: 20.0,
            margin: 10.0,
            ..TreeStyle::default()
        };
        let mut driver = TreeViewDriver::with_style(style);
        assert_eq!(driver.style().indent, 20.0);
        let mut tree = sample().expanded();

        let (_, surface) = frame(&mut driver, &mut tree, 0);
        assert_eq!(surface.texts(), ["root", "child1", "child2", "Pointer: 0, 0"]);
        assert_eq!(
            surface.ops[1],
            DrawOp::PushClip(Rect::new(10.0, 10.0, 190.0, 120.0))
        );
        // Rows are 30 tall with the 15 tall label centered; children are
        // indented 20 and their labels sit 25 right of that.
        let origins = surface.text_origins();
        assert_eq!(origins[0], Point::new(35.0, 17.5));
        assert_eq!(origins[1], Point::new(55.0, 47.5));
        assert_eq!(origins[2], Point::new(55.0, 77.5));

        // child1's hit box is x 30..50, y 40..70; the default box would miss.
        driver.on_pointer_down(Point::new(45.0, 65.0));
        let (requests, _) = frame(&mut driver, &mut tree, 10);
        assert_eq!(requests, FrameRequests::START_TICKS);
        assert_eq!(tree.children[0].expander().state(), ExpanderState::Expanding);
    }
}
