// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input correlation and per-frame context.
//!
//! Pointer input is not queued. [`PointerSlots`] keeps only the latest pointer
//! position and the latest press; every new event overwrites its slot and asks
//! for a redraw so the next frame observes it.
//!
//! A frame sees that input through a [`FrameContext`], which the caller builds
//! and hands to the layout pass. The pending click is taken out of the slots
//! when the frame starts. During layout at most one expander hit box may claim
//! it with [`FrameContext::claim_click`]; a click nobody claims is dropped with
//! the context.

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_region::Region;

use crate::TransitionId;

bitflags::bitflags! {
    /// Follow-up work the host's event loop should schedule.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FrameRequests: u8 {
        /// Repaint the view.
        const REDRAW      = 0b0000_0001;
        /// Start delivering periodic ticks; a transition began.
        const START_TICKS = 0b0000_0010;
        /// Stop delivering ticks; no transition is running any more.
        const STOP_TICKS  = 0b0000_0100;
    }
}

/// Most-recent-wins pointer state, written by the windowing layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSlots {
    pointer: Option<Point>,
    pending_click: Option<Point>,
}

impl PointerSlots {
    /// Create empty slots.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pointer: None,
            pending_click: None,
        }
    }

    /// Record the latest pointer position.
    pub fn on_pointer_move(&mut self, position: Point) -> FrameRequests {
        self.pointer = Some(position);
        FrameRequests::REDRAW
    }

    /// Record the latest press, replacing one that was never consumed.
    pub fn on_pointer_down(&mut self, position: Point) -> FrameRequests {
        self.pending_click = Some(position);
        FrameRequests::REDRAW
    }

    /// Last known pointer position.
    #[must_use]
    pub const fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// The press waiting for the next frame, if any.
    #[must_use]
    pub const fn pending_click(&self) -> Option<Point> {
        self.pending_click
    }

    /// Remove and return the pending press.
    pub fn take_click(&mut self) -> Option<Point> {
        self.pending_click.take()
    }
}

/// Everything a single layout pass reads and reports besides the tree itself.
#[derive(Clone, Debug)]
pub struct FrameContext {
    now: u64,
    hover: Option<Point>,
    click: Option<Point>,
    next_transition: u64,
    started: SmallVec<[TransitionId; 4]>,
    finished: SmallVec<[TransitionId; 4]>,
}

impl FrameContext {
    /// A context for a frame drawn at `now` (milliseconds).
    ///
    /// `hover` is the latest pointer position and `click` the press this
    /// frame may hand to an expander.
    #[must_use]
    pub fn new(now: u64, hover: Option<Point>, click: Option<Point>) -> Self {
        Self {
            now,
            hover,
            click,
            next_transition: 0,
            started: SmallVec::new(),
            finished: SmallVec::new(),
        }
    }

    /// Continue transition numbering from `next` so ids stay unique across frames.
    #[must_use]
    pub fn with_transition_seed(mut self, next: u64) -> Self {
        self.next_transition = next;
        self
    }

    /// Frame timestamp in milliseconds.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Latest pointer position.
    #[must_use]
    pub const fn hover(&self) -> Option<Point> {
        self.hover
    }

    /// The click still waiting to be claimed.
    #[must_use]
    pub const fn pending_click(&self) -> Option<Point> {
        self.click
    }

    /// Whether the pointer is over `rect`.
    #[must_use]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.hover.is_some_and(|p| rect.contains_point(p))
    }

    /// Consume the pending click if it lands in `hit_box`.
    ///
    /// Returns `true` at most once per frame.
    pub fn claim_click(&mut self, hit_box: Rect) -> bool {
        match self.click {
            Some(p) if hit_box.contains_point(p) => {
                self.click = None;
                true
            }
            _ => false,
        }
    }

    /// Allocate an id for a transition that may start in this frame.
    pub fn next_transition_id(&mut self) -> TransitionId {
        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        id
    }

    /// The seed the next frame should continue numbering from.
    #[must_use]
    pub const fn transition_seed(&self) -> u64 {
        self.next_transition
    }

    /// Note that the transition `id` began during this frame.
    pub fn transition_started(&mut self, id: TransitionId) {
        self.started.push(id);
    }

    /// Note that the transition `id` settled during this frame.
    pub fn transition_finished(&mut self, id: TransitionId) {
        self.finished.push(id);
    }

    /// Transitions that began during this frame, in layout order.
    #[must_use]
    pub fn started(&self) -> &[TransitionId] {
        &self.started
    }

    /// Transitions that settled during this frame, in layout order.
    #[must_use]
    pub fn finished(&self) -> &[TransitionId] {
        &self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameContext, FrameRequests, PointerSlots};
    use kurbo::{Point, Rect};

    #[test]
    fn slots_keep_only_the_latest_event() {
        let mut slots = PointerSlots::new();
        assert_eq!(slots.on_pointer_move(Point::new(1.0, 1.0)), FrameRequests::REDRAW);
        slots.on_pointer_move(Point::new(2.0, 3.0));
        assert_eq!(slots.pointer(), Some(Point::new(2.0, 3.0)));

        assert_eq!(slots.on_pointer_down(Point::new(5.0, 5.0)), FrameRequests::REDRAW);
        slots.on_pointer_down(Point::new(6.0, 7.0));
        assert_eq!(slots.take_click(), Some(Point::new(6.0, 7.0)));
        assert_eq!(slots.take_click(), None);
        // The pointer position survives a click being taken.
        assert_eq!(slots.pointer(), Some(Point::new(2.0, 3.0)));
    }

    #[test]
    fn click_is_claimed_once() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 20.0, 20.0);
        let mut frame = FrameContext::new(0, None, Some(Point::new(5.0, 5.0)));
        assert!(!frame.claim_click(Rect::new(50.0, 50.0, 60.0, 60.0)));
        assert!(frame.claim_click(a));
        assert!(!frame.claim_click(b));
        assert_eq!(frame.pending_click(), None);
    }

    #[test]
    fn click_on_the_far_edge_misses() {
        let mut frame = FrameContext::new(0, None, Some(Point::new(10.0, 5.0)));
        assert!(!frame.claim_click(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(frame.claim_click(Rect::new(10.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn hover_uses_half_open_bounds() {
        let frame = FrameContext::new(0, Some(Point::new(0.0, 20.0)), None);
        assert!(!frame.is_hovered(Rect::new(0.0, 0.0, 100.0, 20.0)));
        assert!(frame.is_hovered(Rect::new(0.0, 20.0, 100.0, 40.0)));
        assert!(!FrameContext::new(0, None, None).is_hovered(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn transition_ids_continue_from_seed() {
        let mut frame = FrameContext::new(0, None, None).with_transition_seed(41);
        let id = frame.next_transition_id();
        assert_eq!(id.0, 41);
        frame.transition_started(id);
        assert_eq!(frame.started(), &[id]);
        assert_eq!(frame.transition_seed(), 42);
        assert!(frame.finished().is_empty());
    }
}
