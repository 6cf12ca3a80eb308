// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expand/collapse state machine with a time-based glyph tween.
//!
//! ```text
//!              click                    elapsed >= duration
//! Collapsed ----------> Expanding ---------------------------> Expanded
//!     ^                                                          |
//!     |      elapsed >= duration                 click           |
//!     +------------------------------ Collapsing <---------------+
//! ```
//!
//! While a transition runs, [`Expander::update`] samples wall-clock time and
//! sets the glyph angle by linear interpolation, so the result does not depend
//! on how often frames are drawn. Clicks that arrive mid-transition are ignored.
//!
//! ```
//! use understory_tree_view::{Expander, ExpanderState, Step, TransitionId};
//!
//! let mut expander = Expander::collapsed();
//! assert!(expander.toggle(1_000, TransitionId(1)));
//!
//! assert_eq!(expander.update(1_050), Step::Running);
//! assert_eq!(expander.angle(), 45.0);
//!
//! assert_eq!(expander.update(1_100), Step::Finished(TransitionId(1)));
//! assert_eq!(expander.state(), ExpanderState::Expanded);
//! assert_eq!(expander.angle(), 90.0);
//! ```

/// Length of every expand and collapse transition, in milliseconds.
pub const TRANSITION_DURATION_MS: u64 = 100;

/// Glyph rotation of a fully expanded node, in degrees.
pub const EXPANDED_ANGLE: f64 = 90.0;

/// Identifies one run of a transition, from click to settling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u64);

/// Where a node is in its expand/collapse cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpanderState {
    /// Children hidden, glyph at 0°.
    #[default]
    Collapsed,
    /// Glyph turning towards 90°; children stay hidden until it settles.
    Expanding,
    /// Children shown, glyph at 90°.
    Expanded,
    /// Glyph turning back towards 0°; children stay shown until it settles.
    Collapsing,
}

impl ExpanderState {
    /// Whether a transition is in progress.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    /// Whether children are laid out in this state.
    #[must_use]
    pub const fn shows_children(self) -> bool {
        matches!(self, Self::Expanded | Self::Collapsing)
    }
}

/// Outcome of [`Expander::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Settled; nothing changed.
    Idle,
    /// A transition is still in progress.
    Running,
    /// The transition with this id just reached its terminal state.
    Finished(TransitionId),
}

/// Per-node animation state.
///
/// The angle is derived: it only changes through [`Expander::update`], from the
/// state and the time elapsed since the transition started.
#[derive(Clone, Debug, PartialEq)]
pub struct Expander {
    state: ExpanderState,
    transition_start: u64,
    angle: f64,
    transition: Option<TransitionId>,
}

impl Default for Expander {
    fn default() -> Self {
        Self::collapsed()
    }
}

impl Expander {
    /// A settled, collapsed expander.
    #[must_use]
    pub const fn collapsed() -> Self {
        Self {
            state: ExpanderState::Collapsed,
            transition_start: 0,
            angle: 0.0,
            transition: None,
        }
    }

    /// A settled, expanded expander.
    #[must_use]
    pub const fn expanded() -> Self {
        Self {
            state: ExpanderState::Expanded,
            transition_start: 0,
            angle: EXPANDED_ANGLE,
            transition: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ExpanderState {
        self.state
    }

    /// Glyph rotation in degrees, within `0.0..=90.0`.
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Timestamp of the most recent transition start.
    #[must_use]
    pub const fn transition_start(&self) -> u64 {
        self.transition_start
    }

    /// The running transition, if any.
    #[must_use]
    pub const fn transition(&self) -> Option<TransitionId> {
        self.transition
    }

    /// Whether children are laid out right now.
    #[must_use]
    pub const fn shows_children(&self) -> bool {
        self.state.shows_children()
    }

    /// React to a click on the expander.
    ///
    /// Starts expanding a collapsed node or collapsing an expanded one,
    /// stamping `now` as the transition start. Returns `false` and leaves the
    /// state alone if a transition is still running at `now`. A transition
    /// that has run out but was never updated is settled first, see
    /// [`Expander::settle`].
    pub fn toggle(&mut self, now: u64, id: TransitionId) -> bool {
        self.settle(now);
        let next = match self.state {
            ExpanderState::Collapsed => ExpanderState::Expanding,
            ExpanderState::Expanded => ExpanderState::Collapsing,
            ExpanderState::Expanding | ExpanderState::Collapsing => return false,
        };
        self.state = next;
        self.transition_start = now;
        self.transition = Some(id);
        true
    }

    /// Advance the tween to `now`.
    ///
    /// A timestamp earlier than the transition start counts as no time elapsed.
    pub fn update(&mut self, now: u64) -> Step {
        if !self.state.is_transient() {
            return Step::Idle;
        }

        let elapsed = now.saturating_sub(self.transition_start);
        if elapsed >= TRANSITION_DURATION_MS {
            let (state, angle) = match self.state {
                ExpanderState::Expanding => (ExpanderState::Expanded, EXPANDED_ANGLE),
                _ => (ExpanderState::Collapsed, 0.0),
            };
            self.state = state;
            self.angle = angle;
            return match self.transition.take() {
                Some(id) => Step::Finished(id),
                None => Step::Idle,
            };
        }

        #[allow(
            clippy::cast_precision_loss,
            reason = "elapsed is below the transition duration"
        )]
        let ratio = elapsed as f64 / TRANSITION_DURATION_MS as f64;
        self.angle = match self.state {
            ExpanderState::Expanding => EXPANDED_ANGLE * ratio,
            _ => EXPANDED_ANGLE * (1.0 - ratio),
        };
        Step::Running
    }

    /// Snap a transition that has run out by `now` to its terminal state.
    ///
    /// Returns the finished transition's id. Running transitions are left
    /// alone, so this never moves the glyph mid-tween.
    pub fn settle(&mut self, now: u64) -> Option<TransitionId> {
        if !self.state.is_transient() || self.is_active_at(now) {
            return None;
        }
        match self.update(now) {
            Step::Finished(id) => Some(id),
            Step::Idle | Step::Running => None,
        }
    }

    /// Whether this expander's transition is still running at `now`.
    ///
    /// Unlike [`Expander::update`] this does not mutate, so it can be polled
    /// for nodes that are not currently laid out.
    #[must_use]
    pub const fn is_active_at(&self, now: u64) -> bool {
        self.state.is_transient()
            && now.saturating_sub(self.transition_start) < TRANSITION_DURATION_MS
    }
}
