// SPDX-License-Identifier: MPL-2.0
//! Overlay lifecycle for the selected submission.
//!
//! The shell owns which submission is shown, whether the overlay is open,
//! the slide animation, and the page scroll lock. Every transition is a
//! plain method taking the current [`Instant`], so the whole lifecycle can be
//! driven from tests without a window.
//!
//! Closing is two-phased. [`Shell::close_overlay`] flips `open` to false at
//! once and starts the slide-out; the submission stays selected until the
//! animation finishes and [`Shell::finish_close`] is called with the ticket
//! reported by [`Shell::advance`]. Tickets carry the generation they were
//! issued for, so a close completing after a re-open is ignored.

use crate::gallery::Submission;
use iced::widget::scrollable::RelativeOffset;
use std::time::{Duration, Instant};

/// Derived state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Opening,
    Closing,
}

/// A running slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub started_at: Instant,
    pub direction: Direction,
}

/// Proof that a close was started for a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseTicket {
    generation: u64,
}

impl CloseTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Reported by [`Shell::advance`] when an animation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Opened,
    Closed(CloseTicket),
}

/// Page scroll position captured when the overlay opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLock {
    pub offset: RelativeOffset,
}

#[derive(Debug, Clone)]
pub struct Shell {
    selected: Option<Submission>,
    open: bool,
    transition: Option<Transition>,
    generation: u64,
    scroll_lock: Option<ScrollLock>,
    duration: Duration,
    /// Last offset reported by the page scrollable.
    scroll_offset: RelativeOffset,
    /// Offset waiting to be applied to the page.
    pending_restore: Option<RelativeOffset>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_TRANSITION_MS))
    }
}

impl Shell {
    /// Creates a closed shell whose slide takes `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            selected: None,
            open: false,
            transition: None,
            generation: 0,
            scroll_lock: None,
            duration,
            scroll_offset: RelativeOffset::START,
            pending_restore: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Submission> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    #[must_use]
    pub fn scroll_lock(&self) -> Option<ScrollLock> {
        self.scroll_lock
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> OverlayPhase {
        match (self.open, self.selected.is_some(), self.transition) {
            (true, _, Some(Transition { direction: Direction::Opening, .. })) => OverlayPhase::Opening,
            (true, _, _) => OverlayPhase::Open,
            (false, true, _) => OverlayPhase::Closing,
            (false, false, _) => OverlayPhase::Closed,
        }
    }

    /// Records a page scroll. Returns `false` when the lock dropped it.
    pub fn record_scroll(&mut self, offset: RelativeOffset) -> bool {
        if self.scroll_lock.is_some() {
            return false;
        }
        self.scroll_offset = offset;
        true
    }

    /// Shows `submission`, starting the slide-in at `now`.
    ///
    /// Opening during a slide-out reverses it from its current position.
    pub fn open_overlay(&mut self, submission: Submission, now: Instant) {
        let shown = self.visible_fraction(now);

        self.selected = Some(submission);
        self.open = true;
        self.transition = Some(Transition {
            started_at: rewind(now, self.duration.mul_f32(shown)),
            direction: Direction::Opening,
        });
        if self.scroll_lock.is_none() {
            self.scroll_lock = Some(ScrollLock {
                offset: self.scroll_offset,
            });
        }
        self.pending_restore = None;
        self.generation += 1;

        tracing::debug!(generation = self.generation, "overlay opening");
    }

    /// Starts the slide-out at `now` and releases the scroll lock.
    ///
    /// Returns `None` when the overlay is not open.
    pub fn close_overlay(&mut self, now: Instant) -> Option<CloseTicket> {
        if !self.open {
            return None;
        }

        let shown = self.visible_fraction(now);
        self.open = false;
        self.transition = Some(Transition {
            started_at: rewind(now, self.duration.mul_f32(1.0 - shown)),
            direction: Direction::Closing,
        });
        self.release_scroll_lock();

        tracing::debug!(generation = self.generation, "overlay closing");
        Some(CloseTicket {
            generation: self.generation,
        })
    }

    /// Completes the running animation once its time is up.
    pub fn advance(&mut self, now: Instant) -> Option<TransitionEvent> {
        let transition = self.transition?;
        if now.saturating_duration_since(transition.started_at) < self.duration {
            return None;
        }

        self.transition = None;
        Some(match transition.direction {
            Direction::Opening => TransitionEvent::Opened,
            Direction::Closing => TransitionEvent::Closed(CloseTicket {
                generation: self.generation,
            }),
        })
    }

    /// Drops the selection if `ticket` is still current.
    ///
    /// Returns `true` when the selection was cleared.
    pub fn finish_close(&mut self, ticket: CloseTicket) -> bool {
        if ticket.generation != self.generation || self.open {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale close"
            );
            return false;
        }
        self.selected = None;
        self.transition = None;
        true
    }

    /// Clears everything and releases the scroll lock.
    pub fn teardown(&mut self) {
        self.release_scroll_lock();
        self.selected = None;
        self.open = false;
        self.transition = None;
        self.generation += 1;
    }

    /// Offset to re-apply to the page after the lock was released.
    pub fn take_scroll_restore(&mut self) -> Option<RelativeOffset> {
        self.pending_restore.take()
    }

    /// How much of the panel is on screen at `now`, from 0 to 1, eased.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        ease_in_out(self.visible_fraction(now))
    }

    /// Linear share of the panel on screen at `now`.
    fn visible_fraction(&self, now: Instant) -> f32 {
        let Some(transition) = self.transition else {
            return if self.open { 1.0 } else { 0.0 };
        };
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(transition.started_at).as_secs_f32()
                / self.duration.as_secs_f32())
            .clamp(0.0, 1.0)
        };
        match transition.direction {
            Direction::Opening => t,
            Direction::Closing => 1.0 - t,
        }
    }

    fn release_scroll_lock(&mut self) {
        if let Some(lock) = self.scroll_lock.take() {
            self.scroll_offset = lock.offset;
            self.pending_restore = Some(lock.offset);
        }
    }
}

fn rewind(now: Instant, by: Duration) -> Instant {
    now.checked_sub(by).unwrap_or(now)
}

/// Cubic ease-in-out over `[0, 1]`.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
