//! Page-navigation state machine.
//!
//! The machine has two states: idle, and transitioning between two pages.
//! A transition is accepted only from idle, and the next one can only be
//! accepted after [`NavigationState::complete_transition`] runs once the
//! animation's timer has elapsed. Requests that arrive in the meantime are
//! dropped, not queued.

use crate::zoom::{ZoomLimits, ZoomState};
use std::time::Duration;
use tokio::time::Instant;

/// Direction of a page turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Sign of the page delta
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// An accepted page change whose animation is in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub duration: Duration,
    pub completes_at: Instant,
}

impl Transition {
    /// Fraction of the animation elapsed at `now`, in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let remaining = self.completes_at.saturating_duration_since(now);
        let elapsed = self.duration.saturating_sub(remaining);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Why a navigation request was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    OutOfRange,
    AlreadyThere,
}

#[derive(Debug, Clone)]
pub struct NavigationState {
    current_page: usize,
    total_pages: usize,
    transition: Option<Transition>,
    zoom: ZoomState,
}

impl NavigationState {
    pub fn new(total_pages: usize, limits: ZoomLimits) -> Self {
        Self {
            current_page: 1,
            total_pages,
            transition: None,
            zoom: ZoomState::new(limits),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.transition.is_some()
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomState {
        &mut self.zoom
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_busy() && self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_busy() && self.current_page < self.total_pages
    }

    /// Check a request without changing anything
    pub fn check(&self, target: usize) -> Result<Direction, Rejection> {
        if self.is_busy() {
            return Err(Rejection::Busy);
        }
        if target < 1 || target > self.total_pages {
            return Err(Rejection::OutOfRange);
        }
        if target == self.current_page {
            return Err(Rejection::AlreadyThere);
        }
        Ok(if target > self.current_page {
            Direction::Forward
        } else {
            Direction::Backward
        })
    }

    /// Accept a page change if possible. On acceptance the machine is busy
    /// until [`Self::complete_transition`] and the zoom is reset.
    pub fn begin_transition(
        &mut self,
        target: usize,
        duration: Duration,
        now: Instant,
    ) -> Result<Transition, Rejection> {
        let direction = self.check(target)?;

        let transition = Transition {
            from: self.current_page,
            to: target,
            direction,
            duration,
            completes_at: now + duration,
        };
        self.transition = Some(transition);
        self.zoom.reset();

        Ok(transition)
    }

    /// Restart the in-flight transition's timer from `now` (the animation
    /// starts only once the target page is rendered)
    pub fn start_animation(&mut self, now: Instant) -> Option<Transition> {
        let transition = self.transition.as_mut()?;
        transition.completes_at = now + transition.duration;
        Some(*transition)
    }

    /// Finish the in-flight transition; returns the new current page
    pub fn complete_transition(&mut self) -> Option<usize> {
        let transition = self.transition.take()?;
        self.current_page = transition.to;
        Some(self.current_page)
    }

    /// Drop the in-flight transition without moving (failed render)
    pub fn abort_transition(&mut self) -> Option<Transition> {
        self.transition.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLIP: Duration = Duration::from_millis(1000);

    #[test]
    fn test_initial_state() {
        let state = NavigationState::new(10, ZoomLimits::default());
        assert_eq!(state.current_page(), 1);
        assert!(!state.is_busy());
        assert!(!state.can_go_previous());
        assert!(state.can_go_next());
    }

    #[test]
    fn test_rejections_in_order() {
        let mut state = NavigationState::new(5, ZoomLimits::default());
        assert_eq!(state.check(0), Err(Rejection::OutOfRange));
        assert_eq!(state.check(6), Err(Rejection::OutOfRange));
        assert_eq!(state.check(1), Err(Rejection::AlreadyThere));

        let now = Instant::now();
        state.begin_transition(2, FLIP, now).unwrap();
        // Busy wins over every other reason
        assert_eq!(state.check(0), Err(Rejection::Busy));
        assert_eq!(state.check(2), Err(Rejection::Busy));
        assert_eq!(state.check(3), Err(Rejection::Busy));
    }

    #[test]
    fn test_begin_and_complete() {
        let mut state = NavigationState::new(10, ZoomLimits::default());
        let now = Instant::now();
        let transition = state.begin_transition(7, FLIP, now).unwrap();

        assert_eq!(transition.from, 1);
        assert_eq!(transition.to, 7);
        assert_eq!(transition.direction, Direction::Forward);
        assert_eq!(transition.completes_at, now + FLIP);
        assert!(state.is_busy());
        assert!(!state.can_go_next());
        assert_eq!(state.current_page(), 1);

        assert_eq!(state.complete_transition(), Some(7));
        assert!(!state.is_busy());
        assert_eq!(state.complete_transition(), None);

        let back = state.begin_transition(3, FLIP, now).unwrap();
        assert_eq!(back.direction, Direction::Backward);
        assert_eq!(back.direction.sign(), -1);
    }

    #[test]
    fn test_accepted_transition_resets_zoom() {
        let mut state = NavigationState::new(3, ZoomLimits::default());
        state.zoom_mut().set(2.0);
        state.zoom_mut().pan_by(5.0, 5.0);

        // Rejected request keeps zoom
        assert!(state.begin_transition(1, FLIP, Instant::now()).is_err());
        assert_eq!(state.zoom().level(), 2.0);

        state.begin_transition(2, FLIP, Instant::now()).unwrap();
        assert_eq!(state.zoom().level(), 1.0);
        assert_eq!(state.zoom().pan(), crate::zoom::Pan::ZERO);
    }

    #[test]
    fn test_abort_keeps_page() {
        let mut state = NavigationState::new(3, ZoomLimits::default());
        state.begin_transition(3, FLIP, Instant::now()).unwrap();
        assert!(state.abort_transition().is_some());
        assert_eq!(state.current_page(), 1);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_progress() {
        let now = Instant::now();
        let transition = Transition {
            from: 1,
            to: 2,
            direction: Direction::Forward,
            duration: FLIP,
            completes_at: now + FLIP,
        };
        assert_eq!(transition.progress(now), 0.0);
        assert!((transition.progress(now + FLIP / 2) - 0.5).abs() < 1e-3);
        assert_eq!(transition.progress(now + FLIP * 2), 1.0);
    }
}
