//! Per-page placement for the presentation layer.
//!
//! Transforms are kept as independent numeric fields and only composed into a
//! CSS-style string when a presenter asks for one.

use crate::constants::*;
use crate::navigation::{Direction, NavigationState};

/// Visual position of a page in the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Already turned over
    Left,
    /// Facing the reader
    Center,
    /// Not yet reached, stacked underneath
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    pub rotate_y_deg: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub z_index: i32,
}

impl Default for PageTransform {
    fn default() -> Self {
        Self {
            rotate_y_deg: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            z_index: Z_INDEX_BEHIND,
        }
    }
}

impl PageTransform {
    /// Compose into a CSS `transform` value
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) rotateY({}deg) scale({})",
            self.translate_x, self.translate_y, self.rotate_y_deg, self.scale
        )
    }

    /// Linear interpolation towards `to`; the stacking order switches at the end.
    pub fn lerp(&self, to: &PageTransform, t: f32) -> PageTransform {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        PageTransform {
            rotate_y_deg: mix(self.rotate_y_deg, to.rotate_y_deg),
            translate_x: mix(self.translate_x, to.translate_x),
            translate_y: mix(self.translate_y, to.translate_y),
            scale: mix(self.scale, to.scale),
            z_index: if t < 1.0 { self.z_index } else { to.z_index },
        }
    }

    /// Horizontal foreshortening of the Y rotation, as seen head-on
    pub fn visible_width_factor(&self) -> f32 {
        self.rotate_y_deg.to_radians().cos()
    }

    /// True when the page shows its back side to the reader
    pub fn is_facing_away(&self) -> bool {
        self.visible_width_factor() < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page: usize,
    pub slot: Slot,
    pub transform: PageTransform,
}

/// Placement of `page` for the current navigation state
pub fn placement(page: usize, state: &NavigationState) -> PagePlacement {
    if let Some(transition) = state.transition() {
        if page == transition.to {
            return front_page(page);
        }
        if page == transition.from {
            let rotate_y_deg = match transition.direction {
                Direction::Forward => TURNED_ROTATION_DEG,
                Direction::Backward => -TURNED_ROTATION_DEG,
            };
            let slot = match transition.direction {
                Direction::Forward => Slot::Left,
                Direction::Backward => Slot::Right,
            };
            return PagePlacement {
                page,
                slot,
                transform: PageTransform {
                    rotate_y_deg,
                    z_index: Z_INDEX_BEHIND,
                    ..Default::default()
                },
            };
        }
        return resting_placement(page, transition.to);
    }

    let current = state.current_page();
    if page == current {
        let zoom = state.zoom();
        let pan = zoom.pan();
        return PagePlacement {
            page,
            slot: Slot::Center,
            transform: PageTransform {
                rotate_y_deg: 0.0,
                translate_x: pan.x,
                translate_y: pan.y,
                scale: zoom.level(),
                z_index: Z_INDEX_FRONT,
            },
        };
    }
    resting_placement(page, current)
}

fn front_page(page: usize) -> PagePlacement {
    PagePlacement {
        page,
        slot: Slot::Center,
        transform: PageTransform {
            z_index: Z_INDEX_FRONT,
            ..Default::default()
        },
    }
}

/// Placement of a page that is neither moving nor zoomed, with `front`
/// facing the reader
pub fn resting_placement(page: usize, front: usize) -> PagePlacement {
    if page == front {
        return front_page(page);
    }
    if page < front {
        PagePlacement {
            page,
            slot: Slot::Left,
            transform: PageTransform {
                rotate_y_deg: -TURNED_ROTATION_DEG,
                z_index: Z_INDEX_TURNED,
                ..Default::default()
            },
        }
    } else {
        PagePlacement {
            page,
            slot: Slot::Right,
            transform: PageTransform::default(),
        }
    }
}

/// Pages a presenter needs on screen: the pair being swapped while a
/// transition runs, otherwise the current page and the one underneath it.
pub fn visible_pages(state: &NavigationState) -> Vec<usize> {
    if let Some(transition) = state.transition() {
        return vec![transition.from, transition.to];
    }
    let current = state.current_page();
    if current < state.total_pages() {
        vec![current, current + 1]
    } else {
        vec![current]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::ZoomLimits;
    use std::time::Duration;
    use tokio::time::Instant;

    fn state(total: usize) -> NavigationState {
        NavigationState::new(total, ZoomLimits::default())
    }

    #[test]
    fn test_idle_slots() {
        let mut state = state(5);
        state
            .begin_transition(3, Duration::ZERO, Instant::now())
            .unwrap();
        state.complete_transition();

        assert_eq!(placement(1, &state).slot, Slot::Left);
        assert_eq!(placement(3, &state).slot, Slot::Center);
        assert_eq!(placement(4, &state).slot, Slot::Right);
        assert_eq!(placement(3, &state).transform.z_index, Z_INDEX_FRONT);
        assert_eq!(placement(1, &state).transform.rotate_y_deg, -180.0);
    }

    #[test]
    fn test_current_page_carries_zoom_and_pan() {
        let mut state = state(2);
        state.zoom_mut().set(2.0);
        state.zoom_mut().pan_by(12.0, -4.0);

        let transform = placement(1, &state).transform;
        assert_eq!(transform.scale, 2.0);
        assert_eq!(transform.translate_x, 12.0);
        assert_eq!(transform.translate_y, -4.0);
    }

    #[test]
    fn test_transition_forward() {
        let mut state = state(10);
        state
            .begin_transition(2, Duration::from_secs(1), Instant::now())
            .unwrap();

        let leaving = placement(1, &state);
        assert_eq!(leaving.transform.rotate_y_deg, 180.0);
        assert_eq!(leaving.transform.z_index, Z_INDEX_BEHIND);
        let arriving = placement(2, &state);
        assert_eq!(arriving.slot, Slot::Center);
        assert_eq!(arriving.transform.rotate_y_deg, 0.0);
        assert_eq!(arriving.transform.z_index, Z_INDEX_FRONT);

        assert_eq!(visible_pages(&state), vec![1, 2]);
    }

    #[test]
    fn test_transition_backward_turns_the_other_way() {
        let mut state = state(10);
        state
            .begin_transition(4, Duration::ZERO, Instant::now())
            .unwrap();
        state.complete_transition();
        state
            .begin_transition(1, Duration::from_secs(1), Instant::now())
            .unwrap();

        let leaving = placement(4, &state);
        assert_eq!(leaving.transform.rotate_y_deg, -180.0);
        assert_eq!(leaving.slot, Slot::Right);
        // Pages between a jump are not moved
        assert_eq!(placement(2, &state).slot, Slot::Right);
    }

    #[test]
    fn test_visible_pages_at_end() {
        let mut state = state(2);
        assert_eq!(visible_pages(&state), vec![1, 2]);
        state
            .begin_transition(2, Duration::ZERO, Instant::now())
            .unwrap();
        state.complete_transition();
        assert_eq!(visible_pages(&state), vec![2]);
    }

    #[test]
    fn test_css_and_lerp() {
        let from = PageTransform {
            z_index: Z_INDEX_FRONT,
            ..Default::default()
        };
        let to = PageTransform {
            rotate_y_deg: 180.0,
            z_index: Z_INDEX_BEHIND,
            ..Default::default()
        };

        assert_eq!(
            to.to_css(),
            "translate(0px, 0px) rotateY(180deg) scale(1)"
        );

        let half = from.lerp(&to, 0.5);
        assert_eq!(half.rotate_y_deg, 90.0);
        assert_eq!(half.z_index, Z_INDEX_FRONT);
        assert_eq!(from.lerp(&to, 1.0).z_index, Z_INDEX_BEHIND);
        assert!(from.lerp(&to, 0.75).is_facing_away());
        assert!(!from.lerp(&to, 0.25).is_facing_away());
    }
}
