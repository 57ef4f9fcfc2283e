use crate::layout::{PagePlacement, placement, visible_pages};
use crate::navigation::{NavigationState, Transition};
use crate::types::{Bitmap, Tier};
use crate::zoom::Pan;
use std::sync::Arc;

/// Snapshot of everything a presenter shows
#[derive(Debug, Clone, PartialEq)]
pub struct FlipbookView {
    pub current_page: usize,
    /// The page being turned to while busy, otherwise the current page
    pub active_page: usize,
    pub total_pages: usize,
    pub zoom_level: f32,
    pub zoom_percent: u32,
    pub pan: Pan,
    pub busy: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub pages: Vec<PagePlacement>,
}

impl FlipbookView {
    pub fn from_state(state: &NavigationState) -> Self {
        let zoom = state.zoom();
        Self {
            current_page: state.current_page(),
            active_page: state
                .transition()
                .map_or(state.current_page(), |t| t.to),
            total_pages: state.total_pages(),
            zoom_level: zoom.level(),
            zoom_percent: zoom.percent(),
            pan: zoom.pan(),
            busy: state.is_busy(),
            can_go_previous: state.can_go_previous(),
            can_go_next: state.can_go_next(),
            pages: visible_pages(state)
                .into_iter()
                .map(|page| placement(page, state))
                .collect(),
        }
    }

    pub fn placement(&self, page: usize) -> Option<&PagePlacement> {
        self.pages.iter().find(|p| p.page == page)
    }
}

/// Receiver of flipbook output
pub trait Presenter: Send {
    fn state_changed(&mut self, view: &FlipbookView);

    /// Animate from `transition.from` to `transition.to`
    fn transition_started(&mut self, transition: &Transition);

    fn page_rendered(&mut self, _page: usize, _tier: Tier, _bitmap: &Arc<Bitmap>) {}
}

/// Presenter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn state_changed(&mut self, _view: &FlipbookView) {}

    fn transition_started(&mut self, _transition: &Transition) {}
}
