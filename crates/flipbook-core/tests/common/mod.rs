#![allow(dead_code)]

use flipbook_core::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory document whose pages are all `width_pt` x `height_pt`
#[derive(Clone)]
pub struct FakeSource {
    pages: usize,
    width_pt: f32,
    height_pt: f32,
    renders: Arc<Mutex<Vec<(usize, f32)>>>,
    failing: Option<(usize, f32)>,
    delay: Option<Duration>,
}

impl FakeSource {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            width_pt: 100.0,
            height_pt: 140.0,
            renders: Arc::new(Mutex::new(Vec::new())),
            failing: None,
            delay: None,
        }
    }

    /// Fail renders of `page` at `min_scale` or above (thumbnails still work)
    pub fn failing_on(mut self, page: usize, min_scale: f32) -> Self {
        self.failing = Some((page, min_scale));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn renders(&self) -> Vec<(usize, f32)> {
        self.renders.lock().unwrap().clone()
    }

    /// Renders made at exactly `scale`
    pub fn pages_rendered_at(&self, scale: f32) -> Vec<usize> {
        self.renders()
            .into_iter()
            .filter(|(_, s)| (s - scale).abs() < 1e-4)
            .map(|(page, _)| page)
            .collect()
    }
}

impl DocumentSource for FakeSource {
    fn page_count(&self) -> usize {
        self.pages
    }

    async fn render(&self, page: usize, scale: f32) -> Result<Bitmap> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some((failing_page, min_scale)) = self.failing {
            if page == failing_page && scale >= min_scale {
                return Err(FlipbookError::PageRender {
                    page,
                    message: "corrupt content stream".to_string(),
                });
            }
        }

        self.renders.lock().unwrap().push((page, scale));

        let width = ((self.width_pt * scale).round() as u32).max(1);
        let height = ((self.height_pt * scale).round() as u32).max(1);
        Ok(Bitmap::new(
            vec![page as u8; (width * height * 4) as usize],
            width,
            height,
        ))
    }
}

/// Presenter that remembers everything it was told
#[derive(Default)]
pub struct RecordingPresenter {
    pub views: Vec<FlipbookView>,
    pub transitions: Vec<Transition>,
    pub rendered: Vec<(usize, Tier)>,
}

impl RecordingPresenter {
    pub fn last_view(&self) -> &FlipbookView {
        self.views.last().expect("no view published")
    }
}

impl Presenter for RecordingPresenter {
    fn state_changed(&mut self, view: &FlipbookView) {
        self.views.push(view.clone());
    }

    fn transition_started(&mut self, transition: &Transition) {
        self.transitions.push(*transition);
    }

    fn page_rendered(&mut self, page: usize, tier: Tier, _bitmap: &Arc<Bitmap>) {
        self.rendered.push((page, tier));
    }
}

pub type TestBook = Flipbook<FakeSource, RecordingPresenter>;

pub async fn open(source: &FakeSource) -> TestBook {
    open_with(source, FlipbookOptions::default()).await
}

pub async fn open_with(source: &FakeSource, options: FlipbookOptions) -> TestBook {
    Flipbook::open(source.clone(), RecordingPresenter::default(), options)
        .await
        .unwrap()
}
