use crate::cache::PageCache;
use crate::input::Intent;
use crate::layout::visible_pages;
use crate::navigation::{NavigationState, Transition};
use crate::options::FlipbookOptions;
use crate::presenter::{FlipbookView, Presenter};
use crate::source::DocumentSource;
use crate::thumbnails::ThumbnailSet;
use crate::types::*;
use crate::zoom::{ZoomLimits, ZoomState};
use std::sync::Arc;
use tokio::time::Instant;

/// What happened to a dispatched [`Intent`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    TransitionStarted(Transition),
    /// Rejected (busy, out of range, nothing to do); not an error
    Ignored,
    /// Effective zoom level after the request
    Zoom(f32),
    Panned,
    Resized { base_scale: f32 },
    /// A transition is in flight; the resize runs when it completes
    ResizeDeferred,
    CloseRequested,
}

/// One open document being viewed as a flipbook.
///
/// Owns the navigation state, the page cache and the thumbnails. Every
/// mutation goes through `&mut self`, so operations are serialized by
/// ownership and at most one render is in flight at any time.
pub struct Flipbook<S: DocumentSource, P: Presenter> {
    source: S,
    presenter: P,
    options: FlipbookOptions,
    state: NavigationState,
    cache: PageCache,
    thumbnails: ThumbnailSet,
    base_scale: f32,
    pending_resize: Option<(f32, f32)>,
}

impl<S: DocumentSource, P: Presenter> Flipbook<S, P> {
    /// Load thumbnails and the first pages, then publish the initial view.
    /// Any failure here is a document-load failure.
    pub async fn open(source: S, presenter: P, options: FlipbookOptions) -> Result<Self> {
        options.validate()?;

        let total_pages = source.page_count();
        if total_pages == 0 {
            return Err(FlipbookError::DocumentLoad(
                "Document has no pages".to_string(),
            ));
        }

        let thumbnails = ThumbnailSet::render(&source, options.thumbnail_scale)
            .await
            .map_err(into_load_error)?;

        let mut flipbook = Self {
            source,
            presenter,
            state: NavigationState::new(total_pages, ZoomLimits::from(&options)),
            cache: PageCache::new(),
            thumbnails,
            base_scale: options.base_scale,
            options,
            pending_resize: None,
        };

        for page in visible_pages(&flipbook.state) {
            flipbook
                .ensure_page(page, Tier::Base)
                .await
                .map_err(into_load_error)?;
        }

        log::info!("Opened flipbook with {} pages", total_pages);
        flipbook.publish();
        Ok(flipbook)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Ask to show `target`. Busy, out-of-range and repeat requests are
    /// ignored and return `Ok(None)`. An accepted request resets zoom, makes
    /// sure the target page is rendered and starts the page-turn timer.
    pub async fn request_go_to_page(&mut self, target: usize) -> Result<Option<Transition>> {
        let duration = self.options.flip_duration();
        let accepted = self
            .state
            .begin_transition(target, duration, Instant::now());
        let transition = match accepted {
            Ok(transition) => transition,
            Err(reason) => {
                log::debug!("Ignoring request for page {}: {:?}", target, reason);
                return Ok(None);
            }
        };

        log::info!(
            "Turning page {} -> {} ({:?})",
            transition.from,
            transition.to,
            transition.direction
        );
        self.publish();

        if let Err(e) = self.ensure_page(target, Tier::Base).await {
            log::error!("Aborting page turn to {}: {}", target, e);
            self.state.abort_transition();
            self.publish();
            return Err(e);
        }

        let Some(transition) = self.state.start_animation(Instant::now()) else {
            return Ok(None);
        };
        self.presenter.transition_started(&transition);
        Ok(Some(transition))
    }

    pub async fn next_page(&mut self) -> Result<Option<Transition>> {
        let target = self.state.current_page() + 1;
        self.request_go_to_page(target).await
    }

    pub async fn previous_page(&mut self) -> Result<Option<Transition>> {
        let target = self.state.current_page().saturating_sub(1);
        self.request_go_to_page(target).await
    }

    /// When the in-flight transition's timer fires, if any
    pub fn transition_deadline(&self) -> Option<Instant> {
        self.state.transition().map(|t| t.completes_at)
    }

    /// Finish the in-flight transition and apply a resize deferred behind it.
    /// Returns the new current page.
    pub async fn complete_transition(&mut self) -> Result<Option<usize>> {
        let Some(page) = self.state.complete_transition() else {
            return Ok(None);
        };
        log::debug!("Page turn finished on page {}", page);
        self.publish();

        if let Some((width, height)) = self.pending_resize.take() {
            self.apply_resize(width, height).await?;
        }
        Ok(Some(page))
    }

    /// Wait for the in-flight transition's timer, then complete it
    pub async fn settle(&mut self) -> Result<Option<usize>> {
        match self.transition_deadline() {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.complete_transition().await
            }
            None => Ok(None),
        }
    }

    /// Request a page and wait for the turn to finish. Returns whether the
    /// request was accepted.
    pub async fn go_to_page_and_settle(&mut self, target: usize) -> Result<bool> {
        let accepted = self.request_go_to_page(target).await?.is_some();
        if accepted {
            self.settle().await?;
        }
        Ok(accepted)
    }

    // =========================================================================
    // Zoom and pan
    // =========================================================================

    /// Zoom by signed steps; returns the effective level
    pub async fn adjust_zoom(&mut self, steps: i32) -> Result<f32> {
        self.change_zoom(|zoom| zoom.adjust(steps)).await
    }

    /// Zoom to an absolute level; returns the effective level
    pub async fn set_zoom(&mut self, level: f32) -> Result<f32> {
        self.change_zoom(|zoom| zoom.set(level)).await
    }

    /// Double-click: switch between 1.0 and the configured zoomed level
    pub async fn toggle_zoom(&mut self) -> Result<f32> {
        let zoomed_level = self.options.toggle_zoom_level;
        self.change_zoom(|zoom| zoom.toggle(zoomed_level)).await
    }

    pub fn reset_zoom(&mut self) {
        self.state.zoom_mut().reset();
        self.publish();
    }

    /// Drag while zoomed in. Not a navigation: never touches the transition.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        let moved = self.state.zoom_mut().pan_by(dx, dy);
        if moved {
            self.publish();
        }
        moved
    }

    async fn change_zoom(&mut self, change: impl FnOnce(&mut ZoomState) -> f32) -> Result<f32> {
        let page = self.zoom_page();
        if !self.cache.contains(page, Tier::Base) {
            log::debug!("Ignoring zoom: page {} is not loaded", page);
            return Ok(self.state.zoom().level());
        }
        if self.state.is_busy() && !self.options.zoom_during_transition {
            log::debug!("Ignoring zoom during page turn");
            return Ok(self.state.zoom().level());
        }

        let level = change(self.state.zoom_mut());
        self.publish();
        self.ensure_high_quality().await?;
        Ok(level)
    }

    /// The page a zoom applies to: the arriving page while a turn runs
    fn zoom_page(&self) -> usize {
        self.state
            .transition()
            .map_or(self.state.current_page(), |t| t.to)
    }

    /// Render the zoomed page once at high quality when zoomed in past the
    /// threshold. Kept for the rest of the session (until a resize).
    async fn ensure_high_quality(&mut self) -> Result<()> {
        let level = self.state.zoom().level();
        if level <= self.options.high_quality_threshold {
            return Ok(());
        }

        let page = self.zoom_page();
        if self.cache.contains(page, Tier::High) {
            return Ok(());
        }

        let scale = self.base_scale * level * self.options.high_quality_multiplier;
        log::info!("Rendering page {} at high quality (scale {:.2})", page, scale);
        self.render_into_cache(page, Tier::High, scale).await?;
        Ok(())
    }

    // =========================================================================
    // Resize
    // =========================================================================

    /// Refit pages to a new viewport. Clears the cache and re-renders the
    /// visible pages; deferred while a page turn is in flight.
    pub async fn resize(&mut self, width: f32, height: f32) -> Result<Outcome> {
        if self.state.is_busy() {
            log::debug!("Deferring resize to {}x{} until page turn ends", width, height);
            self.pending_resize = Some((width, height));
            return Ok(Outcome::ResizeDeferred);
        }
        self.apply_resize(width, height).await
    }

    async fn apply_resize(&mut self, width: f32, height: f32) -> Result<Outcome> {
        let current = self.state.current_page();
        let Some(base_scale) = self
            .cache
            .get(current, Tier::Base)
            .and_then(|bitmap| fit_scale(bitmap, self.base_scale, width, height))
        else {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return Ok(Outcome::Ignored);
        };

        log::info!(
            "Resized to {}x{}, base scale {:.3} -> {:.3}",
            width,
            height,
            self.base_scale,
            base_scale
        );
        // Render into a fresh cache so a failure leaves the old pages in place
        let mut refitted = PageCache::new();
        let pages = visible_pages(&self.state);
        for &page in &pages {
            let bitmap = self.source.render(page, base_scale).await?;
            refitted.put(page, Tier::Base, Arc::new(bitmap));
        }

        self.base_scale = base_scale;
        self.cache = refitted;
        for page in pages {
            if let Some(bitmap) = self.cache.get(page, Tier::Base) {
                self.presenter.page_rendered(page, Tier::Base, bitmap);
            }
        }
        self.ensure_high_quality().await?;
        self.publish();

        Ok(Outcome::Resized { base_scale })
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub async fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = match intent {
            Intent::GoToPage(page) => transition_outcome(self.request_go_to_page(page).await?),
            Intent::NextPage => transition_outcome(self.next_page().await?),
            Intent::PreviousPage => transition_outcome(self.previous_page().await?),
            Intent::AdjustZoom(steps) => Outcome::Zoom(self.adjust_zoom(steps).await?),
            Intent::SetZoom(level) => Outcome::Zoom(self.set_zoom(level).await?),
            Intent::ResetZoom => {
                self.reset_zoom();
                Outcome::Zoom(self.state.zoom().level())
            }
            Intent::ToggleZoom => Outcome::Zoom(self.toggle_zoom().await?),
            Intent::Pan { dx, dy } => {
                if self.pan_by(dx, dy) {
                    Outcome::Panned
                } else {
                    Outcome::Ignored
                }
            }
            Intent::Resize { width, height } => self.resize(width, height).await?,
            Intent::Close => Outcome::CloseRequested,
        };
        Ok(outcome)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn view(&self) -> FlipbookView {
        FlipbookView::from_state(&self.state)
    }

    pub fn options(&self) -> &FlipbookOptions {
        &self.options
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.thumbnails
    }

    pub fn bitmap(&self, page: usize, tier: Tier) -> Option<&Arc<Bitmap>> {
        self.cache.get(page, tier)
    }

    /// High-quality render if there is one, otherwise the base render
    pub fn best_bitmap(&self, page: usize) -> Option<&Arc<Bitmap>> {
        self.cache
            .get(page, Tier::High)
            .or_else(|| self.cache.get(page, Tier::Base))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn ensure_page(&mut self, page: usize, tier: Tier) -> Result<Arc<Bitmap>> {
        if let Some(bitmap) = self.cache.get(page, tier) {
            log::debug!("Page {} ({}) already rendered", page, tier);
            return Ok(bitmap.clone());
        }
        let scale = self.base_scale;
        self.render_into_cache(page, tier, scale).await
    }

    async fn render_into_cache(&mut self, page: usize, tier: Tier, scale: f32) -> Result<Arc<Bitmap>> {
        let bitmap = Arc::new(self.source.render(page, scale).await?);
        self.cache.put(page, tier, bitmap.clone());
        self.presenter.page_rendered(page, tier, &bitmap);
        Ok(bitmap)
    }

    fn publish(&mut self) {
        let view = FlipbookView::from_state(&self.state);
        self.presenter.state_changed(&view);
    }
}

fn transition_outcome(transition: Option<Transition>) -> Outcome {
    match transition {
        Some(transition) => Outcome::TransitionStarted(transition),
        None => Outcome::Ignored,
    }
}

fn into_load_error(error: FlipbookError) -> FlipbookError {
    match error {
        load @ FlipbookError::DocumentLoad(_) => load,
        other => FlipbookError::DocumentLoad(other.to_string()),
    }
}

/// Scale that fits a page into `width` x `height` pixels, given one of its
/// renders and the scale that render was made at
pub fn fit_scale(bitmap: &Bitmap, rendered_at: f32, width: f32, height: f32) -> Option<f32> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return None;
    }
    if bitmap.width == 0 || bitmap.height == 0 || rendered_at <= 0.0 {
        return None;
    }
    let page_width = bitmap.width as f32 / rendered_at;
    let page_height = bitmap.height as f32 / rendered_at;
    Some((width / page_width).min(height / page_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale() {
        // 612x792 pt page rendered at 1.5
        let bitmap = Bitmap::new(Vec::new(), 918, 1188);
        let scale = fit_scale(&bitmap, 1.5, 612.0, 1584.0).unwrap();
        assert!((scale - 1.0).abs() < 1e-4);

        let scale = fit_scale(&bitmap, 1.5, 1224.0, 792.0).unwrap();
        assert!((scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_scale_rejects_degenerate_sizes() {
        let bitmap = Bitmap::new(Vec::new(), 100, 100);
        assert_eq!(fit_scale(&bitmap, 1.0, 0.0, 100.0), None);
        assert_eq!(fit_scale(&bitmap, 1.0, f32::NAN, 100.0), None);
        assert_eq!(fit_scale(&Bitmap::new(Vec::new(), 0, 10), 1.0, 10.0, 10.0), None);
    }
}
