use flipbook_core::{
    Bitmap, DocumentInput, FlipbookOptions, FlipbookView, Intent, Presenter, Thumbnail, Tier,
    Transition,
};
use std::sync::Arc;
use tokio::sync::mpsc;

pub mod logger;
mod worker;

pub use worker::worker_task;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum FlipbookCommand {
    /// Open a document, replacing the one currently shown
    Open {
        input: DocumentInput,
        options: FlipbookOptions,
    },
    Input(Intent),
    Close,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum FlipbookUpdate {
    Opened {
        total_pages: usize,
        thumbnails: Vec<Thumbnail>,
    },
    StateChanged(FlipbookView),
    TransitionStarted(Transition),
    PageRendered {
        page: usize,
        tier: Tier,
        bitmap: Arc<Bitmap>,
    },
    Closed,
    Error {
        message: String,
    },
}

/// Presenter that forwards everything to the UI as [`FlipbookUpdate`]s
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    update_tx: mpsc::UnboundedSender<FlipbookUpdate>,
}

impl ChannelPresenter {
    pub fn new(update_tx: mpsc::UnboundedSender<FlipbookUpdate>) -> Self {
        Self { update_tx }
    }
}

impl Presenter for ChannelPresenter {
    fn state_changed(&mut self, view: &FlipbookView) {
        let _ = self
            .update_tx
            .send(FlipbookUpdate::StateChanged(view.clone()));
    }

    fn transition_started(&mut self, transition: &Transition) {
        let _ = self
            .update_tx
            .send(FlipbookUpdate::TransitionStarted(*transition));
    }

    fn page_rendered(&mut self, page: usize, tier: Tier, bitmap: &Arc<Bitmap>) {
        let _ = self.update_tx.send(FlipbookUpdate::PageRendered {
            page,
            tier,
            bitmap: bitmap.clone(),
        });
    }
}
