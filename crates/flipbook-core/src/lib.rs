pub mod cache;
pub mod constants;
mod flipbook;
mod input;
mod layout;
mod navigation;
mod options;
mod presenter;
mod source;
mod thumbnails;
mod types;
mod zoom;

pub use cache::PageCache;
pub use flipbook::{Flipbook, Outcome, fit_scale};
pub use input::{Intent, Key, intent_for_key};
pub use layout::{
    PagePlacement, PageTransform, Slot, placement, resting_placement, visible_pages,
};
pub use navigation::{Direction, NavigationState, Rejection, Transition};
pub use options::FlipbookOptions;
pub use presenter::{FlipbookView, NullPresenter, Presenter};
pub use source::{DocumentLoader, DocumentSource};
pub use thumbnails::{Thumbnail, ThumbnailSet};
pub use types::*;
pub use zoom::{Pan, ZoomLimits, ZoomState};
