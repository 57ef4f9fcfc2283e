//! Seams to the document-rendering service.
//!
//! The core never decodes documents itself. A [`DocumentLoader`] turns a
//! [`DocumentInput`] into a [`DocumentSource`], and the source rasterizes
//! pages on request. Render calls are the only points where flipbook
//! operations suspend.

use crate::types::{Bitmap, DocumentInput, Result};
use std::future::Future;

/// A loaded document that can rasterize its pages
pub trait DocumentSource: Send + Sync {
    /// Number of pages, fixed once the document is loaded
    fn page_count(&self) -> usize;

    /// Rasterize a 1-based `page` at `scale` (1.0 = 72 DPI). Fractional
    /// scales must be supported.
    fn render(&self, page: usize, scale: f32) -> impl Future<Output = Result<Bitmap>> + Send;
}

/// Opens documents for a [`DocumentSource`] implementation
pub trait DocumentLoader: Send + Sync {
    type Source: DocumentSource + 'static;

    fn load(&self, input: DocumentInput) -> impl Future<Output = Result<Self::Source>> + Send;
}
