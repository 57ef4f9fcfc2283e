use crate::types::{Bitmap, Tier};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key: 1-based page number and quality tier
pub type PageKey = (usize, Tier);

/// Rendered pages of the open document.
///
/// There is no eviction: documents are expected to be small enough to keep
/// every base-tier page for the whole session. The only way to drop entries is
/// [`PageCache::clear`], used when the viewport is resized.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: HashMap<PageKey, Arc<Bitmap>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: usize, tier: Tier) -> Option<&Arc<Bitmap>> {
        self.pages.get(&(page, tier))
    }

    pub fn contains(&self, page: usize, tier: Tier) -> bool {
        self.pages.contains_key(&(page, tier))
    }

    /// Store a render, replacing any previous bitmap for the same page and tier
    pub fn put(&mut self, page: usize, tier: Tier, bitmap: Arc<Bitmap>) -> Option<Arc<Bitmap>> {
        self.pages.insert((page, tier), bitmap)
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
