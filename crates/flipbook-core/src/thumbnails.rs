use crate::source::DocumentSource;
use crate::types::{Bitmap, Result};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub page: usize,
    pub bitmap: Arc<Bitmap>,
}

/// Low-resolution render of every page, created once when the document loads
#[derive(Debug, Clone, Default)]
pub struct ThumbnailSet {
    thumbnails: Vec<Thumbnail>,
}

impl ThumbnailSet {
    /// Render pages `1..=page_count` in order at `scale`
    pub async fn render<S: DocumentSource>(source: &S, scale: f32) -> Result<Self> {
        let page_count = source.page_count();
        let mut thumbnails = Vec::with_capacity(page_count);

        for page in 1..=page_count {
            let bitmap = source.render(page, scale).await?;
            thumbnails.push(Thumbnail {
                page,
                bitmap: Arc::new(bitmap),
            });
        }

        log::debug!("Rendered {} thumbnails at scale {}", thumbnails.len(), scale);
        Ok(Self { thumbnails })
    }

    pub fn get(&self, page: usize) -> Option<&Thumbnail> {
        page.checked_sub(1).and_then(|index| self.thumbnails.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thumbnail> {
        self.thumbnails.iter()
    }

    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Thumbnail> {
        self.thumbnails.clone()
    }
}
