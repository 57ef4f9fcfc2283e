use flipbook_core::{Bitmap, DocumentSource, FlipbookError, Result};
use pdfium_render::prelude::*;
use std::sync::Arc;

use crate::init_pdfium;

/// PDF document held in memory and rendered through Pdfium.
///
/// Pdfium bindings are not shared across threads, so every render binds the
/// library and parses the bytes again on a blocking thread.
#[derive(Debug, Clone)]
pub struct PdfiumSource {
    bytes: Arc<Vec<u8>>,
    page_count: usize,
}

impl PdfiumSource {
    /// Parse `bytes` once to validate the document and count its pages
    pub async fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let bytes = Arc::new(bytes);
        let probe = bytes.clone();

        let page_count = tokio::task::spawn_blocking(move || {
            let pdfium = init_pdfium()?;
            let document = pdfium.load_pdf_from_byte_slice(&probe, None)?;
            Ok::<_, PdfiumError>(document.pages().len() as usize)
        })
        .await?
        .map_err(|e| FlipbookError::DocumentLoad(format!("Failed to load PDF: {}", e)))?;

        Ok(Self { bytes, page_count })
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

impl DocumentSource for PdfiumSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    async fn render(&self, page: usize, scale: f32) -> Result<Bitmap> {
        if page == 0 || page > self.page_count {
            return Err(FlipbookError::PageRender {
                page,
                message: format!("page out of range 1..={}", self.page_count),
            });
        }

        let bytes = self.bytes.clone();
        let (rgba_data, width, height) = tokio::task::spawn_blocking(move || {
            let pdfium = init_pdfium()?;
            let document = pdfium.load_pdf_from_byte_slice(&bytes, None)?;
            let pdf_page = document.pages().get((page - 1) as u16)?;

            let config = PdfRenderConfig::new().scale_page_by_factor(scale);
            let bitmap = pdf_page.render_with_config(&config)?;
            let rgba_data = bitmap.as_rgba_bytes().to_vec();
            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;

            Ok::<_, PdfiumError>((rgba_data, width, height))
        })
        .await?
        .map_err(|e| FlipbookError::PageRender {
            page,
            message: e.to_string(),
        })?;

        log::debug!("Rendered page {} at {:.2}x ({}x{})", page, scale, width, height);
        Ok(Bitmap::new(rgba_data, width, height))
    }
}
