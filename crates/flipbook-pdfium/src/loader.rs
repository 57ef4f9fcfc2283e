use flipbook_core::{DocumentInput, DocumentLoader, FlipbookError, Result};
use std::io::Read;

use crate::PdfiumSource;

/// Loads documents from disk, over HTTP(S) or from memory
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumLoader;

impl PdfiumLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfiumLoader {
    type Source = PdfiumSource;

    async fn load(&self, input: DocumentInput) -> Result<PdfiumSource> {
        let bytes = match input {
            DocumentInput::Path(path) => tokio::fs::read(&path).await.map_err(|e| {
                FlipbookError::DocumentLoad(format!("Failed to read {}: {}", path.display(), e))
            })?,
            DocumentInput::Url(url) => fetch(url).await?,
            DocumentInput::Bytes(bytes) => bytes,
        };

        PdfiumSource::from_bytes(bytes).await
    }
}

async fn fetch(url: String) -> Result<Vec<u8>> {
    log::info!("Downloading {}", url);

    tokio::task::spawn_blocking(move || {
        let response = ureq::get(&url).call().map_err(|e| {
            FlipbookError::DocumentLoad(format!("Failed to download {}: {}", url, e))
        })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| FlipbookError::DocumentLoad(format!("Failed to read {}: {}", url, e)))?;
        Ok(bytes)
    })
    .await?
}
