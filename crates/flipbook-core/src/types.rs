use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlipbookError {
    #[error("Failed to load document: {0}")]
    DocumentLoad(String),
    #[error("Failed to render page {page}: {message}")]
    PageRender { page: usize, message: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, FlipbookError>;

/// Quality level a page is rendered and cached at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Rendered at the base scale, used for normal viewing
    Base,
    /// Upscaled render made on demand once the page is zoomed in
    High,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Base => f.write_str("base"),
            Tier::High => f.write_str("high"),
        }
    }
}

/// Rasterized page in RGBA8 with its natural pixel dimensions
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub rgba_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    pub fn new(rgba_data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            rgba_data,
            width,
            height,
        }
    }

    /// Size in bytes of the pixel buffer
    pub fn byte_len(&self) -> usize {
        self.rgba_data.len()
    }
}

// Pixel buffers are large; keep Debug output to the dimensions.
impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba_data.len())
            .finish()
    }
}

/// Where a document's bytes come from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentInput {
    Path(PathBuf),
    Url(String),
    #[cfg_attr(feature = "serde", serde(skip))]
    Bytes(Vec<u8>),
}

impl DocumentInput {
    /// Interpret a user-supplied location: `http://` and `https://` are URLs,
    /// everything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentInput::Url(location.to_string())
        } else {
            DocumentInput::Path(PathBuf::from(location))
        }
    }

    /// Short human-readable description for logs and status lines
    pub fn describe(&self) -> String {
        match self {
            DocumentInput::Path(path) => path.display().to_string(),
            DocumentInput::Url(url) => url.clone(),
            DocumentInput::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_input() {
        assert_eq!(
            DocumentInput::parse("https://example.com/book.pdf"),
            DocumentInput::Url("https://example.com/book.pdf".to_string())
        );
        assert_eq!(
            DocumentInput::parse("HTTP://example.com/a.pdf"),
            DocumentInput::Url("HTTP://example.com/a.pdf".to_string())
        );
        assert_eq!(
            DocumentInput::parse("24_1305.pdf"),
            DocumentInput::Path(PathBuf::from("24_1305.pdf"))
        );
    }

    #[test]
    fn test_bitmap_debug_hides_pixels() {
        let bitmap = Bitmap::new(vec![0; 16], 2, 2);
        let text = format!("{:?}", bitmap);
        assert!(text.contains("width: 2"));
        assert!(text.contains("bytes: 16"));
    }

    #[test]
    fn test_error_messages() {
        let err = FlipbookError::PageRender {
            page: 3,
            message: "bad stream".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to render page 3: bad stream");
    }
}
