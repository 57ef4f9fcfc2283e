//! Pdfium-backed document source for the flipbook viewer

mod loader;
mod source;

pub use loader::PdfiumLoader;
pub use source::PdfiumSource;

use pdfium_render::prelude::*;

/// Initialize Pdfium, trying the vendored library first, then falling back to system
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    // When running from cargo, the working directory is the workspace root
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
        log::warn!(
            "Could not bind Pdfium from {}, trying system library",
            vendor_path.display()
        );
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}
