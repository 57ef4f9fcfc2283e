pub mod thumbnails;
pub mod viewer;

pub use thumbnails::show_thumbnails;
pub use viewer::{ViewerState, show_open_prompt, show_viewer};
