pub mod html_loader;

pub use html_loader::load_chapters;
