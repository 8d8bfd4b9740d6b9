pub mod chapter;
pub mod loaders;

pub use chapter::Chapter;
pub use loaders::load_chapters;
