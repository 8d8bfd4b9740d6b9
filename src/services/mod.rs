pub mod chapter_extractor;
pub mod chapter_form;
pub mod post_log;
pub mod session;

pub use chapter_form::ChapterForm;
pub use post_log::PostLog;
pub use session::SessionService;
