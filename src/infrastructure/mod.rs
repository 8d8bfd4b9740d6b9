pub mod chrome_driver;
pub mod form_driver;

pub use chrome_driver::{ChromeDriver, FieldHandle};
pub use form_driver::FormDriver;
