mod analyze;
mod extract;

pub use analyze::run_analyze_image;
pub use extract::run_extract;
