pub mod chapter;
pub mod overlay;
pub mod rail;
pub mod story;
