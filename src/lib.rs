pub mod archive;
pub mod error;
pub mod level;
pub mod math;
pub mod operations;
pub mod polygon;
pub mod render;

pub use error::{Result, WadmapError};
