pub mod boundary;
pub mod build_map;
pub mod decompose;
pub mod sort;

pub use boundary::CollectBoundary;
pub use build_map::{BuildMap, MapGeometry};
pub use decompose::DecomposeRoom;
pub use sort::ContainmentSort;
