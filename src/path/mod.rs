//! Paths found by a search and the reconstruction of them from parent links.

mod generic_path;
pub use generic_path::*;

mod reconstruct;
pub use reconstruct::reconstruct;

/// a Type to represent the Cost of traversing an Edge
pub type Cost = f64;
