//! Layout calculation modules
//!
//! All the geometry for both deliverables:
//! - Aspect-preserving fit and centering
//! - Slicing a tall snapshot into page crops
//! - Stacking several snapshots into one strip
//! - Placing section images and text regions on slides

mod geometry;
mod pagination;
mod slide;
mod strip;
mod types;

pub use geometry::*;
pub use pagination::*;
pub use slide::*;
pub use strip::*;
pub use types::*;
