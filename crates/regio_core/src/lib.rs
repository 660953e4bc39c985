//! Clipping-region engine: non-overlapping rectangle sets with pooled
//! storage and boolean set operations, for computing visible and damaged
//! screen areas during window composition.
//!
//! The window-composition layer builds a [`Region`] per window (its rect
//! minus sibling obstructions, see [`clip::visible_region`]) and the painting
//! layer queries it through a [`ClipContext`] before each fill or blit.

pub mod clip;
pub mod error;
pub mod geometry;
pub mod pool;
pub mod region;

pub use clip::ClipContext;
pub use error::{RegionError, Result};
pub use geometry::{Point, Rect};
pub use pool::{RectPool, SharedRectPool};
pub use region::{Region, RegionOp};
