//! The painter-facing clip surface.
//!
//! The compositor builds a visible region per window (the window rect minus
//! everything stacked above it), selects it here, and the painting layer asks
//! [`ClipContext::is_rect_visible`] before each fill or blit so fully
//! obscured draws are skipped.

use regio_logging::warn;

use crate::error::Result;
use crate::geometry::Rect;
use crate::pool::RectPool;
use crate::region::Region;

/// The active clip for a painting pass.
#[derive(Debug)]
pub struct ClipContext {
    clip: Region,
}

impl ClipContext {
    /// Starts with an empty clip: nothing is visible until a region or rect
    /// is selected.
    pub fn new(pool: &RectPool) -> Self {
        ClipContext { clip: Region::new(pool) }
    }

    /// Selects `region` as the active clip, taking ownership of it.
    ///
    /// The previous clip's slots are released back to the pool.
    pub fn select_region(&mut self, pool: &mut RectPool, region: Region) -> Result<Region> {
        region.check(pool)?;
        self.clip.check(pool)?;
        Ok(std::mem::replace(&mut self.clip, region))
    }

    /// Selects a single rectangle as the active clip.
    pub fn select_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        self.clip.set_rect(pool, rect)
    }

    /// Shrinks the active clip to its overlap with `rect`, e.g. when a paint
    /// call targets one child element.
    pub fn restrict_to_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        self.clip.intersect_rect(pool, rect)
    }

    /// The active clip region.
    pub fn clip(&self) -> &Region {
        &self.clip
    }

    /// Whether any part of `rect` falls inside the active clip.
    ///
    /// This is the paint-skip query, and it fails open: when the region
    /// cannot be consulted (wrong pool supplied), the rect is reported
    /// visible so the caller redraws instead of silently skipping a paint
    /// and leaving stale pixels on screen.
    pub fn is_rect_visible(&self, pool: &RectPool, rect: &Rect) -> bool {
        match self.clip.intersects_rect(pool, rect) {
            Ok(visible) => visible,
            Err(err) => {
                warn!(%err, "visibility query failed; treating rect as visible");
                true
            }
        }
    }
}

/// Builds the visible region of a window: the window rect minus every
/// obstruction stacked above it.
///
/// Degenerate obstructions and obstructions that miss the window entirely
/// cost one bounding-box test each.
pub fn visible_region(pool: &mut RectPool, window: Rect, obstructions: &[Rect]) -> Result<Region> {
    let mut region = Region::new(pool);
    region.set_rect(pool, window)?;
    for rect in obstructions {
        if region.is_empty() {
            break;
        }
        if let Err(err) = region.subtract_rect(pool, *rect) {
            // Release the partial build; otherwise its slots stay occupied
            // after the error, since regions do not release on drop.
            region.clear(pool)?;
            return Err(err);
        }
    }
    Ok(region)
}
