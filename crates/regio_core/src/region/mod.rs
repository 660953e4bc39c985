pub(crate) mod ops;

pub use ops::RegionOp;

use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::pool::{NONE, RectPool};

/// An ordered set of non-overlapping rectangles describing an arbitrary 2D
/// area, such as the visible part of a window.
///
/// Member rectangles live in a [`RectPool`] the region is bound to; every
/// operation takes that pool explicitly and fails with
/// [`RegionError::InvalidRegion`](crate::RegionError::InvalidRegion) when
/// handed a different one. Members are kept canonical: no two overlap, bands
/// run top-to-bottom, rects within a band left-to-right, and coalescing is
/// maximal.
///
/// Mutating operations are all-or-nothing: on error the region still holds
/// its prior contents.
///
/// A region does not release its slots on drop (it has no pool reference);
/// call [`clear`](Region::clear) before discarding a region whose pool
/// outlives it, or the slots stay occupied until the pool itself is dropped.
#[derive(Debug)]
pub struct Region {
    head: u32,
    count: usize,
    bounds: Rect,
    pool_id: u64,
}

impl Region {
    /// Creates an empty region bound to `pool`.
    pub fn new(pool: &RectPool) -> Self {
        Region {
            head: NONE,
            count: 0,
            bounds: Rect::default(),
            pool_id: pool.id(),
        }
    }

    /// O(1) emptiness check.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of member rectangles.
    #[inline]
    pub fn rect_count(&self) -> usize {
        self.count
    }

    /// The cached bounding box: the tight union of all members, degenerate
    /// when the region is empty.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replaces the contents with the single rectangle `rect`.
    ///
    /// A degenerate rect yields an empty region.
    pub fn set_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        if rect.is_empty() {
            self.replace_with(pool, &[])
        } else {
            self.replace_with(pool, &[rect])
        }
    }

    /// Releases every member back to the pool and resets to empty.
    pub fn clear(&mut self, pool: &mut RectPool) -> Result<()> {
        self.check(pool)?;
        release_chain(pool, self.head);
        self.head = NONE;
        self.count = 0;
        self.bounds = Rect::default();
        Ok(())
    }

    /// Replaces the contents with a copy of `other`'s members.
    pub fn copy_from(&mut self, pool: &mut RectPool, other: &Region) -> Result<()> {
        other.check(pool)?;
        let rects = other.snapshot(pool)?;
        self.replace_with(pool, &rects)
    }

    /// Translates every member and the bounding box by `(dx, dy)`.
    pub fn offset(&mut self, pool: &mut RectPool, dx: i32, dy: i32) -> Result<()> {
        self.check(pool)?;
        let mut cur = self.head;
        while cur != NONE {
            let rect = pool.rect(cur);
            *pool.rect_mut(cur) = rect.translated(dx, dy);
            cur = pool.next(cur);
        }
        self.bounds = self.bounds.translated(dx, dy);
        Ok(())
    }

    /// Tests whether the point `(x, y)` falls inside the region.
    ///
    /// Points outside the bounding box are rejected without touching the
    /// member chain; that pre-check is the fast path the painting layer
    /// leans on.
    pub fn contains_point(&self, pool: &RectPool, x: i32, y: i32) -> Result<bool> {
        self.check(pool)?;
        let point = Point::new(x, y);
        if !self.bounds.contains(point) {
            return Ok(false);
        }
        let mut cur = self.head;
        while cur != NONE {
            if pool.rect(cur).contains(point) {
                return Ok(true);
            }
            cur = pool.next(cur);
        }
        Ok(false)
    }

    /// Tests whether any part of `rect` overlaps the region — the "is this
    /// rectangle at least partially visible" query.
    ///
    /// Same bounding-box pre-rejection as [`contains_point`](Region::contains_point).
    pub fn intersects_rect(&self, pool: &RectPool, rect: &Rect) -> Result<bool> {
        self.check(pool)?;
        if rect.is_empty() || !self.bounds.intersects(rect) {
            return Ok(false);
        }
        let mut cur = self.head;
        while cur != NONE {
            if pool.rect(cur).intersects(rect) {
                return Ok(true);
            }
            cur = pool.next(cur);
        }
        Ok(false)
    }

    /// Tests whether `rect` is fully covered by the region.
    ///
    /// Members are disjoint, so `rect` is covered exactly when the overlap
    /// areas of the members against it sum to its own area.
    pub fn contains_rect(&self, pool: &RectPool, rect: &Rect) -> Result<bool> {
        self.check(pool)?;
        if rect.is_empty() || !self.bounds.contains_rect(rect) {
            return Ok(false);
        }
        let mut covered: i64 = 0;
        let mut cur = self.head;
        while cur != NONE {
            if let Some(overlap) = pool.rect(cur).intersection(rect) {
                covered += overlap.area();
            }
            cur = pool.next(cur);
        }
        Ok(covered == rect.area())
    }

    /// Total covered area.
    pub fn area(&self, pool: &RectPool) -> Result<i64> {
        self.check(pool)?;
        let mut total = 0;
        let mut cur = self.head;
        while cur != NONE {
            total += pool.rect(cur).area();
            cur = pool.next(cur);
        }
        Ok(total)
    }

    /// Iterates over the member rectangles in canonical order.
    pub fn rects<'a>(&self, pool: &'a RectPool) -> Result<RectIter<'a>> {
        self.check(pool)?;
        Ok(RectIter { pool, cur: self.head })
    }

    /// Collects the member rectangles in canonical order.
    pub fn to_vec(&self, pool: &RectPool) -> Result<Vec<Rect>> {
        Ok(self.rects(pool)?.collect())
    }

    /// Exact member-sequence equality with another region on the same pool.
    pub fn same_rects(&self, pool: &RectPool, other: &Region) -> Result<bool> {
        self.check(pool)?;
        other.check(pool)?;
        if self.count != other.count || self.bounds != other.bounds {
            return Ok(false);
        }
        let mut a = self.head;
        let mut b = other.head;
        while a != NONE && b != NONE {
            if pool.rect(a) != pool.rect(b) {
                return Ok(false);
            }
            a = pool.next(a);
            b = pool.next(b);
        }
        Ok(a == b)
    }

    pub(crate) fn check(&self, pool: &RectPool) -> Result<()> {
        if self.pool_id == pool.id() {
            Ok(())
        } else {
            Err(crate::RegionError::InvalidRegion)
        }
    }

    pub(crate) fn snapshot(&self, pool: &RectPool) -> Result<SmallVec<[Rect; 8]>> {
        self.check(pool)?;
        let mut rects = SmallVec::new();
        let mut cur = self.head;
        while cur != NONE {
            rects.push(pool.rect(cur));
            cur = pool.next(cur);
        }
        Ok(rects)
    }

    /// Swaps in a freshly staged chain holding `rects`.
    ///
    /// The new chain is acquired in full before the old one is released, so
    /// a mid-build pool failure backs out the staged slots and leaves the
    /// region untouched. This ordering is also what makes combining a region
    /// with itself as the destination safe.
    pub(crate) fn replace_with(&mut self, pool: &mut RectPool, rects: &[Rect]) -> Result<()> {
        self.check(pool)?;
        let mut head = NONE;
        let mut tail = NONE;
        let mut bounds = Rect::default();
        for rect in rects {
            debug_assert!(!rect.is_empty(), "degenerate rect staged into a region");
            let index = match pool.acquire(*rect) {
                Ok(index) => index,
                Err(err) => {
                    release_chain(pool, head);
                    return Err(err);
                }
            };
            if head == NONE {
                head = index;
            } else {
                pool.set_next(tail, index);
            }
            tail = index;
            bounds = bounds.union(rect);
        }
        release_chain(pool, self.head);
        self.head = head;
        self.count = rects.len();
        self.bounds = bounds;
        Ok(())
    }
}

fn release_chain(pool: &mut RectPool, mut head: u32) {
    while head != NONE {
        let next = pool.next(head);
        pool.release(head);
        head = next;
    }
}

/// Iterator over a region's member rectangles.
pub struct RectIter<'a> {
    pool: &'a RectPool,
    cur: u32,
}

impl Iterator for RectIter<'_> {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.cur == NONE {
            return None;
        }
        let rect = self.pool.rect(self.cur);
        self.cur = self.pool.next(self.cur);
        Some(rect)
    }
}
