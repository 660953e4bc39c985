//! Boolean operations over regions.
//!
//! The combinator is a scan-line strip decomposition: the distinct Y edges of
//! both operands partition the plane into horizontal strips inside which
//! membership in either operand is constant, so each strip reduces to a 1-D
//! interval operation along X. Strips whose interval lists match the previous
//! strip's are merged into one taller band ("banding"); without that, chained
//! operations degrade to one rectangle per scan line.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::Rect;
use crate::pool::RectPool;
use crate::region::Region;

/// The boolean operation applied by [`Region::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOp {
    Union,
    Intersect,
    Subtract,
    Xor,
}

bitflags! {
    /// Operand membership of one elementary span during the X sweep.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Membership: u8 {
        const IN_A = 1 << 0;
        const IN_B = 1 << 1;
    }
}

impl RegionOp {
    fn keeps(self, membership: Membership) -> bool {
        let in_a = membership.contains(Membership::IN_A);
        let in_b = membership.contains(Membership::IN_B);
        match self {
            RegionOp::Union => in_a || in_b,
            RegionOp::Intersect => in_a && in_b,
            RegionOp::Subtract => in_a && !in_b,
            RegionOp::Xor => in_a != in_b,
        }
    }
}

impl Region {
    /// Combines `other` into this region: `self = self op other`.
    ///
    /// The destination aliasing an operand is the normal calling pattern
    /// here; it is safe because the result is staged into fresh pool slots
    /// before the old members are released (see
    /// [`replace_with`](Region::replace_with)). On error the region is
    /// unchanged.
    pub fn apply(&mut self, pool: &mut RectPool, other: &Region, op: RegionOp) -> Result<()> {
        self.check(pool)?;
        other.check(pool)?;
        let b = other.snapshot(pool)?;
        self.apply_rects(pool, &b, op)
    }

    /// `self = self ∪ other`.
    pub fn union_with(&mut self, pool: &mut RectPool, other: &Region) -> Result<()> {
        self.apply(pool, other, RegionOp::Union)
    }

    /// `self = self ∩ other`.
    pub fn intersect_with(&mut self, pool: &mut RectPool, other: &Region) -> Result<()> {
        self.apply(pool, other, RegionOp::Intersect)
    }

    /// `self = self − other`.
    pub fn subtract(&mut self, pool: &mut RectPool, other: &Region) -> Result<()> {
        self.apply(pool, other, RegionOp::Subtract)
    }

    /// `self = self ⊕ other`.
    pub fn xor_with(&mut self, pool: &mut RectPool, other: &Region) -> Result<()> {
        self.apply(pool, other, RegionOp::Xor)
    }

    /// `self = self ∪ rect`.
    pub fn add_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        self.apply_single(pool, rect, RegionOp::Union)
    }

    /// `self = self − rect`.
    pub fn subtract_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        self.apply_single(pool, rect, RegionOp::Subtract)
    }

    /// `self = self ∩ rect`.
    pub fn intersect_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        self.apply_single(pool, rect, RegionOp::Intersect)
    }

    /// `self = self ⊕ rect`.
    pub fn xor_rect(&mut self, pool: &mut RectPool, rect: Rect) -> Result<()> {
        self.apply_single(pool, rect, RegionOp::Xor)
    }

    /// Builds a fresh region holding `a op b`.
    pub fn combined(pool: &mut RectPool, a: &Region, b: &Region, op: RegionOp) -> Result<Region> {
        let mut result = Region::new(pool);
        result.copy_from(pool, a)?;
        if let Err(err) = result.apply(pool, b, op) {
            // Regions do not release slots on drop; hand the staged copy
            // back before surfacing the failure. Same pool by construction,
            // so the clear cannot fail.
            result.clear(pool)?;
            return Err(err);
        }
        Ok(result)
    }

    fn apply_single(&mut self, pool: &mut RectPool, rect: Rect, op: RegionOp) -> Result<()> {
        self.check(pool)?;
        if rect.is_empty() {
            self.apply_rects(pool, &[], op)
        } else {
            self.apply_rects(pool, &[rect], op)
        }
    }

    fn apply_rects(&mut self, pool: &mut RectPool, b: &[Rect], op: RegionOp) -> Result<()> {
        // An empty second operand leaves Union, Subtract, and Xor untouched;
        // skip the restage so a no-op can never fail on a full fixed pool.
        if b.is_empty() && !matches!(op, RegionOp::Intersect) {
            return Ok(());
        }
        let a = self.snapshot(pool)?;
        let result = combine_rects(&a, b, op);
        self.replace_with(pool, &result)
    }
}

/// Computes `a op b` over two canonical rectangle lists, yielding a canonical
/// list: non-overlapping, maximally coalesced, bands top-to-bottom, rects
/// left-to-right within each band.
fn combine_rects(a: &[Rect], b: &[Rect], op: RegionOp) -> Vec<Rect> {
    // Empty operands short-circuit; for the remaining cases disjoint
    // bounding boxes settle Intersect and Subtract without a sweep.
    if a.is_empty() {
        return match op {
            RegionOp::Union | RegionOp::Xor => b.to_vec(),
            RegionOp::Intersect | RegionOp::Subtract => Vec::new(),
        };
    }
    if b.is_empty() {
        return match op {
            RegionOp::Union | RegionOp::Xor | RegionOp::Subtract => a.to_vec(),
            RegionOp::Intersect => Vec::new(),
        };
    }
    let a_bounds = bounding(a);
    let b_bounds = bounding(b);
    if !a_bounds.intersects(&b_bounds) {
        match op {
            RegionOp::Intersect => return Vec::new(),
            RegionOp::Subtract => return a.to_vec(),
            RegionOp::Union | RegionOp::Xor => {}
        }
    }

    let mut ys: SmallVec<[i32; 16]> = SmallVec::new();
    for rect in a.iter().chain(b.iter()) {
        ys.push(rect.top);
        ys.push(rect.bottom);
    }
    ys.sort_unstable();
    ys.dedup();

    let mut out: Vec<Rect> = Vec::new();
    // Previous band: its slice of `out` and its bottom edge, for coalescing.
    let mut band_range = 0..0;
    let mut band_bottom = i32::MIN;

    let mut a_spans: SmallVec<[(i32, i32); 8]> = SmallVec::new();
    let mut b_spans: SmallVec<[(i32, i32); 8]> = SmallVec::new();
    let mut spans: SmallVec<[(i32, i32); 8]> = SmallVec::new();

    for window in ys.windows(2) {
        let (y0, y1) = (window[0], window[1]);

        collect_strip_spans(a, y0, y1, &mut a_spans);
        collect_strip_spans(b, y0, y1, &mut b_spans);
        sweep_strip(&a_spans, &b_spans, op, &mut spans);

        if spans.is_empty() {
            band_bottom = i32::MIN;
            continue;
        }

        let prev = &out[band_range.clone()];
        let joinable = y0 == band_bottom
            && prev.len() == spans.len()
            && prev.iter().zip(spans.iter()).all(|(r, s)| r.left == s.0 && r.right == s.1);
        if joinable {
            for rect in &mut out[band_range.clone()] {
                rect.bottom = y1;
            }
        } else {
            let start = out.len();
            out.extend(spans.iter().map(|&(x0, x1)| Rect::new(x0, y0, x1, y1)));
            band_range = start..out.len();
        }
        band_bottom = y1;
    }
    out
}

/// Gathers the X extents of the rects crossing the strip `[y0, y1)`.
///
/// Strip edges come from the operands' own Y edges, so a rect either spans
/// the whole strip or misses it entirely. Canonical input keeps one band's
/// rects adjacent and left-sorted, but singleton operands arrive unsorted
/// relative to nothing, so sort unconditionally; the lists are tiny.
fn collect_strip_spans(rects: &[Rect], y0: i32, y1: i32, spans: &mut SmallVec<[(i32, i32); 8]>) {
    spans.clear();
    for rect in rects {
        if rect.top <= y0 && rect.bottom >= y1 {
            spans.push((rect.left, rect.right));
        }
    }
    spans.sort_unstable();
}

/// 1-D interval boolean over one strip.
///
/// All distinct X endpoints partition the strip into elementary spans with
/// constant membership; the op's predicate decides which spans survive, and
/// adjacent surviving spans merge as a single run, which is what makes
/// touching rects coalesce instead of stacking up.
fn sweep_strip(
    a_spans: &[(i32, i32)],
    b_spans: &[(i32, i32)],
    op: RegionOp,
    spans: &mut SmallVec<[(i32, i32); 8]>,
) {
    spans.clear();
    let mut xs: SmallVec<[i32; 16]> = SmallVec::new();
    for &(left, right) in a_spans.iter().chain(b_spans.iter()) {
        xs.push(left);
        xs.push(right);
    }
    xs.sort_unstable();
    xs.dedup();
    if xs.len() < 2 {
        return;
    }

    let mut ai = 0;
    let mut bi = 0;
    let mut run_start: Option<i32> = None;
    for window in xs.windows(2) {
        let x0 = window[0];
        while ai < a_spans.len() && a_spans[ai].1 <= x0 {
            ai += 1;
        }
        while bi < b_spans.len() && b_spans[bi].1 <= x0 {
            bi += 1;
        }
        let mut membership = Membership::empty();
        if ai < a_spans.len() && a_spans[ai].0 <= x0 {
            membership |= Membership::IN_A;
        }
        if bi < b_spans.len() && b_spans[bi].0 <= x0 {
            membership |= Membership::IN_B;
        }

        if op.keeps(membership) {
            run_start.get_or_insert(x0);
        } else if let Some(start) = run_start.take() {
            spans.push((start, x0));
        }
    }
    if let Some(start) = run_start {
        spans.push((start, xs[xs.len() - 1]));
    }
}

fn bounding(rects: &[Rect]) -> Rect {
    rects.iter().fold(Rect::default(), |acc, r| acc.union(r))
}
