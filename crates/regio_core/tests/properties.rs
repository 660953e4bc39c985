//! Algebraic and structural properties of region arithmetic.

use regio_core::{Rect, RectPool, Region, RegionError, RegionOp};

/// Asserts the canonical-form invariant: members are grouped into bands
/// (identical top/bottom) running top-to-bottom; within a band rects are
/// left-sorted, disjoint, and non-touching; adjacent bands never carry an
/// identical span list (that would mean a missed vertical merge); and the
/// cached bounding box is the tight union of the members.
fn assert_canonical(pool: &RectPool, region: &Region) {
    let rects = region.to_vec(pool).unwrap();
    assert_eq!(rects.len(), region.rect_count());

    let mut tight = Rect::default();
    for rect in &rects {
        assert!(!rect.is_empty(), "degenerate member {rect:?}");
        tight = tight.union(rect);
    }
    assert_eq!(region.bounds(), tight, "bounding box is not tight");

    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.intersects(b), "members overlap: {a:?} and {b:?}");
        }
    }

    // Split into bands and check ordering plus band-level coalescing.
    let mut bands: Vec<(i32, i32, Vec<(i32, i32)>)> = Vec::new();
    for rect in &rects {
        match bands.last_mut() {
            Some((top, bottom, spans)) if *top == rect.top && *bottom == rect.bottom => {
                let last = *spans.last().unwrap();
                assert!(last.1 < rect.left, "band spans unsorted or touching: {rect:?}");
                spans.push((rect.left, rect.right));
            }
            _ => {
                if let Some((_, bottom, _)) = bands.last() {
                    assert!(*bottom <= rect.top, "bands out of order at {rect:?}");
                }
                bands.push((rect.top, rect.bottom, vec![(rect.left, rect.right)]));
            }
        }
    }
    for pair in bands.windows(2) {
        let (_, bottom, ref upper) = pair[0];
        let (top, _, ref lower) = pair[1];
        if bottom == top {
            assert_ne!(upper, lower, "adjacent bands not vertically coalesced");
        }
    }
}

fn rect_region(pool: &mut RectPool, rect: Rect) -> Region {
    let mut region = Region::new(pool);
    region.set_rect(pool, rect).unwrap();
    region
}

#[test]
fn union_and_intersect_commute() {
    let mut pool = RectPool::with_capacity(32).unwrap();
    let a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    let mut b = rect_region(&mut pool, Rect::new(50, 50, 150, 150));
    b.add_rect(&mut pool, Rect::new(-20, 40, 10, 60)).unwrap();

    for op in [RegionOp::Union, RegionOp::Intersect] {
        let ab = Region::combined(&mut pool, &a, &b, op).unwrap();
        let ba = Region::combined(&mut pool, &b, &a, op).unwrap();
        assert!(ab.same_rects(&pool, &ba).unwrap(), "{op:?} not commutative");
        assert_canonical(&pool, &ab);
    }
}

#[test]
fn empty_is_identity_for_union_and_zero_for_intersect() {
    let mut pool = RectPool::with_capacity(16).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    a.subtract_rect(&mut pool, Rect::new(25, 25, 75, 75)).unwrap();
    let empty = Region::new(&pool);

    let union = Region::combined(&mut pool, &a, &empty, RegionOp::Union).unwrap();
    assert!(union.same_rects(&pool, &a).unwrap());

    let intersection = Region::combined(&mut pool, &a, &empty, RegionOp::Intersect).unwrap();
    assert!(intersection.is_empty());
}

#[test]
fn subtracting_a_region_from_itself_is_empty() {
    let mut pool = RectPool::with_capacity(16).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    a.subtract_rect(&mut pool, Rect::new(10, 10, 20, 90)).unwrap();

    let mut twin = Region::new(&pool);
    twin.copy_from(&mut pool, &a).unwrap();
    a.subtract(&mut pool, &twin).unwrap();
    assert!(a.is_empty());
    assert!(a.bounds().is_empty());
}

#[test]
fn results_stay_canonical_across_chained_operations() {
    let mut pool = RectPool::with_capacity(64).unwrap();
    let mut region = rect_region(&mut pool, Rect::new(0, 0, 200, 120));
    let steps = [
        (RegionOp::Subtract, Rect::new(20, 20, 60, 100)),
        (RegionOp::Union, Rect::new(-30, 10, 20, 50)),
        (RegionOp::Subtract, Rect::new(100, 0, 140, 120)),
        (RegionOp::Xor, Rect::new(150, 60, 260, 180)),
        (RegionOp::Intersect, Rect::new(-10, 0, 220, 150)),
        (RegionOp::Union, Rect::new(0, 120, 200, 140)),
    ];
    for (op, rect) in steps {
        match op {
            RegionOp::Union => region.add_rect(&mut pool, rect).unwrap(),
            RegionOp::Intersect => region.intersect_rect(&mut pool, rect).unwrap(),
            RegionOp::Subtract => region.subtract_rect(&mut pool, rect).unwrap(),
            RegionOp::Xor => region.xor_rect(&mut pool, rect).unwrap(),
        }
        assert_canonical(&pool, &region);
    }
}

#[test]
fn overlapping_union_scenario() {
    let mut pool = RectPool::with_capacity(16).unwrap();
    let a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    let b = rect_region(&mut pool, Rect::new(50, 50, 150, 150));
    let union = Region::combined(&mut pool, &a, &b, RegionOp::Union).unwrap();

    assert_eq!(union.bounds(), Rect::new(0, 0, 150, 150));
    assert_eq!(union.area(&pool).unwrap(), 17500);
    assert_canonical(&pool, &union);
}

#[test]
fn subtracting_an_interior_hole_scenario() {
    let mut pool = RectPool::with_capacity(16).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    a.subtract_rect(&mut pool, Rect::new(25, 25, 75, 75)).unwrap();

    assert_eq!(a.area(&pool).unwrap(), 7500);
    assert!(!a.contains_point(&pool, 50, 50).unwrap());
    assert!(a.contains_point(&pool, 10, 10).unwrap());
    assert!(a.intersects_rect(&pool, &Rect::new(40, 40, 60, 60)).unwrap());
    assert!(!a.contains_rect(&pool, &Rect::new(40, 40, 60, 60)).unwrap());
    assert_canonical(&pool, &a);
}

#[test]
fn exhausted_pool_leaves_region_unchanged() {
    let mut pool = RectPool::fixed(4).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    let before = a.to_vec(&pool).unwrap();
    let live_before = pool.live_count();

    // Splitting around an interior hole stages four rects while the one old
    // member is still live; a four-slot pool cannot hold five.
    let result = a.subtract_rect(&mut pool, Rect::new(25, 25, 75, 75));
    assert_eq!(result, Err(RegionError::PoolExhausted { capacity: 4 }));

    assert_eq!(a.to_vec(&pool).unwrap(), before);
    assert_eq!(a.bounds(), Rect::new(0, 0, 100, 100));
    assert_eq!(pool.live_count(), live_before);
    assert_canonical(&pool, &a);
}

#[test]
fn in_place_aliasing_matches_fresh_destination() {
    let mut pool = RectPool::with_capacity(32).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    a.add_rect(&mut pool, Rect::new(120, 0, 160, 100)).unwrap();
    let mut b = rect_region(&mut pool, Rect::new(25, 25, 140, 75));

    let fresh = Region::combined(&mut pool, &a, &b, RegionOp::Subtract).unwrap();
    a.subtract(&mut pool, &b).unwrap();
    assert!(a.same_rects(&pool, &fresh).unwrap());
    assert_canonical(&pool, &a);

    b.clear(&mut pool).unwrap();
}

#[test]
fn failed_combined_releases_its_staged_copy() {
    let mut pool = RectPool::fixed(6).unwrap();
    let a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    let b = rect_region(&mut pool, Rect::new(25, 25, 75, 75));
    let live_before = pool.live_count();

    // The subtraction needs four result rects on top of the staged copy of
    // `a`; a six-slot pool cannot hold that. The copy must come back too.
    let result = Region::combined(&mut pool, &a, &b, RegionOp::Subtract);
    assert_eq!(result.err(), Some(RegionError::PoolExhausted { capacity: 6 }));
    assert_eq!(pool.live_count(), live_before);
    assert_canonical(&pool, &a);
}

#[test]
fn cleared_regions_return_all_slots() {
    let mut pool = RectPool::with_capacity(8).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    a.subtract_rect(&mut pool, Rect::new(25, 25, 75, 75)).unwrap();
    let mut b = Region::new(&pool);
    b.copy_from(&mut pool, &a).unwrap();
    assert_eq!(pool.live_count(), 8);

    a.clear(&mut pool).unwrap();
    b.clear(&mut pool).unwrap();
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn offset_preserves_shape_and_canonical_form() {
    let mut pool = RectPool::with_capacity(16).unwrap();
    let mut a = rect_region(&mut pool, Rect::new(0, 0, 100, 100));
    a.subtract_rect(&mut pool, Rect::new(25, 25, 75, 75)).unwrap();
    let area = a.area(&pool).unwrap();

    a.offset(&mut pool, -40, 7).unwrap();
    assert_eq!(a.area(&pool).unwrap(), area);
    assert!(a.contains_point(&pool, -30, 17).unwrap());
    assert!(!a.contains_point(&pool, 10, 57).unwrap());
    assert_canonical(&pool, &a);
}
