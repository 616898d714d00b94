// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boolean combinators over two regions.
//!
//! [`combine`] walks both operands' band lists in Y order, slicing the Y
//! axis at every band edge of either input. Within each slab it merges the
//! two X-span lists in lockstep as edge events and keeps the intervals the
//! operation's boolean table selects. Output goes through the same
//! band-coalescing sink as the builder, so results are canonical and
//! directly comparable with any other region.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::builder::{BandSink, XSpans};
use crate::error::RegionError;
use crate::rect::Rect;
use crate::region::{MAX_REGION_SPANS, Region};

/// Boolean operation selector for [`combine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionOp {
    /// Pixels in either operand.
    Union,
    /// Pixels in both operands.
    Intersect,
    /// Pixels in the first operand but not the second.
    Subtract,
    /// Pixels in exactly one operand.
    Xor,
}

impl RegionOp {
    /// The boolean table: is a pixel covered by `a_depth`/`b_depth` inside
    /// the result?
    #[inline]
    fn covers(self, a: i32, b: i32) -> bool {
        match self {
            Self::Union => a > 0 || b > 0,
            Self::Intersect => a > 0 && b > 0,
            Self::Subtract => a > 0 && b == 0,
            Self::Xor => (a > 0) != (b > 0),
        }
    }
}

/// Combines two regions into a new canonical region.
///
/// Neither operand is mutated; on allocation failure or size overflow the
/// error is returned and no region is produced.
///
/// Empty operands short-circuit by the identity and absorbing rules:
/// `Union(A, ∅) = A`, `Intersect(A, ∅) = ∅`, `Subtract(A, ∅) = A`,
/// `Subtract(∅, B) = ∅`, `Xor(A, ∅) = A`.
///
/// # Example
///
/// ```
/// use underlay_region::{Rect, Region, RegionOp, combine};
///
/// let a = Region::from_rect(Rect::new(0, 0, 10, 10)).unwrap();
/// let b = Region::from_rect(Rect::new(5, 5, 15, 15)).unwrap();
///
/// let union = combine(RegionOp::Union, &a, &b).unwrap();
/// assert_eq!(union.bounds(), Rect::new(0, 0, 15, 15));
///
/// let gone = combine(RegionOp::Subtract, &a, &a).unwrap();
/// assert!(gone.is_empty());
/// ```
pub fn combine(op: RegionOp, a: &Region, b: &Region) -> Result<Region, RegionError> {
    if b.is_empty() {
        return match op {
            RegionOp::Intersect => Ok(Region::new()),
            RegionOp::Union | RegionOp::Subtract | RegionOp::Xor => a.try_clone(),
        };
    }
    if a.is_empty() {
        return match op {
            RegionOp::Union | RegionOp::Xor => b.try_clone(),
            RegionOp::Intersect | RegionOp::Subtract => Ok(Region::new()),
        };
    }

    let mut measure = BandSink::measure();
    scan(op, a.spans(), b.spans(), &mut measure);
    let len = measure.count();
    if len > MAX_REGION_SPANS {
        return Err(RegionError::Overflow);
    }

    let mut spans = Vec::new();
    spans
        .try_reserve_exact(len)
        .map_err(|_| RegionError::OutOfMemory)?;
    let mut fill = BandSink::fill(&mut spans);
    scan(op, a.spans(), b.spans(), &mut fill);
    debug_assert_eq!(spans.len(), len, "size pass and fill pass disagree");

    Ok(Region::from_spans(spans))
}

/// Length of the band starting at `start`.
fn band_len(spans: &[Rect], start: usize) -> usize {
    let (y0, y1) = (spans[start].y0, spans[start].y1);
    let mut end = start + 1;
    while end < spans.len() && spans[end].y0 == y0 && spans[end].y1 == y1 {
        end += 1;
    }
    end - start
}

/// The band-synchronized scan over both operands.
fn scan(op: RegionOp, a: &[Rect], b: &[Rect], sink: &mut BandSink<'_>) {
    let mut ia = 0;
    let mut ib = 0;
    let mut y = i32::MIN;
    let mut xs: XSpans = SmallVec::new();

    loop {
        // Drop bands that end at or above the current position.
        while ia < a.len() && a[ia].y1 <= y {
            ia += band_len(a, ia);
        }
        while ib < b.len() && b[ib].y1 <= y {
            ib += band_len(b, ib);
        }
        if ia == a.len() && ib == b.len() {
            return;
        }

        // Slab top: the nearest Y at or below `y` where either input has
        // content.
        let mut top = i32::MAX;
        if ia < a.len() {
            top = top.min(a[ia].y0.max(y));
        }
        if ib < b.len() {
            top = top.min(b[ib].y0.max(y));
        }

        // Slab bottom: the nearest band edge strictly below the top.
        let mut bot = i32::MAX;
        if ia < a.len() {
            bot = bot.min(if a[ia].y0 > top { a[ia].y0 } else { a[ia].y1 });
        }
        if ib < b.len() {
            bot = bot.min(if b[ib].y0 > top { b[ib].y0 } else { b[ib].y1 });
        }

        let a_band = if ia < a.len() && a[ia].y0 <= top {
            &a[ia..ia + band_len(a, ia)]
        } else {
            &[]
        };
        let b_band = if ib < b.len() && b[ib].y0 <= top {
            &b[ib..ib + band_len(b, ib)]
        } else {
            &[]
        };

        combine_band(op, a_band, b_band, &mut xs);
        sink.push_band(top, bot, &xs);
        y = bot;
    }
}

/// Merges the X spans of one slab per the operation's boolean table.
fn combine_band(op: RegionOp, a: &[Rect], b: &[Rect], out: &mut XSpans) {
    out.clear();

    // Edge events: (x, a-depth delta, b-depth delta). Events sharing an X
    // coordinate are applied together before the coverage test, so spans
    // that merely touch across operands fuse instead of splitting.
    let mut events: SmallVec<[(i32, i8, i8); 32]> = SmallVec::new();
    for r in a {
        events.push((r.x0, 1, 0));
        events.push((r.x1, -1, 0));
    }
    for r in b {
        events.push((r.x0, 0, 1));
        events.push((r.x1, 0, -1));
    }
    events.sort_unstable_by_key(|e| e.0);

    let mut depth_a = 0_i32;
    let mut depth_b = 0_i32;
    let mut inside = false;
    let mut start = 0;
    let mut i = 0;
    while i < events.len() {
        let x = events[i].0;
        while i < events.len() && events[i].0 == x {
            depth_a += i32::from(events[i].1);
            depth_b += i32::from(events[i].2);
            i += 1;
        }
        let now = op.covers(depth_a, depth_b);
        if now && !inside {
            start = x;
            inside = true;
        } else if !now && inside {
            out.push((start, x));
            inside = false;
        }
    }
    debug_assert!(!inside, "unbalanced span edges");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn r(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    fn rect_region(x0: i32, y0: i32, x1: i32, y1: i32) -> Region {
        Region::from_rect(r(x0, y0, x1, y1)).unwrap()
    }

    #[test]
    fn union_of_overlapping_pair() {
        let a = rect_region(0, 0, 10, 10);
        let b = rect_region(5, 5, 15, 15);
        let u = combine(RegionOp::Union, &a, &b).unwrap();
        assert_eq!(u.bounds(), r(0, 0, 15, 15));
        assert!(!u.is_empty());
        assert_eq!(
            u.spans(),
            &[r(0, 0, 10, 5), r(0, 5, 15, 10), r(5, 10, 15, 15)]
        );
    }

    #[test]
    fn union_matches_builder_output() {
        // Combining must canonicalize exactly like building from the same
        // rectangles, or equality checks across construction paths break.
        let a = rect_region(0, 0, 10, 10);
        let b = rect_region(5, 5, 15, 15);
        let u = combine(RegionOp::Union, &a, &b).unwrap();
        let built =
            Region::from_rect_list(&[r(0, 0, 10, 10), r(5, 5, 15, 15)]).unwrap();
        assert_eq!(u, built);
    }

    #[test]
    fn intersect_with_self_is_identity() {
        let a = Region::from_rect_list(&[r(0, 0, 10, 10), r(5, 5, 15, 15)]).unwrap();
        let i = combine(RegionOp::Intersect, &a, &a).unwrap();
        assert_eq!(i, a);
    }

    #[test]
    fn subtract_self_is_empty() {
        let a = Region::from_rect_list(&[r(0, 0, 10, 10), r(20, 0, 30, 4)]).unwrap();
        let s = combine(RegionOp::Subtract, &a, &a).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.bounds(), Rect::ZERO);
    }

    #[test]
    fn xor_self_is_empty() {
        let a = Region::from_rect_list(&[r(0, 0, 10, 10), r(5, 5, 15, 15)]).unwrap();
        let x = combine(RegionOp::Xor, &a, &a).unwrap();
        assert!(x.is_empty());
    }

    #[test]
    fn empty_operand_rules() {
        let a = rect_region(0, 0, 10, 10);
        let empty = Region::new();

        assert_eq!(combine(RegionOp::Union, &a, &empty).unwrap(), a);
        assert!(combine(RegionOp::Intersect, &a, &empty).unwrap().is_empty());
        assert_eq!(combine(RegionOp::Subtract, &a, &empty).unwrap(), a);
        assert!(combine(RegionOp::Subtract, &empty, &a).unwrap().is_empty());
        assert_eq!(combine(RegionOp::Xor, &a, &empty).unwrap(), a);
        assert_eq!(combine(RegionOp::Union, &empty, &a).unwrap(), a);
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = rect_region(0, 0, 5, 5);
        let b = rect_region(10, 10, 15, 15);
        assert!(combine(RegionOp::Intersect, &a, &b).unwrap().is_empty());
    }

    #[test]
    fn subtract_punches_a_hole() {
        let outer = rect_region(0, 0, 10, 10);
        let inner = rect_region(3, 3, 7, 7);
        let ring = combine(RegionOp::Subtract, &outer, &inner).unwrap();
        assert_eq!(
            ring.spans(),
            &[
                r(0, 0, 10, 3),
                r(0, 3, 3, 7),
                r(7, 3, 10, 7),
                r(0, 7, 10, 10),
            ]
        );
        assert_eq!(ring.bounds(), r(0, 0, 10, 10));
    }

    #[test]
    fn union_of_touching_rects_fuses_spans() {
        let a = rect_region(0, 0, 5, 5);
        let b = rect_region(5, 0, 9, 5);
        let u = combine(RegionOp::Union, &a, &b).unwrap();
        assert_eq!(u.spans(), &[r(0, 0, 9, 5)]);
        assert!(u.is_rectangular());
    }

    #[test]
    fn union_of_vertically_touching_rects_coalesces_bands() {
        let a = rect_region(2, 0, 8, 4);
        let b = rect_region(2, 4, 8, 9);
        let u = combine(RegionOp::Union, &a, &b).unwrap();
        assert_eq!(u.spans(), &[r(2, 0, 8, 9)]);
    }

    #[test]
    fn xor_of_overlapping_pair() {
        let a = rect_region(0, 0, 10, 10);
        let b = rect_region(5, 5, 15, 15);
        let x = combine(RegionOp::Xor, &a, &b).unwrap();
        // Everything except the shared (5,5)..(10,10) square.
        assert_eq!(
            x.spans(),
            &[
                r(0, 0, 10, 5),
                r(0, 5, 5, 10),
                r(10, 5, 15, 10),
                r(5, 10, 15, 15),
            ]
        );
        assert!(!x.contains(7, 7));
        assert!(x.contains(2, 7));
        assert!(x.contains(12, 7));
    }

    #[test]
    fn subtract_narrow_stripe_splits_band() {
        let a = rect_region(0, 0, 12, 2);
        let stripe = rect_region(4, 0, 6, 2);
        let s = combine(RegionOp::Subtract, &a, &stripe).unwrap();
        assert_eq!(s.spans(), &[r(0, 0, 4, 2), r(6, 0, 12, 2)]);
    }

    #[test]
    fn results_are_directly_comparable() {
        // (A ∪ B) ∖ B == A ∖ B for any A and B.
        let a = Region::from_rect_list(&[r(0, 0, 8, 8), r(10, 2, 14, 6)]).unwrap();
        let b = rect_region(4, 4, 12, 12);
        let u = combine(RegionOp::Union, &a, &b).unwrap();
        let left = combine(RegionOp::Subtract, &u, &b).unwrap();
        let right = combine(RegionOp::Subtract, &a, &b).unwrap();
        assert_eq!(left, right);
    }
}
