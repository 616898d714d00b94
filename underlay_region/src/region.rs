// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owned, banded region value.

use alloc::vec::Vec;

use crate::error::RegionError;
use crate::rect::Rect;
use crate::{builder, sort};

/// Maximum number of spans a region may hold.
///
/// Results that would exceed this cap fail with [`RegionError::Overflow`]
/// instead of producing a partial region.
pub const MAX_REGION_SPANS: usize = 2047;

bitflags::bitflags! {
    /// Structural summary flags maintained by every constructor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RegionFlags: u8 {
        /// The region covers no pixels.
        const NULL = 1 << 0;
        /// The region consists of exactly one span, so it is a plain
        /// rectangle and rectangular clipping suffices.
        const RECTANGULAR = 1 << 1;
    }
}

/// A set of non-overlapping pixels encoded as Y-ordered bands of X-sorted
/// spans, used for clipping.
///
/// A **band** is a maximal run of spans sharing the same Y extent. Within a
/// band, spans are strictly X-ordered and mutually non-adjacent (no two
/// spans touch or overlap); bands are ordered by increasing Y, and two
/// vertically adjacent bands never have identical X structure (they would
/// have been coalesced into one taller band). This makes the encoding
/// canonical: two regions cover the same pixels if and only if they compare
/// equal field by field, which is exactly what the derived [`PartialEq`]
/// does.
///
/// Regions are built by [`Region::from_rect`], [`Region::from_rect_list`],
/// and [`combine`](crate::combine); they are mutated in place only by
/// [`Region::clear`] and [`Region::offset`].
///
/// # Example
///
/// ```
/// use underlay_region::{Rect, Region};
///
/// let region = Region::from_rect_list(&[
///     Rect::new(0, 0, 10, 10),
///     Rect::new(5, 5, 15, 15),
/// ])
/// .unwrap();
///
/// assert_eq!(region.bounds(), Rect::new(0, 0, 15, 15));
/// assert!(!region.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    bounds: Rect,
    flags: RegionFlags,
    spans: Vec<Rect>,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    /// Creates an empty (null) region.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: Rect::ZERO,
            flags: RegionFlags::NULL,
            spans: Vec::new(),
        }
    }

    /// Creates a region covering a single rectangle.
    ///
    /// Corner order is normalized first; an empty rectangle yields an empty
    /// region.
    pub fn from_rect(rect: Rect) -> Result<Self, RegionError> {
        let rect = Rect::new(
            rect.x0.min(rect.x1),
            rect.y0.min(rect.y1),
            rect.x0.max(rect.x1),
            rect.y0.max(rect.y1),
        );
        builder::merge_sorted(&[rect])
    }

    /// Creates a region covering the union of an unsorted rectangle list.
    ///
    /// The list is copied, YX-sorted, and fed through the band builder;
    /// overlapping and touching input rectangles are welcome and come out
    /// canonicalized. Empty input rectangles are ignored.
    pub fn from_rect_list(rects: &[Rect]) -> Result<Self, RegionError> {
        let mut sorted = Vec::new();
        sort::sort_rects_into(rects, &mut sorted)?;
        builder::merge_sorted(&sorted)
    }

    /// Assembles a region from an already-canonical span list.
    ///
    /// Callers (the builder and the combine scan) guarantee banding
    /// invariants; this only derives bounds and flags.
    pub(crate) fn from_spans(spans: Vec<Rect>) -> Self {
        debug_assert!(spans_are_canonical(&spans), "span list is not canonical");
        if spans.is_empty() {
            return Self {
                bounds: Rect::ZERO,
                flags: RegionFlags::NULL,
                spans,
            };
        }
        let mut x0 = i32::MAX;
        let mut x1 = i32::MIN;
        for s in &spans {
            x0 = x0.min(s.x0);
            x1 = x1.max(s.x1);
        }
        let bounds = Rect::new(x0, spans[0].y0, x1, spans[spans.len() - 1].y1);
        let flags = if spans.len() == 1 {
            RegionFlags::RECTANGULAR
        } else {
            RegionFlags::empty()
        };
        Self {
            bounds,
            flags,
            spans,
        }
    }

    /// The tight bounding box; [`Rect::ZERO`] when empty.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Structural summary flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> RegionFlags {
        self.flags
    }

    /// Returns `true` when the region covers no pixels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.contains(RegionFlags::NULL)
    }

    /// Returns `true` when the region is a single rectangle.
    #[inline]
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        self.flags.contains(RegionFlags::RECTANGULAR)
    }

    /// The banded span list.
    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[Rect] {
        &self.spans
    }

    /// Iterates the bands: each item is a Y extent plus that band's spans.
    pub fn bands(&self) -> Bands<'_> {
        Bands {
            spans: &self.spans,
            pos: 0,
        }
    }

    /// Duplicates the region with a fallible, exactly-sized allocation.
    ///
    /// The canonical encoding keeps its own length, so the copy is sized
    /// without re-walking bands. `Clone` does the same but aborts on
    /// allocation failure.
    pub fn try_clone(&self) -> Result<Self, RegionError> {
        let mut spans = Vec::new();
        spans
            .try_reserve_exact(self.spans.len())
            .map_err(|_| RegionError::OutOfMemory)?;
        spans.extend_from_slice(&self.spans);
        Ok(Self {
            bounds: self.bounds,
            flags: self.flags,
            spans,
        })
    }

    /// Empties the region in place, keeping its allocation for reuse.
    ///
    /// The bounding box becomes [`Rect::ZERO`] and [`Region::is_empty`]
    /// reports `true`.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.bounds = Rect::ZERO;
        self.flags = RegionFlags::NULL;
    }

    /// Translates every span and the bounding box by `(dx, dy)`.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        if self.is_empty() {
            return;
        }
        self.bounds = self.bounds.offset(dx, dy);
        for s in &mut self.spans {
            *s = s.offset(dx, dy);
        }
    }

    /// Returns `true` when the point lies inside the region.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if !self.bounds.contains(crate::Point::new(x, y)) {
            return false;
        }
        self.spans
            .iter()
            .take_while(|s| s.y0 <= y)
            .any(|s| y < s.y1 && x >= s.x0 && x < s.x1)
    }

    /// Appends to `out` the intersection of a span list with this region.
    ///
    /// This is the clip gate draw primitives go through: every input
    /// rectangle is cut against the bands, and only the surviving pieces
    /// reach the backend fill.
    pub fn clip_spans(&self, list: &[Rect], out: &mut Vec<Rect>) {
        for &r in list {
            if !r.intersects(self.bounds) {
                continue;
            }
            for &s in &self.spans {
                // Bands are Y-ascending, so no later span can reach back up.
                if s.y0 >= r.y1 {
                    break;
                }
                let cut = s.intersect(r);
                if !cut.is_empty() {
                    out.push(cut);
                }
            }
        }
    }
}

/// Iterator over the bands of a region, in Y order.
#[derive(Debug)]
pub struct Bands<'a> {
    spans: &'a [Rect],
    pos: usize,
}

/// One band: a Y extent and the spans sharing it.
#[derive(Copy, Clone, Debug)]
pub struct Band<'a> {
    /// Band top (inclusive).
    pub y0: i32,
    /// Band bottom (exclusive).
    pub y1: i32,
    /// The band's spans, strictly X-ordered and non-adjacent.
    pub spans: &'a [Rect],
}

impl<'a> Iterator for Bands<'a> {
    type Item = Band<'a>;

    fn next(&mut self) -> Option<Band<'a>> {
        let first = *self.spans.get(self.pos)?;
        let start = self.pos;
        let mut end = start + 1;
        while end < self.spans.len()
            && self.spans[end].y0 == first.y0
            && self.spans[end].y1 == first.y1
        {
            end += 1;
        }
        self.pos = end;
        Some(Band {
            y0: first.y0,
            y1: first.y1,
            spans: &self.spans[start..end],
        })
    }
}

/// Checks the banding invariants; used by `debug_assert` in constructors.
pub(crate) fn spans_are_canonical(spans: &[Rect]) -> bool {
    let mut prev_band: Option<(i32, i32, usize, usize)> = None;
    let mut i = 0;
    while i < spans.len() {
        let (y0, y1) = (spans[i].y0, spans[i].y1);
        if y1 <= y0 {
            return false;
        }
        let start = i;
        while i < spans.len() && spans[i].y0 == y0 && spans[i].y1 == y1 {
            if spans[i].x1 <= spans[i].x0 {
                return false;
            }
            if i > start && spans[i].x0 <= spans[i - 1].x1 {
                return false;
            }
            i += 1;
        }
        if let Some((py0, py1, ps, pe)) = prev_band {
            if y0 < py1 || py0 >= y0 {
                return false;
            }
            // Touching bands with identical X structure must have coalesced.
            if py1 == y0 && i - start == pe - ps {
                let same = (0..i - start).all(|k| {
                    spans[ps + k].x0 == spans[start + k].x0
                        && spans[ps + k].x1 == spans[start + k].x1
                });
                if same {
                    return false;
                }
            }
        }
        prev_band = Some((y0, y1, start, i));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn r(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    #[test]
    fn new_region_is_null() {
        let region = Region::new();
        assert!(region.is_empty());
        assert!(!region.is_rectangular());
        assert_eq!(region.bounds(), Rect::ZERO);
        assert_eq!(region.spans(), &[]);
    }

    #[test]
    fn from_rect_is_rectangular() {
        let region = Region::from_rect(r(2, 3, 10, 8)).unwrap();
        assert!(region.is_rectangular());
        assert_eq!(region.bounds(), r(2, 3, 10, 8));
        assert_eq!(region.spans(), &[r(2, 3, 10, 8)]);
    }

    #[test]
    fn from_rect_normalizes_corners() {
        let region = Region::from_rect(r(10, 8, 2, 3)).unwrap();
        assert_eq!(region.bounds(), r(2, 3, 10, 8));
    }

    #[test]
    fn from_empty_rect_is_null() {
        let region = Region::from_rect(r(4, 4, 4, 4)).unwrap();
        assert!(region.is_empty());
        assert_eq!(region.bounds(), Rect::ZERO);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut region =
            Region::from_rect_list(&[r(0, 0, 4, 4), r(10, 10, 14, 14)]).unwrap();
        let cap = region.spans.capacity();
        assert!(cap >= 2);
        region.clear();
        assert!(region.is_empty());
        assert_eq!(region.bounds(), Rect::ZERO);
        assert_eq!(region.spans.capacity(), cap);
    }

    #[test]
    fn offset_moves_bounds_and_spans() {
        let mut region =
            Region::from_rect_list(&[r(0, 0, 4, 4), r(10, 10, 14, 14)]).unwrap();
        region.offset(3, -2);
        assert_eq!(region.bounds(), r(3, -2, 17, 12));
        assert_eq!(region.spans()[0], r(3, -2, 7, 2));
        assert_eq!(region.spans()[1], r(13, 8, 17, 12));
    }

    #[test]
    fn offset_of_null_region_is_noop() {
        let mut region = Region::new();
        region.offset(5, 5);
        assert_eq!(region.bounds(), Rect::ZERO);
    }

    #[test]
    fn duplicate_compares_equal() {
        let region =
            Region::from_rect_list(&[r(0, 0, 10, 10), r(5, 5, 15, 15)]).unwrap();
        let dup = region.try_clone().unwrap();
        assert_eq!(region, dup);
        assert_eq!(region, region.clone());
    }

    #[test]
    fn contains_respects_band_holes() {
        // Two columns with a gap between them.
        let region = Region::from_rect_list(&[r(0, 0, 2, 4), r(6, 0, 8, 4)]).unwrap();
        assert!(region.contains(1, 2));
        assert!(region.contains(6, 0));
        assert!(!region.contains(4, 2));
        assert!(!region.contains(8, 2));
    }

    #[test]
    fn bands_group_shared_y_extents() {
        let region =
            Region::from_rect_list(&[r(0, 0, 2, 4), r(6, 0, 8, 4), r(0, 4, 8, 6)]).unwrap();
        let bands: Vec<_> = region.bands().collect();
        assert_eq!(bands.len(), 2);
        assert_eq!((bands[0].y0, bands[0].y1), (0, 4));
        assert_eq!(bands[0].spans, &[r(0, 0, 2, 4), r(6, 0, 8, 4)]);
        assert_eq!((bands[1].y0, bands[1].y1), (4, 6));
        assert_eq!(bands[1].spans, &[r(0, 4, 8, 6)]);
    }

    #[test]
    fn clip_spans_cuts_against_bands() {
        let region = Region::from_rect_list(&[r(0, 0, 2, 4), r(6, 0, 8, 4)]).unwrap();
        let mut out = Vec::new();
        region.clip_spans(&[r(1, 1, 7, 3)], &mut out);
        assert_eq!(out, vec![r(1, 1, 2, 3), r(6, 1, 7, 3)]);

        out.clear();
        region.clip_spans(&[r(3, 0, 5, 4)], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn canonical_checker_rejects_bad_lists() {
        // Overlapping spans in one band.
        assert!(!spans_are_canonical(&[r(0, 0, 5, 2), r(4, 0, 8, 2)]));
        // Adjacent spans in one band.
        assert!(!spans_are_canonical(&[r(0, 0, 5, 2), r(5, 0, 8, 2)]));
        // Touching bands with identical X structure.
        assert!(!spans_are_canonical(&[r(0, 0, 5, 2), r(0, 2, 5, 4)]));
        // Proper banding passes.
        assert!(spans_are_canonical(&[r(0, 0, 5, 2), r(0, 2, 6, 4)]));
    }
}
