// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase band builder: YX-sorted rectangle lists in, canonical banded
//! span lists out.
//!
//! Construction runs the same Y-event sweep twice over one input borrow:
//! a **size pass** with no output buffer that counts the spans the banded
//! encoding will need, then a **fill pass** into an exactly-sized buffer.
//! The sweep keeps an active-rectangle set, slices the Y axis at every top
//! or bottom edge, unions the active X intervals per slab, and hands each
//! slab to a [`BandSink`] that coalesces vertically adjacent bands with
//! identical X structure. Running the identical code path for both passes
//! is what guarantees the two sizes agree.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::error::RegionError;
use crate::rect::Rect;
use crate::region::{MAX_REGION_SPANS, Region};

/// X intervals of one band; inline up to a typical band width.
pub(crate) type XSpans = SmallVec<[(i32, i32); 16]>;

/// Output stage shared by the builder and the combine scan.
///
/// Accepts bands top-to-bottom and either counts spans (size pass, no
/// buffer) or appends them (fill pass). A band whose X structure matches
/// the previous band and whose top touches its bottom is folded into the
/// previous band, keeping the encoding canonical.
#[derive(Debug)]
pub(crate) struct BandSink<'a> {
    out: Option<&'a mut Vec<Rect>>,
    count: usize,
    prev: XSpans,
    prev_y1: i32,
}

impl<'a> BandSink<'a> {
    pub(crate) fn measure() -> Self {
        Self {
            out: None,
            count: 0,
            prev: SmallVec::new(),
            prev_y1: i32::MIN,
        }
    }

    pub(crate) fn fill(out: &'a mut Vec<Rect>) -> Self {
        Self {
            out: Some(out),
            count: 0,
            prev: SmallVec::new(),
            prev_y1: i32::MIN,
        }
    }

    /// Number of spans accepted so far, after coalescing.
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn push_band(&mut self, y0: i32, y1: i32, xs: &[(i32, i32)]) {
        debug_assert!(y0 < y1, "band must have positive height");
        if xs.is_empty() {
            return;
        }
        if y0 == self.prev_y1 && xs == &self.prev[..] {
            // Same X structure continuing: grow the previous band downward.
            self.prev_y1 = y1;
            if let Some(out) = self.out.as_deref_mut() {
                let start = out.len() - xs.len();
                for span in &mut out[start..] {
                    span.y1 = y1;
                }
            }
            return;
        }
        self.count += xs.len();
        if let Some(out) = self.out.as_deref_mut() {
            out.extend(xs.iter().map(|&(x0, x1)| Rect::new(x0, y0, x1, y1)));
        }
        self.prev.clear();
        self.prev.extend_from_slice(xs);
        self.prev_y1 = y1;
    }
}

/// Builds a region from a YX-sorted rectangle list (union semantics).
///
/// The list must not change between the two passes; borrowing it for the
/// whole call enforces that. Empty rectangles are skipped. Fails without
/// side effects on allocation failure or when the result would exceed
/// [`MAX_REGION_SPANS`].
pub(crate) fn merge_sorted(sorted: &[Rect]) -> Result<Region, RegionError> {
    debug_assert!(
        sorted
            .windows(2)
            .all(|w| (w[0].y0, w[0].x0) <= (w[1].y0, w[1].x0)),
        "input rectangle list is not YX-sorted"
    );

    let mut measure = BandSink::measure();
    sweep(sorted, &mut measure);
    let len = measure.count();
    if len > MAX_REGION_SPANS {
        return Err(RegionError::Overflow);
    }

    let mut spans = Vec::new();
    spans
        .try_reserve_exact(len)
        .map_err(|_| RegionError::OutOfMemory)?;
    let mut fill = BandSink::fill(&mut spans);
    sweep(sorted, &mut fill);
    debug_assert_eq!(spans.len(), len, "size pass and fill pass disagree");

    Ok(Region::from_spans(spans))
}

/// The Y-event sweep over a sorted rectangle list.
fn sweep(sorted: &[Rect], sink: &mut BandSink<'_>) {
    let n = sorted.len();
    let mut active: SmallVec<[Rect; 16]> = SmallVec::new();
    let mut i = 0;
    let mut y = 0;

    loop {
        if active.is_empty() {
            while i < n && sorted[i].is_empty() {
                i += 1;
            }
            if i == n {
                return;
            }
            y = sorted[i].y0;
        }

        // Absorb every rectangle whose top edge sits on the current slab top.
        while i < n {
            let r = sorted[i];
            if r.is_empty() {
                i += 1;
                continue;
            }
            if r.y0 != y {
                break;
            }
            active.push(r);
            i += 1;
        }

        // The slab ends at the nearest bottom edge or the next top edge.
        let mut bot = i32::MAX;
        for r in &active {
            bot = bot.min(r.y1);
        }
        let mut j = i;
        while j < n && sorted[j].is_empty() {
            j += 1;
        }
        if j < n {
            bot = bot.min(sorted[j].y0);
        }

        // Union of the active X intervals, coalescing overlap and touch.
        let mut xs: XSpans = active.iter().map(|r| (r.x0, r.x1)).collect();
        xs.sort_unstable();
        let mut merged: XSpans = SmallVec::new();
        for &(x0, x1) in &xs {
            if let Some(last) = merged.last_mut() {
                if x0 <= last.1 {
                    last.1 = last.1.max(x1);
                    continue;
                }
            }
            merged.push((x0, x1));
        }

        sink.push_band(y, bot, &merged);

        active.retain(|r| r.y1 > bot);
        y = bot;
    }
}
