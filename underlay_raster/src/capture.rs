// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region capture: recording the fill primitive into a region.
//!
//! Between [`RenderContext::open_region`] and
//! [`RenderContext::close_region`], the context's fill primitive is
//! rerouted: instead of clipping and touching pixels, every rectangle it
//! is asked to fill is appended to a fixed-capacity scratch buffer. The
//! pen is forced wide for the duration so that line drawing — which takes
//! a direct backend path when thin — also funnels through fill and gets
//! recorded. Closing restores the normal route and pen, sorts the captured
//! rectangles, and runs them through the band builder.
//!
//! The reroute is a two-variant choice the context consults on every fill,
//! not a swapped function pointer, so opening and closing cannot leave the
//! backend in a half-restored state.

use alloc::vec::Vec;

use underlay_region::{Rect, Region};

use crate::context::{Pen, RenderContext};
use crate::error::{Error, ErrorSlot};
use crate::image::Pixel;
use crate::raster::Raster;

/// Capacity of the capture scratch buffer, in rectangles.
pub const CAPTURE_CAPACITY: usize = 2048;

/// In-progress capture state.
#[derive(Debug)]
pub(crate) struct Capture {
    rects: Vec<Rect>,
    overflowed: bool,
    saved_pen: Pen,
}

impl Capture {
    /// Appends recorded spans, posting [`Error::CaptureOverflow`] when the
    /// scratch cannot take them. An overflowed capture stays open but
    /// records nothing further; close will discard it.
    pub(crate) fn record(&mut self, errors: &ErrorSlot, spans: &[Rect]) {
        if self.overflowed {
            return;
        }
        if self.rects.len() + spans.len() > CAPTURE_CAPACITY {
            self.overflowed = true;
            errors.post(Error::CaptureOverflow);
            return;
        }
        self.rects.extend_from_slice(spans);
    }
}

impl<R: Raster> RenderContext<R> {
    /// Opens a region capture.
    ///
    /// Allocates the scratch buffer, reroutes fill to record, and forces
    /// the pen wide. Posts [`Error::CaptureAlreadyOpen`] if a capture is
    /// open (the running capture is left alone) and
    /// [`Error::OutOfMemory`] if the scratch cannot be allocated; in both
    /// failure cases the context is unchanged.
    pub fn open_region(&mut self) {
        if self.capture.is_some() {
            self.errors().post(Error::CaptureAlreadyOpen);
            return;
        }
        let mut rects = Vec::new();
        if rects.try_reserve_exact(CAPTURE_CAPACITY).is_err() {
            self.errors().post(Error::OutOfMemory);
            return;
        }
        let saved_pen = self.force_pen_wide();
        self.capture = Some(Capture {
            rects,
            overflowed: false,
            saved_pen,
        });
    }

    /// Returns `true` while a capture is open.
    pub fn region_open(&self) -> bool {
        self.capture.is_some()
    }

    /// Closes the capture and builds the recorded region.
    ///
    /// Restores the fill route and the pen state, sorts the captured
    /// rectangles, and feeds them through the band builder. Returns `None`
    /// — with the error already posted — when no capture was open, when
    /// the scratch overflowed during recording, or when building the
    /// region fails.
    pub fn close_region(&mut self) -> Option<Region> {
        let Some(cap) = self.capture.take() else {
            self.errors().post(Error::CaptureNotOpen);
            return None;
        };
        self.restore_pen(cap.saved_pen);
        if cap.overflowed {
            return None;
        }
        match Region::from_rect_list(&cap.rects) {
            Ok(region) => Some(region),
            Err(e) => {
                self.errors().post(e.into());
                None
            }
        }
    }

    /// Converts the painted area of the surface into a region.
    ///
    /// Scans `src` (global coordinates; the whole surface when `None`) row
    /// by row with the pixel probe, treating `transparent` as outside.
    /// Each row's runs are painted through a capture and the per-row
    /// regions are accumulated with union, so vertically continuous areas
    /// coalesce into tall bands. Returns `None` (error posted) if any
    /// capture or combine step fails.
    pub fn bitmap_to_region(&mut self, src: Option<Rect>, transparent: Pixel) -> Option<Region> {
        let area = src.unwrap_or_else(|| self.raster().bounds());
        let mut total = Region::new();

        for y in area.y0..area.y1 {
            self.open_region();
            if !self.region_open() {
                return None;
            }

            let mut run_start = None;
            for x in area.x0..=area.x1 {
                let inside =
                    x < area.x1 && self.raster().pixel(x, y).is_some_and(|p| p != transparent);
                match (run_start, inside) {
                    (None, true) => run_start = Some(x),
                    (Some(start), false) => {
                        self.fill_global(0, &[Rect::new(start, y, x, y + 1)]);
                        run_start = None;
                    }
                    _ => {}
                }
            }

            let row = self.close_region()?;
            match self.combine_regions(underlay_region::RegionOp::Union, &total, &row) {
                Some(merged) => total = merged,
                None => return None,
            }
        }
        Some(total)
    }
}
