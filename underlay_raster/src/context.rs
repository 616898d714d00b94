// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render context: coordinate port, pen, clip state, and the gated
//! fill path.
//!
//! A [`RenderContext`] owns a backend surface plus all the drawing state
//! that goes with it: the user→global coordinate port, the pen, the
//! rectangular clip, the installed clip region, the capture route, and the
//! sticky error slot. Nothing lives in process-wide globals; every
//! operation names the context it works on. Every draw primitive issued
//! through the context is converted to global coordinates, cut against the
//! rectangular clip and the clip region's bands, and only then handed to
//! the backend fill.

use alloc::sync::Arc;
use alloc::vec::Vec;

use underlay_region::{Point, Rect, Region, RegionOp, combine};

use crate::capture::Capture;
use crate::error::{Error, ErrorSlot};
use crate::image::Pixel;
use crate::raster::Raster;

/// Pen state for line drawing.
///
/// A `None` size is the thin pen: lines are one pixel wide and take the
/// direct backend path. A sized pen expands every line pixel into a
/// `w × h` block and routes the result through the fill primitive, which
/// is what makes sized lines visible to region capture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pen {
    /// Pen block size, or `None` for the thin pen.
    pub size: Option<(i32, i32)>,
}

/// Owned drawing state over a backend surface.
#[derive(Debug)]
pub struct RenderContext<R> {
    raster: R,
    port_origin: Point,
    pen: Pen,
    clip_rect: Option<Rect>,
    clip_region: Option<Arc<Region>>,
    pub(crate) capture: Option<Capture>,
    errors: ErrorSlot,
}

impl<R: Raster> RenderContext<R> {
    /// Wraps a backend surface with default state: identity port, thin
    /// pen, no clipping.
    pub fn new(raster: R) -> Self {
        Self {
            raster,
            port_origin: Point::ZERO,
            pen: Pen::default(),
            clip_rect: None,
            clip_region: None,
            capture: None,
            errors: ErrorSlot::new(),
        }
    }

    /// The backend surface.
    pub fn raster(&self) -> &R {
        &self.raster
    }

    /// Mutable access to the backend surface.
    ///
    /// Writes through this reference bypass clipping and capture; the
    /// cursor overlay uses it for its save-under transfers.
    pub fn raster_mut(&mut self) -> &mut R {
        &mut self.raster
    }

    /// Consumes the context and returns the surface.
    pub fn into_raster(self) -> R {
        self.raster
    }

    /// The sticky error slot.
    pub fn errors(&self) -> &ErrorSlot {
        &self.errors
    }

    /// Reads and clears the last posted error.
    pub fn take_error(&self) -> Option<Error> {
        self.errors.take()
    }

    // --- coordinate port -------------------------------------------------

    /// Sets the port origin: user coordinates are translated by this much
    /// to reach global (device) coordinates.
    pub fn set_port_origin(&mut self, origin: Point) {
        self.port_origin = origin;
    }

    /// The current port origin.
    pub fn port_origin(&self) -> Point {
        self.port_origin
    }

    /// Converts a user-space point to global coordinates.
    pub fn user_to_global(&self, p: Point) -> Point {
        p.offset(self.port_origin.x, self.port_origin.y)
    }

    /// Converts a global point back to user space.
    pub fn global_to_user(&self, p: Point) -> Point {
        p.offset(-self.port_origin.x, -self.port_origin.y)
    }

    /// Converts a user-space rectangle to global coordinates.
    pub fn user_rect_to_global(&self, r: Rect) -> Rect {
        r.offset(self.port_origin.x, self.port_origin.y)
    }

    // --- pen -------------------------------------------------------------

    /// The current pen.
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Sets the pen size; `None` selects the thin pen.
    pub fn set_pen_size(&mut self, size: Option<(i32, i32)>) {
        self.pen.size = size;
    }

    pub(crate) fn force_pen_wide(&mut self) -> Pen {
        let saved = self.pen;
        if self.pen.size.is_none() {
            self.pen.size = Some((1, 1));
        }
        saved
    }

    pub(crate) fn restore_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    // --- clipping --------------------------------------------------------

    /// Sets or clears the rectangular clip, in global coordinates.
    pub fn set_clip_rect(&mut self, clip: Option<Rect>) {
        self.clip_rect = clip;
    }

    /// The rectangular clip, if any.
    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_rect
    }

    /// Installs or clears the clip region.
    ///
    /// The region is shared, not copied: the context holds an `Arc`, so
    /// the caller keeps its handle and the region stays immutable and
    /// alive for as long as it is installed. `None` disables region
    /// clipping; the rectangular clip, if any, still applies. An empty
    /// region is a valid clip that suppresses all drawing.
    pub fn set_clip_region(&mut self, region: Option<Arc<Region>>) {
        self.clip_region = region;
    }

    /// The installed clip region, if any.
    pub fn clip_region(&self) -> Option<&Arc<Region>> {
        self.clip_region.as_ref()
    }

    // --- drawing ---------------------------------------------------------

    /// Fills a user-space rectangle through the clip gate.
    pub fn fill_rect(&mut self, color: Pixel, rect: Rect) {
        let global = self.user_rect_to_global(rect);
        self.fill_global(color, &[global]);
    }

    /// Fills a list of user-space rectangles through the clip gate.
    pub fn fill_rects(&mut self, color: Pixel, rects: &[Rect]) {
        let mut global = Vec::with_capacity(rects.len());
        global.extend(rects.iter().map(|&r| self.user_rect_to_global(r)));
        self.fill_global(color, &global);
    }

    /// Draws a line between two user-space points, endpoints inclusive.
    ///
    /// Thin-pen lines go straight to the backend (clipped but not
    /// capturable); sized-pen lines expand each line pixel by the pen
    /// block and route through the fill primitive.
    pub fn draw_line(&mut self, color: Pixel, a: Point, b: Point) {
        let a = self.user_to_global(a);
        let b = self.user_to_global(b);
        let (pw, ph) = self.pen.size.unwrap_or((1, 1));

        let mut rects = Vec::new();
        if a.y == b.y {
            let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
            rects.push(Rect::new(x0, a.y, x1 + pw, a.y + ph));
        } else if a.x == b.x {
            let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
            rects.push(Rect::new(a.x, y0, a.x + pw, y1 + ph));
        } else {
            bresenham(a, b, |x, y| {
                rects.push(Rect::new(x, y, x + pw, y + ph));
            });
        }

        if self.pen.size.is_some() {
            self.fill_global(color, &rects);
        } else {
            self.clip_and_fill(color, &rects);
        }
    }

    /// The fill primitive proper: records into an open capture, or clips
    /// and fills.
    pub(crate) fn fill_global(&mut self, color: Pixel, rects: &[Rect]) {
        if let Some(cap) = self.capture.as_mut() {
            cap.record(&self.errors, rects);
        } else {
            self.clip_and_fill(color, rects);
        }
    }

    fn clip_and_fill(&mut self, color: Pixel, rects: &[Rect]) {
        let mut clipped = Vec::with_capacity(rects.len());
        for &r in rects {
            let r = match self.clip_rect {
                Some(c) => r.intersect(c),
                None => r,
            };
            if !r.is_empty() {
                clipped.push(r);
            }
        }
        match &self.clip_region {
            Some(region) => {
                let mut gated = Vec::new();
                region.clip_spans(&clipped, &mut gated);
                self.raster.fill_spans(color, &gated);
            }
            None => self.raster.fill_spans(color, &clipped),
        }
    }

    // --- region constructors --------------------------------------------

    /// Builds a region from one user-space rectangle. Posts to the error
    /// slot and returns `None` on failure.
    pub fn region_from_rect(&self, rect: Rect) -> Option<Region> {
        let global = self.user_rect_to_global(rect);
        self.lift(Region::from_rect(global))
    }

    /// Builds a single-rectangle region from two diagonal corner points in
    /// user space, in either order.
    pub fn region_from_corners(&self, a: Point, b: Point) -> Option<Region> {
        self.region_from_rect(Rect::from_points(a, b))
    }

    /// Builds a region from an unsorted user-space rectangle list.
    pub fn region_from_rect_list(&self, rects: &[Rect]) -> Option<Region> {
        let mut global = Vec::new();
        if global.try_reserve_exact(rects.len()).is_err() {
            self.errors.post(Error::OutOfMemory);
            return None;
        }
        global.extend(rects.iter().map(|&r| self.user_rect_to_global(r)));
        self.lift(Region::from_rect_list(&global))
    }

    /// Duplicates a region with a fallible, exactly-sized allocation.
    pub fn duplicate_region(&self, region: &Region) -> Option<Region> {
        self.lift(region.try_clone())
    }

    /// Combines two regions, posting to the error slot on failure.
    pub fn combine_regions(&self, op: RegionOp, a: &Region, b: &Region) -> Option<Region> {
        self.lift(combine(op, a, b))
    }

    fn lift<E: Into<Error>>(&self, result: Result<Region, E>) -> Option<Region> {
        match result {
            Ok(region) => Some(region),
            Err(e) => {
                self.errors.post(e.into());
                None
            }
        }
    }
}

/// Walks the integer line from `a` to `b`, endpoints inclusive.
fn bresenham(a: Point, b: Point, mut plot: impl FnMut(i32, i32)) {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);
    loop {
        plot(x, y);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
