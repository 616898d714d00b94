// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The raster backend abstraction.

use alloc::vec::Vec;

use underlay_region::{Point, Rect};

use crate::image::{Pixel, Pixmap, SpriteImage};

/// A display surface the engine draws on.
///
/// The engine needs very little from a backend: a span fill, block
/// read/write for save-under transfers, and a pixel probe. Everything else
/// (clipping, capture, cursor compositing) is layered on top. Backends are
/// expected to clamp all access to their own bounds.
pub trait Raster {
    /// Surface width in pixels.
    fn width(&self) -> i32;

    /// Surface height in pixels.
    fn height(&self) -> i32;

    /// Fills every rectangle in `spans` with `color`.
    ///
    /// This is the one primitive all region-clipped drawing funnels
    /// through; the spans arrive pre-clipped in device coordinates.
    fn fill_spans(&mut self, color: Pixel, spans: &[Rect]);

    /// Reads a block of pixels. `rect` must lie within the surface; reads
    /// of empty or out-of-bounds rectangles return `None`.
    fn read_rect(&mut self, rect: Rect) -> Option<Pixmap>;

    /// Writes a block of pixels with its top-left corner at `origin`,
    /// replacing what was there. Pixels falling outside the surface are
    /// dropped.
    fn write_rect(&mut self, origin: Point, pixels: &Pixmap);

    /// Reads one pixel, or `None` outside the surface.
    fn pixel(&self, x: i32, y: i32) -> Option<Pixel>;

    /// The surface bounds as a rectangle at the origin.
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Draws a monochrome sprite in `color` with transparent-replace
    /// semantics: set bits are written, clear bits leave the surface
    /// untouched.
    ///
    /// The default routes through [`Raster::fill_spans`] using the
    /// sprite's horizontal runs; backends with hardware cursors can
    /// override.
    fn write_sprite(&mut self, origin: Point, sprite: &SpriteImage, color: Pixel) {
        let mut spans = Vec::new();
        sprite.runs(origin.x, origin.y, &mut spans);
        self.fill_spans(color, &spans);
    }
}
