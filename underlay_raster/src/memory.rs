// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory reference backend.
//!
//! [`MemoryRaster`] rasterizes into an owned [`Pixmap`]. It is the backend
//! software targets use and the one the test suites draw on; it also counts
//! block reads and writes so tests can assert save/restore pairing without
//! inspecting pixels.

use underlay_region::{Point, Rect};

use crate::image::{Pixel, Pixmap};
use crate::raster::Raster;

/// A software surface backed by a [`Pixmap`].
#[derive(Debug)]
pub struct MemoryRaster {
    pixels: Pixmap,
    reads: u32,
    writes: u32,
}

impl MemoryRaster {
    /// Creates a zero-filled surface.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            pixels: Pixmap::new(width, height),
            reads: 0,
            writes: 0,
        }
    }

    /// The backing pixels.
    #[must_use]
    pub fn pixels(&self) -> &Pixmap {
        &self.pixels
    }

    /// Number of successful block reads (cursor backing saves).
    #[must_use]
    pub fn read_count(&self) -> u32 {
        self.reads
    }

    /// Number of block writes (cursor backing restores).
    #[must_use]
    pub fn write_count(&self) -> u32 {
        self.writes
    }
}

impl Raster for MemoryRaster {
    fn width(&self) -> i32 {
        self.pixels.width()
    }

    fn height(&self) -> i32 {
        self.pixels.height()
    }

    fn fill_spans(&mut self, color: Pixel, spans: &[Rect]) {
        let bounds = self.bounds();
        for &span in spans {
            let r = span.intersect(bounds);
            for y in r.y0..r.y1 {
                for x in r.x0..r.x1 {
                    self.pixels.set_pixel(x, y, color);
                }
            }
        }
    }

    fn read_rect(&mut self, rect: Rect) -> Option<Pixmap> {
        if rect.is_empty() || rect.intersect(self.bounds()) != rect {
            return None;
        }
        let mut out = Pixmap::new(rect.width(), rect.height());
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                if let Some(p) = self.pixels.pixel(x, y) {
                    out.set_pixel(x - rect.x0, y - rect.y0, p);
                }
            }
        }
        self.reads += 1;
        Some(out)
    }

    fn write_rect(&mut self, origin: Point, pixels: &Pixmap) {
        for y in 0..pixels.height() {
            for x in 0..pixels.width() {
                if let Some(p) = pixels.pixel(x, y) {
                    self.pixels.set_pixel(origin.x + x, origin.y + y, p);
                }
            }
        }
        self.writes += 1;
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.pixels.pixel(x, y)
    }
}
