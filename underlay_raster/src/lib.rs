// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underlay Raster: backend abstraction, render context, and region
//! capture.
//!
//! This crate sits between [`underlay_region`]'s pure region algebra and a
//! concrete display surface. It provides:
//!
//! - **Backend trait** ([`Raster`]): the minimal surface contract — span
//!   fill, block read/write, sprite write, pixel probe.
//! - **Reference backend** ([`MemoryRaster`]): a software surface over an
//!   owned [`Pixmap`], used by software targets and by the test suites.
//! - **Render context** ([`RenderContext`]): owned drawing state — the
//!   user→global coordinate port, pen, rectangular clip, installed clip
//!   region, and the sticky error slot — with every fill gated through
//!   the active clips.
//! - **Region capture** ([`RenderContext::open_region`] /
//!   [`RenderContext::close_region`]): temporarily reroutes the fill
//!   primitive into a scratch buffer so that anything drawable can be
//!   turned into a [`Region`](underlay_region::Region), plus
//!   [`RenderContext::bitmap_to_region`] for tracing painted pixels.
//!
//! ## Quick start
//!
//! ```
//! use underlay_raster::{MemoryRaster, RenderContext};
//! use underlay_region::Rect;
//!
//! let mut ctx = RenderContext::new(MemoryRaster::new(64, 64));
//!
//! // Record a drawn shape as a region instead of touching pixels.
//! ctx.open_region();
//! ctx.fill_rect(1, Rect::new(0, 0, 10, 10));
//! ctx.fill_rect(1, Rect::new(5, 5, 15, 15));
//! let region = ctx.close_region().unwrap();
//! assert_eq!(region.bounds(), Rect::new(0, 0, 15, 15));
//! ```
//!
//! ## Error reporting
//!
//! Fallible operations post into a sticky last-error slot on the context
//! and return `None`; [`RenderContext::take_error`] reads and clears it.
//! See [`Error`].
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod capture;
mod context;
mod error;
mod image;
mod memory;
mod raster;

pub use capture::CAPTURE_CAPACITY;
pub use context::{Pen, RenderContext};
pub use error::{Error, ErrorSlot};
pub use image::{Pixel, Pixmap, SpriteImage};
pub use memory::MemoryRaster;
pub use raster::Raster;
