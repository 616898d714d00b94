// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underlay Region: banded region data structure and boolean region algebra.
//!
//! A [`Region`] is a persistent set of non-overlapping pixels encoded as
//! Y-ordered **bands** of X-sorted, non-adjacent spans — the classic
//! clip-region representation. The encoding is canonical, so structural
//! equality (`==`) is set equality, and any two regions can be combined
//! with [`combine`] regardless of how they were built.
//!
//! The crate provides:
//!
//! - **Geometry** ([`Point`], [`Rect`]): integer pixel coordinates with
//!   half-open rectangle extents.
//! - **List preparation** ([`sort_rects`], [`sort_rects_into`]): the
//!   deterministic YX sort the band builder expects.
//! - **Construction** ([`Region::from_rect`], [`Region::from_rect_list`]):
//!   a two-phase size-then-fill band builder with exactly-sized, fallible
//!   allocation.
//! - **Algebra** ([`combine`], [`RegionOp`]): union, intersection,
//!   subtraction, and symmetric difference via a band-synchronized merge
//!   scan.
//!
//! ## Quick start
//!
//! ```
//! use underlay_region::{Rect, Region, RegionOp, combine};
//!
//! let window = Region::from_rect(Rect::new(0, 0, 640, 480)).unwrap();
//! let covered = Region::from_rect_list(&[
//!     Rect::new(100, 100, 300, 300),
//!     Rect::new(250, 50, 400, 200),
//! ])
//! .unwrap();
//!
//! // The part of the window still exposed.
//! let exposed = combine(RegionOp::Subtract, &window, &covered).unwrap();
//! assert!(!exposed.is_empty());
//! assert!(!exposed.contains(150, 150));
//! assert!(exposed.contains(500, 400));
//! ```
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod builder;
mod error;
mod ops;
mod rect;
mod region;
mod sort;

pub use error::RegionError;
pub use ops::{RegionOp, combine};
pub use rect::{Point, Rect};
pub use region::{Band, Bands, MAX_REGION_SPANS, Region, RegionFlags};
pub use sort::{sort_rects, sort_rects_into};
