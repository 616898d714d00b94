// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underlay Cursor: the screen-cursor overlay and its frame lock.
//!
//! The cursor is a sprite composited non-destructively onto a shared
//! surface: the pixels under it are saved before drawing and restored on
//! hide. This crate provides:
//!
//! - **[`CursorOverlay`]**: the visibility state machine — nested
//!   show/hide levels, movement, style table, and the protected rectangle
//!   that suppresses the sprite during critical redraws without disturbing
//!   the nesting level.
//! - **[`FrameLock`]**: the re-entrant, non-blocking pause/resume
//!   discipline that serializes framebuffer access against interrupt-driven
//!   cursor tracking, with an exactly-once deferred update at the
//!   outermost resume.
//!
//! ## Quick start
//!
//! ```
//! use underlay_cursor::CursorOverlay;
//! use underlay_raster::{MemoryRaster, RenderContext};
//! use underlay_region::Rect;
//!
//! let mut ctx = RenderContext::new(MemoryRaster::new(320, 200));
//! let mut cursor = CursorOverlay::new();
//! cursor.set_backing_surface(&mut ctx);
//!
//! cursor.show(&mut ctx);
//! cursor.move_to(&mut ctx, 100, 80);
//!
//! // Keep the cursor out of an area being redrawn.
//! cursor.set_protect_rect(&mut ctx, Some(Rect::new(90, 70, 200, 150)));
//! assert!(!cursor.is_visible());
//! cursor.set_protect_rect(&mut ctx, None);
//! assert!(cursor.is_visible());
//! ```
//!
//! Application code that draws while the cursor may be visible brackets
//! its drawing with [`CursorOverlay::pause`] / [`CursorOverlay::resume`]
//! (or [`CursorOverlay::with_frame_paused`]); tracking updates arriving in
//! between are deferred and applied once at the outermost resume.
//!
//! ## `no_std` support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod lock;
mod overlay;
mod styles;

pub use lock::FrameLock;
pub use overlay::{CursorFlags, CursorOverlay, MAX_CURSOR_WIDTH};
pub use styles::{CursorStyle, STYLE_COUNT};
