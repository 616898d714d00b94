// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cursor overlay state machine.
//!
//! The overlay composites a movable sprite onto a shared surface without
//! owning any pixels: before drawing it saves the pixels under the sprite,
//! and hiding restores them. Three pieces of state decide what is on
//! screen:
//!
//! - the **visibility level** — a nesting counter; `< 0` is hidden, `0` is
//!   visible, and every [`hide`](CursorOverlay::hide) must be balanced by a
//!   [`show`](CursorOverlay::show);
//! - the **protected rectangle** — a zone in which the sprite is
//!   suppressed regardless of level, used to keep redraws flicker-free.
//!   Protection never touches the level, so user nesting and
//!   protection-hiding cannot double-count against each other;
//! - the **frame lock** — every operation that could touch pixels is
//!   bracketed by it, and tracking updates that arrive while it is paused
//!   are deferred to the outermost resume.
//!
//! The sprite is drawn where `level == 0` and the position is outside the
//! protect zone; every operation ends by syncing the screen to that
//! predicate.

use underlay_raster::{Error, Pixel, Pixmap, Raster, RenderContext, SpriteImage};
use underlay_region::{Point, Rect};

use crate::lock::FrameLock;
use crate::styles::{self, CursorStyle, STYLE_COUNT};

/// Widest supported cursor sprite, in pixels.
pub const MAX_CURSOR_WIDTH: i32 = 32;

bitflags::bitflags! {
    /// Overlay state bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CursorFlags: u8 {
        /// A backing surface has been adopted; drawing is possible.
        const INITIALIZED = 1 << 0;
        /// The position lies in the protect zone; the sprite is
        /// suppressed without touching the visibility level.
        const PROTECT_HIDDEN = 1 << 1;
        /// The sprite is currently composited onto the surface.
        const DRAWN = 1 << 2;
    }
}

/// A screen cursor drawn non-destructively over a render context's
/// surface.
///
/// # Example
///
/// ```
/// use underlay_cursor::CursorOverlay;
/// use underlay_raster::{MemoryRaster, RenderContext};
///
/// let mut ctx = RenderContext::new(MemoryRaster::new(64, 64));
/// let mut cursor = CursorOverlay::new();
/// cursor.set_backing_surface(&mut ctx);
///
/// cursor.show(&mut ctx);
/// assert!(cursor.is_visible());
///
/// cursor.move_to(&mut ctx, 20, 12);
/// cursor.hide(&mut ctx);
/// assert!(!cursor.is_visible());
/// ```
#[derive(Debug)]
pub struct CursorOverlay {
    level: i32,
    pos: Point,
    style: usize,
    styles: [CursorStyle; STYLE_COUNT],
    fore: Pixel,
    back: Pixel,
    saved: Option<(Point, Pixmap)>,
    protect: Option<Rect>,
    zone: Rect,
    clip: Rect,
    flags: CursorFlags,
    lock: FrameLock,
}

impl Default for CursorOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorOverlay {
    /// Creates a hidden cursor (level −1) with the built-in style table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: -1,
            pos: Point::ZERO,
            style: 0,
            styles: core::array::from_fn(styles::default_style),
            fore: 0xFFFF_FFFF,
            back: 0,
            saved: None,
            protect: None,
            zone: Rect::ZERO,
            clip: Rect::ZERO,
            flags: CursorFlags::empty(),
            lock: FrameLock::new(),
        }
    }

    /// The visibility nesting level; `< 0` is hidden, `0` is visible.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Current position in global coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        self.pos
    }

    /// Selected style index.
    #[must_use]
    pub fn style(&self) -> usize {
        self.style
    }

    /// Overlay state bits.
    #[must_use]
    pub fn flags(&self) -> CursorFlags {
        self.flags
    }

    /// Returns `true` when the cursor is at level 0 and not suppressed by
    /// the protect zone.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.level == 0 && !self.flags.contains(CursorFlags::PROTECT_HIDDEN)
    }

    /// Returns `true` while the sprite is suppressed by the protect zone.
    #[must_use]
    pub fn protect_hidden(&self) -> bool {
        self.flags.contains(CursorFlags::PROTECT_HIDDEN)
    }

    /// The frame lock, for inspection.
    #[must_use]
    pub fn frame_lock(&self) -> &FrameLock {
        &self.lock
    }

    // --- surface and lock brackets ---------------------------------------

    /// Adopts the context's surface as the drawing target.
    ///
    /// The sprite is clipped to the surface bounds from here on, and the
    /// overlay starts compositing once the visibility predicate allows it.
    /// Until this is called, level and protection bookkeeping work but no
    /// pixels are touched.
    pub fn set_backing_surface<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        self.lock.pause();
        if self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
        self.clip = ctx.raster().bounds();
        self.flags.insert(CursorFlags::INITIALIZED);
        self.recompute_zone();
        self.sync(ctx);
        self.unlock(ctx);
    }

    /// Pauses cursor updates.
    ///
    /// Bracket any drawing that could race with cursor tracking between
    /// [`pause`](Self::pause) and [`resume`](Self::resume); tracking
    /// arriving in between is deferred and applied exactly once at the
    /// outermost resume.
    pub fn pause(&mut self) {
        self.lock.pause();
    }

    /// Resumes cursor updates, applying a deferred tracking update when
    /// this closes the outermost paused window.
    pub fn resume<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        self.unlock(ctx);
    }

    /// Runs `f` inside a pause/resume bracket.
    pub fn with_frame_paused<R: Raster, T>(
        &mut self,
        ctx: &mut RenderContext<R>,
        f: impl FnOnce(&mut RenderContext<R>) -> T,
    ) -> T {
        self.lock.pause();
        let out = f(ctx);
        self.unlock(ctx);
        out
    }

    // --- visibility ------------------------------------------------------

    /// Decrements the visibility level, removing the sprite on the 0 → −1
    /// transition. Every `hide` should be balanced by a `show`.
    pub fn hide<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        self.lock.pause();
        self.level -= 1;
        self.sync(ctx);
        self.unlock(ctx);
    }

    /// Increments the visibility level, compositing the sprite on the
    /// −1 → 0 transition (deferred if the position is inside the protect
    /// zone).
    ///
    /// Calling `show` while already at level 0 is a caller bug: it posts
    /// [`Error::CursorLevel`] and clamps the level back to 0.
    pub fn show<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        self.lock.pause();
        if self.level >= 0 {
            ctx.errors().post(Error::CursorLevel);
            self.level = 0;
        } else {
            self.level += 1;
        }
        self.sync(ctx);
        self.unlock(ctx);
    }

    // --- movement --------------------------------------------------------

    /// Moves the cursor to a user-space position: hide, reposition, and
    /// show as one lock-bracketed sequence.
    pub fn move_to<R: Raster>(&mut self, ctx: &mut RenderContext<R>, x: i32, y: i32) {
        let p = ctx.user_to_global(Point::new(x, y));
        self.move_global(ctx, p);
    }

    /// The tracking entry point: repositions to a global coordinate, or
    /// defers the update when the frame lock is paused.
    ///
    /// Interrupt-driven pointer sources call this; a deferred position is
    /// applied exactly once when the outermost [`resume`](Self::resume)
    /// runs.
    pub fn track<R: Raster>(&mut self, ctx: &mut RenderContext<R>, x: i32, y: i32) {
        let p = Point::new(x, y);
        if self.lock.is_paused() {
            self.lock.defer(p);
        } else {
            self.move_global(ctx, p);
        }
    }

    fn move_global<R: Raster>(&mut self, ctx: &mut RenderContext<R>, p: Point) {
        self.lock.pause();
        if self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
        self.pos = p;
        self.sync(ctx);
        self.unlock(ctx);
    }

    // --- protection ------------------------------------------------------

    /// Sets or clears the protected rectangle, in user coordinates.
    ///
    /// While the cursor position is inside the zone (expanded so that any
    /// part of the sprite would touch the rectangle), the sprite is
    /// suppressed without changing the visibility level; leaving the zone
    /// restores it the same way. An empty rectangle clears the zone, as
    /// does `None`.
    pub fn set_protect_rect<R: Raster>(&mut self, ctx: &mut RenderContext<R>, rect: Option<Rect>) {
        self.lock.pause();
        self.protect = rect
            .map(|r| ctx.user_rect_to_global(r))
            .filter(|r| !r.is_empty());
        self.recompute_zone();
        self.sync(ctx);
        self.unlock(ctx);
    }

    /// The protected rectangle currently in force, in global coordinates.
    #[must_use]
    pub fn protect_rect(&self) -> Option<Rect> {
        self.protect
    }

    // --- styles ----------------------------------------------------------

    /// Selects a cursor style by index (0 to [`STYLE_COUNT`] − 1).
    ///
    /// `-1` reselects the current style, which refreshes the sprite after
    /// [`define_cursor`](Self::define_cursor). Any other out-of-range
    /// index posts [`Error::BadCursorStyle`] and keeps the current style.
    pub fn set_style<R: Raster>(&mut self, ctx: &mut RenderContext<R>, index: i32) {
        self.lock.pause();
        let chosen = if index == -1 {
            self.style
        } else if index >= 0 && (index as usize) < STYLE_COUNT {
            index as usize
        } else {
            ctx.errors().post(Error::BadCursorStyle);
            self.style
        };
        if self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
        self.style = chosen;
        self.recompute_zone();
        self.sync(ctx);
        self.unlock(ctx);
    }

    /// Replaces style table entry `index` with a new mask/image pair and
    /// hot spot.
    ///
    /// Images wider than [`MAX_CURSOR_WIDTH`] are truncated to the maximum
    /// and [`Error::BadCursorSize`] is posted. Redefining the selected
    /// style refreshes the sprite on screen.
    pub fn define_cursor<R: Raster>(
        &mut self,
        ctx: &mut RenderContext<R>,
        index: usize,
        hot: Point,
        mut mask: SpriteImage,
        mut image: SpriteImage,
    ) {
        if index >= STYLE_COUNT {
            ctx.errors().post(Error::BadCursorStyle);
            return;
        }
        self.lock.pause();
        let clamped =
            mask.truncate_width(MAX_CURSOR_WIDTH) | image.truncate_width(MAX_CURSOR_WIDTH);
        if clamped {
            ctx.errors().post(Error::BadCursorSize);
        }
        if self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
        self.styles[index] = CursorStyle { mask, image, hot };
        if index == self.style {
            self.recompute_zone();
        }
        self.sync(ctx);
        self.unlock(ctx);
    }

    /// Restores style table entry `index` to its built-in definition.
    pub fn reset_cursor<R: Raster>(&mut self, ctx: &mut RenderContext<R>, index: usize) {
        if index >= STYLE_COUNT {
            ctx.errors().post(Error::BadCursorStyle);
            return;
        }
        self.lock.pause();
        if self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
        self.styles[index] = styles::default_style(index);
        if index == self.style {
            self.recompute_zone();
        }
        self.sync(ctx);
        self.unlock(ctx);
    }

    /// Sets the sprite colors: the mask draws in `back`, the image in
    /// `fore`.
    pub fn set_colors<R: Raster>(&mut self, ctx: &mut RenderContext<R>, fore: Pixel, back: Pixel) {
        self.lock.pause();
        if self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
        self.fore = fore;
        self.back = back;
        self.sync(ctx);
        self.unlock(ctx);
    }

    // --- internals -------------------------------------------------------

    fn unlock<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        if let Some(p) = self.lock.resume() {
            self.move_global(ctx, p);
        }
    }

    /// Expands the protect rectangle so that the zone contains every
    /// position at which the sprite would touch it.
    fn recompute_zone(&mut self) {
        self.zone = match self.protect {
            None => Rect::ZERO,
            Some(p) => {
                let style = &self.styles[self.style];
                let w = style.image.width().min(MAX_CURSOR_WIDTH);
                let h = style.image.height();
                Rect::new(
                    p.x0 - w + style.hot.x,
                    p.y0 - h + style.hot.y,
                    p.x1 + style.hot.x,
                    p.y1 + style.hot.y,
                )
            }
        };
    }

    fn in_zone(&self) -> bool {
        self.protect.is_some() && self.zone.contains(self.pos)
    }

    /// Brings the screen in line with the visibility predicate.
    fn sync<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        let in_zone = self.in_zone();
        self.flags.set(CursorFlags::PROTECT_HIDDEN, in_zone);
        if !self.flags.contains(CursorFlags::INITIALIZED) {
            return;
        }
        let want = self.level == 0 && !in_zone;
        if want && !self.flags.contains(CursorFlags::DRAWN) {
            self.draw(ctx);
        } else if !want && self.flags.contains(CursorFlags::DRAWN) {
            self.undraw(ctx);
        }
    }

    /// Saves the backing pixels and composites mask then image.
    fn draw<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        let style = &self.styles[self.style];
        let origin = Point::new(self.pos.x - style.hot.x, self.pos.y - style.hot.y);
        let w = style
            .image
            .width()
            .max(style.mask.width())
            .min(MAX_CURSOR_WIDTH);
        let h = style.image.height().max(style.mask.height());
        let sprite_rect = Rect::new(origin.x, origin.y, origin.x + w, origin.y + h);

        let save_rect = sprite_rect.intersect(self.clip);
        self.saved = if save_rect.is_empty() {
            None
        } else {
            ctx.raster_mut()
                .read_rect(save_rect)
                .map(|pixels| (Point::new(save_rect.x0, save_rect.y0), pixels))
        };

        let style = &self.styles[self.style];
        ctx.raster_mut().write_sprite(origin, &style.mask, self.back);
        ctx.raster_mut().write_sprite(origin, &style.image, self.fore);
        self.flags.insert(CursorFlags::DRAWN);
    }

    /// Puts the saved backing pixels back.
    fn undraw<R: Raster>(&mut self, ctx: &mut RenderContext<R>) {
        if let Some((origin, pixels)) = self.saved.take() {
            ctx.raster_mut().write_rect(origin, &pixels);
        }
        self.flags.remove(CursorFlags::DRAWN);
    }
}
