// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sticky last-error slot.
//!
//! Drawing and capture operations report failure by posting into a single
//! slot on the render context instead of returning per-call codes; callers
//! that care read and clear the slot with
//! [`RenderContext::take_error`](crate::RenderContext::take_error). A failed
//! operation yields `None` and leaves prior state untouched, so ignoring the
//! slot is always safe.

use core::cell::Cell;
use core::fmt;

use underlay_region::RegionError;

/// Error codes posted to the context's sticky slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An allocation failed; the operation produced nothing.
    OutOfMemory,
    /// A region result would exceed the maximum encodable size.
    RegionOverflow,
    /// The capture scratch buffer filled up; the capture is abandoned.
    CaptureOverflow,
    /// `open_region` was called while a capture was already open.
    CaptureAlreadyOpen,
    /// `close_region` was called with no capture open.
    CaptureNotOpen,
    /// The cursor was shown while already visible.
    CursorLevel,
    /// A cursor style index was out of range.
    BadCursorStyle,
    /// A cursor image was wider than the supported maximum.
    BadCursorSize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::OutOfMemory => "allocation failed",
            Self::RegionOverflow => "region exceeds the maximum encodable size",
            Self::CaptureOverflow => "region capture scratch buffer overflowed",
            Self::CaptureAlreadyOpen => "a region capture is already open",
            Self::CaptureNotOpen => "no region capture is open",
            Self::CursorLevel => "cursor shown while already visible",
            Self::BadCursorStyle => "cursor style index out of range",
            Self::BadCursorSize => "cursor image wider than the supported maximum",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

impl From<RegionError> for Error {
    fn from(e: RegionError) -> Self {
        match e {
            RegionError::OutOfMemory => Self::OutOfMemory,
            RegionError::Overflow => Self::RegionOverflow,
        }
    }
}

/// Holder for the most recently posted error.
///
/// Posting overwrites; taking clears. The slot uses interior mutability so
/// read-only drawing paths can still report.
#[derive(Debug, Default)]
pub struct ErrorSlot {
    last: Cell<Option<Error>>,
}

impl ErrorSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: Cell::new(None),
        }
    }

    /// Posts an error, replacing any unread one.
    pub fn post(&self, error: Error) {
        self.last.set(Some(error));
    }

    /// Reads and clears the slot.
    pub fn take(&self) -> Option<Error> {
        self.last.take()
    }

    /// Peeks without clearing.
    #[must_use]
    pub fn peek(&self) -> Option<Error> {
        self.last.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_take_cycle() {
        let slot = ErrorSlot::new();
        assert_eq!(slot.take(), None);

        slot.post(Error::OutOfMemory);
        assert_eq!(slot.peek(), Some(Error::OutOfMemory));
        assert_eq!(slot.take(), Some(Error::OutOfMemory));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn later_post_wins() {
        let slot = ErrorSlot::new();
        slot.post(Error::CaptureOverflow);
        slot.post(Error::CursorLevel);
        assert_eq!(slot.take(), Some(Error::CursorLevel));
    }

    #[test]
    fn region_errors_convert() {
        assert_eq!(Error::from(RegionError::OutOfMemory), Error::OutOfMemory);
        assert_eq!(Error::from(RegionError::Overflow), Error::RegionOverflow);
    }
}
