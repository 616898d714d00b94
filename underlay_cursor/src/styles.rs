// Copyright 2026 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in cursor styles.
//!
//! Eight predefined mask/image pairs with their hot spots, mirroring the
//! classic selection: pointer arrow, crosshair, text beam, frame, check
//! mark, hourglass, block, and dot. The arrow carries a one-pixel halo
//! mask; the geometric styles use their image as their own mask.

use underlay_raster::SpriteImage;
use underlay_region::Point;

/// Number of selectable cursor styles.
pub const STYLE_COUNT: usize = 8;

/// One cursor style: background mask, foreground image, hot spot.
///
/// The mask is drawn first in the background color (the halo), then the
/// image in the foreground color. The hot spot is the pixel within the
/// image that sits on the cursor position.
#[derive(Clone, Debug)]
pub struct CursorStyle {
    /// Background mask sprite.
    pub mask: SpriteImage,
    /// Foreground image sprite.
    pub image: SpriteImage,
    /// Hot spot offset from the sprite's top-left corner.
    pub hot: Point,
}

const fn rows<const N: usize>(bits: [u16; N]) -> [u32; N] {
    let mut out = [0_u32; N];
    let mut i = 0;
    while i < N {
        out[i] = (bits[i] as u32) << 16;
        i += 1;
    }
    out
}

const ARROW_IMAGE: [u32; 16] = rows([
    0b1000000000000000,
    0b1100000000000000,
    0b1110000000000000,
    0b1111000000000000,
    0b1111100000000000,
    0b1111110000000000,
    0b1111111000000000,
    0b1111111100000000,
    0b1111111110000000,
    0b1111111111000000,
    0b1111110000000000,
    0b1110011000000000,
    0b1100011000000000,
    0b1000001100000000,
    0b0000001100000000,
    0b0000000110000000,
]);

const ARROW_MASK: [u32; 16] = rows([
    0b1100000000000000,
    0b1110000000000000,
    0b1111000000000000,
    0b1111100000000000,
    0b1111110000000000,
    0b1111111000000000,
    0b1111111100000000,
    0b1111111110000000,
    0b1111111111000000,
    0b1111111111100000,
    0b1111111111100000,
    0b1111111110000000,
    0b1110011110000000,
    0b1100011110000000,
    0b1000001111000000,
    0b0000000111000000,
]);

const CROSSHAIR: [u32; 15] = rows([
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b1111111111111110,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
    0b0000000100000000,
]);

const IBEAM: [u32; 14] = rows([
    0b1110111000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b0001000000000000,
    0b1110111000000000,
]);

const FRAME: [u32; 12] = rows([
    0b1111111111110000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1000000000010000,
    0b1111111111110000,
]);

const CHECK: [u32; 8] = rows([
    0b0000000011000000,
    0b0000000110000000,
    0b0000001100000000,
    0b0000011000000000,
    0b1000110000000000,
    0b1101100000000000,
    0b0111000000000000,
    0b0010000000000000,
]);

const HOURGLASS: [u32; 9] = rows([
    0b1111111110000000,
    0b0100000100000000,
    0b0010001000000000,
    0b0001010000000000,
    0b0000100000000000,
    0b0001010000000000,
    0b0010001000000000,
    0b0100000100000000,
    0b1111111110000000,
]);

const BLOCK: [u32; 8] = rows([
    0b1111111100000000,
    0b1111111100000000,
    0b1111111100000000,
    0b1111111100000000,
    0b1111111100000000,
    0b1111111100000000,
    0b1111111100000000,
    0b1111111100000000,
]);

const DOT: [u32; 4] = rows([
    0b1111000000000000,
    0b1111000000000000,
    0b1111000000000000,
    0b1111000000000000,
]);

/// Builds the predefined style for slot `n` (`n < STYLE_COUNT`).
pub(crate) fn default_style(n: usize) -> CursorStyle {
    match n {
        0 => CursorStyle {
            mask: SpriteImage::from_rows(12, &ARROW_MASK),
            image: SpriteImage::from_rows(12, &ARROW_IMAGE),
            hot: Point::ZERO,
        },
        1 => same_mask(16, &CROSSHAIR, Point::new(7, 7)),
        2 => same_mask(7, &IBEAM, Point::new(3, 7)),
        3 => same_mask(12, &FRAME, Point::new(5, 5)),
        4 => same_mask(10, &CHECK, Point::new(2, 6)),
        5 => same_mask(9, &HOURGLASS, Point::new(4, 4)),
        6 => same_mask(8, &BLOCK, Point::new(3, 3)),
        _ => same_mask(4, &DOT, Point::new(1, 1)),
    }
}

/// A style whose mask and image are the same sprite (no halo).
fn same_mask(width: i32, bits: &[u32], hot: Point) -> CursorStyle {
    CursorStyle {
        mask: SpriteImage::from_rows(width, bits),
        image: SpriteImage::from_rows(width, bits),
        hot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_styles_fit_the_sprite_limit() {
        for n in 0..STYLE_COUNT {
            let style = default_style(n);
            assert!(style.image.width() > 0 && style.image.width() <= 32);
            assert!(style.mask.width() > 0 && style.mask.width() <= 32);
            assert!(style.image.height() > 0);
            assert_eq!(style.mask.height(), style.image.height());
        }
    }

    #[test]
    fn hot_spots_lie_within_the_image() {
        for n in 0..STYLE_COUNT {
            let style = default_style(n);
            assert!(style.hot.x >= 0 && style.hot.x < style.image.width());
            assert!(style.hot.y >= 0 && style.hot.y < style.image.height());
        }
    }

    #[test]
    fn arrow_mask_covers_its_image() {
        let arrow = default_style(0);
        for y in 0..arrow.image.height() {
            for x in 0..arrow.image.width() {
                if arrow.image.bit(x, y) {
                    assert!(arrow.mask.bit(x, y), "mask hole at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn arrow_tip_sits_on_the_hot_spot() {
        let arrow = default_style(0);
        assert!(arrow.image.bit(arrow.hot.x, arrow.hot.y));
    }
}
