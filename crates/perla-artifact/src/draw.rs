//! Pixel drawing primitives for the compositor.
//!
//! Everything here operates directly on an `RgbaImage` the way the QR
//! repos in this family render module grids: plain per-pixel loops, no
//! retained state. Text uses the `font8x8` embedded bitmap font at an
//! integer scale; glyphs outside the canvas clip silently.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{GrayImage, Rgba, RgbaImage};

use crate::layout::Rect;

/// Source-over blend of `color` onto the pixel at (x, y).
///
/// Out-of-bounds coordinates are ignored, which is what gives every
/// higher-level primitive its clipping behavior.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let a = color.0[3] as u32;
    if a == 0 {
        return;
    }
    if a == 255 {
        *dst = Rgba([color.0[0], color.0[1], color.0[2], 255]);
        return;
    }
    let inv = 255 - a;
    for c in 0..3 {
        dst.0[c] = ((color.0[c] as u32 * a + dst.0[c] as u32 * inv) / 255) as u8;
    }
    dst.0[3] = 255;
}

/// Fill the whole canvas with an opaque color.
pub fn fill(img: &mut RgbaImage, color: Rgba<u8>) {
    for px in img.pixels_mut() {
        *px = color;
    }
}

/// Vertical gradient wash from `top` to `bottom` over the whole canvas.
pub fn vertical_gradient(img: &mut RgbaImage, top: Rgba<u8>, bottom: Rgba<u8>) {
    let h = img.height().max(1);
    for y in 0..img.height() {
        let t = y as u32;
        let mut row_color = Rgba([0, 0, 0, 255]);
        for c in 0..4 {
            let a = top.0[c] as u32;
            let b = bottom.0[c] as u32;
            row_color.0[c] = ((a * (h - 1 - t) + b * t) / (h - 1).max(1)) as u8;
        }
        for x in 0..img.width() {
            blend_pixel(img, x as i64, y as i64, row_color);
        }
    }
}

/// Fill a rounded rectangle, blending `color` over the canvas.
pub fn fill_rounded_rect(img: &mut RgbaImage, rect: Rect, radius: u32, color: Rgba<u8>) {
    let r = radius.min(rect.w / 2).min(rect.h / 2) as i64;
    let (x0, y0) = (rect.x as i64, rect.y as i64);
    let (x1, y1) = (x0 + rect.w as i64 - 1, y0 + rect.h as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            // Distance check only matters inside the corner squares.
            let cx = if x < x0 + r {
                Some(x0 + r)
            } else if x > x1 - r {
                Some(x1 - r)
            } else {
                None
            };
            let cy = if y < y0 + r {
                Some(y0 + r)
            } else if y > y1 - r {
                Some(y1 - r)
            } else {
                None
            };
            if let (Some(cx), Some(cy)) = (cx, cy) {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy > r * r {
                    continue;
                }
            }
            blend_pixel(img, x, y, color);
        }
    }
}

/// Drop shadow for a rounded rectangle: the same shape offset down-right
/// with a translucent ink.
pub fn drop_shadow(img: &mut RgbaImage, rect: Rect, radius: u32, offset: u32) {
    let shadow = Rect {
        x: rect.x + offset,
        y: rect.y + offset,
        ..rect
    };
    fill_rounded_rect(img, shadow, radius, Rgba([15, 23, 42, 60]));
}

/// Horizontal divider rule centered on `y`.
pub fn hline(img: &mut RgbaImage, x0: u32, x1: u32, y: u32, thickness: u32, color: Rgba<u8>) {
    for yy in y..y + thickness {
        for x in x0..x1 {
            blend_pixel(img, x as i64, yy as i64, color);
        }
    }
}

/// Blit a grayscale image (the QR matrix) opaquely at (x, y).
pub fn blit_luma(img: &mut RgbaImage, src: &GrayImage, x: u32, y: u32) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let v = px.0[0];
        blend_pixel(img, (x + sx) as i64, (y + sy) as i64, Rgba([v, v, v, 255]));
    }
}

/// Pixel width of `text` at the given glyph scale.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * 8 * scale
}

/// Look up a glyph, falling back through the Latin-1 table.
fn glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch))
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(img: &mut RgbaImage, text: &str, x: i64, y: i64, scale: u32, color: Rgba<u8>) {
    let mut pen_x = x;
    let advance = (8 * scale) as i64;
    for ch in text.chars() {
        // Unmapped glyphs render as a blank cell rather than shifting
        // the rest of the line.
        if let Some(rows) = glyph(ch) {
            for (row_idx, row) in rows.iter().enumerate() {
                for bit in 0..8u32 {
                    if row & (1 << bit) == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend_pixel(
                                img,
                                pen_x + (bit * scale + dx) as i64,
                                y + (row_idx as u32 * scale + dy) as i64,
                                color,
                            );
                        }
                    }
                }
            }
        }
        pen_x += advance;
    }
}

/// Draw `text` horizontally centered on `center_x`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    text: &str,
    center_x: u32,
    y: u32,
    scale: u32,
    color: Rgba<u8>,
) {
    let w = text_width(text, scale) as i64;
    draw_text(img, text, center_x as i64 - w / 2, y as i64, scale, color);
}
