//! Proportional layout for the artifact canvas.
//!
//! Every coordinate derives from the canvas dimensions so the same
//! composition holds at any requested size. The reference proportions
//! come from the 300×450 deployment canvas.

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl Rect {
    /// Horizontal center of the rectangle.
    pub fn center_x(&self) -> u32 {
        self.x + self.w / 2
    }

    /// Rectangle grown by `pad` on every side (clamped at zero).
    pub fn grow(&self, pad: u32) -> Rect {
        Rect {
            x: self.x.saturating_sub(pad),
            y: self.y.saturating_sub(pad),
            w: self.w + 2 * pad,
            h: self.h + 2 * pad,
        }
    }
}

/// Resolved pixel positions for one canvas size.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Content panel (rounded, shadowed)
    pub panel: Rect,
    /// Corner radius for rounded panels
    pub corner_radius: u32,
    /// Title glyph top edge
    pub title_y: u32,
    /// Recipient line glyph top edge
    pub name_y: u32,
    /// Companion-count line glyph top edge
    pub guests_y: u32,
    /// QR slot (square, centered)
    pub qr: Rect,
    /// Footer caption glyph top edge
    pub footer_y: u32,
    /// Divider rule vertical position
    pub divider_y: u32,
    /// Integer glyph scale for the title
    pub title_scale: u32,
    /// Integer glyph scale for metadata and footer lines
    pub text_scale: u32,
}

impl Layout {
    /// Compute the layout for a canvas of `width` × `height`.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let margin = (width.min(height) / 30).max(4);
        let panel = Rect {
            x: margin,
            y: margin,
            w: width.saturating_sub(2 * margin),
            h: height.saturating_sub(2 * margin),
        };

        // The QR slot takes ~2/3 of the width but never more than 45%
        // of the height, so portrait and square canvases both leave room
        // for the text block above and the caption below.
        let qr_side = (width * 2 / 3).min(height * 45 / 100);
        let qr = Rect {
            x: (width.saturating_sub(qr_side)) / 2,
            y: height * 29 / 100,
            w: qr_side,
            h: qr_side,
        };

        Self {
            panel,
            corner_radius: (margin * 2).max(6),
            title_y: height * 7 / 100,
            name_y: height * 14 / 100,
            guests_y: height * 20 / 100,
            qr,
            footer_y: height * 83 / 100,
            divider_y: height * 90 / 100,
            title_scale: (height / 160).max(1),
            text_scale: (height / 240).max(1),
        }
    }
}
