//! Off-screen drawing target
//!
//! Every frame is painted into a [`Surface`] and then handed to the display in one
//! write, so the screen never shows a half-drawn frame. Coordinates are signed and
//! anything outside the visible area is clipped per pixel.

use super::font::{glyph, GLYPH_WIDTH};

pub struct Surface {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
    /// Pixels per row, at least `width`. The padding is never drawn to.
    stride: usize,
}

impl Surface {
    pub fn new(width: usize, height: usize, stride: usize) -> Self {
        let stride = stride.max(width);
        Self {
            pixels: vec![0; stride * height],
            width,
            height,
            stride,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw frame bytes in native order, ready for the framebuffer device.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: u32) {
        if self.stride == 0 {
            return;
        }
        for row in self.pixels.chunks_mut(self.stride) {
            row[..self.width].fill(color);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.stride + x)
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let start = row as usize * self.stride;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }

    /// Half-width of a circle of radius `r` at vertical offset `dy`, counted the
    /// way the fill routines use it (one past the last covered column).
    fn circle_span(r: i32, dy: i32) -> i32 {
        let mut dx = 0;
        while dx * dx + dy * dy <= r * r {
            dx += 1;
        }
        dx
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            let dx = Self::circle_span(r, dy);
            self.fill_rect(cx - dx + 1, cy + dy, 2 * dx - 1, 1, color);
        }
    }

    pub fn fill_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u32) {
        if r < 1 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        self.fill_rect(x + r, y, w - 2 * r, h, color);
        self.fill_rect(x, y + r, r, h - 2 * r, color);
        self.fill_rect(x + w - r, y + r, r, h - 2 * r, color);

        for dy in -r..=0 {
            let dx = Self::circle_span(r, dy);
            let top = y + r + dy;
            let bottom = y + h - 1 - r - dy;
            self.fill_rect(x + r - dx + 1, top, dx - 1, 1, color);
            self.fill_rect(x + w - r, top, dx - 1, 1, color);
            self.fill_rect(x + r - dx + 1, bottom, dx - 1, 1, color);
            self.fill_rect(x + w - r, bottom, dx - 1, 1, color);
        }
    }

    /// Scanline fill of the triangle spanned by three points.
    pub fn fill_triangle(&mut self, a: (i32, i32), b: (i32, i32), c: (i32, i32), color: u32) {
        let mut points = [a, b, c];
        points.sort_by_key(|&(_, y)| y);
        let [(x0, y0), (x1, y1), (x2, y2)] = points;

        let lerp = |xa: i32, ya: i32, xb: i32, yb: i32, y: i32| {
            if yb == ya {
                xa
            } else {
                xa + (xb - xa) * (y - ya) / (yb - ya)
            }
        };

        for y in y0..=y2 {
            let long = lerp(x0, y0, x2, y2, y);
            let short = if y < y1 {
                lerp(x0, y0, x1, y1, y)
            } else {
                lerp(x1, y1, x2, y2, y)
            };
            let (left, right) = (long.min(short), long.max(short));
            self.fill_rect(left, y, right - left + 1, 1, color);
        }
    }

    pub fn draw_char(&mut self, x: i32, y: i32, c: char, color: u32, scale: i32) {
        let scale = scale.max(1);
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = x + col * scale;
                let py = y + row as i32 * scale;
                if scale == 1 {
                    self.put_pixel(px, py, color);
                } else {
                    self.fill_rect(px, py, scale, scale, color);
                }
            }
        }
    }

    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u32, scale: i32) {
        let advance = GLYPH_WIDTH * scale.max(1);
        for (i, c) in text.chars().enumerate() {
            self.draw_char(x + i as i32 * advance, y, c, color, scale);
        }
    }

    pub fn draw_text_centered(&mut self, cx: i32, y: i32, text: &str, color: u32, scale: i32) {
        let w = text_width(text, scale);
        self.draw_text(cx - w / 2, y, text, color, scale);
    }

    /// Text that is cut off at the right edge of the screen is ended with `...`
    pub fn draw_text_clipped(&mut self, x: i32, y: i32, text: &str, color: u32, max_width: i32) {
        let max_chars = (max_width / GLYPH_WIDTH).max(0) as usize;
        if text.chars().count() <= max_chars {
            self.draw_text(x, y, text, color, 1);
            return;
        }
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        self.draw_text(x, y, &format!("{}...", kept), color, 1);
    }
}

/// Width in pixels of `text` at the given scale.
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * GLYPH_WIDTH * scale.max(1)
}

/// Splits `text` into chunks of at most `width` characters.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
