// Window wrapper + software drawing primitives.
//
// Everything on screen is drawn into plain FrameBuffers: panel chrome
// (buttons, slider, wheel ring), stroke rendering on the canvas, the finger
// markers on the camera view and the 5x7 HUD text.

use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
    mouse_was_down: bool,
}

impl Drawer {
    /// Create the application window.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, mouse_was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// False once the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// `c` clears the canvas with its current background.
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// `t` toggles the canvas background between white and black.
    pub fn t_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    /// Window position of a left click, on the press edge only. Clicking the
    /// on-canvas toggle button is the mouse alternative to `t`.
    pub fn left_click(&mut self) -> Option<(usize, usize)> {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        if clicked {
            self.window
                .get_mouse_pos(MouseMode::Clamp)
                .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
        } else {
            None
        }
    }
}

/* ---------------- Software drawing primitives ---------------- */

#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgb) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color.pack();
}

/// Thin 1px line between two points (Bresenham).
pub fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, color: Rgb) {
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Thick line: a disc of diameter `thickness` stamped at every Bresenham
/// step. Thickness 1 degenerates to the thin line.
pub fn draw_thick_line(fb: &mut FrameBuffer, a: Point, b: Point, color: Rgb, thickness: i32) {
    if thickness <= 1 {
        draw_line(fb, a, b, color);
        return;
    }
    let r = thickness / 2;
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        fill_disc(fb, x0, y0, r, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Filled axis-aligned rectangle, corners inclusive.
pub fn fill_rect(fb: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
    for y in y1..=y2 {
        for x in x1..=x2 {
            put_pixel(fb, x, y, color);
        }
    }
}

/// Rectangle border of the given thickness, drawn inward from the bounds.
pub fn rect_outline(fb: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, t: i32, color: Rgb) {
    fill_rect(fb, x1, y1, x2, y1 + t - 1, color);
    fill_rect(fb, x1, y2 - t + 1, x2, y2, color);
    fill_rect(fb, x1, y1, x1 + t - 1, y2, color);
    fill_rect(fb, x2 - t + 1, y1, x2, y2, color);
}

/// Filled disc centered at (cx, cy).
pub fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: Rgb) {
    let r2 = radius * radius;
    for y in -radius..=radius {
        for x in -radius..=radius {
            if x * x + y * y <= r2 {
                put_pixel(fb, cx + x, cy + y, color);
            }
        }
    }
}

/// Circle ring: pixels whose distance from the center falls inside
/// [radius - thickness, radius].
pub fn circle_outline(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, thickness: i32, color: Rgb) {
    let outer2 = (radius * radius) as f32;
    let inner = (radius - thickness).max(0);
    let inner2 = (inner * inner) as f32;
    for y in -radius..=radius {
        for x in -radius..=radius {
            let d2 = (x * x + y * y) as f32;
            if d2 <= outer2 && d2 >= inner2 {
                put_pixel(fb, cx + x, cy + y, color);
            }
        }
    }
}

/* ---------------- 5x7 bitmap HUD font ---------------- */

/// 5x7 glyphs for the HUD character set (uppercase letters, digits and the
/// punctuation the status lines use). Each u8 is a row; the low 5 bits are
/// the pixels, bit 4 leftmost.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw one glyph with a 1px black drop shadow for contrast over video.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Rgb) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, Rgb::new(0, 0, 0));
                }
            }
        }
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string; lowercase input is rendered with the uppercase set.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Rgb) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch.to_ascii_uppercase(), color);
        x += 6; // 5 pixel glyph + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLACK, WHITE};

    #[test]
    fn put_pixel_clips_to_bounds() {
        let mut fb = FrameBuffer::filled(4, 4, BLACK);
        put_pixel(&mut fb, -1, 0, WHITE);
        put_pixel(&mut fb, 4, 0, WHITE);
        put_pixel(&mut fb, 0, 4, WHITE);
        assert!(fb.pixels.iter().all(|&p| p == 0));
        put_pixel(&mut fb, 3, 3, WHITE);
        assert_eq!(fb.get(3, 3), WHITE.pack());
    }

    #[test]
    fn thin_line_covers_endpoints() {
        let mut fb = FrameBuffer::filled(10, 10, BLACK);
        draw_line(&mut fb, Point::new(1, 1), Point::new(8, 5), WHITE);
        assert_eq!(fb.get(1, 1), WHITE.pack());
        assert_eq!(fb.get(8, 5), WHITE.pack());
    }

    #[test]
    fn thick_line_is_wider_than_thin() {
        let mut fb = FrameBuffer::filled(20, 20, BLACK);
        draw_thick_line(&mut fb, Point::new(2, 10), Point::new(17, 10), WHITE, 5);
        // Two pixels above and below the midline are covered by the discs.
        assert_eq!(fb.get(10, 8), WHITE.pack());
        assert_eq!(fb.get(10, 12), WHITE.pack());
        assert_eq!(fb.get(10, 10), WHITE.pack());
    }

    #[test]
    fn rect_outline_leaves_interior() {
        let mut fb = FrameBuffer::filled(10, 10, BLACK);
        rect_outline(&mut fb, 1, 1, 8, 8, 1, WHITE);
        assert_eq!(fb.get(1, 1), WHITE.pack());
        assert_eq!(fb.get(8, 8), WHITE.pack());
        assert_eq!(fb.get(4, 4), BLACK.pack());
    }

    #[test]
    fn text_renders_known_glyphs_only() {
        let mut fb = FrameBuffer::filled(30, 10, BLACK);
        draw_text_5x7(&mut fb, 0, 0, "AB", WHITE);
        assert!(fb.pixels.iter().any(|&p| p == WHITE.pack()));
        let mut fb2 = FrameBuffer::filled(30, 10, BLACK);
        draw_text_5x7(&mut fb2, 0, 0, "~~", WHITE); // unmapped chars are skipped
        assert!(fb2.pixels.iter().all(|&p| p == 0));
    }
}
