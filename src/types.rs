// Core types shared by the whole pipeline.

/// One dense pixel grid. Used for camera frames, the drawing canvas,
/// the cached color wheel image and the final panels alike.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // pixels
    pub height: usize,     // pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Allocate a buffer filled with one solid color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self { width, height, pixels: vec![color.pack(); width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// An RGB triple in [0,255] per channel. Red always lands in the high byte
/// of the packed pixel; swapping channel order anywhere would change every
/// color the user sees, so packing goes through these two functions only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    #[inline]
    pub fn unpack(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }

    /// BT.601 luma, rounded. Drives the compositor's drawn/background split.
    #[inline]
    pub fn luma(self) -> u8 {
        let y = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        y.round().clamp(0.0, 255.0) as u8
    }
}

/// Integer pixel coordinates. Which space a point lives in (camera sensor,
/// square crop, portrait crop, panel) is a caller convention; the mapper in
/// `mapping.rs` is the only sanctioned way to move between spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
