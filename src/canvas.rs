// The persistent drawing surface. Only the state machine mutates it (one
// line segment per frame at most); the compositor reads it.

use crate::draw::draw_thick_line;
use crate::types::{FrameBuffer, Point, Rgb, BLACK, WHITE};

pub struct Canvas {
    fb: FrameBuffer,
    background: Rgb,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self { fb: FrameBuffer::filled(width, height, background), background }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Wipe all strokes, keeping the current background.
    pub fn clear(&mut self) {
        self.fb = FrameBuffer::filled(self.fb.width, self.fb.height, self.background);
    }

    /// Flip the background between white and black. The surface is
    /// re-created, not repainted: the background color is baked into every
    /// blank pixel, so prior strokes are deliberately lost.
    pub fn toggle_background(&mut self) {
        self.background = if self.background == WHITE { BLACK } else { WHITE };
        self.fb = FrameBuffer::filled(self.fb.width, self.fb.height, self.background);
        log::info!(
            "Canvas switched to {}",
            if self.background == WHITE { "white" } else { "black" }
        );
    }

    /// Stroke one segment. This is the only mutation path for the surface.
    pub fn draw_line(&mut self, a: Point, b: Point, color: Rgb, thickness: i32) {
        draw_thick_line(&mut self.fb, a, b, color, thickness);
    }
}
