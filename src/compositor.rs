// Color-keyed compositing of the drawing surface over the live camera view.
//
// A pixel is either "drawn" (take the canvas stroke) or background (take the
// live video); there is no alpha mix. Drawn-ness comes from a luminance
// threshold against the canvas background: on a light background anything
// darker than near-white counts as a stroke, on a dark background anything
// brighter than near-black does. The slack on either side absorbs
// anti-aliasing noise at stroke edges without eating thin strokes.

use crate::types::{FrameBuffer, Rgb};

const LIGHT_BACKGROUND_LUMA: u8 = 250; // above this a pixel is background (light canvas)
const DARK_DRAWN_LUMA: u8 = 5; // above this a pixel is drawn (dark canvas)

/// Nearest-neighbor resample into the given dimensions.
pub fn resize_nearest(src: &FrameBuffer, width: usize, height: usize) -> FrameBuffer {
    if src.width == width && src.height == height {
        return src.clone();
    }
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let sy = y * src.height / height;
        let row_ofs = sy * src.width;
        for x in 0..width {
            let sx = x * src.width / width;
            pixels.push(src.pixels[row_ofs + sx]);
        }
    }
    FrameBuffer { width, height, pixels }
}

/// Overlay the drawing surface on the live frame: drawn pixels take the
/// stroke, everything else takes live video.
pub fn overlay_canvas(live: &FrameBuffer, canvas: &FrameBuffer, background: Rgb) -> FrameBuffer {
    let resized = resize_nearest(canvas, live.width, live.height);
    let light_background = background.luma() >= 128;

    let mut out = live.clone();
    for (dst, &canvas_px) in out.pixels.iter_mut().zip(resized.pixels.iter()) {
        let luma = Rgb::unpack(canvas_px).luma();
        let drawn = if light_background {
            luma <= LIGHT_BACKGROUND_LUMA
        } else {
            luma > DARK_DRAWN_LUMA
        };
        if drawn {
            *dst = canvas_px;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::types::{Point, BLACK, WHITE};

    fn live_gradient(w: usize, h: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::filled(w, h, BLACK);
        for y in 0..h {
            for x in 0..w {
                fb.pixels[y * w + x] = Rgb::new((x * 3 % 256) as u8, (y * 5 % 256) as u8, 77).pack();
            }
        }
        fb
    }

    #[test]
    fn resize_nearest_identity_and_upscale() {
        let src = live_gradient(4, 4);
        let same = resize_nearest(&src, 4, 4);
        assert_eq!(same.pixels, src.pixels);

        let up = resize_nearest(&src, 8, 8);
        assert_eq!((up.width, up.height), (8, 8));
        // 2x upscale: each source pixel becomes a 2x2 block.
        assert_eq!(up.get(0, 0), src.get(0, 0));
        assert_eq!(up.get(1, 1), src.get(0, 0));
        assert_eq!(up.get(7, 7), src.get(3, 3));
    }

    #[test]
    fn blank_canvas_leaves_live_frame_untouched() {
        let live = live_gradient(64, 48);
        let canvas = FrameBuffer::filled(64, 48, WHITE);
        let out = overlay_canvas(&live, &canvas, WHITE);
        assert_eq!(out.pixels, live.pixels);

        let dark = FrameBuffer::filled(64, 48, BLACK);
        let out = overlay_canvas(&live, &dark, BLACK);
        assert_eq!(out.pixels, live.pixels);
    }

    #[test]
    fn red_stroke_on_white_shows_through() {
        let live = live_gradient(64, 48);
        let red = Rgb::new(255, 0, 0);
        let mut canvas = Canvas::new(64, 48, WHITE);
        canvas.draw_line(Point::new(10, 10), Point::new(50, 10), red, 5);

        let out = overlay_canvas(&live, canvas.buffer(), WHITE);
        // Along the segment: the stroke color, exactly.
        for x in 10..=50 {
            assert_eq!(Rgb::unpack(out.get(x, 10)), red, "x={x}");
        }
        // Far away from the stroke: live video untouched.
        assert_eq!(out.get(5, 40), live.get(5, 40));
        assert_eq!(out.get(60, 45), live.get(60, 45));
    }

    #[test]
    fn white_stroke_on_black_shows_through() {
        let live = live_gradient(32, 32);
        let mut canvas = Canvas::new(32, 32, BLACK);
        canvas.draw_line(Point::new(4, 16), Point::new(28, 16), WHITE, 3);

        let out = overlay_canvas(&live, canvas.buffer(), BLACK);
        assert_eq!(Rgb::unpack(out.get(16, 16)), WHITE);
        assert_eq!(out.get(16, 2), live.get(16, 2));
    }

    #[test]
    fn near_background_noise_is_absorbed() {
        let live = live_gradient(8, 8);
        // Anti-aliasing remnants: a pixel barely off white on a white canvas
        // still counts as background.
        let mut canvas = FrameBuffer::filled(8, 8, WHITE);
        canvas.pixels[0] = Rgb::new(252, 252, 252).pack();
        let out = overlay_canvas(&live, &canvas, WHITE);
        assert_eq!(out.get(0, 0), live.get(0, 0));

        // And barely off black on a black canvas likewise.
        let mut canvas = FrameBuffer::filled(8, 8, BLACK);
        canvas.pixels[0] = Rgb::new(3, 3, 3).pack();
        let out = overlay_canvas(&live, &canvas, BLACK);
        assert_eq!(out.get(0, 0), live.get(0, 0));
    }
}
