// Air canvas: draw by pinching index finger and thumb in front of the
// camera.
// • Left panel is the drawing canvas, right panel the live (portrait-
//   cropped) camera view with the controls.
// • Hover a color button to select it; hover the wheel to mix a custom
//   color; hover the slider to set stroke thickness.
// • T (or clicking the on-canvas button) toggles the white/black canvas
//   background and wipes the drawing. C clears. ESC quits.

mod camera;
mod canvas;
mod compositor;
mod draw;
mod error;
mod mapping;
mod state;
mod tracker;
mod types;
mod wheel;
mod widgets;

use camera::CameraCapture;
use canvas::Canvas;
use compositor::{overlay_canvas, resize_nearest};
use draw::{draw_text_5x7, draw_thick_line, fill_disc, fill_rect, rect_outline, Drawer};
use error::Error;
use mapping::{crop_to_portrait, map_to_panel};
use state::DrawingState;
use std::time::{Duration, Instant};
use tracker::{is_pinch, HandTracker};
use types::{FrameBuffer, Point, Rgb, BLACK, WHITE};
use wheel::{ColorWheel, WheelGeometry};
use widgets::{
    color_buttons, hit_test_buttons, hit_test_slider, thickness_from_fraction,
    thickness_slider_rect, render_buttons, render_slider, ButtonId, Rect,
};

const WINDOW_WIDTH: usize = 1600;
const WINDOW_HEIGHT: usize = 1000;
const WHEEL_RADIUS: i32 = 80;

// Background-toggle button on the drawing panel.
const TOGGLE_RECT: Rect = Rect::new(10, 10, 130, 50);

/// Flexbox-style proportional split of the window into two panels.
fn split_panels(total_width: usize, left_flex: usize, right_flex: usize) -> (usize, usize) {
    let left = total_width * left_flex / (left_flex + right_flex);
    (left, total_width - left)
}

/// Paste `src` into `dst` starting at column x0 (both full height).
fn paste(dst: &mut FrameBuffer, src: &FrameBuffer, x0: usize) {
    for y in 0..src.height {
        let s = y * src.width;
        let d = y * dst.width + x0;
        dst.pixels[d..d + src.width].copy_from_slice(&src.pixels[s..s + src.width]);
    }
}

fn selection_label(state: &DrawingState, custom: Rgb) -> String {
    match state.selected {
        Some(ButtonId::Eraser) => "SELECTED: ERASER".into(),
        Some(ButtonId::Custom) => {
            format!("SELECTED: CUSTOM RGB({},{},{})", custom.r, custom.g, custom.b)
        }
        Some(ButtonId::Red) => "SELECTED: RED".into(),
        Some(ButtonId::Green) => "SELECTED: GREEN".into(),
        Some(ButtonId::Blue) => "SELECTED: BLUE".into(),
        Some(ButtonId::Yellow) => "SELECTED: YELLOW".into(),
        None => {
            let c = state.active_color;
            format!("CURRENT: RGB({},{},{})", c.r, c.g, c.b)
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut cam = CameraCapture::new(0, 640, 480)?;
    let (frame_w, frame_h) = cam.resolution();
    let (frame_w, frame_h) = (frame_w as i32, frame_h as i32);

    let mut tracker = HandTracker::new()?;

    let (left_w, right_w) = split_panels(WINDOW_WIDTH, 1, 1);
    log::info!(
        "Window {WINDOW_WIDTH}x{WINDOW_HEIGHT}, panels {left_w}+{right_w}, camera {frame_w}x{frame_h}"
    );

    let mut drawer = Drawer::new("Air Canvas", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut screen = FrameBuffer::filled(WINDOW_WIDTH, WINDOW_HEIGHT, BLACK);

    // The drawing surface matches the left panel 1:1.
    let mut canvas = Canvas::new(left_w, WINDOW_HEIGHT, WHITE);
    let mut state = DrawingState::new();
    let mut wheel = ColorWheel::new();
    let mut custom_color = BLACK;
    let buttons = color_buttons();

    // Wheel on the right edge of the camera panel, slider underneath.
    let wheel_cx = right_w as i32 - WHEEL_RADIUS - 50;
    let wheel_cy = 150;
    let wheel_geom = WheelGeometry::new(wheel_cx, wheel_cy, WHEEL_RADIUS);
    let slider_rect = thickness_slider_rect(wheel_cx, wheel_cy, WHEEL_RADIUS);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second = 0u32;

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Capture (blocks on the device) and crop the view the user sees. */
        let frame = cam.next_frame()?;
        let mut cropped = crop_to_portrait(&frame);
        let (cw, ch) = (cropped.width as i32, cropped.height as i32);

        /* 2) Hand tracking. A miss simply idles the gesture this frame. */
        let hands = tracker.detect(&frame)?;
        let pinching =
            hands.map_or(false, |h| is_pinch(h.index_tip, h.thumb_tip, frame_w));

        /* 3) One mapper, three destinations: the drawing panel, the camera
        panel (for widget hover) and the cropped view itself (for the
        finger/thumb markers; panel == cropped is an identity scale). */
        let draw_point = hands.and_then(|h| {
            map_to_panel(h.index_tip, frame_w, frame_h, cw, ch, left_w as i32, WINDOW_HEIGHT as i32)
        });
        let panel_finger = hands.and_then(|h| {
            map_to_panel(h.index_tip, frame_w, frame_h, cw, ch, right_w as i32, WINDOW_HEIGHT as i32)
        });
        let finger_vis =
            hands.and_then(|h| map_to_panel(h.index_tip, frame_w, frame_h, cw, ch, cw, ch));
        let thumb_vis =
            hands.and_then(|h| map_to_panel(h.thumb_tip, frame_w, frame_h, cw, ch, cw, ch));

        /* 4) Keyboard / mouse. */
        if drawer.c_pressed_once() {
            canvas.clear();
            log::info!("Canvas cleared");
        }
        if drawer.t_pressed_once() {
            canvas.toggle_background();
        }
        if let Some((mx, my)) = drawer.left_click() {
            if mx < left_w && TOGGLE_RECT.contains(Point::new(mx as i32, my as i32)) {
                canvas.toggle_background();
            }
        }

        /* 5) Widget interactions from the hovered finger. */
        let hovered = panel_finger.and_then(|p| hit_test_buttons(p, &buttons));
        if let Some(p) = panel_finger {
            if let Some(c) = wheel::hit_test(p, &wheel_geom) {
                custom_color = c;
            }
            if let Some(frac) = hit_test_slider(p, slider_rect) {
                state.thickness = thickness_from_fraction(frac);
            }
        }
        state.apply_hover(hovered, &buttons, custom_color);

        /* 6) Gesture state machine: at most one stroke segment per frame. */
        if let Some((a, b)) = state.pen(pinching, draw_point) {
            let color = state.stroke_color(canvas.background());
            canvas.draw_line(a, b, color, state.thickness);
        }

        /* 7) Finger markers on the cropped view: green index tip, blue
        thumb tip, red connecting line while the pinch is active. */
        if let Some(p) = finger_vis {
            fill_disc(&mut cropped, p.x, p.y, 10, Rgb::new(0, 255, 0));
        }
        if let Some(t) = thumb_vis {
            fill_disc(&mut cropped, t.x, t.y, 10, Rgb::new(0, 0, 255));
            if pinching {
                if let Some(p) = finger_vis {
                    draw_thick_line(&mut cropped, t, p, Rgb::new(255, 0, 0), 3);
                }
            }
        }

        /* 8) Left panel: the canvas plus the background-toggle button. */
        let mut left_panel = canvas.buffer().clone();
        fill_rect(
            &mut left_panel,
            TOGGLE_RECT.x1, TOGGLE_RECT.y1, TOGGLE_RECT.x2, TOGGLE_RECT.y2,
            Rgb::new(100, 100, 100),
        );
        rect_outline(
            &mut left_panel,
            TOGGLE_RECT.x1, TOGGLE_RECT.y1, TOGGLE_RECT.x2, TOGGLE_RECT.y2,
            2, BLACK,
        );
        let toggle_text = if canvas.background() == WHITE { "WHITE" } else { "BLACK" };
        draw_text_5x7(&mut left_panel, TOGGLE_RECT.x1 + 12, TOGGLE_RECT.y1 + 16, toggle_text, WHITE);

        /* 9) Right panel: drawing composited over the camera view, then the
        controls and the HUD on top. */
        let composited = overlay_canvas(&cropped, canvas.buffer(), canvas.background());
        let mut right_panel = resize_nearest(&composited, right_w, WINDOW_HEIGHT);

        render_buttons(
            &mut right_panel,
            &buttons,
            custom_color,
            canvas.background(),
            hovered,
            state.selected,
        );
        wheel.render(&mut right_panel, wheel_cx, wheel_cy, WHEEL_RADIUS, custom_color);
        render_slider(&mut right_panel, slider_rect, state.thickness);
        draw_text_5x7(
            &mut right_panel,
            wheel_cx - 30,
            wheel_cy - WHEEL_RADIUS - 14,
            "COLOR WHEEL",
            WHITE,
        );

        let hud_bottom = WINDOW_HEIGHT as i32;
        let hud = format!(
            "RGB({},{},{}) THICK:{}",
            custom_color.r, custom_color.g, custom_color.b, state.thickness
        );
        draw_text_5x7(&mut right_panel, 10, hud_bottom - 16, &hud, BLACK);

        let mut pinch_text = format!("PINCH: {}", if pinching { "TRUE" } else { "FALSE" });
        if let Some(p) = draw_point {
            pinch_text.push_str(&format!(" DRAW: ({},{})", p.x, p.y));
        }
        draw_text_5x7(&mut right_panel, 10, hud_bottom - 32, &pinch_text, BLACK);
        draw_text_5x7(
            &mut right_panel,
            10,
            hud_bottom - 48,
            &selection_label(&state, custom_color),
            BLACK,
        );

        /* 10) Side-by-side composition and present. */
        paste(&mut screen, &left_panel, 0);
        paste(&mut screen, &right_panel, left_w);
        drawer.present(&screen)?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_split_is_proportional() {
        assert_eq!(split_panels(1600, 1, 1), (800, 800));
        assert_eq!(split_panels(1500, 2, 1), (1000, 500));
        // Remainder goes to the right panel; widths always sum to the total.
        let (l, r) = split_panels(1601, 1, 1);
        assert_eq!(l + r, 1601);
    }

    #[test]
    fn paste_places_panels_side_by_side() {
        let mut dst = FrameBuffer::filled(6, 2, BLACK);
        let left = FrameBuffer::filled(3, 2, Rgb::new(1, 0, 0));
        let right = FrameBuffer::filled(3, 2, Rgb::new(0, 1, 0));
        paste(&mut dst, &left, 0);
        paste(&mut dst, &right, 3);
        assert_eq!(dst.get(0, 0), Rgb::new(1, 0, 0).pack());
        assert_eq!(dst.get(2, 1), Rgb::new(1, 0, 0).pack());
        assert_eq!(dst.get(3, 0), Rgb::new(0, 1, 0).pack());
        assert_eq!(dst.get(5, 1), Rgb::new(0, 1, 0).pack());
    }
}
