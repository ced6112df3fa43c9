// On-screen controls for the camera panel: the color button row, the
// thickness slider and their hit tests. Hit-testing is stateless; which
// selection persists across frames is the state machine's business.

use crate::draw::{draw_line, fill_disc, fill_rect, rect_outline, draw_text_5x7};
use crate::types::{FrameBuffer, Point, Rgb, BLACK, WHITE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonId {
    Red,
    Green,
    Blue,
    Yellow,
    Eraser,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.x1 <= p.x && p.x <= self.x2 && self.y1 <= p.y && p.y <= self.y2
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Button {
    pub id: ButtonId,
    pub rect: Rect,
    pub color: Rgb, // base color; eraser and custom are resolved per frame
}

/// The fixed button row along the top of the camera panel.
pub fn color_buttons() -> [Button; 6] {
    [
        Button { id: ButtonId::Red, rect: Rect::new(10, 10, 80, 80), color: Rgb::new(255, 0, 0) },
        Button { id: ButtonId::Green, rect: Rect::new(90, 10, 160, 80), color: Rgb::new(0, 255, 0) },
        Button { id: ButtonId::Blue, rect: Rect::new(170, 10, 240, 80), color: Rgb::new(0, 0, 255) },
        Button { id: ButtonId::Yellow, rect: Rect::new(250, 10, 320, 80), color: Rgb::new(255, 255, 0) },
        Button { id: ButtonId::Eraser, rect: Rect::new(330, 10, 400, 80), color: WHITE },
        Button { id: ButtonId::Custom, rect: Rect::new(410, 10, 480, 80), color: BLACK },
    ]
}

/// First button whose rect contains the point, in slice order. The order is
/// the registration order, so behavior stays deterministic even if a caller
/// ever overlaps rects.
pub fn hit_test_buttons(point: Point, buttons: &[Button]) -> Option<ButtonId> {
    buttons.iter().find(|b| b.rect.contains(point)).map(|b| b.id)
}

/// Horizontal slider hit test: the fraction of the rect width at the point's
/// x, clamped to [0,1]. None outside the rect; the caller keeps its previous
/// value for that frame.
pub fn hit_test_slider(point: Point, rect: Rect) -> Option<f32> {
    if !rect.contains(point) {
        return None;
    }
    let frac = (point.x - rect.x1) as f32 / rect.width() as f32;
    Some(frac.clamp(0.0, 1.0))
}

/// Thickness domain is 1..=20, linear in the slider fraction.
pub fn thickness_from_fraction(frac: f32) -> i32 {
    1 + (19.0 * frac) as i32
}

/// Slider rect placed directly under the color wheel, matching its width.
pub fn thickness_slider_rect(wheel_cx: i32, wheel_cy: i32, wheel_radius: i32) -> Rect {
    let margin = 20;
    let x1 = wheel_cx - wheel_radius;
    let y1 = wheel_cy + wheel_radius + margin;
    Rect::new(x1, y1, x1 + wheel_radius * 2, y1 + 20)
}

/* ---------------- rendering ---------------- */

/// Draw the button row. The eraser button is filled with the canvas
/// background and carries an icon in the opposite color so it stays visible;
/// that coloring is pure presentation, the erase operation itself always
/// paints the background. The custom button previews the live wheel color.
pub fn render_buttons(
    panel: &mut FrameBuffer,
    buttons: &[Button],
    custom_color: Rgb,
    background: Rgb,
    hovered: Option<ButtonId>,
    selected: Option<ButtonId>,
) {
    for b in buttons {
        let Rect { x1, y1, x2, y2 } = b.rect;
        match b.id {
            ButtonId::Custom => fill_rect(panel, x1, y1, x2, y2, custom_color),
            ButtonId::Eraser => {
                fill_rect(panel, x1, y1, x2, y2, background);
                let icon = if background == WHITE { BLACK } else { WHITE };
                let m = 8;
                rect_outline(panel, x1 + m, y1 + m, x2 - m, y2 - m, 2, icon);
                // Diagonal strokes suggesting rubbing.
                let gray = Rgb::new(100, 100, 100);
                draw_line(panel, Point::new(x1 + m + 5, y1 + m + 5), Point::new(x2 - m - 5, y2 - m - 5), gray);
                draw_line(panel, Point::new(x1 + m + 10, y1 + m + 5), Point::new(x2 - m - 5, y2 - m - 10), gray);
                draw_line(panel, Point::new(x1 + m + 5, y1 + m + 10), Point::new(x2 - m - 10, y2 - m - 5), gray);
            }
            _ => fill_rect(panel, x1, y1, x2, y2, b.color),
        }
    }

    // Hover beats selection for border styling on the same button.
    if let Some(id) = hovered {
        if let Some(b) = buttons.iter().find(|b| b.id == id) {
            let Rect { x1, y1, x2, y2 } = b.rect;
            rect_outline(panel, x1 - 4, y1 - 4, x2 + 4, y2 + 4, 4, WHITE);
            rect_outline(panel, x1, y1, x2, y2, 2, BLACK);
        }
    }
    if let Some(id) = selected {
        if hovered != Some(id) {
            if let Some(b) = buttons.iter().find(|b| b.id == id) {
                let Rect { x1, y1, x2, y2 } = b.rect;
                rect_outline(panel, x1 - 3, y1 - 3, x2 + 3, y2 + 3, 3, Rgb::new(0, 255, 0));
            }
        }
    }

    draw_text_5x7(panel, 330, 88, "ERASER", WHITE);
    draw_text_5x7(panel, 410, 88, "CUSTOM", WHITE);
}

/// Draw the thickness slider: track, position indicator, a preview disc of
/// the current thickness above it, and a label below.
pub fn render_slider(panel: &mut FrameBuffer, rect: Rect, thickness: i32) {
    let Rect { x1, y1, x2, y2 } = rect;
    fill_rect(panel, x1, y1, x2, y2, Rgb::new(100, 100, 100));

    let pos = x1 + ((thickness - 1) as f32 / 19.0 * rect.width() as f32) as i32;
    fill_rect(panel, pos - 3, y1 - 3, pos + 3, y2 + 3, WHITE);

    let preview_cx = x1 + rect.width() / 2;
    let preview_cy = y1 - 30;
    fill_disc(panel, preview_cx, preview_cy, thickness, WHITE);

    draw_text_5x7(panel, x1, y2 + 6, "THICKNESS", WHITE);
}
