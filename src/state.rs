// Per-frame gesture and selection state: the only cross-frame memory in the
// pipeline besides the canvas pixels themselves.
//
// Two independent observations get merged here once per frame: the pinch
// (with its mapped point) drives line continuity, and the hover drives the
// persistent color selection.

use crate::types::{Point, Rgb, BLACK};
use crate::widgets::{Button, ButtonId};

pub struct DrawingState {
    last_point: Option<Point>,
    pub is_erasing: bool,
    pub active_color: Rgb,
    pub selected: Option<ButtonId>,
    pub thickness: i32,
}

impl DrawingState {
    pub fn new() -> Self {
        Self {
            last_point: None,
            is_erasing: false,
            active_color: BLACK,
            selected: None,
            thickness: 5,
        }
    }

    /// Advance the pinch state machine. Returns the segment to stroke when a
    /// pinch continues through two consecutive valid points.
    ///
    /// Any frame without an active pinch or without a valid mapped point
    /// drops back to idle and forgets the last point; that reset is what
    /// prevents a long spurious segment when tracking is lost for a frame or
    /// the finger re-enters the drawable area somewhere else.
    pub fn pen(&mut self, pinching: bool, point: Option<Point>) -> Option<(Point, Point)> {
        if !pinching {
            self.last_point = None;
            return None;
        }
        let Some(p) = point else {
            self.last_point = None;
            return None;
        };
        let segment = self.last_point.map(|prev| (prev, p));
        self.last_point = Some(p);
        segment
    }

    /// Merge this frame's hover observation into the persistent selection.
    /// Hovering a button selects it; no hover keeps the previous selection
    /// active. A selected custom button keeps tracking the live wheel color.
    pub fn apply_hover(&mut self, hovered: Option<ButtonId>, buttons: &[Button], custom_color: Rgb) {
        if let Some(id) = hovered {
            self.selected = Some(id);
            self.is_erasing = id == ButtonId::Eraser;
        }

        match self.selected {
            Some(ButtonId::Custom) => self.active_color = custom_color,
            Some(ButtonId::Eraser) | None => {}
            Some(id) => {
                if let Some(b) = buttons.iter().find(|b| b.id == id) {
                    self.active_color = b.color;
                }
            }
        }
    }

    /// Effective stroke color. The eraser always resolves against the
    /// *current* canvas background, so a background toggle mid-erase can
    /// never leave a stale eraser color.
    pub fn stroke_color(&self, background: Rgb) -> Rgb {
        if self.is_erasing { background } else { self.active_color }
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WHITE;
    use crate::widgets::color_buttons;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn n_valid_frames_yield_n_minus_one_segments() {
        let mut s = DrawingState::new();
        let points = [p(10, 10), p(12, 11), p(15, 13), p(20, 16)];
        let mut segments = Vec::new();
        for pt in points {
            if let Some(seg) = s.pen(true, Some(pt)) {
                segments.push(seg);
            }
        }
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], (p(10, 10), p(12, 11)));
        assert_eq!(segments[2], (p(15, 13), p(20, 16)));
    }

    #[test]
    fn pinch_release_breaks_continuity() {
        let mut s = DrawingState::new();
        assert_eq!(s.pen(true, Some(p(10, 10))), None);
        assert!(s.pen(true, Some(p(20, 10))).is_some());

        // One released frame: continuity gone.
        assert_eq!(s.pen(false, Some(p(30, 10))), None);
        assert_eq!(s.last_point(), None);

        // First pinch frame after the gap draws nothing, the second resumes.
        assert_eq!(s.pen(true, Some(p(90, 90))), None);
        assert_eq!(s.pen(true, Some(p(92, 91))), Some((p(90, 90), p(92, 91))));
    }

    #[test]
    fn unmapped_point_breaks_continuity() {
        let mut s = DrawingState::new();
        s.pen(true, Some(p(10, 10)));
        // Finger left the portrait window while still pinching.
        assert_eq!(s.pen(true, None), None);
        assert_eq!(s.pen(true, Some(p(50, 50))), None);
        assert!(s.pen(true, Some(p(51, 50))).is_some());
    }

    #[test]
    fn selection_persists_without_hover() {
        let buttons = color_buttons();
        let mut s = DrawingState::new();

        s.apply_hover(Some(ButtonId::Yellow), &buttons, BLACK);
        assert_eq!(s.selected, Some(ButtonId::Yellow));
        assert_eq!(s.active_color, Rgb::new(255, 255, 0));
        assert!(!s.is_erasing);

        // Finger moved off the button: the selection keeps applying.
        s.apply_hover(None, &buttons, BLACK);
        assert_eq!(s.active_color, Rgb::new(255, 255, 0));

        // Hovering a different button replaces it.
        s.apply_hover(Some(ButtonId::Blue), &buttons, BLACK);
        assert_eq!(s.active_color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn custom_selection_tracks_live_wheel_color() {
        let buttons = color_buttons();
        let mut s = DrawingState::new();
        s.apply_hover(Some(ButtonId::Custom), &buttons, Rgb::new(10, 20, 30));
        assert_eq!(s.active_color, Rgb::new(10, 20, 30));
        // Next frame, no hover, wheel color changed: selection follows it.
        s.apply_hover(None, &buttons, Rgb::new(40, 50, 60));
        assert_eq!(s.active_color, Rgb::new(40, 50, 60));
    }

    #[test]
    fn eraser_resolves_against_current_background() {
        let buttons = color_buttons();
        let mut s = DrawingState::new();
        s.apply_hover(Some(ButtonId::Red), &buttons, BLACK);
        s.apply_hover(Some(ButtonId::Eraser), &buttons, BLACK);
        assert!(s.is_erasing);

        assert_eq!(s.stroke_color(WHITE), WHITE);
        // Background toggled mid-erase: eraser color follows immediately.
        assert_eq!(s.stroke_color(BLACK), BLACK);

        // Leaving eraser for a color button drops erase mode.
        s.apply_hover(Some(ButtonId::Red), &buttons, BLACK);
        assert!(!s.is_erasing);
        assert_eq!(s.stroke_color(WHITE), Rgb::new(255, 0, 0));
    }
}
