// The single sanctioned path from camera sensor space into a panel's space.
//
// Every sensor-space point (index tip for drawing, index tip for widget
// hit-testing, thumb tip for visualization) goes through map_to_panel; the
// crop math lives nowhere else. The camera panel's pixels go through the
// matching crop_to_portrait so what the user sees and where their strokes
// land can never drift apart.

use crate::types::{FrameBuffer, Point};

/// Crop geometry derived from the current frame dimensions: a centered
/// square of min(width, height), then a 3:4 portrait window (3/4 of the
/// square width, centered horizontally, full height). Recomputed per frame,
/// never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropGeometry {
    pub crop_size: i32,
    pub crop_start_x: i32,
    pub crop_start_y: i32,
    pub portrait_width: i32,
    pub portrait_start_x: i32,
}

impl CropGeometry {
    pub fn from_frame(frame_width: i32, frame_height: i32) -> Self {
        let crop_size = frame_width.min(frame_height);
        let portrait_width = crop_size * 3 / 4;
        Self {
            crop_size,
            crop_start_x: (frame_width - crop_size) / 2,
            crop_start_y: (frame_height - crop_size) / 2,
            portrait_width,
            portrait_start_x: (crop_size - portrait_width) / 2,
        }
    }

    /// Portrait crop dimensions (width, height). Height is the full square.
    pub fn portrait_size(&self) -> (usize, usize) {
        (self.portrait_width as usize, self.crop_size as usize)
    }
}

/// Map a sensor-space point into a panel's space, or None if it falls
/// outside the square crop or the portrait window.
///
/// Three stages: reject against the square crop, translate and reject
/// against the portrait window, then scale by panel/cropped per axis with
/// truncation toward zero. Bounds are inclusive on both edges.
pub fn map_to_panel(
    point: Point,
    frame_width: i32,
    frame_height: i32,
    cropped_width: i32,
    cropped_height: i32,
    panel_width: i32,
    panel_height: i32,
) -> Option<Point> {
    let geom = CropGeometry::from_frame(frame_width, frame_height);

    if point.x < geom.crop_start_x
        || point.x > geom.crop_start_x + geom.crop_size
        || point.y < geom.crop_start_y
        || point.y > geom.crop_start_y + geom.crop_size
    {
        return None;
    }

    // Square-crop-relative coordinates.
    let crop_x = point.x - geom.crop_start_x;
    let crop_y = point.y - geom.crop_start_y;

    if crop_x < geom.portrait_start_x || crop_x > geom.portrait_start_x + geom.portrait_width {
        return None;
    }

    // Portrait-relative, then linear scale into the panel.
    let portrait_x = crop_x - geom.portrait_start_x;
    let portrait_y = crop_y;

    Some(Point::new(
        portrait_x * panel_width / cropped_width,
        portrait_y * panel_height / cropped_height,
    ))
}

/// Crop a full camera frame down to the portrait window the camera panel
/// displays. Same geometry as map_to_panel, applied to pixels.
pub fn crop_to_portrait(frame: &FrameBuffer) -> FrameBuffer {
    let geom = CropGeometry::from_frame(frame.width as i32, frame.height as i32);
    let (pw, ph) = geom.portrait_size();
    let src_x0 = (geom.crop_start_x + geom.portrait_start_x) as usize;
    let src_y0 = geom.crop_start_y as usize;

    let mut pixels = Vec::with_capacity(pw * ph);
    for y in 0..ph {
        let row_ofs = (src_y0 + y) * frame.width + src_x0;
        pixels.extend_from_slice(&frame.pixels[row_ofs..row_ofs + pw]);
    }

    FrameBuffer { width: pw, height: ph, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    // 640x480 landscape frame: square crop is 480px starting at x=80,
    // portrait window is 360px wide starting at x=60 within the square.
    const FW: i32 = 640;
    const FH: i32 = 480;

    #[test]
    fn geometry_for_landscape_frame() {
        let g = CropGeometry::from_frame(FW, FH);
        assert_eq!(g.crop_size, 480);
        assert_eq!(g.crop_start_x, 80);
        assert_eq!(g.crop_start_y, 0);
        assert_eq!(g.portrait_width, 360);
        assert_eq!(g.portrait_start_x, 60);
        assert_eq!(g.portrait_size(), (360, 480));
    }

    #[test]
    fn outside_square_crop_is_rejected() {
        for p in [
            Point::new(79, 100),
            Point::new(561, 100),
            Point::new(300, -1),
            Point::new(300, 481),
        ] {
            assert_eq!(map_to_panel(p, FW, FH, 360, 480, 800, 1000), None, "{p:?}");
        }
    }

    #[test]
    fn outside_portrait_window_is_rejected() {
        // Inside the square (x in 80..=560) but left/right of the portrait
        // window (sensor x in 140..=500).
        assert_eq!(map_to_panel(Point::new(139, 240), FW, FH, 360, 480, 800, 1000), None);
        assert_eq!(map_to_panel(Point::new(501, 240), FW, FH, 360, 480, 800, 1000), None);
        assert!(map_to_panel(Point::new(140, 240), FW, FH, 360, 480, 800, 1000).is_some());
        assert!(map_to_panel(Point::new(500, 240), FW, FH, 360, 480, 800, 1000).is_some());
    }

    #[test]
    fn scaling_truncates_toward_zero() {
        // Portrait-relative (1, 1) scaled by 800/360 and 1000/480.
        let p = map_to_panel(Point::new(141, 1), FW, FH, 360, 480, 800, 1000).unwrap();
        assert_eq!(p, Point::new(2, 2)); // 1*800/360 = 2.22.., 1*1000/480 = 2.08..
    }

    #[test]
    fn round_trip_within_one_pixel() {
        // For strictly interior points, mapping then inverse-scaling must
        // recover the portrait-relative coordinate within one pixel.
        let (cw, ch, pw, ph) = (360i32, 480i32, 800i32, 1000i32);
        for sx in (141..500).step_by(13) {
            for sy in (1..480).step_by(17) {
                let mapped = map_to_panel(Point::new(sx, sy), FW, FH, cw, ch, pw, ph)
                    .expect("interior point must map");
                let back_x = mapped.x * cw / pw;
                let back_y = mapped.y * ch / ph;
                let portrait_x = sx - 80 - 60;
                let portrait_y = sy;
                assert!((back_x - portrait_x).abs() <= 1, "x: {sx},{sy}");
                assert!((back_y - portrait_y).abs() <= 1, "y: {sx},{sy}");
            }
        }
    }

    #[test]
    fn identity_panel_maps_to_portrait_coords() {
        // Mapping with panel == cropped dimensions yields portrait-relative
        // coordinates directly; the visualization path relies on this.
        let p = map_to_panel(Point::new(200, 120), FW, FH, 360, 480, 360, 480).unwrap();
        assert_eq!(p, Point::new(60, 120));
    }

    #[test]
    fn crop_extracts_portrait_window() {
        let mut frame = FrameBuffer::filled(FW as usize, FH as usize, Rgb::new(0, 0, 0));
        // Tag the sensor pixel that should land at portrait (0, 0).
        frame.pixels[140] = Rgb::new(255, 0, 0).pack();
        // And one that should land at portrait (359, 479).
        frame.pixels[479 * 640 + 499] = Rgb::new(0, 255, 0).pack();

        let cropped = crop_to_portrait(&frame);
        assert_eq!((cropped.width, cropped.height), (360, 480));
        assert_eq!(Rgb::unpack(cropped.get(0, 0)), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::unpack(cropped.get(359, 479)), Rgb::new(0, 255, 0));
    }
}
