// Radial hue/saturation color wheel: procedurally generated once per radius,
// cached, blitted through a circular mask, and inverse hit-tested to turn a
// hovered point back into a color.
//
// Hue uses the halved 0..179 convention (angle / 2), so a full turn of the
// wheel covers the whole spectrum while staying in a byte-friendly range.
// Saturation grows from 0.1 at the center to 1.0 at the rim during
// generation, but the hit test normalizes distance over the annulus
// [inner_radius, radius] instead of the full radius. That asymmetry is
// inherited behavior: it decides which wheel position a selected color
// round-trips to, and both sides of it must stay in sync.

use crate::draw::{circle_outline, fill_disc};
use crate::types::{FrameBuffer, Point, Rgb, BLACK, WHITE};

/// Geometry descriptor returned by render and consumed by hit_test.
#[derive(Clone, Copy, Debug)]
pub struct WheelGeometry {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
    pub inner_radius: i32,
}

impl WheelGeometry {
    /// The inner disk (current-color swatch) takes a third of the radius.
    pub fn new(center_x: i32, center_y: i32, radius: i32) -> Self {
        Self { center_x, center_y, radius, inner_radius: radius / 3 }
    }
}

struct CachedWheel {
    radius: i32,
    image: FrameBuffer, // 2r x 2r, pixels outside the disk left unset
}

/// Owns the memoized wheel image. Regenerated exactly when the requested
/// radius differs from the cached one; render is called every frame and must
/// not trigger regeneration.
pub struct ColorWheel {
    cache: Option<CachedWheel>,
    rebuilds: usize,
}

impl ColorWheel {
    pub fn new() -> Self {
        Self { cache: None, rebuilds: 0 }
    }

    /// How many times the wheel image has actually been generated.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// The cached wheel image for `radius`, generating it on first use or
    /// when the radius changes.
    pub fn image(&mut self, radius: i32) -> &FrameBuffer {
        let fresh = matches!(&self.cache, Some(c) if c.radius == radius);
        if !fresh {
            self.cache = Some(CachedWheel { radius, image: generate(radius) });
            self.rebuilds += 1;
            log::debug!("Color wheel regenerated for radius {radius}");
        }
        match &self.cache {
            Some(c) => &c.image,
            None => unreachable!("cache populated above"),
        }
    }

    /// Blit the wheel onto `panel` centered at (cx, cy), clipped to the
    /// panel and masked to the disk, then draw the inner disk showing the
    /// currently selected color and a 2 px border ring.
    pub fn render(
        &mut self,
        panel: &mut FrameBuffer,
        cx: i32,
        cy: i32,
        radius: i32,
        current: Rgb,
    ) -> WheelGeometry {
        let image = self.image(radius);

        let x0 = (cx - radius).max(0);
        let y0 = (cy - radius).max(0);
        let x1 = (cx + radius).min(panel.width as i32);
        let y1 = (cy + radius).min(panel.height as i32);

        let r2 = (radius * radius) as f32;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x - cx) as f32;
                let dy = (y - cy) as f32;
                // Circular mask: pixels outside the disk keep the panel
                // background, never the wheel image's unset filler.
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let wx = (x - (cx - radius)) as usize;
                let wy = (y - (cy - radius)) as usize;
                panel.pixels[y as usize * panel.width + x as usize] = image.get(wx, wy);
            }
        }

        let geom = WheelGeometry::new(cx, cy, radius);
        fill_disc(panel, cx, cy, geom.inner_radius, current);
        circle_outline(panel, cx, cy, radius, 2, WHITE);

        geom
    }
}

/// Build the 2r x 2r wheel image. Outside the disk pixels stay at zero and
/// are excluded by the mask at blit time.
fn generate(radius: i32) -> FrameBuffer {
    let size = (radius * 2) as usize;
    let mut image = FrameBuffer::filled(size, size, BLACK);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - radius as f32;
            let dy = y as f32 - radius as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > radius as f32 {
                continue;
            }

            let mut angle = dy.atan2(dx).to_degrees();
            if angle < 0.0 {
                angle += 360.0;
            }

            let hue = angle / 2.0; // 0..179 convention
            let saturation = (distance / radius as f32).clamp(0.1, 1.0);

            image.pixels[y * size + x] = hsv_to_rgb(hue, saturation, 1.0).pack();
        }
    }

    image
}

/// Invert the wheel mapping: a panel-space point inside the annulus
/// [inner_radius, radius] becomes the color shown there, anything else None.
pub fn hit_test(point: Point, geom: &WheelGeometry) -> Option<Rgb> {
    let dx = (point.x - geom.center_x) as f32;
    let dy = (point.y - geom.center_y) as f32;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance > geom.radius as f32 || distance < geom.inner_radius as f32 {
        return None;
    }

    let mut angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }

    let hue = angle / 2.0;
    // Saturation spans the annulus, not the full radius.
    let span = (geom.radius - geom.inner_radius) as f32;
    let saturation = ((distance - geom.inner_radius as f32) / span).clamp(0.1, 1.0);

    Some(hsv_to_rgb(hue, saturation, 1.0))
}

/// HSV to RGB with hue on the halved 0..179 scale, saturation and value in
/// [0, 1].
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let h = hue * 2.0; // back to 0..360 degrees
    let c = value * saturation;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let m = value - c;

    let (r1, g1, b1) = match hp as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}
