// Opens the default camera and converts frames into a buffer suitable for
// the rest of the pipeline: 0x00RRGGBB pixels, mirrored horizontally so the
// on-screen hand moves the same way as the real one.

use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so the main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Try to open a camera at a target resolution (falls back if not exact).
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );

        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        log::info!("Camera {} streaming at {}x{}", index, actual.width(), actual.height());

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame, decode to RGB, pack as 0x00RRGGBB and mirror it.
    /// Blocks until the device delivers a frame.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img: image::RgbImage = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let (w, h) = (w as usize, h as usize);
        let mut out = vec![0u32; w * h];
        for (x, y, pixel) in rgb_img.enumerate_pixels() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            // Mirror: column x of the sensor lands at column (w-1-x) on screen.
            let mx = w - 1 - x as usize;
            out[y as usize * w + mx] = (r << 16) | (g << 8) | b;
        }

        Ok(FrameBuffer { width: w, height: h, pixels: out })
    }

    /// The resolution the camera is actually delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
