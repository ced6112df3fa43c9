// Hand landmark detection through the MediaPipe hand landmarker, driven as a
// Python subprocess: we stream raw RGB frames down stdin and read one JSON
// line of landmarks back per frame.
//
// A frame with no hand (or only low-confidence hands) is a tracking miss,
// not an error: detect returns Ok(None) and the pipeline idles for a frame.
//
// Setup:
//   python3 -m venv .venv && .venv/bin/pip install mediapipe numpy
// with `hand_detect.py` next to the executable.

use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

/// Landmark indices of interest (MediaPipe 21-point hand model).
const THUMB_TIP: usize = 4;
const INDEX_FINGER_TIP: usize = 8;

/// Pinch threshold as a fraction of frame width: fingertip-to-thumb distance
/// below 1.5% of the frame width counts as "draw enabled".
const PINCH_THRESHOLD: f32 = 0.015;

/// The two tracked tips, already converted to frame pixel coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Hands {
    pub index_tip: Point,
    pub thumb_tip: Point,
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[allow(dead_code)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionJson {
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

pub struct HandTracker {
    process: Child,
    stdout_reader: BufReader<std::process::ChildStdout>,
    confidence_threshold: f32,
}

impl HandTracker {
    /// Start the detector subprocess and wait for its READY handshake.
    pub fn new() -> Result<Self, Error> {
        let cwd = std::env::current_dir()?;
        let script_path = cwd.join("hand_detect.py");
        let venv_python = cwd.join(".venv/bin/python");

        if !script_path.exists() {
            return Err(Error::TrackerInit(format!(
                "detection script not found at {}",
                script_path.display()
            )));
        }
        if !venv_python.exists() {
            return Err(Error::TrackerInit(
                "Python venv not found; run: python3 -m venv .venv && .venv/bin/pip install mediapipe numpy".into(),
            ));
        }

        log::info!("Starting MediaPipe hand detector subprocess...");

        let mut process = Command::new(&venv_python)
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::TrackerInit(format!("spawn detector: {e}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::TrackerInit("no stdout pipe from detector".into()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader.read_line(&mut ready_line)?;
        if ready_line.trim() != "READY" {
            return Err(Error::TrackerInit(format!(
                "detector did not signal ready, got: {ready_line}"
            )));
        }

        log::info!("MediaPipe hand detector ready");

        Ok(Self {
            process,
            stdout_reader,
            confidence_threshold: 0.8,
        })
    }

    /// Detect one hand in the frame. Ok(None) when no hand clears the
    /// confidence threshold this frame.
    pub fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<Hands>, Error> {
        let width = frame.width as u32;
        let height = frame.height as u32;

        // Header (width, height, channels as LE u32) then raw RGB bytes.
        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| Error::TrackerInit("no stdin pipe to detector".into()))?;
        stdin.write_all(&width.to_le_bytes())?;
        stdin.write_all(&height.to_le_bytes())?;
        stdin.write_all(&3u32.to_le_bytes())?;

        let mut rgb = Vec::with_capacity(frame.pixels.len() * 3);
        for &px in &frame.pixels {
            let c = Rgb::unpack(px);
            rgb.extend_from_slice(&[c.r, c.g, c.b]);
        }
        stdin.write_all(&rgb)?;
        stdin.flush()?;

        let mut response = String::new();
        self.stdout_reader.read_line(&mut response)?;

        let result: DetectionJson = serde_json::from_str(&response)
            .map_err(|e| Error::TrackerProtocol(format!("{e}: {response}")))?;

        if let Some(error) = result.error {
            log::warn!("Detector error: {error}");
            return Ok(None);
        }

        for hand in result.hands {
            if hand.score < self.confidence_threshold {
                continue;
            }
            if hand.landmarks.len() != 21 {
                log::warn!("Expected 21 landmarks, got {}", hand.landmarks.len());
                continue;
            }

            // Normalized [0,1] landmark coordinates scale by frame size.
            let to_pixel = |lm: &LandmarkJson| {
                Point::new(
                    (lm.x * frame.width as f32) as i32,
                    (lm.y * frame.height as f32) as i32,
                )
            };
            let hands = Hands {
                index_tip: to_pixel(&hand.landmarks[INDEX_FINGER_TIP]),
                thumb_tip: to_pixel(&hand.landmarks[THUMB_TIP]),
            };
            log::debug!(
                "Hand detected (score {:.2}): index {:?} thumb {:?}",
                hand.score,
                hands.index_tip,
                hands.thumb_tip
            );
            return Ok(Some(hands));
        }

        Ok(None)
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}

/// Index-to-thumb distance below a frame-width-normalized threshold is the
/// "draw enabled" signal.
pub fn is_pinch(index_tip: Point, thumb_tip: Point, frame_width: i32) -> bool {
    let dx = (index_tip.x - thumb_tip.x) as f32;
    let dy = (index_tip.y - thumb_tip.y) as f32;
    let distance = (dx * dx + dy * dy).sqrt();
    distance / (frame_width as f32) < PINCH_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_tips_pinch() {
        let p = Point::new(320, 240);
        assert!(is_pinch(p, p, 640));
        assert!(is_pinch(Point::new(320, 240), Point::new(324, 243), 640));
    }

    #[test]
    fn threshold_scales_with_frame_width() {
        // 9.6px is the cutoff at 640 wide; the same 12px gap pinches at
        // 1280 wide but not at 640.
        let a = Point::new(100, 100);
        let b = Point::new(112, 100);
        assert!(!is_pinch(a, b, 640));
        assert!(is_pinch(a, b, 1280));
    }

    #[test]
    fn spread_fingers_do_not_pinch() {
        assert!(!is_pinch(Point::new(100, 100), Point::new(200, 180), 640));
    }
}
