// One variant per failure site. Capture and window errors are fatal and end
// the session; a missed hand detection is not an error (Ok(None) from the
// tracker) and an out-of-bounds mapped point is a plain None.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    #[error("Camera init error: {0}")]
    CameraInit(String),
    #[error("Camera frame error: {0}")]
    CameraFrame(String),
    #[error("Hand tracker init error: {0}")]
    TrackerInit(String),
    #[error("Hand tracker I/O error: {0}")]
    TrackerIo(#[from] std::io::Error),
    #[error("Hand tracker protocol error: {0}")]
    TrackerProtocol(String),
}
