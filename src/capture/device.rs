use crate::capture::error::{CaptureError, Result};
use crate::capture::types::Frame;

/// Source of camera streams.
///
/// Opening a device acquires it exclusively; the returned stream holds it
/// until `stop()` is called or the stream is dropped.
pub trait CaptureDevice: Send + Sync {
    /// Human-readable device name for logs.
    fn name(&self) -> &str;

    /// Request access and start streaming.
    fn open(&self) -> Result<Box<dyn CaptureStream>>;
}

/// A live stream from an opened device.
pub trait CaptureStream: Send {
    /// Grab the current frame.
    fn grab(&mut self) -> Result<Frame>;

    /// Release the device. Idempotent.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Device used when no camera is available. Opening it always fails.
pub struct NullCamera;

impl CaptureDevice for NullCamera {
    fn name(&self) -> &str {
        "none"
    }

    fn open(&self) -> Result<Box<dyn CaptureStream>> {
        Err(CaptureError::AccessDenied(
            "no capture device available".to_string(),
        ))
    }
}
