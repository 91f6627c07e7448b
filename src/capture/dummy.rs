use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::capture::device::{CaptureDevice, CaptureStream};
use crate::capture::error::{CaptureError, Result};
use crate::capture::types::Frame;

const DUMMY_DEVICE_NAME: &str = "Dummy Test Camera";

/// Test-pattern frame size (4:3, like a typical webcam).
pub const DUMMY_WIDTH: u32 = 640;
pub const DUMMY_HEIGHT: u32 = 480;

/// Side of the white marker square in the top-left corner.
const MARKER_SIZE: u32 = 32;

/// Solid colours cycled through on successive grabs.
const PATTERN_COLORS: [[u8; 3]; 3] = [[220, 20, 20], [20, 200, 20], [20, 20, 220]];

/// A fake camera for running the booth without hardware.
///
/// Each grab returns a solid frame (red, green, blue, repeating) with a white
/// marker square in the top-left corner, so mirroring is visible in the
/// output. Tracks how many streams are live so tests can check release.
///
/// Enable via `DUMMY_CAMERA=1` environment variable.
pub struct DummyCamera {
    deny_access: bool,
    active_streams: Arc<AtomicUsize>,
}

impl DummyCamera {
    pub fn new() -> Self {
        Self {
            deny_access: false,
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A dummy camera whose permission prompt is always refused.
    pub fn denying() -> Self {
        Self {
            deny_access: true,
            ..Self::new()
        }
    }

    /// Whether the dummy camera is enabled via environment variable.
    pub fn is_enabled() -> bool {
        std::env::var("DUMMY_CAMERA").is_ok_and(|v| v == "1" || v == "true")
    }

    /// Number of opened streams not yet stopped.
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::Acquire)
    }

    /// Shared live-stream counter, for observing release after the device
    /// has been handed to a booth.
    pub fn stream_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.active_streams)
    }

    /// Render the test pattern for the `sequence`-th grab.
    pub fn test_frame(sequence: usize, timestamp_us: u64) -> Frame {
        let color = PATTERN_COLORS[sequence % PATTERN_COLORS.len()];
        let mut data = Vec::with_capacity((DUMMY_WIDTH * DUMMY_HEIGHT * 3) as usize);
        for y in 0..DUMMY_HEIGHT {
            for x in 0..DUMMY_WIDTH {
                if x < MARKER_SIZE && y < MARKER_SIZE {
                    data.extend_from_slice(&[255, 255, 255]);
                } else {
                    data.extend_from_slice(&color);
                }
            }
        }
        Frame {
            data,
            width: DUMMY_WIDTH,
            height: DUMMY_HEIGHT,
            timestamp_us,
        }
    }
}

impl Default for DummyCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureDevice for DummyCamera {
    fn name(&self) -> &str {
        DUMMY_DEVICE_NAME
    }

    fn open(&self) -> Result<Box<dyn CaptureStream>> {
        if self.deny_access {
            return Err(CaptureError::AccessDenied(
                "permission refused by user".to_string(),
            ));
        }
        self.active_streams.fetch_add(1, Ordering::AcqRel);
        Ok(Box::new(DummyStream {
            sequence: 0,
            started: Instant::now(),
            active: true,
            counter: Arc::clone(&self.active_streams),
        }))
    }
}

struct DummyStream {
    sequence: usize,
    started: Instant,
    active: bool,
    counter: Arc<AtomicUsize>,
}

impl CaptureStream for DummyStream {
    fn grab(&mut self) -> Result<Frame> {
        if !self.is_active() {
            return Err(CaptureError::StreamStopped);
        }
        let timestamp_us = self.started.elapsed().as_micros() as u64;
        let frame = DummyCamera::test_frame(self.sequence, timestamp_us);
        self.sequence += 1;
        Ok(frame)
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.counter.fetch_sub(1, Ordering::AcqRel);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for DummyStream {
    fn drop(&mut self) {
        self.stop();
    }
}
