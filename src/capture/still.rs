use std::path::PathBuf;
use std::time::Instant;

use crate::capture::device::{CaptureDevice, CaptureStream};
use crate::capture::error::{CaptureError, Result};
use crate::capture::types::Frame;

/// Replays image files as camera frames, one file per grab.
///
/// Lets the booth run against real pictures without a live camera. Files are
/// read lazily on each grab and cycle once the list is exhausted.
pub struct StillCamera {
    paths: Vec<PathBuf>,
}

impl StillCamera {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl CaptureDevice for StillCamera {
    fn name(&self) -> &str {
        "Still images"
    }

    fn open(&self) -> Result<Box<dyn CaptureStream>> {
        if self.paths.is_empty() {
            return Err(CaptureError::AccessDenied(
                "no still images configured".to_string(),
            ));
        }
        Ok(Box::new(StillStream {
            paths: self.paths.clone(),
            next: 0,
            started: Instant::now(),
            active: true,
        }))
    }
}

struct StillStream {
    paths: Vec<PathBuf>,
    next: usize,
    started: Instant,
    active: bool,
}

impl CaptureStream for StillStream {
    fn grab(&mut self) -> Result<Frame> {
        if !self.active {
            return Err(CaptureError::StreamStopped);
        }
        let path = &self.paths[self.next % self.paths.len()];
        self.next += 1;

        let rgb = image::open(path)
            .map_err(|e| CaptureError::Grab(format!("{}: {e}", path.display())))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        tracing::debug!("Grabbed still {} ({width}x{height})", path.display());

        Ok(Frame {
            data: rgb.into_raw(),
            width,
            height,
            timestamp_us: self.started.elapsed().as_micros() as u64,
        })
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
