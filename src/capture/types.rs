use std::fmt;
use std::sync::Arc;

use image::{ImageBuffer, Rgb};

use crate::capture::error::{CaptureError, Result};
use crate::preview::compress::compress_jpeg;

/// JPEG quality for captured photos (the browser's default encode quality).
pub const CAPTURE_QUALITY: u8 = 92;

/// A single raw frame grabbed from a capture stream.
pub struct Frame {
    /// Raw pixel data (RGB).
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture timestamp in microseconds.
    pub timestamp_us: u64,
}

impl Frame {
    /// Mirror the frame left-to-right (selfie convention).
    pub fn mirrored(&self) -> Result<Frame> {
        let img: ImageBuffer<Rgb<u8>, &[u8]> =
            ImageBuffer::from_raw(self.width, self.height, self.data.as_slice()).ok_or_else(|| {
                CaptureError::Grab(format!(
                    "frame buffer does not match {}x{}",
                    self.width, self.height
                ))
            })?;
        let flipped = image::imageops::flip_horizontal(&img);
        Ok(Frame {
            data: flipped.into_raw(),
            width: self.width,
            height: self.height,
            timestamp_us: self.timestamp_us,
        })
    }
}

/// An encoded (JPEG) photo in capture order. Immutable once taken.
#[derive(Clone)]
pub struct Photo {
    index: usize,
    jpeg: Arc<[u8]>,
}

impl Photo {
    /// Wrap already-encoded image bytes.
    pub fn from_encoded(index: usize, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            index,
            jpeg: bytes.into(),
        }
    }

    /// Encode a grabbed frame as the photo for `index`. The caller mirrors
    /// first, so the same mirrored frame can feed the preview thumbnail.
    pub fn encode(index: usize, frame: &Frame, quality: u8) -> Result<Self> {
        let jpeg = compress_jpeg(&frame.data, frame.width, frame.height, quality)
            .map_err(CaptureError::Encode)?;
        Ok(Self::from_encoded(index, jpeg))
    }

    /// Position in the capture sequence (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// Shared handle to the encoded bytes, for moving into decode tasks.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.jpeg)
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("index", &self.index)
            .field("bytes", &self.jpeg.len())
            .finish()
    }
}
