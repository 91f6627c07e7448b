use std::path::PathBuf;
use std::sync::Arc;

use crate::capture::device::CaptureDevice;
use crate::capture::error::CaptureError;
use crate::capture::types::Photo;
use crate::composite::compositor::{Compositor, FinalCard, MAX_PHOTOS};
use crate::frame::loader::FrameLoader;
use crate::preview::compress::compress_thumbnail;
use crate::print;
use crate::session::error::{BoothError, Result};
use crate::session::state::SessionState;
use crate::settings::types::BoothConfig;

/// Bounding box of the in-progress thumbnails.
pub const THUMBNAIL_MAX_WIDTH: u32 = 160;
pub const THUMBNAIL_MAX_HEIGHT: u32 = 120;

/// What a capture request produced.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// All photos were already taken; nothing happened.
    Ignored,
    /// A photo was taken and more are needed. `thumbnail` is `None` when the
    /// thumbnail could not be encoded; the photo itself is kept either way.
    Preview {
        taken: usize,
        thumbnail: Option<Vec<u8>>,
    },
    /// The last photo was taken and the card composited.
    Complete(FinalCard),
}

impl CaptureOutcome {
    /// Status line shown to the guest.
    pub fn status(&self) -> String {
        match self {
            Self::Ignored => "all photos taken".to_string(),
            Self::Preview { taken, .. } => format!("photo {taken} of {MAX_PHOTOS}"),
            Self::Complete(_) => "your card is ready".to_string(),
        }
    }
}

/// The start / capture / print controls and the session they drive.
pub struct Booth {
    device: Box<dyn CaptureDevice>,
    frame: Arc<FrameLoader>,
    compositor: Compositor,
    config: BoothConfig,
    session: SessionState,
}

impl Booth {
    pub fn new(device: Box<dyn CaptureDevice>, frame: Arc<FrameLoader>, config: BoothConfig) -> Self {
        let compositor =
            Compositor::new(Arc::clone(&frame), config.layout()).with_quality(config.output_quality);
        Self {
            device,
            frame,
            compositor,
            config,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Open the camera and begin a fresh session.
    ///
    /// A refused device leaves the previous session untouched.
    pub fn start_session(&mut self) -> Result<()> {
        let stream = self.device.open().map_err(|e| match e {
            CaptureError::AccessDenied(reason) => {
                tracing::error!("Camera access denied on '{}': {reason}", self.device.name());
                BoothError::CaptureDenied(reason)
            }
            other => other.into(),
        })?;

        self.session.reset();
        self.session.attach_stream(stream);
        tracing::info!("Session started on '{}'", self.device.name());
        Ok(())
    }

    /// Count down, then take the next photo.
    ///
    /// The third photo releases the camera and composites the final card.
    pub async fn capture<F>(&mut self, on_tick: F) -> Result<CaptureOutcome>
    where
        F: FnMut(u32),
    {
        if self.session.is_full() {
            tracing::debug!("Capture ignored, session already has {MAX_PHOTOS} photos");
            return Ok(CaptureOutcome::Ignored);
        }
        if !self.session.has_stream() {
            return Err(BoothError::NoSession);
        }

        self.config.countdown().run(on_tick).await;

        let stream = self.session.stream_mut().ok_or(BoothError::NoSession)?;
        let frame = stream.grab()?.mirrored()?;
        let photo = Photo::encode(self.session.photo_count(), &frame, self.config.capture_quality)?;
        let index = photo.index();
        self.session.push_photo(photo);
        let taken = self.session.photo_count();
        tracing::info!("Photo taken, index {index}, total {taken}");

        if taken < MAX_PHOTOS {
            let thumbnail = match compress_thumbnail(
                &frame.data,
                frame.width,
                frame.height,
                THUMBNAIL_MAX_WIDTH,
                THUMBNAIL_MAX_HEIGHT,
            ) {
                Ok(jpeg) => Some(jpeg),
                Err(e) => {
                    tracing::warn!("Thumbnail for photo {index} failed: {e}");
                    None
                }
            };
            return Ok(CaptureOutcome::Preview { taken, thumbnail });
        }

        self.session.release_stream();

        match self.compositor.composite_final_card(self.session.photos()).await {
            Ok(card) => {
                self.session.set_final_card(card.clone());
                Ok(CaptureOutcome::Complete(card))
            }
            Err(e) => {
                tracing::error!("Error compositing final card: {e}");
                Err(e.into())
            }
        }
    }

    /// Bytes the print control reproduces: the final card once it exists,
    /// otherwise the frame template as loaded.
    pub fn print_source(&self) -> Result<Vec<u8>> {
        if let Some(card) = self.session.final_card() {
            return Ok(card.jpeg().to_vec());
        }
        let frame = self.frame.require()?;
        Ok(frame.encoded().to_vec())
    }

    /// Spool the print source under `<output_dir>/print` and optionally open
    /// it with the OS handler.
    pub fn print(&self) -> Result<PathBuf> {
        let source = self.print_source()?;
        let path = print::spool(&source, &self.config.output_dir.join("print"))
            .map_err(BoothError::Print)?;

        if self.config.open_after_print {
            if let Err(e) = print::open_with_os(&path) {
                tracing::warn!("Could not hand {} to the OS: {e}", path.display());
            }
        }
        Ok(path)
    }
}
