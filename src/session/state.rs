use crate::capture::device::CaptureStream;
use crate::capture::types::Photo;
use crate::composite::compositor::{FinalCard, MAX_PHOTOS};

/// Everything one booth session accumulates.
#[derive(Default)]
pub struct SessionState {
    photos: Vec<Photo>,
    stream: Option<Box<dyn CaptureStream>>,
    final_card: Option<FinalCard>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any open stream and forget the photos and card.
    pub fn reset(&mut self) {
        self.release_stream();
        self.photos.clear();
        self.final_card = None;
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// All photo slots are taken.
    pub fn is_full(&self) -> bool {
        self.photos.len() >= MAX_PHOTOS
    }

    pub fn push_photo(&mut self, photo: Photo) {
        self.photos.push(photo);
    }

    pub fn attach_stream(&mut self, stream: Box<dyn CaptureStream>) {
        self.release_stream();
        self.stream = Some(stream);
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stream_mut(&mut self) -> Option<&mut (dyn CaptureStream + 'static)> {
        self.stream.as_deref_mut()
    }

    /// Stop and drop the open stream, if any.
    pub fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("Capture stream released");
        }
    }

    pub fn final_card(&self) -> Option<&FinalCard> {
        self.final_card.as_ref()
    }

    pub fn set_final_card(&mut self, card: FinalCard) {
        self.final_card = Some(card);
    }
}
