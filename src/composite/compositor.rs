use std::sync::Arc;

use image::RgbaImage;

use crate::capture::types::Photo;
use crate::composite::error::{CompositeError, Result};
use crate::composite::geometry::{cover_rect, DrawRect};
use crate::composite::layout::LayoutConfig;
use crate::composite::report::{CompositeReport, CompositeStats, PhotoOutcome};
use crate::composite::surface::{RasterSurface, Surface, WHITE};
use crate::frame::loader::FrameLoader;
use crate::preview::compress::jpeg_data_url;

/// JPEG quality of the final card.
pub const OUTPUT_QUALITY: u8 = 95;

/// Photos beyond this count are ignored.
pub const MAX_PHOTOS: usize = 3;

/// The flattened, encoded card.
#[derive(Debug, Clone)]
pub struct FinalCard {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
    report: CompositeReport,
}

impl FinalCard {
    pub fn jpeg(&self) -> &[u8] {
        &self.jpeg
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn report(&self) -> &CompositeReport {
        &self.report
    }

    /// Inline-displayable `data:image/jpeg;base64,...` form.
    pub fn data_url(&self) -> String {
        jpeg_data_url(&self.jpeg)
    }
}

/// Lays three photos into the frame's windows and flattens the result.
///
/// Layer order is fixed: white background, photos in index order, then the
/// frame stretched over the whole canvas. Photos that fail to decode or draw
/// leave their window empty; they never abort the card.
pub struct Compositor {
    frame: Arc<FrameLoader>,
    layout: LayoutConfig,
    quality: u8,
}

impl Compositor {
    pub fn new(frame: Arc<FrameLoader>, layout: LayoutConfig) -> Self {
        Self {
            frame,
            layout,
            quality: OUTPUT_QUALITY,
        }
    }

    /// Override the output JPEG quality (1-100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Composite onto a fresh raster canvas of the layout's size.
    pub async fn composite_final_card(&self, photos: &[Photo]) -> Result<FinalCard> {
        if !self.frame.is_loaded() {
            tracing::error!("Frame not loaded for final composite");
            return Err(CompositeError::FrameNotLoaded);
        }
        let mut surface = RasterSurface::new(self.layout.canvas_width, self.layout.canvas_height)?;
        self.composite_onto(&mut surface, photos).await
    }

    /// Composite onto a caller-supplied surface.
    ///
    /// Fails before touching the surface if the frame is not loaded.
    pub async fn composite_onto<S>(&self, surface: &mut S, photos: &[Photo]) -> Result<FinalCard>
    where
        S: Surface + ?Sized,
    {
        let frame = self.frame.frame().ok_or_else(|| {
            tracing::error!("Frame not loaded for final composite");
            CompositeError::FrameNotLoaded
        })?;

        if photos.len() > MAX_PHOTOS {
            tracing::warn!(
                "Got {} photos, compositing only the first {MAX_PHOTOS}",
                photos.len()
            );
        }
        let photos = &photos[..photos.len().min(MAX_PHOTOS)];
        let areas = *self.layout.areas();
        let mut stats = CompositeStats::new(photos.len());

        tracing::info!(
            "Compositing {} photos onto {}x{} canvas",
            photos.len(),
            surface.width(),
            surface.height()
        );
        surface.fill(WHITE);

        // All decodes settle before anything is drawn.
        let decoded = decode_all(photos).await;

        for (slot, result) in decoded.into_iter().enumerate() {
            let area = areas[slot];
            let image = match result {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("Photo {} failed to decode: {e}", slot + 1);
                    stats.record(slot, PhotoOutcome::DecodeFailed);
                    continue;
                }
            };

            let Some(rect) = cover_rect(image.width(), image.height(), &area) else {
                tracing::warn!("Photo {} has no pixels, skipping", slot + 1);
                stats.record(slot, PhotoOutcome::DrawFailed);
                continue;
            };

            tracing::debug!(
                "Drawing photo {} ({}x{}) at ({:.1}, {:.1}) size {:.1}x{:.1}",
                slot + 1,
                image.width(),
                image.height(),
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
            match surface.draw_image(&image, rect) {
                Ok(()) => stats.record(slot, PhotoOutcome::Drawn),
                Err(e) => {
                    tracing::warn!("Photo {} failed to draw: {e}", slot + 1);
                    stats.record(slot, PhotoOutcome::DrawFailed);
                }
            }
        }

        let canvas = DrawRect::full(surface.width(), surface.height());
        surface.draw_image(frame.image(), canvas)?;

        let jpeg = surface.encode_jpeg(self.quality)?;
        let report = stats.finish(jpeg.len());
        if !report.is_complete() {
            tracing::warn!("Card has empty windows for photos {:?}", report.failed);
        }
        tracing::info!(
            "Final composite complete: {}/{} photos drawn, {:.2} KB in {:.1} ms",
            report.drawn.len(),
            report.photos_considered,
            jpeg.len() as f64 / 1024.0,
            report.elapsed_ms
        );

        Ok(FinalCard {
            jpeg,
            width: surface.width(),
            height: surface.height(),
            report,
        })
    }
}

/// Decode an encoded photo into RGBA pixels.
pub fn decode_photo(bytes: &[u8]) -> std::result::Result<RgbaImage, String> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| e.to_string())
}

/// Decode every photo concurrently on the blocking pool and wait for all of
/// them. Results come back in input order regardless of completion order.
async fn decode_all(photos: &[Photo]) -> Vec<std::result::Result<RgbaImage, String>> {
    let tasks = photos.iter().map(|photo| {
        let bytes = photo.shared_bytes();
        async move {
            match tokio::task::spawn_blocking(move || decode_photo(&bytes)).await {
                Ok(result) => result,
                Err(e) => Err(format!("decode task failed: {e}")),
            }
        }
    });
    futures::future::join_all(tasks).await
}
