use fast_image_resize as fr;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::composite::error::{CompositeError, Result};
use crate::composite::geometry::{ClippedDraw, DrawRect};
use crate::preview::compress::compress_jpeg;

/// Opaque white, the card background.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Drawing target for the compositor.
///
/// The production implementation rasterises into an RGBA buffer; tests swap
/// in a recorder to check draw order without touching pixels.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill the whole surface with a solid colour.
    fn fill(&mut self, color: Rgba<u8>);

    /// Draw `image` stretched into `dest`, alpha-blended over what is there.
    /// Parts of `dest` outside the surface are clipped.
    fn draw_image(&mut self, image: &RgbaImage, dest: DrawRect) -> Result<()>;

    /// Flatten and encode the surface as JPEG.
    fn encode_jpeg(&mut self, quality: u8) -> Result<Vec<u8>>;
}

/// In-memory RGBA canvas.
pub struct RasterSurface {
    canvas: RgbaImage,
    resizer: fr::Resizer,
}

impl RasterSurface {
    /// Allocate a transparent canvas. A zero-sized canvas cannot be drawn
    /// on or encoded, so it is refused up front.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CompositeError::Surface(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            canvas: RgbaImage::new(width, height),
            resizer: fr::Resizer::new(),
        })
    }

    #[cfg(test)]
    fn pixels(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Resample only the cropped source region into the visible pixels.
    fn resize(&mut self, image: &RgbaImage, clip: &ClippedDraw) -> Result<RgbaImage> {
        let src = fr::images::ImageRef::new(
            image.width(),
            image.height(),
            image.as_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| CompositeError::Draw(e.to_string()))?;
        let mut dst = fr::images::Image::new(clip.width, clip.height, fr::PixelType::U8x4);
        let options = fr::ResizeOptions::new().crop(
            clip.src_left,
            clip.src_top,
            clip.src_width,
            clip.src_height,
        );

        self.resizer
            .resize(&src, &mut dst, &options)
            .map_err(|e| CompositeError::Draw(e.to_string()))?;

        RgbaImage::from_raw(clip.width, clip.height, dst.into_vec())
            .ok_or_else(|| CompositeError::Draw("resized buffer has wrong length".to_string()))
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = color;
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: DrawRect) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CompositeError::Draw("source image is empty".to_string()));
        }
        let (width, height) = image.dimensions();
        let Some(clip) = dest.clip(width, height, self.canvas.width(), self.canvas.height()) else {
            tracing::debug!("Draw at {dest:?} is off-canvas, skipping");
            return Ok(());
        };
        let (x, y) = (i64::from(clip.x), i64::from(clip.y));
        if clip.is_unscaled(width, height) {
            image::imageops::overlay(&mut self.canvas, image, x, y);
        } else {
            let scaled = self.resize(image, &clip)?;
            image::imageops::overlay(&mut self.canvas, &scaled, x, y);
        }
        Ok(())
    }

    fn encode_jpeg(&mut self, quality: u8) -> Result<Vec<u8>> {
        // JPEG has no alpha channel; the white fill keeps the canvas opaque.
        let rgb = DynamicImage::ImageRgba8(self.canvas.clone()).to_rgb8();
        compress_jpeg(rgb.as_raw(), rgb.width(), rgb.height(), quality).map_err(CompositeError::Encode)
    }
}
