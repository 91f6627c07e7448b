use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};

/// Quality used for preview thumbnails.
pub const THUMBNAIL_QUALITY: u8 = 70;

/// Compress raw RGB pixel data to JPEG at the given quality (1-100).
pub fn compress_jpeg(data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, String> {
    let img: ImageBuffer<Rgb<u8>, _> = ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| format!("invalid buffer dimensions {width}x{height} for {} bytes", data.len()))?;

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    img.write_with_encoder(encoder).map_err(|e| e.to_string())?;
    Ok(buf)
}

/// Fit `width` x `height` inside a `max_width` x `max_height` box, keeping
/// the aspect ratio. Never upscales; never returns a zero side.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width.max(1), height.max(1));
    }
    let scale = (f64::from(max_width) / f64::from(width)).min(f64::from(max_height) / f64::from(height));
    let w = (f64::from(width) * scale).round().max(1.0) as u32;
    let h = (f64::from(height) * scale).round().max(1.0) as u32;
    (w, h)
}

/// Compress and downscale raw RGB data for the in-session preview strip.
///
/// Uses `fast_image_resize` for SIMD-accelerated resizing, then encodes to JPEG.
pub fn compress_thumbnail(
    data: &[u8],
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> Result<Vec<u8>, String> {
    use fast_image_resize as fr;
    use fr::images::Image;

    let (thumb_width, thumb_height) = fit_within(width, height, max_width, max_height);

    let src_image = Image::from_vec_u8(width, height, data.to_vec(), fr::PixelType::U8x3)
        .map_err(|e| e.to_string())?;
    let mut dst_image = Image::new(thumb_width, thumb_height, fr::PixelType::U8x3);

    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, None)
        .map_err(|e| e.to_string())?;

    let resized_data = dst_image.into_vec();
    compress_jpeg(&resized_data, thumb_width, thumb_height, THUMBNAIL_QUALITY)
}

/// Wrap JPEG bytes as a `data:` URL for inline display.
pub fn jpeg_data_url(jpeg: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(jpeg)
    )
}
