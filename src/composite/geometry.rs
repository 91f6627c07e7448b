//! Cover-fit geometry: scale a source so it fills a target rectangle with
//! no gaps, then centre it so the overflow is split evenly on each side.

use crate::composite::layout::PhotoArea;

/// Destination rectangle in canvas coordinates. May extend past the target
/// area (and past the canvas) on the overflowing axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole canvas.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, f64::from(width), f64::from(height))
    }

    /// Clip to a `canvas_width` x `canvas_height` canvas for a
    /// `src_width` x `src_height` source.
    ///
    /// The visible part is snapped outward to whole pixels and the source
    /// crop is mapped back through the draw scale, so the resize target never
    /// exceeds the canvas however far the rect overflows. `None` when nothing
    /// is visible or either side is degenerate.
    pub fn clip(
        &self,
        src_width: u32,
        src_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Option<ClippedDraw> {
        if !(self.width > 0.0 && self.height > 0.0) || src_width == 0 || src_height == 0 {
            return None;
        }
        let left = self.x.max(0.0).floor();
        let top = self.y.max(0.0).floor();
        let right = (self.x + self.width).min(f64::from(canvas_width)).ceil();
        let bottom = (self.y + self.height).min(f64::from(canvas_height)).ceil();
        if !(right > left && bottom > top) {
            return None;
        }

        let (sw, sh) = (f64::from(src_width), f64::from(src_height));
        let scale_x = sw / self.width;
        let scale_y = sh / self.height;
        let src_left = ((left - self.x) * scale_x).clamp(0.0, sw);
        let src_top = ((top - self.y) * scale_y).clamp(0.0, sh);
        let src_right = ((right - self.x) * scale_x).clamp(0.0, sw);
        let src_bottom = ((bottom - self.y) * scale_y).clamp(0.0, sh);
        if !(src_right > src_left && src_bottom > src_top) {
            return None;
        }

        Some(ClippedDraw {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
            src_left,
            src_top,
            src_width: src_right - src_left,
            src_height: src_bottom - src_top,
        })
    }
}

/// The on-canvas part of a draw, in whole pixels, and the source region
/// that maps onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedDraw {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub src_left: f64,
    pub src_top: f64,
    pub src_width: f64,
    pub src_height: f64,
}

impl ClippedDraw {
    /// The whole source lands 1:1 on the canvas; no resampling needed.
    pub fn is_unscaled(&self, src_width: u32, src_height: u32) -> bool {
        (self.width, self.height) == (src_width, src_height)
            && self.src_left == 0.0
            && self.src_top == 0.0
            && self.src_width == f64::from(src_width)
            && self.src_height == f64::from(src_height)
    }
}

/// Uniform scale that makes `src` cover `target` on both axes.
///
/// Returns `None` for an empty source, which cannot be scaled.
pub fn cover_scale(src_width: u32, src_height: u32, target_width: u32, target_height: u32) -> Option<f64> {
    if src_width == 0 || src_height == 0 {
        return None;
    }
    let sx = f64::from(target_width) / f64::from(src_width);
    let sy = f64::from(target_height) / f64::from(src_height);
    Some(sx.max(sy))
}

/// Where to draw a `src_width` x `src_height` image so it covers `area`,
/// centred on both axes.
pub fn cover_rect(src_width: u32, src_height: u32, area: &PhotoArea) -> Option<DrawRect> {
    let scale = cover_scale(src_width, src_height, area.width, area.height)?;
    let width = f64::from(src_width) * scale;
    let height = f64::from(src_height) * scale;
    let x = f64::from(area.x) + (f64::from(area.width) - width) / 2.0;
    let y = f64::from(area.y) + (f64::from(area.height) - height) / 2.0;
    Some(DrawRect::new(x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn area() -> PhotoArea {
        PhotoArea::new(502, 130, 600, 460)
    }

    #[test]
    fn cover_scale_picks_larger_ratio() {
        // 640x480: 600/640 = 0.9375, 460/480 = 0.9583
        let s = cover_scale(640, 480, 600, 460).unwrap();
        assert!((s - 460.0 / 480.0).abs() < EPS);

        // 1280x720: 600/1280 = 0.46875, 460/720 = 0.6389
        let s = cover_scale(1280, 720, 600, 460).unwrap();
        assert!((s - 460.0 / 720.0).abs() < EPS);

        // 720x1280 portrait: width ratio wins
        let s = cover_scale(720, 1280, 600, 460).unwrap();
        assert!((s - 600.0 / 720.0).abs() < EPS);
    }

    #[test]
    fn cover_scale_rejects_empty_source() {
        assert!(cover_scale(0, 480, 600, 460).is_none());
        assert!(cover_scale(640, 0, 600, 460).is_none());
    }

    #[test]
    fn cover_rect_never_leaves_gaps() {
        let sizes = [
            (640, 480),
            (1920, 1080),
            (720, 1280),
            (600, 460),
            (1, 1),
            (3000, 7),
            (7, 3000),
        ];
        for (w, h) in sizes {
            let r = cover_rect(w, h, &area()).unwrap();
            assert!(r.width >= 600.0 - EPS, "{w}x{h} width {}", r.width);
            assert!(r.height >= 460.0 - EPS, "{w}x{h} height {}", r.height);
        }
    }

    #[test]
    fn cover_rect_preserves_aspect_ratio() {
        let r = cover_rect(1920, 1080, &area()).unwrap();
        assert!((r.width / r.height - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn cover_rect_centres_overflow() {
        let a = area();
        for (w, h) in [(1920, 1080), (720, 1280), (640, 480)] {
            let r = cover_rect(w, h, &a).unwrap();
            let left = f64::from(a.x) - r.x;
            let top = f64::from(a.y) - r.y;
            assert!((left - (r.width - 600.0) / 2.0).abs() < EPS);
            assert!((top - (r.height - 460.0) / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn exact_fit_is_drawn_in_place() {
        let r = cover_rect(600, 460, &area()).unwrap();
        assert_eq!(r, DrawRect::new(502.0, 130.0, 600.0, 460.0));
    }

    #[test]
    fn clip_inside_canvas_is_unscaled() {
        let clip = DrawRect::new(3.0, 3.0, 4.0, 4.0).clip(4, 4, 10, 10).unwrap();
        assert_eq!((clip.x, clip.y, clip.width, clip.height), (3, 3, 4, 4));
        assert!(clip.is_unscaled(4, 4));
    }

    #[test]
    fn clip_maps_overflow_back_to_source_crop() {
        // 30x30 source drawn 1:1 at (-10, -10) on a 10x10 canvas.
        let clip = DrawRect::new(-10.0, -10.0, 30.0, 30.0).clip(30, 30, 10, 10).unwrap();
        assert_eq!((clip.x, clip.y, clip.width, clip.height), (0, 0, 10, 10));
        assert!((clip.src_left - 10.0).abs() < EPS);
        assert!((clip.src_top - 10.0).abs() < EPS);
        assert!((clip.src_width - 10.0).abs() < EPS);
        assert!(!clip.is_unscaled(30, 30));
    }

    #[test]
    fn extreme_strip_clips_to_canvas_width() {
        let r = cover_rect(60_000, 1, &area()).unwrap();
        assert!(r.width > 1e7);

        let clip = r.clip(60_000, 1, 1600, 2000).unwrap();
        assert_eq!((clip.x, clip.y, clip.width, clip.height), (0, 130, 1600, 460));
        assert!((clip.src_height - 1.0).abs() < EPS);
        assert!(clip.src_width > 0.0 && clip.src_width < 5.0);
        // The visible slice comes from the middle of the strip.
        assert!((clip.src_left + clip.src_width / 2.0 - 30_000.0).abs() < 100.0);
    }

    #[test]
    fn clip_outside_canvas_is_none() {
        assert!(DrawRect::new(20.0, 0.0, 5.0, 5.0).clip(5, 5, 10, 10).is_none());
        assert!(DrawRect::new(-8.0, 0.0, 5.0, 5.0).clip(5, 5, 10, 10).is_none());
        assert!(DrawRect::new(0.0, 0.0, 0.0, 5.0).clip(5, 5, 10, 10).is_none());
    }

    #[test]
    fn full_rect_spans_canvas() {
        let clip = DrawRect::full(1600, 2000).clip(1600, 2000, 1600, 2000).unwrap();
        assert_eq!((clip.x, clip.y, clip.width, clip.height), (0, 0, 1600, 2000));
        assert!(clip.is_unscaled(1600, 2000));
    }
}
