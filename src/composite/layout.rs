use serde::{Deserialize, Serialize};

/// Output canvas width in pixels. Matches the frame template's layout.
pub const CANVAS_WIDTH: u32 = 1600;
/// Output canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 2000;

/// Viewports at or below this width count as narrow.
pub const NARROW_VIEWPORT_MAX_WIDTH: u32 = 480;
/// How far the third area moves up on a narrow viewport.
pub const NARROW_THIRD_AREA_SHIFT: u32 = 40;

/// Rectangle on the output canvas where one photo is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PhotoArea {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The three photo windows of the frame template, top to bottom. They sit
/// just under the frame's header band.
pub const PHOTO_AREAS: [PhotoArea; 3] = [
    PhotoArea::new(502, 130, 600, 460),
    PhotoArea::new(502, 605, 600, 460),
    PhotoArea::new(502, 1145, 600, 460),
];

/// Canvas size plus the area table, with any viewport correction applied.
///
/// Built once per composite from explicit inputs, never from an ambient
/// environment query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    areas: [PhotoArea; 3],
}

impl LayoutConfig {
    /// Standard layout with no viewport correction.
    pub fn standard() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            areas: PHOTO_AREAS,
        }
    }

    /// Layout for a viewport of the given CSS width. An unknown width is
    /// treated as wide.
    pub fn for_viewport_width(viewport_width: Option<u32>) -> Self {
        let narrow = viewport_width.is_some_and(|w| w <= NARROW_VIEWPORT_MAX_WIDTH);
        let mut layout = Self::standard();
        if narrow {
            layout.shift_area_up(2, NARROW_THIRD_AREA_SHIFT);
        }
        layout
    }

    /// Move one area up by `offset` pixels, saturating at the canvas top.
    /// Out-of-range indices are ignored.
    pub fn shift_area_up(&mut self, index: usize, offset: u32) {
        if let Some(area) = self.areas.get_mut(index) {
            area.y = area.y.saturating_sub(offset);
        }
    }

    /// Resolved areas, indexed by capture order.
    pub fn areas(&self) -> &[PhotoArea; 3] {
        &self.areas
    }

    pub fn area(&self, index: usize) -> Option<PhotoArea> {
        self.areas.get(index).copied()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_uses_fixed_table() {
        let layout = LayoutConfig::standard();
        assert_eq!(layout.canvas_width, 1600);
        assert_eq!(layout.canvas_height, 2000);
        assert_eq!(layout.areas(), &PHOTO_AREAS);
    }

    #[test]
    fn areas_are_stacked_vertically_without_overlap() {
        for pair in PHOTO_AREAS.windows(2) {
            assert!(pair[0].y + pair[0].height <= pair[1].y);
        }
    }

    #[test]
    fn areas_fit_inside_canvas() {
        for area in PHOTO_AREAS {
            assert!(area.x + area.width <= CANVAS_WIDTH);
            assert!(area.y + area.height <= CANVAS_HEIGHT);
        }
    }

    #[test]
    fn narrow_viewport_moves_only_third_area() {
        let layout = LayoutConfig::for_viewport_width(Some(375));
        assert_eq!(layout.area(0), Some(PHOTO_AREAS[0]));
        assert_eq!(layout.area(1), Some(PHOTO_AREAS[1]));
        let third = layout.area(2).unwrap();
        assert_eq!(third.y, PHOTO_AREAS[2].y - 40);
        assert_eq!(third.x, PHOTO_AREAS[2].x);
        assert_eq!(third.height, PHOTO_AREAS[2].height);
    }

    #[test]
    fn narrow_threshold_is_inclusive() {
        assert_ne!(
            LayoutConfig::for_viewport_width(Some(480)),
            LayoutConfig::standard()
        );
        assert_eq!(
            LayoutConfig::for_viewport_width(Some(481)),
            LayoutConfig::standard()
        );
    }

    #[test]
    fn unknown_viewport_is_standard() {
        assert_eq!(
            LayoutConfig::for_viewport_width(None),
            LayoutConfig::standard()
        );
    }

    #[test]
    fn shift_saturates_at_canvas_top() {
        let mut layout = LayoutConfig::standard();
        layout.shift_area_up(0, 10_000);
        assert_eq!(layout.area(0).unwrap().y, 0);
    }

    #[test]
    fn shift_out_of_range_is_ignored() {
        let mut layout = LayoutConfig::standard();
        layout.shift_area_up(7, 40);
        assert_eq!(layout, LayoutConfig::standard());
    }
}
