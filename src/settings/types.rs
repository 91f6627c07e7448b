use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::capture::countdown::Countdown;
use crate::capture::types::CAPTURE_QUALITY;
use crate::composite::compositor::OUTPUT_QUALITY;
use crate::composite::layout::LayoutConfig;

/// Booth configuration. Every field has a default, so a partial (or empty)
/// JSON object is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoothConfig {
    /// Frame template image.
    pub frame_path: PathBuf,
    /// Where finished cards and print spool files are written.
    pub output_dir: PathBuf,
    /// JPEG quality of the final card (1-100).
    pub output_quality: u8,
    /// JPEG quality of each captured photo (1-100).
    pub capture_quality: u8,
    /// First number shown by the pre-shot countdown.
    pub countdown_from: u32,
    /// Delay between countdown numbers, in milliseconds.
    pub countdown_tick_ms: u64,
    /// Width of the display the card is laid out for. Narrow viewports get
    /// the third-photo correction.
    pub viewport_width: Option<u32>,
    /// Hand the spooled print file to the OS after writing it.
    pub open_after_print: bool,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            frame_path: PathBuf::from("assets/frame1.png"),
            output_dir: PathBuf::from("output"),
            output_quality: OUTPUT_QUALITY,
            capture_quality: CAPTURE_QUALITY,
            countdown_from: 3,
            countdown_tick_ms: 1000,
            viewport_width: None,
            open_after_print: false,
        }
    }
}

impl BoothConfig {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig::for_viewport_width(self.viewport_width)
    }

    pub fn countdown(&self) -> Countdown {
        Countdown::new(
            self.countdown_from,
            Duration::from_millis(self.countdown_tick_ms),
        )
    }
}
