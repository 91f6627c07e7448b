// Command-line surface: stands in for the booth's start / capture / print
// buttons and for one-shot compositing of existing photos.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::types::BoothConfig;

/// Three-shot photobooth.
#[derive(Parser, Debug)]
#[command(
    name = "photobooth",
    about = "Capture three photos and composite them into a framed card",
    long_about = "Capture three photos and composite them into a framed 1600x2000 card.\n\n\
                  Example:\n  \
                  photobooth session --dummy --print\n  \
                  photobooth composite a.jpg b.jpg c.jpg --out card.jpg"
)]
pub struct Cli {
    /// Booth configuration file (JSON). Missing means defaults.
    #[arg(long, global = true, value_name = "FILE", default_value = "photobooth.json")]
    pub config: PathBuf,

    /// Frame template image, overriding the configured one.
    #[arg(long, global = true, value_name = "FILE")]
    pub frame: Option<PathBuf>,

    /// Display width the card is laid out for (narrow screens shift the
    /// third photo up).
    #[arg(long, global = true, value_name = "PX")]
    pub viewport_width: Option<u32>,

    /// Directory for finished cards and print spool files.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a full booth session: start, three countdown captures, card.
    Session {
        /// Replay these image files instead of a live camera.
        #[arg(long, num_args = 1.., value_name = "IMAGE")]
        photos: Vec<PathBuf>,

        /// Use the built-in test-pattern camera.
        #[arg(long)]
        dummy: bool,

        /// Spool the finished card for printing.
        #[arg(long)]
        print: bool,

        /// Where to write the card. Defaults to `<output-dir>/photobooth-card.jpg`.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Composite already-encoded photos against the frame.
    Composite {
        /// Photos in slot order. Only the first three are used.
        #[arg(required = true, num_args = 1.., value_name = "PHOTO")]
        photos: Vec<PathBuf>,

        /// Where to write the card. Defaults to `<output-dir>/photobooth-card.jpg`.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut BoothConfig) {
        if let Some(frame) = &self.frame {
            config.frame_path = frame.clone();
        }
        if let Some(width) = self.viewport_width {
            config.viewport_width = Some(width);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}
