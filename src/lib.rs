pub mod capture;
pub mod cli;
pub mod composite;
pub mod frame;
pub mod preview;
pub mod print;
pub mod session;
pub mod settings;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use capture::device::{CaptureDevice, NullCamera};
use capture::dummy::DummyCamera;
use capture::still::StillCamera;
use capture::types::Photo;
use cli::{Cli, Command};
use composite::compositor::{Compositor, FinalCard};
use frame::loader::{FrameLoader, FrameSource};
use session::booth::{Booth, CaptureOutcome};
use session::error::{BoothError, Result};

const CARD_FILE_NAME: &str = "photobooth-card.jpg";

/// Pick the capture device.
///
/// Replayed photos win, then the dummy camera (flag or `DUMMY_CAMERA=1`).
/// Without either there is no camera, and opening it reports access denied.
pub fn create_capture_device(photos: &[PathBuf], dummy: bool) -> Box<dyn CaptureDevice> {
    if !photos.is_empty() {
        return Box::new(StillCamera::new(photos.to_vec()));
    }
    if dummy || DummyCamera::is_enabled() {
        return Box::new(DummyCamera::new());
    }
    Box::new(NullCamera)
}

/// Run one command end to end and return the path of the written card.
pub async fn run(cli: Cli) -> Result<PathBuf> {
    let mut config = settings::store::load(&cli.config)?;
    cli.apply_overrides(&mut config);
    settings::store::validate(&config)?;

    let frame = Arc::new(FrameLoader::new());
    frame
        .load(FrameSource::Path(config.frame_path.clone()))
        .await?;

    let default_out = config.output_dir.join(CARD_FILE_NAME);
    match cli.command {
        Command::Session {
            photos,
            dummy,
            print,
            out,
        } => {
            let device = create_capture_device(&photos, dummy);
            let mut booth = Booth::new(device, frame, config);
            booth.start_session()?;

            let card = loop {
                match booth.capture(|n| tracing::info!("{n}...")).await? {
                    CaptureOutcome::Complete(card) => break card,
                    CaptureOutcome::Ignored => return Err(BoothError::NoSession),
                    preview => tracing::info!("{}", preview.status()),
                }
            };

            let path = write_card(&card, &out.unwrap_or(default_out)).await?;
            if print {
                booth.print()?;
            }
            Ok(path)
        }
        Command::Composite { photos, out } => {
            let mut loaded = Vec::with_capacity(photos.len());
            for (index, path) in photos.iter().enumerate() {
                let bytes = tokio::fs::read(path).await?;
                loaded.push(Photo::from_encoded(index, bytes));
            }

            let compositor = Compositor::new(frame, config.layout()).with_quality(config.output_quality);
            let card = compositor.composite_final_card(&loaded).await?;
            write_card(&card, &out.unwrap_or(default_out)).await
        }
    }
}

async fn write_card(card: &FinalCard, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, card.jpeg()).await?;

    match serde_json::to_string(card.report()) {
        Ok(report) => tracing::info!("Card written to {}: {report}", path.display()),
        Err(_) => tracing::info!("Card written to {}", path.display()),
    }
    Ok(path.to_path_buf())
}
