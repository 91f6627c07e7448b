use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use parking_lot::RwLock;

use crate::frame::error::{FrameError, Result};

/// Where the frame template comes from.
#[derive(Debug, Clone)]
pub enum FrameSource {
    /// Image file on disk.
    Path(PathBuf),
    /// Already-fetched encoded bytes (e.g. embedded in the binary).
    Bytes(Vec<u8>),
}

/// Decoded frame template. Never mutated after loading.
pub struct FrameTemplate {
    image: RgbaImage,
    /// Original encoded bytes, kept for display and as the print fallback.
    encoded: Vec<u8>,
}

impl FrameTemplate {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Loader state. `Loaded` and `Unavailable` are both terminal.
#[derive(Clone)]
pub enum FrameState {
    Pending,
    Loaded(Arc<FrameTemplate>),
    Unavailable(FrameError),
}

/// Gate around the one-time frame template load.
///
/// Shared between the booth and the compositor; reads are cheap and the
/// single write happens when the load settles.
pub struct FrameLoader {
    state: RwLock<FrameState>,
}

impl FrameLoader {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FrameState::Pending),
        }
    }

    /// Fetch the whole asset into memory, then decode it from memory.
    ///
    /// A settled loader returns its stored outcome without touching the
    /// source again, so a failed frame is never retried. Overlapping loads
    /// may both fetch, but only the first to settle is kept; later ones
    /// return that stored outcome instead of their own.
    pub async fn load(&self, source: FrameSource) -> Result<Arc<FrameTemplate>> {
        if let Some(settled) = self.settled() {
            return settled;
        }

        let outcome = fetch_and_decode(source).await;

        let mut state = self.state.write();
        if let Some(settled) = settled_outcome(&state) {
            tracing::debug!("Frame load raced with another load, keeping the first outcome");
            return settled;
        }
        match outcome {
            Ok(template) => {
                let (width, height) = template.dimensions();
                tracing::info!("Frame loaded: {width}x{height}");
                let template = Arc::new(template);
                *state = FrameState::Loaded(Arc::clone(&template));
                Ok(template)
            }
            Err(e) => {
                tracing::error!("Frame load failed: {e}");
                *state = FrameState::Unavailable(e.clone());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> FrameState {
        self.state.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.read(), FrameState::Loaded(_))
    }

    /// The loaded frame, if any.
    pub fn frame(&self) -> Option<Arc<FrameTemplate>> {
        match &*self.state.read() {
            FrameState::Loaded(template) => Some(Arc::clone(template)),
            _ => None,
        }
    }

    /// The loaded frame, or why there is none.
    pub fn require(&self) -> Result<Arc<FrameTemplate>> {
        self.settled()
            .unwrap_or_else(|| Err(FrameError::Unavailable("frame is still loading".to_string())))
    }

    fn settled(&self) -> Option<Result<Arc<FrameTemplate>>> {
        settled_outcome(&self.state.read())
    }
}

impl Default for FrameLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn settled_outcome(state: &FrameState) -> Option<Result<Arc<FrameTemplate>>> {
    match state {
        FrameState::Pending => None,
        FrameState::Loaded(template) => Some(Ok(Arc::clone(template))),
        FrameState::Unavailable(e) => Some(Err(e.clone())),
    }
}

async fn fetch_and_decode(source: FrameSource) -> Result<FrameTemplate> {
    let encoded = match source {
        FrameSource::Path(path) => tokio::fs::read(&path)
            .await
            .map_err(|e| FrameError::Fetch(format!("{}: {e}", path.display())))?,
        FrameSource::Bytes(bytes) => bytes,
    };
    if encoded.is_empty() {
        return Err(FrameError::Fetch("frame asset is empty".to_string()));
    }

    tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&encoded)
            .map_err(|e| FrameError::Decode(e.to_string()))?
            .to_rgba8();
        Ok(FrameTemplate { image, encoded })
    })
    .await
    .map_err(|e| FrameError::Decode(format!("decode task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 105, 180, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn new_loader_is_pending() {
        let loader = FrameLoader::new();
        assert!(matches!(loader.state(), FrameState::Pending));
        assert!(!loader.is_loaded());
        assert!(loader.frame().is_none());
        assert!(matches!(loader.require(), Err(FrameError::Unavailable(_))));
    }

    #[tokio::test]
    async fn loads_frame_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frame1.png");
        std::fs::write(&path, png_bytes(16, 20)).unwrap();

        let loader = FrameLoader::new();
        let frame = loader.load(FrameSource::Path(path)).await.unwrap();
        assert_eq!(frame.dimensions(), (16, 20));
        assert!(loader.is_loaded());
        assert_eq!(frame.encoded(), png_bytes(16, 20).as_slice());
    }

    #[tokio::test]
    async fn loads_frame_from_bytes() {
        let loader = FrameLoader::new();
        let frame = loader.load(FrameSource::Bytes(png_bytes(4, 4))).await.unwrap();
        assert_eq!(frame.image().get_pixel(0, 0), &Rgba([255, 105, 180, 255]));
    }

    #[tokio::test]
    async fn missing_file_is_terminal_fetch_failure() {
        let dir = TempDir::new().unwrap();
        let loader = FrameLoader::new();
        let result = loader
            .load(FrameSource::Path(dir.path().join("nope.png")))
            .await;
        assert!(matches!(result, Err(FrameError::Fetch(_))));
        assert!(matches!(loader.state(), FrameState::Unavailable(_)));
    }

    #[tokio::test]
    async fn undecodable_bytes_are_terminal_decode_failure() {
        let loader = FrameLoader::new();
        let result = loader
            .load(FrameSource::Bytes(b"not an image".to_vec()))
            .await;
        assert!(matches!(result, Err(FrameError::Decode(_))));
        assert!(loader.frame().is_none());
    }

    #[tokio::test]
    async fn empty_asset_is_a_fetch_failure() {
        let loader = FrameLoader::new();
        let result = loader.load(FrameSource::Bytes(Vec::new())).await;
        assert!(matches!(result, Err(FrameError::Fetch(_))));
    }

    #[tokio::test]
    async fn failure_is_never_retried() {
        let loader = FrameLoader::new();
        let _ = loader.load(FrameSource::Bytes(b"garbage".to_vec())).await;

        // A good source afterwards does not revive the loader.
        let again = loader.load(FrameSource::Bytes(png_bytes(4, 4))).await;
        assert!(matches!(again, Err(FrameError::Decode(_))));
        assert!(!loader.is_loaded());
        assert!(matches!(loader.require(), Err(FrameError::Decode(_))));
    }

    #[tokio::test]
    async fn second_load_returns_same_frame() {
        let loader = FrameLoader::new();
        let a = loader.load(FrameSource::Bytes(png_bytes(4, 4))).await.unwrap();
        let b = loader.load(FrameSource::Bytes(png_bytes(8, 8))).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.dimensions(), (4, 4));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn overlapping_loads_agree_on_one_outcome() {
        for _ in 0..20 {
            let loader = Arc::new(FrameLoader::new());
            let (bad, good) = tokio::join!(
                {
                    let loader = Arc::clone(&loader);
                    tokio::spawn(async move {
                        loader.load(FrameSource::Bytes(b"garbage".to_vec())).await
                    })
                },
                {
                    let loader = Arc::clone(&loader);
                    tokio::spawn(async move {
                        loader.load(FrameSource::Bytes(png_bytes(4, 4))).await
                    })
                }
            );
            let (bad, good) = (bad.unwrap(), good.unwrap());

            // Whichever settled first wins, and both callers see it.
            assert_eq!(bad.is_ok(), good.is_ok());
            assert_eq!(loader.is_loaded(), good.is_ok());
            if let (Ok(a), Ok(b)) = (&bad, &good) {
                assert!(Arc::ptr_eq(a, b));
            }
        }
    }

    #[test]
    fn loader_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrameLoader>();
    }
}
