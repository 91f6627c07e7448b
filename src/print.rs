// Print: spool the card to disk and hand it to the OS.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Give up after this many name collisions in one directory.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Write `image` into `dir` as a uniquely named spool file. The extension
/// follows the sniffed format, falling back to `jpg`.
pub fn spool(image: &[u8], dir: &Path) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create print dir {}: {e}", dir.display()))?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let extension = image::guess_format(image)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("jpg");
    let path = write_unique(dir, &format!("photobooth-card-{millis}"), extension, image)?;

    tracing::info!("Spooled print image to {}", path.display());
    Ok(path)
}

/// Create `<stem>.<ext>` in `dir`, or `<stem>-<n>.<ext>` if taken. Never
/// overwrites an existing file.
fn write_unique(dir: &Path, stem: &str, extension: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            format!("{stem}.{extension}")
        } else {
            format!("{stem}-{attempt}.{extension}")
        };
        let path = dir.join(name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(format!("Failed to save print image {}: {e}", path.display())),
        };
        file.write_all(bytes)
            .map_err(|e| format!("Failed to save print image {}: {e}", path.display()))?;
        return Ok(path);
    }
    Err(format!(
        "No free spool name for {stem}.{extension} in {}",
        dir.display()
    ))
}

/// Open the spooled file with the platform's default handler.
#[cfg(target_os = "windows")]
pub fn open_with_os(path: &Path) -> Result<(), String> {
    std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map_err(|e| format!("Failed to open image: {e}"))?;
    Ok(())
}

#[cfg(target_os = "macos")]
pub fn open_with_os(path: &Path) -> Result<(), String> {
    std::process::Command::new("open")
        .arg(path)
        .spawn()
        .map_err(|e| format!("Failed to open image: {e}"))?;
    Ok(())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn open_with_os(path: &Path) -> Result<(), String> {
    std::process::Command::new("xdg-open")
        .arg(path)
        .spawn()
        .map_err(|e| format!("Failed to open image: {e}"))?;
    Ok(())
}
