//! Photo capability check.
//!
//! The roster references photos by path. Whether a photo can actually be
//! shown is decided up front with an explicit check, and a missing or
//! unreadable photo degrades the display instead of failing the check-in.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Whether a participant's photo can be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoStatus {
    /// The file exists, is readable, and carries a known image signature.
    Ready(PathBuf),
    /// No usable photo; the shell renders a placeholder instead.
    Unavailable,
}

impl PhotoStatus {
    /// Check whether a photo is available for rendering.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Display for PhotoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(path) => write!(f, "{}", path.display()),
            Self::Unavailable => write!(f, "no disponible"),
        }
    }
}

/// Inspect a photo path and decide whether it can be rendered.
///
/// The check never fails: any problem (missing file, directory, unreadable
/// file, unrecognized content) yields [`PhotoStatus::Unavailable`].
#[must_use]
pub fn inspect(path: impl AsRef<Path>) -> PhotoStatus {
    let path = path.as_ref();
    if !path.is_file() {
        return PhotoStatus::Unavailable;
    }

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return PhotoStatus::Unavailable,
    };

    let mut header = [0u8; 12];
    let read = match file.read(&mut header) {
        Ok(read) => read,
        Err(_) => return PhotoStatus::Unavailable,
    };

    if looks_like_image(&header[..read]) {
        PhotoStatus::Ready(path.to_path_buf())
    } else {
        PhotoStatus::Unavailable
    }
}

/// Match the leading bytes against known image signatures.
fn looks_like_image(header: &[u8]) -> bool {
    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    header.starts_with(PNG)
        || header.starts_with(JPEG)
        || header.starts_with(b"GIF87a")
        || header.starts_with(b"GIF89a")
        || header.starts_with(b"BM")
        || (header.len() >= 12 && &header[..4] == b"RIFF" && &header[8..12] == b"WEBP")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("checkdesk_photo_{}_{name}", std::process::id()))
    }

    fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
        let path = temp_path(name);
        let mut file = File::create(&path).expect("failed to create temp file");
        file.write_all(bytes).expect("failed to write temp file");
        path
    }

    #[test]
    fn test_inspect_png() {
        let path = write_temp("ok.png", &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00]);
        let status = inspect(&path);
        assert_eq!(status, PhotoStatus::Ready(path.clone()));
        assert!(status.is_ready());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_inspect_jpeg() {
        let path = write_temp("ok.jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
        assert!(inspect(&path).is_ready());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_inspect_missing_file() {
        assert_eq!(inspect(temp_path("missing.png")), PhotoStatus::Unavailable);
    }

    #[test]
    fn test_inspect_directory() {
        assert_eq!(inspect(std::env::temp_dir()), PhotoStatus::Unavailable);
    }

    #[test]
    fn test_inspect_non_image_content() {
        let path = write_temp("not_an_image.png", b"just some text");
        assert_eq!(inspect(&path), PhotoStatus::Unavailable);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_inspect_empty_file() {
        let path = write_temp("empty.png", b"");
        assert_eq!(inspect(&path), PhotoStatus::Unavailable);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_inspect_webp() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(b"WEBP");
        let path = write_temp("ok.webp", &bytes);
        assert!(inspect(&path).is_ready());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unavailable_display() {
        assert_eq!(PhotoStatus::Unavailable.to_string(), "no disponible");
    }

    #[test]
    fn test_ready_display_shows_path() {
        let status = PhotoStatus::Ready(PathBuf::from("fotos/juan.png"));
        assert_eq!(status.to_string(), "fotos/juan.png");
    }
}
