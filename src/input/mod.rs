use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Hard per-file cap mirrored from the upload surface: 2 GiB.
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024 * 1024;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input path {0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("{name} exceeds the 2 GiB image limit ({size} bytes)")]
    TooLarge { name: String, size: u64 },
    #[error("no supported image files (png/jpg/jpeg/tif/tiff) found in {0}")]
    NoImages(PathBuf),
}

/// One validated input image, fully loaded.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub fn is_supported_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Scans a directory for supported images, validating sizes and reading
/// payloads. Non-image entries are skipped with a warning; an oversized
/// image aborts the scan. Results are sorted by file name so enumeration
/// order never reaches the engine.
pub fn scan_input_dir(dir: &Path) -> Result<Vec<ImageFile>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("skipping file with non-UTF-8 name: {}", path.display());
                continue;
            }
        };
        if !is_supported_image(&name) {
            warn!("skipping unsupported file type: {name}");
            continue;
        }
        let size = entry.metadata()?.len();
        if size > MAX_IMAGE_BYTES {
            return Err(InputError::TooLarge { name, size });
        }
        debug!("loading {name} ({size} bytes)");
        let bytes = fs::read(&path)?;
        files.push(ImageFile { name, bytes });
    }

    if files.is_empty() {
        return Err(InputError::NoImages(dir.to_path_buf()));
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}
