/// File intake and validation
///
/// Both entry points (the native file picker and window drag-and-drop)
/// funnel through `SelectedFile::from_paths`, so a dropped file and a picked
/// file go through exactly the same checks and produce the same state.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// The image currently chosen by the user.
///
/// Kept until the next selection replaces it; the report flow reuses it
/// without requiring a fresh pick.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Full path to the image on disk
    pub path: PathBuf,
    /// Filename only (e.g., "nodule_scan.png"), sent as the multipart filename
    pub name: String,
    /// Guessed MIME type (e.g., "image/png")
    pub mime: String,
}

impl SelectedFile {
    /// Accept the first entry of a file list, validating its MIME type.
    ///
    /// The MIME type is guessed from the file extension, mirroring how the
    /// picker filters by extension. Anything outside the `image/` family is
    /// rejected before any request is sent.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self, AppError> {
        let path = paths.first().ok_or(AppError::NoFileSelected)?;
        Self::from_path(path)
    }

    fn from_path(path: &Path) -> Result<Self, AppError> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(AppError::InvalidFileType);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        Ok(SelectedFile {
            path: path.to_path_buf(),
            name,
            mime: mime.essence_str().to_string(),
        })
    }
}
