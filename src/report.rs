/// Clinical report download handling
///
/// The backend returns the report as a binary `.docx` body; this module
/// decides what to call it and writes it into the user's download folder.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How downloaded reports are named.
///
/// The default stamps each report with epoch milliseconds so repeated
/// downloads never collide; `Fixed` mirrors the backend's own attachment
/// name and overwrites on each download.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilenameStrategy {
    #[default]
    Timestamped,
    Fixed,
}

/// Fixed attachment name used by the backend's Content-Disposition header.
const FIXED_REPORT_NAME: &str = "thyroid_analysis_report.docx";

/// Produce the filename for a freshly downloaded report.
pub fn report_filename(strategy: FilenameStrategy) -> String {
    match strategy {
        FilenameStrategy::Timestamped => {
            format!("Thyroid_Report_{}.docx", Utc::now().timestamp_millis())
        }
        FilenameStrategy::Fixed => FIXED_REPORT_NAME.to_string(),
    }
}

/// Get the directory where reports are saved.
/// Falls back to the home directory when no download folder is configured.
pub fn download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Write the report bytes to `dir` under the configured naming strategy.
/// Returns the full path of the written document.
pub async fn save_report(
    bytes: Vec<u8>,
    dir: PathBuf,
    strategy: FilenameStrategy,
) -> Result<PathBuf, AppError> {
    let path = dir.join(report_filename(strategy));

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Report(format!("failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}
