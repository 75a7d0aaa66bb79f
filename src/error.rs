use thiserror::Error;

/// Failure kinds surfaced to the user.
///
/// The `Display` text of each variant is exactly what the alert banner shows.
/// Technical detail (HTTP status, transport error) rides along in the variant
/// payload and is only printed to the console.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// The chosen file is not an image. Caught before any request is sent.
    #[error("Please upload a valid medical image file.")]
    InvalidFileType,

    /// The picker or drop produced no usable file.
    #[error("No file available for report generation.")]
    NoFileSelected,

    /// `/analyze` returned a non-success status or the request itself failed.
    #[error("Diagnostic analysis failed. Please try again.")]
    Analysis(String),

    /// The analyze response parsed, but an image payload could not be decoded.
    #[error("Analysis failed")]
    BadImagePayload(String),

    /// `/report` returned a non-success status, the request failed, or the
    /// document could not be written to disk.
    #[error("Report generation failed.")]
    Report(String),
}

impl AppError {
    /// Console-level detail for diagnostics; empty for pre-request errors.
    pub fn detail(&self) -> &str {
        match self {
            AppError::InvalidFileType | AppError::NoFileSelected => "",
            AppError::Analysis(detail)
            | AppError::BadImagePayload(detail)
            | AppError::Report(detail) => detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_match_contract() {
        assert_eq!(
            AppError::InvalidFileType.to_string(),
            "Please upload a valid medical image file."
        );
        assert_eq!(
            AppError::Analysis("status 500".into()).to_string(),
            "Diagnostic analysis failed. Please try again."
        );
        assert_eq!(
            AppError::Report("status 503".into()).to_string(),
            "Report generation failed."
        );
    }

    #[test]
    fn test_detail_is_kept_out_of_display() {
        let err = AppError::Analysis("connection refused".into());
        assert_eq!(err.detail(), "connection refused");
        assert!(!err.to_string().contains("connection refused"));
    }
}
