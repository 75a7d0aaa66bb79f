use reqwest::multipart;

use crate::api::types::AnalysisResult;
use crate::error::AppError;
use crate::intake::SelectedFile;

/// HTTP client for the diagnostic backend.
///
/// Cheap to clone (reqwest clients share their connection pool), so each
/// background task carries its own copy.
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    base_url: String,
}

impl Backend {
    pub fn new(base_url: &str) -> Self {
        Backend {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Submit the selected image to `/analyze` and parse the classification.
    pub async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AppError> {
        let form = self
            .upload_form(file)
            .await
            .map_err(AppError::Analysis)?;

        let response = self
            .http
            .post(self.endpoint("analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Analysis(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Analysis(format!(
                "analyze returned status {}",
                response.status()
            )));
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| AppError::Analysis(format!("malformed analyze response: {}", e)))
    }

    /// Submit the selected image to `/report` and return the document bytes.
    pub async fn report(&self, file: &SelectedFile) -> Result<Vec<u8>, AppError> {
        let form = self
            .upload_form(file)
            .await
            .map_err(AppError::Report)?;

        let response = self
            .http
            .post(self.endpoint("report"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Report(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Report(format!(
                "report returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Report(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    /// Build the multipart form both endpoints expect: one binary field named
    /// `file`, carrying the image's filename and MIME type.
    async fn upload_form(&self, file: &SelectedFile) -> Result<multipart::Form, String> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| format!("failed to read {}: {}", file.path.display(), e))?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| format!("invalid MIME type {}: {}", file.mime, e))?;

        Ok(multipart::Form::new().part("file", part))
    }
}
