use serde::Deserialize;

/// Response body of `POST /analyze`.
///
/// Image fields are base64-encoded PNGs. `gradcam_image` is absent when the
/// backend could not produce a heatmap; the client renders the rest of the
/// result anyway. `score` is the raw sigmoid output and is not sent by every
/// backend version, so it is optional too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub original_image: String,
    pub gradcam_image: Option<String>,
    pub label: String,
    pub is_malignant: bool,
    pub score: Option<f64>,
    pub percent: f64,
    pub class_id: i64,
}

/// Format a confidence percentage for display: `97.5` → `"97.50%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// Format the raw model score for display, 4 decimal places.
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}
