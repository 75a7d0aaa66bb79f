/// Session state for the diagnostic flow
///
/// The visibility invariant lives here: at most one of {loader, results
/// panel} is active through `Phase`, with error presentation carried by an
/// `Alert` overlay. A failed analysis drops back to `Phase::Idle` with an
/// error alert, so loader, results and error banner never show together.

use base64::Engine;
use iced::widget::image;

use crate::api::types::AnalysisResult;
use crate::error::AppError;

/// Primary UI phase of the analyze flow.
#[derive(Debug, Clone)]
pub enum Phase {
    /// Nothing in flight, nothing rendered
    Idle,
    /// An analyze request is in flight; the loader is visible
    Loading,
    /// A completed analysis is on screen
    Results(AnalysisView),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn results(&self) -> Option<&AnalysisView> {
        match self {
            Phase::Results(view) => Some(view),
            _ => None,
        }
    }
}

/// A decoded analysis ready for rendering.
///
/// The browser original held these values only in the DOM; here the base64
/// payloads are decoded once into image handles and kept until the next
/// selection replaces them.
#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub original: image::Handle,
    pub gradcam: Option<image::Handle>,
    pub label: String,
    pub is_malignant: bool,
    pub percent: f64,
    pub score: Option<f64>,
    pub class_id: i64,
}

impl AnalysisView {
    /// Decode an analyze response into renderable form.
    ///
    /// A broken `original_image` payload fails the whole result; a broken
    /// Grad-CAM payload is treated like the backend omitting it, since the
    /// classification itself is still valid.
    pub fn from_result(result: AnalysisResult) -> Result<Self, AppError> {
        let original = decode_png(&result.original_image)
            .map_err(AppError::BadImagePayload)?;

        let gradcam = match result.gradcam_image.as_deref() {
            Some(payload) => match decode_png(payload) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    eprintln!("⚠️  Dropping undecodable Grad-CAM payload: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(AnalysisView {
            original,
            gradcam,
            label: result.label,
            is_malignant: result.is_malignant,
            percent: result.percent,
            score: result.score,
            class_id: result.class_id,
        })
    }
}

/// Decode a base64 PNG payload into an iced image handle.
fn decode_png(payload: &str) -> Result<image::Handle, String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| format!("invalid base64: {}", e))?;

    let decoded = ::image::load_from_memory(&bytes)
        .map_err(|e| format!("invalid image data: {}", e))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    Ok(image::Handle::from_rgba(width, height, decoded.into_raw()))
}

/// Transient banner severity, mirroring the original's info/error styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Info,
    Error,
}

/// A transient user-visible message. Auto-dismissed after a few seconds;
/// `seq` lets the dismiss timer recognize when a newer alert replaced it.
#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    pub seq: u64,
}

impl Alert {
    pub fn info(message: impl Into<String>, seq: u64) -> Self {
        Alert {
            message: message.into(),
            kind: AlertKind::Info,
            seq,
        }
    }

    pub fn error(err: &AppError, seq: u64) -> Self {
        Alert {
            message: err.to_string(),
            kind: AlertKind::Error,
            seq,
        }
    }
}

/// 1x1 RGBA PNG, the smallest payload the backend could plausibly send.
#[cfg(test)]
pub(crate) const TINY_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";
