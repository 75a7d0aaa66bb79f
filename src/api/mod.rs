/// Backend API layer
///
/// The diagnostic backend is an external service reachable through two
/// endpoints: `POST /analyze` (JSON classification + Grad-CAM payloads) and
/// `POST /report` (binary `.docx` document). This module owns the wire types
/// and the HTTP client; everything else in the app treats the backend as a
/// black box behind these two calls.

pub mod client;
pub mod types;
