/// View construction
///
/// Pure functions from state to widgets; all interaction flows back to the
/// update loop as `Message` values.
///
/// - dropzone.rs: the drag-and-drop target and file picker trigger
/// - results.rs: loader, results panel, and the transient alert banner

use iced::Color;

pub mod dropzone;
pub mod results;

/// Teal accent used for info text and highlights (#00c0a3)
pub const ACCENT: Color = Color {
    r: 0.0,
    g: 0.753,
    b: 0.639,
    a: 1.0,
};

/// Red used for error text and the malignant badge (#ff5252)
pub const DANGER: Color = Color {
    r: 1.0,
    g: 0.322,
    b: 0.322,
    a: 1.0,
};

/// Muted grey for captions and hints
pub const MUTED: Color = Color {
    r: 0.55,
    g: 0.57,
    b: 0.60,
    a: 1.0,
};
