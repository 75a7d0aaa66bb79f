/// State management module
///
/// This module holds everything the update loop mutates:
/// - The session state driving visibility (session.rs)
/// - Persisted client options (settings.rs)

pub mod session;
pub mod settings;
