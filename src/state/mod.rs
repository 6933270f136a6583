/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Edit parameters for the loaded image (edit.rs)
/// - Fixed quick presets (preset.rs)

pub mod data;
pub mod edit;
pub mod preset;
