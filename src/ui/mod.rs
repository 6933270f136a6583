/// UI building blocks
///
/// - `controls.rs` - sliders, flip toggles, presets, reset
/// - `preview.rs` - the styled image preview and the empty state

pub mod controls;
pub mod preview;
