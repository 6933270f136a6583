/// GPU-accelerated preview rendering module
///
/// This module is the rendering host for the style descriptor: the uploaded
/// image lives on the GPU as a texture, and a WGSL shader evaluates the
/// current filter and transform expressions in real time.
///
/// Architecture:
/// - `shaders.rs` - WGSL shader source code
/// - `pipeline.rs` - wgpu render pipeline management
///
/// The pipeline renders the styled image into a preview-sized target and
/// reads the RGBA bytes back for the image widget.

pub mod pipeline;
pub mod shaders;

pub use pipeline::RenderPipeline;
