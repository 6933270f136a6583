/// WGSL shader code for the live image preview
///
/// The fragment shader is the rendering host for the style descriptor: it
/// maps every destination pixel back through the inverse transform, samples
/// the uploaded image, and then evaluates the filter expression with the
/// standard formulas (multiply for brightness, pivot around mid-gray for
/// contrast, Rec. 709 luminance mix for saturation).

/// Filter-and-transform shader for the preview image
pub const PREVIEW_SHADER: &str = r#"
// ========== Vertex Shader ==========
// Full-screen triangle (no vertex buffers needed)

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var output: VertexOutput;

    // Full-screen triangle covering entire viewport
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);

    output.clip_position = vec4<f32>(x, -y, 0.0, 1.0);
    output.tex_coords = vec2<f32>((x + 1.0) * 0.5, (y + 1.0) * 0.5);

    return output;
}

// ========== Fragment Shader ==========

// Uniform buffer holding the style descriptor in GPU form
struct Style {
    brightness: f32,          // filter amount, 1.0 = unchanged
    contrast: f32,            // filter amount, 1.0 = unchanged
    saturation: f32,          // filter amount, 1.0 = unchanged
    _pad: f32,                // 16-byte alignment
    inv_transform: vec4<f32>, // inverse 2x2 matrix, column-major
    dest_extent: vec2<f32>,   // render canvas size in source pixel units
    _pad2: vec2<f32>,
}

@group(0) @binding(0)
var input_texture: texture_2d<f32>;

@group(0) @binding(1)
var texture_sampler: sampler;

@group(0) @binding(2)
var<uniform> style: Style;

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let source_dims = vec2<f32>(textureDimensions(input_texture));

    // 1. Inverse-map this destination pixel through the transform.
    //    The canvas spans the transformed bounding box, so work in centered
    //    source pixel units, then convert back to texture coordinates.
    let centered = (input.tex_coords - vec2<f32>(0.5, 0.5)) * style.dest_extent;
    let inverse = mat2x2<f32>(style.inv_transform.xy, style.inv_transform.zw);
    let source = inverse * centered;
    let source_uv = source / source_dims + vec2<f32>(0.5, 0.5);

    // Pixels that map outside the image stay fully transparent
    let inside = select(
        0.0,
        1.0,
        all(source_uv >= vec2<f32>(0.0, 0.0)) && all(source_uv <= vec2<f32>(1.0, 1.0))
    );

    // Sample unconditionally to keep control flow uniform
    let clamped_uv = clamp(source_uv, vec2<f32>(0.0, 0.0), vec2<f32>(1.0, 1.0));
    let sampled = textureSampleLevel(input_texture, texture_sampler, clamped_uv, 0.0);

    // 2. Brightness: plain multiply
    var color = sampled.rgb * style.brightness;

    // 3. Contrast: pivot around mid-gray
    color = (color - vec3<f32>(0.5)) * style.contrast + vec3<f32>(0.5);

    // 4. Saturation: mix between the Rec. 709 luminance and the color
    let luminance = dot(color, vec3<f32>(0.2126, 0.7152, 0.0722));
    color = mix(vec3<f32>(luminance), color, style.saturation);

    // 5. Clamp to valid range
    color = clamp(color, vec3<f32>(0.0), vec3<f32>(1.0));

    return vec4<f32>(color * inside, sampled.a * inside);
}
"#;

/// Get the shader source code
pub fn get_shader() -> &'static str {
    PREVIEW_SHADER
}
