//! WGSL sources for the renderer.
//!
//! A single module with two pipelines' entry points that share one uniform
//! block:
//!
//! - `vs_background` / `fs_background`: fullscreen triangle painting the
//!   solid or gradient background.
//! - `vs_primitive` / `fs_primitive`: one instanced quad per circle or line,
//!   with analytic edge coverage for anti-aliasing.
//!
//! Colours arrive as sRGB-encoded values. When the swapchain format is
//! itself sRGB, `linear_output` is set and the shader decodes them so the
//! hardware re-encodes to the same value.

/// Entry points for the background pipeline.
pub const BACKGROUND_VS: &str = "vs_background";
pub const BACKGROUND_FS: &str = "fs_background";

/// Entry points for the primitive pipeline.
pub const PRIMITIVE_VS: &str = "vs_primitive";
pub const PRIMITIVE_FS: &str = "fs_primitive";

pub const RENDER_WGSL: &str = r#"
struct Globals {
    // Size the simulation draws in, in logical pixels.
    canvas_size: vec2<f32>,
    // Size of the window, in logical pixels.
    viewport_size: vec2<f32>,
    gradient_from: vec4<f32>,
    gradient_to: vec4<f32>,
    // xy: unit direction (y down), z: gradient line length.
    gradient_axis: vec4<f32>,
    linear_output: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
};

@group(0) @binding(0) var<uniform> globals: Globals;

fn srgb_to_linear(c: vec3<f32>) -> vec3<f32> {
    let lo = c / 12.92;
    let hi = pow((c + vec3<f32>(0.055)) / 1.055, vec3<f32>(2.4));
    return select(hi, lo, c <= vec3<f32>(0.04045));
}

fn encode_output(c: vec4<f32>) -> vec4<f32> {
    if (globals.linear_output != 0u) {
        return vec4<f32>(srgb_to_linear(c.rgb), c.a);
    }
    return c;
}

// ---- Background ----

struct BackgroundOut {
    @builtin(position) position: vec4<f32>,
    @location(0) pixel: vec2<f32>,
};

@vertex
fn vs_background(@builtin(vertex_index) index: u32) -> BackgroundOut {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BackgroundOut;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.pixel = vec2<f32>(uv.x, 1.0 - uv.y) * globals.viewport_size;
    return out;
}

@fragment
fn fs_background(in: BackgroundOut) -> @location(0) vec4<f32> {
    let center = globals.viewport_size * 0.5;
    let span = max(globals.gradient_axis.z, 1e-6);
    let t = clamp(dot(in.pixel - center, globals.gradient_axis.xy) / span + 0.5, 0.0, 1.0);
    return encode_output(mix(globals.gradient_from, globals.gradient_to, t));
}

// ---- Circles and lines ----

struct PrimitiveIn {
    @location(0) start: vec2<f32>,
    @location(1) end: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) size: f32,
    @location(4) kind: u32,
};

struct PrimitiveOut {
    @builtin(position) position: vec4<f32>,
    // Position relative to the primitive, in pixels.
    @location(0) local: vec2<f32>,
    // Circle: (radius, 0). Line: (half length, half width).
    @location(1) extent: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) @interpolate(flat) kind: u32,
};

// Extra pixels around each primitive so edge coverage can fade out.
const FRINGE: f32 = 1.0;

fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    return corners[index];
}

fn to_clip(pixel: vec2<f32>) -> vec4<f32> {
    let ndc = pixel / globals.canvas_size * 2.0 - 1.0;
    return vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
}

@vertex
fn vs_primitive(@builtin(vertex_index) index: u32, in: PrimitiveIn) -> PrimitiveOut {
    let corner = quad_corner(index);
    var out: PrimitiveOut;
    out.color = in.color;
    out.kind = in.kind;

    if (in.kind == 0u) {
        let reach = in.size + FRINGE;
        out.local = corner * reach;
        out.extent = vec2<f32>(in.size, 0.0);
        out.position = to_clip(in.start + out.local);
    } else {
        let axis = in.end - in.start;
        let len = length(axis);
        var dir = vec2<f32>(1.0, 0.0);
        if (len > 0.0) {
            dir = axis / len;
        }
        let normal = vec2<f32>(-dir.y, dir.x);
        let half_len = len * 0.5;
        out.local = vec2<f32>(corner.x * (half_len + FRINGE), corner.y * (in.size + FRINGE));
        out.extent = vec2<f32>(half_len, in.size);
        let center = (in.start + in.end) * 0.5;
        out.position = to_clip(center + dir * out.local.x + normal * out.local.y);
    }
    return out;
}

@fragment
fn fs_primitive(in: PrimitiveOut) -> @location(0) vec4<f32> {
    var coverage: f32;
    if (in.kind == 0u) {
        coverage = clamp(in.extent.x - length(in.local) + 0.5, 0.0, 1.0);
    } else {
        let along = clamp(in.extent.x - abs(in.local.x) + 0.5, 0.0, 1.0);
        let across = clamp(in.extent.y - abs(in.local.y) + 0.5, 0.0, 1.0);
        coverage = along * across;
    }
    if (coverage <= 0.0) {
        discard;
    }
    return encode_output(vec4<f32>(in.color.rgb, in.color.a * coverage));
}
"#;
