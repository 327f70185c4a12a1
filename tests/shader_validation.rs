//! Validates the render shader with naga, the same front end wgpu uses.

use particlebg::gpu::shaders::{
    BACKGROUND_FS, BACKGROUND_VS, PRIMITIVE_FS, PRIMITIVE_VS, RENDER_WGSL,
};

fn parse() -> naga::Module {
    match naga::front::wgsl::parse_str(RENDER_WGSL) {
        Ok(module) => module,
        Err(e) => panic!("WGSL parse error:\n{}", e.emit_to_string(RENDER_WGSL)),
    }
}

#[test]
fn test_render_shader_validates() {
    let module = parse();
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("WGSL validation error: {:?}", e);
    }
}

#[test]
fn test_render_shader_entry_points() {
    let module = parse();
    let stage_of = |name: &str| {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .map(|ep| ep.stage)
    };

    assert_eq!(stage_of(BACKGROUND_VS), Some(naga::ShaderStage::Vertex));
    assert_eq!(stage_of(BACKGROUND_FS), Some(naga::ShaderStage::Fragment));
    assert_eq!(stage_of(PRIMITIVE_VS), Some(naga::ShaderStage::Vertex));
    assert_eq!(stage_of(PRIMITIVE_FS), Some(naga::ShaderStage::Fragment));
}

#[test]
fn test_globals_binding_matches_uniform_size() {
    let module = parse();
    let globals = module
        .global_variables
        .iter()
        .map(|(_, var)| var)
        .find(|var| var.space == naga::AddressSpace::Uniform)
        .expect("shader has a uniform block");

    let size = module.types[globals.ty].inner.size(module.to_ctx());
    assert_eq!(size as usize, std::mem::size_of::<particlebg::gpu::Globals>());
}
