use crate::error::{RenderError, SetupStage};

use super::quad::QuadVertex;
use super::uniforms::{uniform_min_binding_size, GridUniformsGpu};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

pub const GRID_VERTEX_WGSL: &str = include_str!("shaders/grid.vert.wgsl");
pub const GRID_FRAGMENT_WGSL: &str = include_str!("shaders/grid.frag.wgsl");

/// Linked vertex + fragment pair, ready to draw the full-screen quad.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
}

impl ShaderProgram {
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Compiles both stages and links them into a render pipeline targeting `format`.
///
/// Sources are parsed and validated with naga first so any error carries the
/// compiler's rendered diagnostic; the driver's own compilation messages are checked
/// after module creation as well. On success the pipeline is known to be usable.
pub fn compile_shader_program(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram, RenderError> {
    let vs_ir = validate_stage(vertex_source, SetupStage::VertexShader)?;
    let fs_ir = validate_stage(fragment_source, SetupStage::FragmentShader)?;
    link(&vs_ir, &fs_ir)?;

    // wgpu validation errors from here on are returned, not sent to the
    // uncaptured error handler.
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let vs = create_module(device, "sdfgrid vertex shader", vertex_source, SetupStage::VertexShader)?;
    let fs = create_module(device, "sdfgrid fragment shader", fragment_source, SetupStage::FragmentShader)?;

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("sdfgrid bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(uniform_min_binding_size()),
            },
            count: None,
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sdfgrid pipeline layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("sdfgrid pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    if let Some(e) = pollster::block_on(scope.pop()) {
        return Err(RenderError::init(SetupStage::Link, e.to_string()));
    }

    log::debug!("linked grid shader program for {format:?}");

    Ok(ShaderProgram {
        pipeline,
        bind_group_layout,
        format,
    })
}

/// Parses and validates one WGSL stage. Errors carry naga's annotated source excerpt.
pub fn validate_stage(source: &str, stage: SetupStage) -> Result<naga::Module, RenderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RenderError::init(stage, e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator
        .validate(&module)
        .map_err(|e| RenderError::init(stage, e.emit_to_string(source)))?;

    Ok(module)
}

/// Interface checks between the two stages and the host-side layouts.
///
/// - `vs_main` exists as a vertex entry point reading a float position at
///   `@location(0)` and no other vertex attribute
/// - `fs_main` exists as a fragment entry point writing `@location(0)`
/// - every fragment input location is a vertex output of the same type
/// - the only bound resource is a fragment uniform at `@group(0) @binding(0)`
///   whose size matches `GridUniformsGpu`
pub fn link(vertex: &naga::Module, fragment: &naga::Module) -> Result<(), RenderError> {
    let vs_entry = find_entry(vertex, VERTEX_ENTRY, naga::ShaderStage::Vertex)?;
    let fs_entry = find_entry(fragment, FRAGMENT_ENTRY, naga::ShaderStage::Fragment)?;

    let vs_inputs = entry_inputs(vertex, vs_entry);
    if !vs_inputs.iter().any(|&(loc, _)| loc == 0) {
        return Err(link_error(format!(
            "`{VERTEX_ENTRY}` does not consume a position at @location(0)"
        )));
    }
    for &(location, ty) in &vs_inputs {
        if location != 0 {
            return Err(link_error(format!(
                "`{VERTEX_ENTRY}` reads @location({location}) but the quad only provides @location(0)"
            )));
        }
        if !is_float(&vertex.types[ty].inner) {
            return Err(link_error(format!(
                "`{VERTEX_ENTRY}` position at @location(0) is not a float type"
            )));
        }
    }

    if !entry_outputs(fragment, fs_entry).iter().any(|&(loc, _)| loc == 0) {
        return Err(link_error(format!(
            "`{FRAGMENT_ENTRY}` does not write a colour to @location(0)"
        )));
    }

    let vs_outputs = entry_outputs(vertex, vs_entry);
    for (location, ty) in entry_inputs(fragment, fs_entry) {
        let matching = vs_outputs.iter().find(|&&(loc, _)| loc == location);
        match matching {
            None => {
                return Err(link_error(format!(
                    "`{FRAGMENT_ENTRY}` reads @location({location}) which `{VERTEX_ENTRY}` never writes"
                )));
            }
            Some(&(_, vs_ty)) if vertex.types[vs_ty].inner != fragment.types[ty].inner => {
                return Err(link_error(format!(
                    "@location({location}) has different types in the two stages"
                )));
            }
            Some(_) => {}
        }
    }

    if let Some(binding) = vertex.global_variables.iter().find_map(|(_, var)| var.binding) {
        return Err(link_error(format!(
            "vertex stage declares a resource at @group({}) @binding({}); the pipeline layout has none",
            binding.group, binding.binding
        )));
    }
    let stray = fragment
        .global_variables
        .iter()
        .filter_map(|(_, var)| var.binding)
        .find(|b| (b.group, b.binding) != (0, 0));
    if let Some(b) = stray {
        return Err(link_error(format!(
            "fragment stage declares a resource at @group({}) @binding({}); only @group(0) @binding(0) is bound",
            b.group, b.binding
        )));
    }

    let expected = std::mem::size_of::<GridUniformsGpu>() as u32;
    let uniform = fragment.global_variables.iter().find_map(|(_, var)| {
        let bound_at_zero = matches!(
            var.binding,
            Some(naga::ResourceBinding { group: 0, binding: 0 })
        );
        (bound_at_zero && var.space == naga::AddressSpace::Uniform).then_some(var.ty)
    });

    match uniform {
        None => Err(RenderError::init(
            SetupStage::Link,
            "fragment stage declares no uniform block at @group(0) @binding(0)",
        )),
        Some(ty) => {
            let size = fragment.types[ty].inner.size(fragment.to_ctx());
            if size == expected {
                Ok(())
            } else {
                Err(RenderError::init(
                    SetupStage::Link,
                    format!("uniform block is {size} bytes, host layout is {expected}"),
                ))
            }
        }
    }
}

fn link_error(diagnostic: impl Into<String>) -> RenderError {
    RenderError::init(SetupStage::Link, diagnostic)
}

fn is_float(inner: &naga::TypeInner) -> bool {
    match inner {
        naga::TypeInner::Scalar(scalar) | naga::TypeInner::Vector { scalar, .. } => {
            scalar.kind == naga::ScalarKind::Float
        }
        _ => false,
    }
}

/// `@location` slots read by an entry point, including those inside I/O structs.
fn entry_inputs(module: &naga::Module, ep: &naga::EntryPoint) -> Vec<(u32, naga::Handle<naga::Type>)> {
    let args = ep.function.arguments.iter().map(|a| (a.binding.as_ref(), a.ty));
    locations(module, args)
}

/// `@location` slots written by an entry point.
fn entry_outputs(module: &naga::Module, ep: &naga::EntryPoint) -> Vec<(u32, naga::Handle<naga::Type>)> {
    let result = ep.function.result.iter().map(|r| (r.binding.as_ref(), r.ty));
    locations(module, result)
}

fn locations<'a>(
    module: &naga::Module,
    bindings: impl Iterator<Item = (Option<&'a naga::Binding>, naga::Handle<naga::Type>)>,
) -> Vec<(u32, naga::Handle<naga::Type>)> {
    let mut out = Vec::new();
    for (binding, ty) in bindings {
        match binding {
            Some(naga::Binding::Location { location, .. }) => out.push((*location, ty)),
            Some(naga::Binding::BuiltIn(_)) => {}
            None => {
                if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                    out.extend(members.iter().filter_map(|m| match m.binding {
                        Some(naga::Binding::Location { location, .. }) => Some((location, m.ty)),
                        _ => None,
                    }));
                }
            }
        }
    }
    out
}

fn find_entry<'m>(
    module: &'m naga::Module,
    name: &str,
    stage: naga::ShaderStage,
) -> Result<&'m naga::EntryPoint, RenderError> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == stage)
        .ok_or_else(|| {
            RenderError::init(
                SetupStage::Link,
                format!("no {stage:?} entry point named `{name}`"),
            )
        })
}

fn create_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
    stage: SetupStage,
) -> Result<wgpu::ShaderModule, RenderError> {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let errors: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();

    if errors.is_empty() {
        Ok(module)
    } else {
        Err(RenderError::init(stage, errors.join("\n")))
    }
}
