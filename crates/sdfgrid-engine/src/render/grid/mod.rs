//! Procedural grid renderer.
//!
//! One-time setup builds a static full-screen quad and the grid shader program;
//! each frame uploads `GridUniforms` and issues a single 4-vertex strip draw.
//!
//! Lifecycle is `Uninitialized -> Ready`, with no way back. Drawing before `init`
//! succeeds is a programming error reported as `RenderError::DrawBeforeReady`.

mod program;
mod quad;
mod texture_units;
mod uniforms;

pub use program::{
    compile_shader_program, link, validate_stage, ShaderProgram, FRAGMENT_ENTRY,
    GRID_FRAGMENT_WGSL, GRID_VERTEX_WGSL, VERTEX_ENTRY,
};
pub use quad::create_vertex_buffer;
pub use texture_units::{TextureUnits, MAX_TEXTURE_UNITS};
pub use uniforms::UniformStore;

use crate::error::RenderError;
use crate::field::GridUniforms;
use crate::render::{RenderCtx, RenderTarget};

use quad::QUAD_VERTEX_COUNT;
use uniforms::{warn_rejection, GridUniformsGpu};

/// GPU objects owned by a ready renderer.
struct GridResources {
    program: ShaderProgram,
    quad_vbo: wgpu::Buffer,
    uniform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

enum RendererState {
    Uninitialized,
    Ready(GridResources),
}

impl RendererState {
    fn resources(&self) -> Result<&GridResources, RenderError> {
        match self {
            RendererState::Ready(res) => Ok(res),
            RendererState::Uninitialized => Err(RenderError::DrawBeforeReady),
        }
    }
}

/// Renderer for the infinite grid and pointer highlight.
pub struct GridRenderer {
    state: RendererState,
    uniforms: UniformStore,
    textures: TextureUnits<wgpu::TextureView>,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self {
            state: RendererState::Uninitialized,
            uniforms: UniformStore::new(),
            textures: TextureUnits::default(),
        }
    }
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, RendererState::Ready(_))
    }

    /// Creates the quad, program and uniform bindings. Calling it again once ready
    /// is a no-op.
    pub fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<(), RenderError> {
        if let RendererState::Ready(res) = &self.state {
            if res.program.format() != ctx.surface_format {
                log::warn!(
                    "surface format changed to {:?}; grid program stays on {:?}",
                    ctx.surface_format,
                    res.program.format()
                );
            }
            return Ok(());
        }

        let quad_vbo = create_vertex_buffer(ctx.device)?;
        let program = compile_shader_program(
            ctx.device,
            ctx.surface_format,
            GRID_VERTEX_WGSL,
            GRID_FRAGMENT_WGSL,
        )?;

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sdfgrid uniform ubo"),
            size: std::mem::size_of::<GridUniformsGpu>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdfgrid bind group"),
            layout: program.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.state = RendererState::Ready(GridResources {
            program,
            quad_vbo,
            uniform_ubo,
            bind_group,
        });

        log::info!("grid renderer ready ({:?})", ctx.surface_format);
        Ok(())
    }

    /// Offers this frame's uniforms. Invalid values are rejected and the previous
    /// ones stay in effect.
    pub fn submit_uniforms(&mut self, candidate: GridUniforms) -> Result<(), RenderError> {
        self.uniforms.submit(candidate)
    }

    /// Uniforms the next draw will use.
    pub fn uniforms(&self) -> Option<GridUniforms> {
        self.uniforms.current()
    }

    /// Binds `texture` to a numbered unit for shaders that sample. Returns the
    /// texture previously bound there.
    pub fn bind_texture_unit(
        &mut self,
        unit: u32,
        texture: wgpu::TextureView,
    ) -> Result<Option<wgpu::TextureView>, RenderError> {
        self.textures.bind(unit, texture)
    }

    pub fn texture_units(&self) -> &TextureUnits<wgpu::TextureView> {
        &self.textures
    }

    /// Draws one frame: clears `target`, uploads uniforms, draws the quad.
    ///
    /// Rejected uniforms are logged and the last accepted ones are drawn instead;
    /// if none were ever accepted the frame is only cleared.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        candidate: GridUniforms,
    ) -> Result<(), RenderError> {
        let res = self
            .state
            .resources()
            .inspect_err(|_| log::error!("grid draw requested before init"))?;

        if let Err(RenderError::InvalidUniformState { reason }) = self.uniforms.submit(candidate) {
            warn_rejection(&self.uniforms, reason);
        }

        let uniforms = self.uniforms.current();
        if let Some(u) = uniforms {
            ctx.queue
                .write_buffer(&res.uniform_ubo, 0, bytemuck::bytes_of(&GridUniformsGpu::from(u)));
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sdfgrid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if uniforms.is_none() {
            return Ok(());
        }

        rpass.set_pipeline(res.program.pipeline());
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.quad_vbo.slice(..));
        rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Viewport};

    fn uniforms(h: f32) -> GridUniforms {
        GridUniforms::new(Viewport::new(800.0, h), Vec2::new(400.0, 300.0), 1.0)
    }

    #[test]
    fn starts_uninitialized() {
        let r = GridRenderer::new();
        assert!(!r.is_ready());
        assert!(r.uniforms().is_none());
        assert_eq!(r.texture_units().capacity(), MAX_TEXTURE_UNITS);
    }

    #[test]
    fn uniforms_can_be_staged_before_init() {
        let mut r = GridRenderer::new();
        r.submit_uniforms(uniforms(600.0)).unwrap();
        assert!(r.submit_uniforms(uniforms(0.0)).is_err());
        assert_eq!(r.uniforms(), Some(uniforms(600.0)));
    }

    #[test]
    fn uninitialized_renderer_refuses_to_draw() {
        let r = GridRenderer::new();
        let err = r.state.resources().err().unwrap();
        assert!(matches!(err, RenderError::DrawBeforeReady));
        assert!(err.is_fatal());
    }

    #[test]
    fn rejected_uniforms_are_not_fatal() {
        let rejected = RenderError::InvalidUniformState {
            reason: crate::error::UniformRejection::Scale,
        };
        assert!(!rejected.is_fatal());
    }
}
