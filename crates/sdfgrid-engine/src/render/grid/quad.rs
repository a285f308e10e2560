use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::error::{RenderError, SetupStage};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub pos: [f32; 2], // clip space
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Full-screen quad as a triangle strip: two triangles covering clip space.
pub(crate) const FULLSCREEN_QUAD: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
    QuadVertex { pos: [1.0, 1.0] },
];

pub(crate) const QUAD_VERTEX_COUNT: u32 = FULLSCREEN_QUAD.len() as u32;

/// Uploads the full-screen quad once. The buffer is `VERTEX` only and never rewritten.
pub fn create_vertex_buffer(device: &wgpu::Device) -> Result<wgpu::Buffer, RenderError> {
    let contents: &[u8] = bytemuck::cast_slice(&FULLSCREEN_QUAD);
    check_buffer_fits(contents.len() as u64, device.limits().max_buffer_size)?;

    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("sdfgrid quad vbo"),
        contents,
        usage: wgpu::BufferUsages::VERTEX,
    });

    log::debug!("created full-screen quad vbo ({} bytes)", contents.len());
    Ok(buffer)
}

fn check_buffer_fits(size: u64, max_buffer_size: u64) -> Result<(), RenderError> {
    if size > max_buffer_size {
        return Err(RenderError::init(
            SetupStage::VertexBuffer,
            format!("quad needs {size} bytes, device allows {max_buffer_size}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_clip_space() {
        let xs: Vec<f32> = FULLSCREEN_QUAD.iter().map(|v| v.pos[0]).collect();
        let ys: Vec<f32> = FULLSCREEN_QUAD.iter().map(|v| v.pos[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
    }

    #[test]
    fn strip_triangles_do_not_degenerate() {
        // Signed area of each strip triangle must be non-zero.
        for w in FULLSCREEN_QUAD.windows(3) {
            let [a, b, c] = [w[0].pos, w[1].pos, w[2].pos];
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]);
            assert!(area.abs() > 0.0);
        }
    }

    #[test]
    fn vertex_stride_is_two_floats() {
        assert_eq!(QuadVertex::layout().array_stride, 8);
        assert_eq!(QUAD_VERTEX_COUNT, 4);
    }

    #[test]
    fn oversized_buffer_is_an_initialization_failure() {
        let err = check_buffer_fits(32, 16).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InitializationFailure { stage: SetupStage::VertexBuffer, .. }
        ));
        assert!(check_buffer_fits(32, 32).is_ok());
    }
}
