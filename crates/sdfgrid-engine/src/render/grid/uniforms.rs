use bytemuck::{Pod, Zeroable};

use crate::error::{RenderError, UniformRejection};
use crate::field::GridUniforms;

/// GPU layout of `GridUniforms` (32 bytes, matches `struct GridUniforms` in
/// `grid.frag.wgsl`).
///
///  offset  0  resolution  [f32; 2]
///  offset  8  mouse       [f32; 2]
///  offset 16  scale       f32
///  offset 20  _pad        [f32; 3]
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct GridUniformsGpu {
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub scale: f32,
    pub _pad: [f32; 3],
}

impl From<GridUniforms> for GridUniformsGpu {
    fn from(u: GridUniforms) -> Self {
        Self {
            resolution: u.resolution.size().to_array(),
            mouse: u.mouse.to_array(),
            scale: u.scale,
            _pad: [0.0; 3],
        }
    }
}

/// Returns the minimum binding size for the uniform buffer.
pub(crate) fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<GridUniformsGpu>() as u64)
        .expect("GridUniformsGpu has non-zero size by construction")
}

/// Holds the last uniforms that passed validation.
///
/// Invalid candidates are rejected and the previous value stays current, so a
/// transient zero-height resize never reaches the shader.
#[derive(Debug, Default)]
pub struct UniformStore {
    current: Option<GridUniforms>,
    rejected_streak: u32,
}

impl UniformStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `candidate` if valid; otherwise keeps the previous uniforms.
    pub fn submit(&mut self, candidate: GridUniforms) -> Result<(), RenderError> {
        match candidate.validate() {
            Ok(()) => {
                self.current = Some(candidate);
                self.rejected_streak = 0;
                Ok(())
            }
            Err(reason) => {
                self.rejected_streak = self.rejected_streak.saturating_add(1);
                Err(RenderError::InvalidUniformState { reason })
            }
        }
    }

    /// Last accepted uniforms, if any were ever accepted.
    pub fn current(&self) -> Option<GridUniforms> {
        self.current
    }

    /// Number of consecutive rejections since the last accepted submit.
    pub fn rejected_streak(&self) -> u32 {
        self.rejected_streak
    }
}

/// Logs a rejection once per run of consecutive rejections.
pub(crate) fn warn_rejection(store: &UniformStore, reason: UniformRejection) {
    if store.rejected_streak() == 1 {
        match store.current() {
            Some(kept) => log::warn!(
                "rejected frame uniforms ({reason}); keeping {}x{} @ scale {}",
                kept.resolution.width,
                kept.resolution.height,
                kept.scale
            ),
            None => log::warn!("rejected frame uniforms ({reason}); nothing to draw yet"),
        }
    }
}
