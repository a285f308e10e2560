//! Renderer error taxonomy.

use thiserror::Error;

/// Pipeline stage that failed during one-time GPU setup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SetupStage {
    VertexBuffer,
    VertexShader,
    FragmentShader,
    Link,
}

impl std::fmt::Display for SetupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SetupStage::VertexBuffer => "vertex buffer",
            SetupStage::VertexShader => "vertex shader",
            SetupStage::FragmentShader => "fragment shader",
            SetupStage::Link => "program link",
        };
        f.write_str(name)
    }
}

/// Why a set of frame uniforms was rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformRejection {
    /// Width or height is zero, negative or not finite.
    Resolution,
    /// Scale is zero, negative or not finite.
    Scale,
}

impl std::fmt::Display for UniformRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniformRejection::Resolution => f.write_str("resolution must be finite and > 0"),
            UniformRejection::Scale => f.write_str("scale must be finite and > 0"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// One-time GPU setup failed. `diagnostic` carries the compiler/driver text verbatim.
    #[error("{stage} initialization failed:\n{diagnostic}")]
    InitializationFailure { stage: SetupStage, diagnostic: String },

    #[error("invalid uniform state: {reason}")]
    InvalidUniformState { reason: UniformRejection },

    /// `draw` was called before GPU setup completed.
    #[error("draw called before the renderer was initialized")]
    DrawBeforeReady,

    #[error("texture unit {unit} out of range (capacity {capacity})")]
    TextureUnitOutOfRange { unit: u32, capacity: u32 },

    /// Software rasterization was asked for more pixels than it will allocate.
    #[error("{width}x{height} frame is too large to rasterize")]
    FramebufferTooLarge { width: u32, height: u32 },
}

impl RenderError {
    pub(crate) fn init(stage: SetupStage, diagnostic: impl Into<String>) -> Self {
        RenderError::InitializationFailure { stage, diagnostic: diagnostic.into() }
    }

    /// True for errors that must stop the host loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::InitializationFailure { .. } | RenderError::DrawBeforeReady
        )
    }
}
