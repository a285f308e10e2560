use winit::window::{Window, WindowId};

use crate::coords::{Vec2, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::field::GridUniforms;
use crate::input::{InputFrame, InputState, PointerState};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Per-window handles.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Viewport and pointer captured once at the start of a frame.
///
/// Everything drawn in the frame reads from this value; input arriving
/// mid-frame lands in the next snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub viewport: Viewport,
    pub pointer: PointerState,
}

impl FrameSnapshot {
    /// Uniform block for this frame at the given zoom scale.
    pub fn uniforms(&self, scale: f32) -> GridUniforms {
        GridUniforms::new(
            self.viewport,
            Vec2::new(self.pointer.x, self.pointer.y),
            scale,
        )
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    /// Last valid drawable size; zero-size resizes never reach it.
    pub viewport: Viewport,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            viewport: self.viewport,
            pointer: self.input.pointer(self.viewport),
        }
    }

    /// Acquires the next surface texture, calls `draw` with a [`RenderCtx`] and
    /// [`RenderTarget`], then presents.
    ///
    /// `draw` owns clearing. Surface errors are resolved here: a lost or outdated
    /// surface is reconfigured and the frame skipped; out-of-memory exits.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>) -> AppControl,
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        AppControl::Continue
                    }
                };
            }
        };

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        let control = {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target)
        };

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        control
    }
}
