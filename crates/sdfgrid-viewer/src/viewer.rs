use sdfgrid_engine::core::{App, AppControl, FrameCtx};
use sdfgrid_engine::input::{InputEvent, InputFrame, Key, KeyState};
use sdfgrid_engine::render::grid::GridRenderer;

use crate::zoom::{ZoomConfig, ZoomController};

/// What a key press asks the viewer to do.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Command {
    Exit,
    Zoom(f32),
    ResetZoom,
}

/// Interactive grid viewer: one renderer, one zoom controller.
pub struct GridViewer {
    renderer: GridRenderer,
    zoom: ZoomController,
    failed: bool,
}

impl GridViewer {
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            renderer: GridRenderer::new(),
            zoom: ZoomController::new(zoom),
            failed: false,
        }
    }

    /// True if the viewer stopped because of a fatal render error.
    pub fn failed(&self) -> bool {
        self.failed
    }

    fn apply_input(&mut self, frame: &InputFrame) -> AppControl {
        for cmd in commands(frame) {
            match cmd {
                Command::Exit => return AppControl::Exit,
                Command::Zoom(notches) => self.zoom.zoom_by(notches),
                Command::ResetZoom => self.zoom.reset(),
            }
        }
        AppControl::Continue
    }
}

/// Commands for this frame's key presses (repeats included) and wheel motion.
fn commands(frame: &InputFrame) -> Vec<Command> {
    let mut out: Vec<Command> = frame
        .events
        .iter()
        .filter_map(|ev| match ev {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                ..
            } => match key {
                Key::Escape => Some(Command::Exit),
                Key::ZoomIn => Some(Command::Zoom(1.0)),
                Key::ZoomOut => Some(Command::Zoom(-1.0)),
                Key::ZoomReset => Some(Command::ResetZoom),
                Key::Unknown(_) => None,
            },
            _ => None,
        })
        .collect();

    if frame.wheel_lines != 0.0 {
        out.push(Command::Zoom(frame.wheel_lines));
    }
    out
}

impl App for GridViewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.apply_input(ctx.input_frame) == AppControl::Exit {
            log::info!("exit requested");
            return AppControl::Exit;
        }

        self.zoom.update(ctx.time.dt);

        let uniforms = ctx.snapshot().uniforms(self.zoom.scale());
        let (renderer, failed) = (&mut self.renderer, &mut self.failed);

        ctx.render(|rctx, target| {
            if !renderer.is_ready() {
                if let Err(e) = renderer.init(rctx) {
                    log::error!("{e}");
                    *failed = true;
                    return AppControl::Exit;
                }
            }

            match renderer.draw(rctx, target, uniforms) {
                Ok(()) => AppControl::Continue,
                Err(e) if e.is_fatal() => {
                    log::error!("{e}");
                    *failed = true;
                    AppControl::Exit
                }
                Err(e) => {
                    log::warn!("{e}");
                    AppControl::Continue
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdfgrid_engine::input::{InputState, MouseWheelDelta};

    fn frame_with(events: Vec<InputEvent>) -> InputFrame {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for ev in events {
            state.apply_event(&mut frame, ev);
        }
        frame
    }

    fn press(key: Key, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat }
    }

    #[test]
    fn keys_map_to_commands_including_repeats() {
        let f = frame_with(vec![
            press(Key::ZoomIn, false),
            press(Key::ZoomIn, true),
            press(Key::ZoomOut, false),
            press(Key::ZoomReset, false),
            press(Key::Unknown(3), false),
        ]);
        assert_eq!(
            commands(&f),
            vec![
                Command::Zoom(1.0),
                Command::Zoom(1.0),
                Command::Zoom(-1.0),
                Command::ResetZoom
            ]
        );
    }

    #[test]
    fn wheel_becomes_one_zoom_command() {
        let f = frame_with(vec![
            InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }),
            InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 2.0 }),
        ]);
        assert_eq!(commands(&f), vec![Command::Zoom(3.0)]);
    }

    #[test]
    fn escape_exits_before_later_commands() {
        let mut v = GridViewer::new(ZoomConfig {
            smoothing_rate: 0.0,
            ..Default::default()
        });
        let f = frame_with(vec![press(Key::Escape, false), press(Key::ZoomIn, false)]);
        assert_eq!(v.apply_input(&f), AppControl::Exit);
        assert_eq!(v.zoom.target(), 1.0);
        assert!(!v.failed());
    }

    #[test]
    fn zoom_commands_move_the_target() {
        let mut v = GridViewer::new(ZoomConfig::default());
        let f = frame_with(vec![press(Key::ZoomOut, false)]);
        assert_eq!(v.apply_input(&f), AppControl::Continue);
        assert!(v.zoom.target() > 1.0);
    }
}
