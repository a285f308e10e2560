use std::collections::HashSet;

use crate::coords::Viewport;

use super::frame::InputFrame;
use super::pointer::PointerState;
use super::types::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Last known pointer position, physical pixels, top-left origin.
    ///
    /// Kept when the pointer leaves the window so the highlight stays where it was.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an event to the current state and records deltas into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            // Last position stays in effect.
            InputEvent::PointerLeft => {}

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state }) => match state {
                MouseButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.insert(*button);
                    }
                }
                MouseButtonState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.insert(*button);
                    }
                }
            },

            InputEvent::MouseWheel(delta) => {
                frame.wheel_lines += delta.vertical_lines();
            }
        }

        frame.push_event(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Pointer snapshot in bottom-left-origin physical pixels for `viewport`.
    ///
    /// Before the first move the pointer sits at the viewport origin.
    pub fn pointer(&self, viewport: Viewport) -> PointerState {
        let (x, y) = self.pointer_pos.map_or((0.0, viewport.height), |p| p);
        PointerState {
            x,
            y: viewport.height - y,
            left: self.button_down(MouseButton::Left),
            middle: self.button_down(MouseButton::Middle),
            right: self.button_down(MouseButton::Right),
        }
    }
}
