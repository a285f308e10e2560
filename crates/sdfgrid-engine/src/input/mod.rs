//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `platform::winit` translates window-system events into `InputEvent`s.
//!
//! Positions are tracked in physical pixels with the window system's top-left
//! origin; `InputState::pointer` flips them to the bottom-left convention the grid
//! uses, against the viewport of the frame being drawn.

mod frame;
pub mod platform;
mod pointer;
mod state;
mod types;

pub use frame::InputFrame;
pub use pointer::PointerState;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
