//! Core engine-facing contracts.
//!
//! The interface between the runtime loop and the application: a callback trait
//! and the per-frame context it receives.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, FrameSnapshot, WindowCtx};
