//! sdfgrid engine crate.
//!
//! Platform + GPU runtime, and the procedural grid renderer it hosts. `field` is the
//! CPU mirror of the grid shader, used for tests and headless snapshots.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod error;
pub mod field;
pub mod render;
