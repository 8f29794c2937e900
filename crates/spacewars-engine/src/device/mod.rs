//! GPU device and window surface.
//!
//! [`Gpu`] is created once per window and handed to the canvas; the helpers in
//! `surface` pick formats and decide how to react to acquire failures.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
