//! Time subsystem.
//!
//! Frame timing that never reads a clock itself: the loop measures each frame
//! and hands the elapsed time to [`FramePacer::finish_frame`], which decides
//! the sleep and the next frame's delta.

mod frame_pacer;

pub use frame_pacer::{FramePacer, FrameTime};
