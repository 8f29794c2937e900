//! Background music playback.

mod music;

pub use music::Music;
