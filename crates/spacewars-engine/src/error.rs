use std::path::PathBuf;

use thiserror::Error;

/// Failure to load an asset from disk.
///
/// Every variant carries the offending path so the top-level log line is
/// self-explanatory.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to decode audio {}: {source}", .path.display())]
    Audio {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("failed to parse font {}: {message}", .path.display())]
    Font { path: PathBuf, message: String },

    /// The headless backend has no texture registered under this path.
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Fatal initialization failure.
///
/// Nothing here is retried: the game logs the error and exits before the
/// frame loop starts.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop exited before the window was created")]
    WindowNotCreated,

    #[error("window has zero size")]
    ZeroSizedWindow,

    #[error("failed to create render surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("failed to open audio output: {0}")]
    AudioOutput(#[from] rodio::StreamError),

    #[error("failed to create audio sink: {0}")]
    AudioSink(#[from] rodio::PlayError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A scene was installed before the platform was opened.
    #[error("platform is not initialized")]
    NotInitialized,
}
