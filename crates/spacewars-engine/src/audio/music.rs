use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::{AssetError, InitError};

/// A looping music track on the default audio output.
///
/// Playback stops when the value is dropped. The output stream is kept alive
/// alongside the sink; dropping it silences every sink on the device.
pub struct Music {
    sink: Sink,
    _handle: OutputStreamHandle,
    _stream: OutputStream,
}

impl Music {
    /// Decodes `path` and starts playing it on repeat at `volume` (1.0 = unity).
    pub fn play_looped(path: &Path, volume: f32) -> Result<Self, InitError> {
        let file = File::open(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new_looped(BufReader::new(file)).map_err(|source| {
            AssetError::Audio {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.set_volume(volume.max(0.0));
        sink.append(source);

        log::info!("playing music {} at volume {volume}", path.display());

        Ok(Self {
            sink,
            _handle: handle,
            _stream: stream,
        })
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.max(0.0));
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn resume(&self) {
        self.sink.play();
    }

    /// Stops playback and discards the queued track.
    pub fn stop(self) {
        self.sink.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_asset_error() {
        let err = Music::play_looped(Path::new("does/not/exist.ogg"), 0.5)
            .err()
            .unwrap();
        assert!(matches!(err, InitError::Asset(AssetError::Io { .. })));
    }
}
