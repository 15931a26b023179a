//! Optional jump sound.
//!
//! Sound is best-effort: a missing file, an undecodable file, no output
//! device, or a build without the `audio` feature all leave the game silent
//! without surfacing an error to the player.

use std::path::Path;

/// Jump sound effect. Silent when unavailable.
pub struct JumpSound {
    #[cfg(feature = "audio")]
    player: Option<backend::ClipPlayer>,
}

impl JumpSound {
    /// A sound that never plays.
    pub fn silent() -> Self {
        Self {
            #[cfg(feature = "audio")]
            player: None,
        }
    }

    /// Load the WAV at `path`. Never fails; problems are logged at debug
    /// level and produce a silent sound.
    pub fn load(path: &Path) -> Self {
        #[cfg(feature = "audio")]
        {
            match backend::ClipPlayer::open(path) {
                Ok(player) => {
                    log::info!("Loaded jump sound from {}", path.display());
                    Self {
                        player: Some(player),
                    }
                }
                Err(e) => {
                    log::debug!("Jump sound unavailable ({}): {}", path.display(), e);
                    Self::silent()
                }
            }
        }

        #[cfg(not(feature = "audio"))]
        {
            log::debug!(
                "Built without audio support, not loading {}",
                path.display()
            );
            Self::silent()
        }
    }

    pub fn is_available(&self) -> bool {
        #[cfg(feature = "audio")]
        {
            self.player.is_some()
        }

        #[cfg(not(feature = "audio"))]
        {
            false
        }
    }

    /// Fire and forget.
    pub fn play(&self) {
        #[cfg(feature = "audio")]
        if let Some(player) = &self.player {
            player.play();
        }
    }
}

#[cfg(feature = "audio")]
mod backend {
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::{self, Cursor};
    use std::path::Path;
    use std::sync::Arc;

    /// Decoded-on-demand clip bound to the default output device.
    pub struct ClipPlayer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        clip: Arc<[u8]>,
    }

    impl ClipPlayer {
        pub fn open(path: &Path) -> io::Result<Self> {
            let clip: Arc<[u8]> = std::fs::read(path)?.into();

            // Reject files rodio can't decode before grabbing the device
            Decoder::new(Cursor::new(Arc::clone(&clip)))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| io::Error::new(io::ErrorKind::Unsupported, e))?;
            Ok(Self {
                _stream: stream,
                handle,
                clip,
            })
        }

        pub fn play(&self) {
            let Ok(sink) = Sink::try_new(&self.handle) else {
                return;
            };
            if let Ok(source) = Decoder::new(Cursor::new(Arc::clone(&self.clip))) {
                sink.append(source);
                sink.detach();
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_open_missing_file_is_not_found() {
            let err = ClipPlayer::open(Path::new("/definitely/not/here/jump.wav"))
                .err()
                .unwrap();
            assert_eq!(err.kind(), io::ErrorKind::NotFound);
        }

        #[test]
        fn test_open_garbage_is_invalid_data() {
            let dir = std::env::temp_dir().join(format!("cube-dash-audio-{}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            let path = dir.join("noise.wav");
            std::fs::write(&path, b"definitely not a wav file").unwrap();

            let err = ClipPlayer::open(&path).err().unwrap();
            let _ = std::fs::remove_file(&path);

            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        }
    }
}
