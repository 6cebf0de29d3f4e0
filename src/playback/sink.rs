use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

use super::assets::Clip;

/// Errors from the audio output device
#[derive(Debug, Error)]
pub enum SinkError {
    /// No usable output device
    #[error("no audio output device available")]
    NoDevice,

    /// Stream creation or start failed for a clip
    #[error("failed to play clip {name:?}")]
    Stream {
        /// Clip being played
        name: String,
        /// Underlying error
        #[source]
        source: anyhow::Error,
    },
}

/// Plays a single clip to completion, blocking the caller for the clip's
/// full declared duration. That blocking is what serializes units: the next
/// unit cannot start before the current one has finished.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink: Send + Sync {
    /// Play one clip to completion.
    ///
    /// # Errors
    /// Returns error if the output device rejects the clip.
    fn play(&self, clip: &Clip) -> Result<(), SinkError>;
}

/// CPAL-backed sink.
///
/// A fresh output stream is built per clip and torn down when the clip's
/// duration has elapsed.
#[derive(Debug, Default)]
pub struct CpalSink;

impl CpalSink {
    /// Creates a sink bound to the default output device at play time.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AudioSink for CpalSink {
    fn play(&self, clip: &Clip) -> Result<(), SinkError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;

        let stream_config = cpal::StreamConfig {
            channels: clip.channels(),
            sample_rate: clip.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let duration = clip.duration();
        let source = clip.clone();
        let mut cursor = 0_usize;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    // Silence once the clip is exhausted
                    for slot in data.iter_mut() {
                        *slot = source.samples().get(cursor).copied().unwrap_or(0.0);
                        cursor += 1;
                    }
                },
                move |err| {
                    warn!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| SinkError::Stream {
                name: clip.name().to_owned(),
                source: anyhow!(e),
            })?;

        stream.play().map_err(|e| SinkError::Stream {
            name: clip.name().to_owned(),
            source: anyhow!(e),
        })?;

        // The stream renders asynchronously; hold the thread for the clip's
        // declared duration, then let the stream drop.
        thread::sleep(duration);

        debug!(clip = clip.name(), duration_ms = duration.as_millis(), "clip played");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error_display() {
        let err = SinkError::Stream {
            name: "short-tone".to_owned(),
            source: anyhow!("device gone"),
        };
        assert!(err.to_string().contains("short-tone"));
        assert_eq!(SinkError::NoDevice.to_string(), "no audio output device available");
    }

    #[test]
    fn test_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CpalSink>();
    }

    #[test]
    #[ignore = "requires an audio output device"]
    fn test_play_short_clip_on_device() {
        // 100ms of a 440Hz sine at 16kHz
        let samples: Vec<f32> = (0..1600)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f32 / 16000.0;
                (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
            })
            .collect();
        let clip = Clip::new("test-tone", samples, 16000, 1);

        let sink = CpalSink::new();
        sink.play(&clip).unwrap();
    }
}
