/// Clip resolution and caching
pub mod assets;
/// Playback sessions and the sequential worker
pub mod engine;
/// Morse string to audio-unit scanning
pub mod sequencer;
/// Audio output seam
pub mod sink;

pub use assets::{Clip, ClipLibrary, ClipSource, WavDirSource};
pub use engine::{PlaybackEngine, SessionError, SessionHandle, SessionStatus};
pub use sequencer::{sequence, Gap, Tone, Unit};
pub use sink::{AudioSink, CpalSink, SinkError};
