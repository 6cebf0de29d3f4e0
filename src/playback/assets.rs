use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// An immutable, named audio clip (interleaved f32 samples).
///
/// Samples are shared behind an `Arc`, so clones are cheap.
#[derive(Debug, Clone)]
pub struct Clip {
    name: String,
    samples: Arc<Vec<f32>>,
    sample_rate: u32,
    channels: u16,
}

impl Clip {
    /// Wraps raw samples in a clip. `sample_rate` must be nonzero for the
    /// duration to be meaningful.
    #[must_use]
    pub fn new(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            name: name.into(),
            samples: Arc::new(samples),
            sample_rate,
            channels,
        }
    }

    /// Resource name this clip was resolved under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interleaved samples.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Output sample rate in Hz.
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    #[must_use]
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Real-time length of the clip.
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() / self.channels as usize;
        // usize → f64: frame counts are far below 2^52
        #[allow(clippy::cast_precision_loss)]
        {
            Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
        }
    }
}

/// Resolves unit names to playable clips (injected resource provider).
#[cfg_attr(test, mockall::automock)]
pub trait ClipSource: Send + Sync {
    /// Resolve a clip by name, or `None` if the resource is missing.
    fn resolve(&self, name: &str) -> Option<Clip>;
}

/// Filesystem provider: clips are WAV files named `<name>.<extension>`
/// inside a single directory.
#[derive(Debug)]
pub struct WavDirSource {
    dir: PathBuf,
    extension: String,
}

impl WavDirSource {
    /// Creates a provider rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }
}

impl ClipSource for WavDirSource {
    fn resolve(&self, name: &str) -> Option<Clip> {
        let path = self.dir.join(format!("{name}.{}", self.extension));

        let reader = match hound::WavReader::open(&path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!(clip = name, path = %path.display(), error = %e, "failed to open clip");
                return None;
            }
        };

        let spec = reader.spec();
        let samples = match decode_samples(reader) {
            Ok(samples) => samples,
            Err(e) => {
                warn!(clip = name, path = %path.display(), error = %e, "failed to decode clip");
                return None;
            }
        };

        debug!(
            clip = name,
            samples = samples.len(),
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            "clip loaded"
        );

        Some(Clip::new(name, samples, spec.sample_rate, spec.channels))
    }
}

/// Decode WAV samples to f32, normalizing integer formats to [-1.0, 1.0].
fn decode_samples(reader: hound::WavReader<BufReader<File>>) -> Result<Vec<f32>, hound::Error> {
    let spec = reader.spec();
    match spec.sample_format {
        hound::SampleFormat::Float => reader.into_samples::<f32>().collect(),
        hound::SampleFormat::Int => {
            // Full scale for the declared bit depth (hound caps at 32 bits)
            #[allow(clippy::cast_precision_loss)]
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|sample| {
                    sample.map(|s| {
                        // f64 → f32: audio samples are stored as f32, precision sufficient
                        #[allow(clippy::cast_possible_truncation)]
                        {
                            (f64::from(s) / scale) as f32
                        }
                    })
                })
                .collect()
        }
    }
}

/// Caching layer over a `ClipSource`.
///
/// Resolved clips are kept for the life of the library; misses are retried
/// on every request so a clip dropped into the assets directory is picked
/// up without a restart.
pub struct ClipLibrary {
    source: Box<dyn ClipSource>,
    loaded: Mutex<HashMap<String, Arc<Clip>>>,
}

impl ClipLibrary {
    /// Creates an empty library over the given provider.
    #[must_use]
    pub fn new(source: Box<dyn ClipSource>) -> Self {
        Self {
            source,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached clip, or resolves and caches it on first use.
    pub fn get_or_load(&self, name: &str) -> Option<Arc<Clip>> {
        if let Ok(loaded) = self.loaded.lock() {
            if let Some(clip) = loaded.get(name) {
                return Some(Arc::clone(clip));
            }
        }

        let clip = Arc::new(self.source.resolve(name)?);
        if let Ok(mut loaded) = self.loaded.lock() {
            loaded.insert(name.to_owned(), Arc::clone(&clip));
        }
        Some(clip)
    }

    /// Warm the cache for the given clip names. Returns how many resolved.
    pub fn preload(&self, names: &[&str]) -> usize {
        names
            .iter()
            .filter(|name| self.get_or_load(name).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn create_test_dir() -> PathBuf {
        let test_dir = std::env::temp_dir().join(format!(
            "morse_assets_test_{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&test_dir).unwrap();
        test_dir
    }

    fn write_wav_i16(dir: &Path, name: &str, samples: &[i16], sample_rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer =
            hound::WavWriter::create(dir.join(format!("{name}.wav")), spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_clip_duration_mono() {
        let clip = Clip::new("tone", vec![0.0; 8000], 16000, 1);
        assert_eq!(clip.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_clip_duration_stereo() {
        // 16000 interleaved samples over 2 channels is 8000 frames
        let clip = Clip::new("tone", vec![0.0; 16000], 16000, 2);
        assert_eq!(clip.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_clip_duration_degenerate_spec() {
        assert_eq!(Clip::new("a", vec![0.0; 100], 0, 1).duration(), Duration::ZERO);
        assert_eq!(Clip::new("b", vec![0.0; 100], 16000, 0).duration(), Duration::ZERO);
    }

    #[test]
    fn test_wav_dir_source_missing_file() {
        let test_dir = create_test_dir();
        let source = WavDirSource::new(&test_dir, "wav");
        assert!(source.resolve("no-such-clip").is_none());
        let _ = std::fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_wav_dir_source_reads_and_normalizes_i16() {
        let test_dir = create_test_dir();
        write_wav_i16(&test_dir, "short-tone", &[0, i16::MAX, i16::MIN, 0], 8000);

        let source = WavDirSource::new(&test_dir, "wav");
        let clip = source.resolve("short-tone").unwrap();

        assert_eq!(clip.name(), "short-tone");
        assert_eq!(clip.sample_rate(), 8000);
        assert_eq!(clip.channels(), 1);
        assert_eq!(clip.samples().len(), 4);
        assert!(clip.samples()[0].abs() < f32::EPSILON);
        assert!((clip.samples()[1] - 1.0).abs() < 0.001);
        assert!((clip.samples()[2] + 1.0).abs() < 0.001);

        let _ = std::fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_wav_dir_source_respects_extension() {
        let test_dir = create_test_dir();
        write_wav_i16(&test_dir, "short-tone", &[0; 4], 8000);

        let source = WavDirSource::new(&test_dir, "aiff");
        assert!(source.resolve("short-tone").is_none());

        let _ = std::fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_library_caches_resolved_clips() {
        let mut source = MockClipSource::new();
        source
            .expect_resolve()
            .times(1)
            .returning(|name| Some(Clip::new(name, vec![0.0; 100], 16000, 1)));

        let library = ClipLibrary::new(Box::new(source));
        let first = library.get_or_load("short-pause").unwrap();
        let second = library.get_or_load("short-pause").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_library_retries_misses() {
        let mut source = MockClipSource::new();
        source.expect_resolve().times(2).returning(|_| None);

        let library = ClipLibrary::new(Box::new(source));
        assert!(library.get_or_load("missing").is_none());
        assert!(library.get_or_load("missing").is_none());
    }

    #[test]
    fn test_preload_counts_resolved() {
        let mut source = MockClipSource::new();
        source.expect_resolve().returning(|name| {
            if name == "word-pause" {
                None
            } else {
                Some(Clip::new(name, vec![0.0; 10], 16000, 1))
            }
        });

        let library = ClipLibrary::new(Box::new(source));
        let resolved = library.preload(&["short-tone", "long-tone", "word-pause"]);
        assert_eq!(resolved, 2);
    }
}
