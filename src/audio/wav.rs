use hound::WavReader;
use std::path::Path;
use std::time::Duration;

/// What the visualizer host knows about the track it plays.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub title: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_sec: f32,
}

impl Track {
    /// Reads only the WAV header; samples are decoded by the player.
    pub fn from_wav<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        if spec.channels == 0 || spec.sample_rate == 0 {
            anyhow::bail!("invalid WAV header in {}", path.display());
        }

        // duration() counts frames, not samples
        let frames = reader.duration();
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());

        Ok(Self {
            title,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            duration_sec: frames as f32 / spec.sample_rate as f32,
        })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.duration_sec.max(0.0))
    }

    /// `m:ss`
    pub fn duration_label(&self) -> String {
        clock_label(self.duration_sec)
    }
}

/// Seconds as `m:ss`, truncating fractions.
pub fn clock_label(secs: f32) -> String {
    let total = secs.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};

    #[test]
    fn reads_title_and_duration_from_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Neon Horizons.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut w = WavWriter::create(&path, spec).unwrap();
        // 1.5 s of stereo silence
        for _ in 0..(8_000 * 3 / 2 * 2) {
            w.write_sample(0i16).unwrap();
        }
        w.finalize().unwrap();

        let track = Track::from_wav(&path).unwrap();
        assert_eq!(track.title, "Neon Horizons");
        assert_eq!(track.channels, 2);
        assert!((track.duration_sec - 1.5).abs() < 1e-3);
        assert_eq!(track.duration_label(), "0:01");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Track::from_wav("/definitely/not/here.wav").is_err());
    }

    #[test]
    fn label_formats_minutes() {
        let t = Track {
            title: "x".into(),
            sample_rate: 44_100,
            channels: 2,
            duration_sec: 215.4,
        };
        assert_eq!(t.duration_label(), "3:35");
        assert_eq!(clock_label(59.99), "0:59");
        assert_eq!(clock_label(-2.0), "0:00");
    }
}
