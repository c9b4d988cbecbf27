use anyhow::Context;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const VOLUME_STEP: f32 = 0.05;

/// Playback position, advanced by wall time while playing.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    offset: Duration,
    started: Option<Instant>,
}

impl PlaybackClock {
    pub fn position_at(&self, now: Instant) -> Duration {
        self.offset + self.started.map_or(Duration::ZERO, |s| now.saturating_duration_since(s))
    }

    pub fn resume_at(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn pause_at(&mut self, now: Instant) {
        if let Some(s) = self.started.take() {
            self.offset += now.saturating_duration_since(s);
        }
    }

    pub fn seek_at(&mut self, to: Duration, now: Instant) {
        self.offset = to;
        if self.started.is_some() {
            self.started = Some(now);
        }
    }
}

struct Output {
    _stream: OutputStream, // must stay alive for audio to keep playing
    handle: OutputStreamHandle,
    sink: Sink,
}

/// Owns the playback state. The visualizer only ever reads `is_playing`.
pub struct AudioPlayer {
    output: Option<Output>,
    path: Option<PathBuf>,
    playing: bool,
    volume: f32,
    duration: Option<Duration>,
    clock: PlaybackClock,
}

fn open_source(path: &Path) -> anyhow::Result<Decoder<BufReader<File>>> {
    let file = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
    );
    Decoder::new(file).context("Failed to decode audio for playback")
}

impl AudioPlayer {
    /// Opens the default output device and queues `path` once, paused.
    pub fn start<P: AsRef<Path>>(path: P, volume: f32) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let (_stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;
        let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;
        let source = open_source(path)?;
        let duration = source.total_duration();
        let volume = volume.clamp(0.0, 1.0);
        sink.pause();
        sink.set_volume(volume);
        sink.append(source);
        info!(path = %path.display(), "audio ready");

        Ok(Self {
            output: Some(Output {
                _stream,
                handle,
                sink,
            }),
            path: Some(path.to_path_buf()),
            playing: false,
            volume,
            duration,
            clock: PlaybackClock::default(),
        })
    }

    /// No output device; transport state and position are still tracked.
    pub fn silent(duration: Option<Duration>) -> Self {
        Self {
            output: None,
            path: None,
            playing: false,
            volume: 1.0,
            duration,
            clock: PlaybackClock::default(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn position(&self) -> Duration {
        let pos = self.clock.position_at(Instant::now());
        match self.duration {
            Some(d) => pos.min(d),
            None => pos,
        }
    }

    pub fn play(&mut self) {
        if let Some(out) = &self.output {
            out.sink.play();
        }
        self.playing = true;
        self.clock.resume_at(Instant::now());
        debug!("playback started");
    }

    pub fn pause(&mut self) {
        if let Some(out) = &self.output {
            out.sink.pause();
        }
        self.playing = false;
        self.clock.pause_at(Instant::now());
        debug!("playback paused");
    }

    /// Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Clamped to `[0, 1]`. Returns the applied volume.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(out) = &self.output {
            out.sink.set_volume(self.volume);
        }
        self.volume
    }

    /// Jumps to `to`, clamped to the track length. The sink is rebuilt from
    /// a fresh decoder skipped forward, keeping play state and volume.
    pub fn seek(&mut self, to: Duration) -> anyhow::Result<()> {
        let to = match self.duration {
            Some(d) => to.min(d),
            None => to,
        };
        if let (Some(out), Some(path)) = (self.output.as_mut(), self.path.as_ref()) {
            let sink = Sink::try_new(&out.handle).context("Failed to create audio sink")?;
            sink.set_volume(self.volume);
            if !self.playing {
                sink.pause();
            }
            sink.append(open_source(path)?.skip_duration(to));
            out.sink.stop();
            out.sink = sink;
        }
        self.clock.seek_at(to, Instant::now());
        debug!(position = ?to, "seeked");
        Ok(())
    }

    /// Relative seek, saturating at the start of the track.
    pub fn seek_by(&mut self, delta_secs: f32) -> anyhow::Result<()> {
        let now = self.position().as_secs_f32();
        self.seek(Duration::from_secs_f32((now + delta_secs).max(0.0)))
    }

    /// True once the track has played to its end.
    pub fn finished(&self) -> bool {
        match &self.output {
            Some(out) => out.sink.empty(),
            None => self.duration.is_some_and(|d| self.position() >= d),
        }
    }
}
