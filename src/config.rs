// Command-line configuration for the visualizer window.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::audio::Playlist;
use crate::audio::playlist::sidecar_path;

pub const DEFAULT_AUDIO: &str = "assets/song.wav";

#[derive(Debug, Clone, Parser)]
#[command(name = "moodwave", about = "Particle visualizer tinted by a track's mood palette")]
pub struct Config {
    /// WAV files to play, in order.
    #[arg(long, num_args = 1.., default_value = DEFAULT_AUDIO)]
    pub audio: Vec<PathBuf>,

    /// Analysis record (JSON) used for every track. Defaults to each
    /// track's `<audio>.analysis.json`.
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    #[arg(long, default_value_t = 640)]
    pub height: u32,

    /// Playback volume, 0.0 to 1.0.
    #[arg(long, default_value_t = 0.8)]
    pub volume: f32,

    /// Seed for particle layout and bar flicker.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start playing right away.
    #[arg(long)]
    pub autoplay: bool,

    /// Do not open an audio device.
    #[arg(long)]
    pub mute: bool,
}

impl Config {
    pub fn analysis_path_for(&self, track: &Path) -> PathBuf {
        self.analysis.clone().unwrap_or_else(|| sidecar_path(track))
    }

    pub fn playlist(&self) -> anyhow::Result<Playlist> {
        Playlist::new(self.audio.clone()).context("no audio tracks given")
    }

    pub fn volume(&self) -> f32 {
        self.volume.clamp(0.0, 1.0)
    }
}
