use std::path::{Path, PathBuf};

/// Ordered track files with a cursor. Next/prev wrap around both ends.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    index: usize,
}

impl Playlist {
    /// `None` when `tracks` is empty.
    pub fn new(tracks: Vec<PathBuf>) -> Option<Self> {
        if tracks.is_empty() {
            return None;
        }
        Some(Self { tracks, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Never true; an empty playlist cannot be built.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Path {
        &self.tracks[self.index]
    }

    pub fn next(&mut self) -> &Path {
        self.index = (self.index + 1) % self.tracks.len();
        self.current()
    }

    pub fn prev(&mut self) -> &Path {
        self.index = (self.index + self.tracks.len() - 1) % self.tracks.len();
        self.current()
    }
}

/// Analysis sidecar of a track: `<track>.analysis.json`.
pub fn sidecar_path(track: &Path) -> PathBuf {
    let mut name = track.as_os_str().to_os_string();
    name.push(".analysis.json");
    PathBuf::from(name)
}
