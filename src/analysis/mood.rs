use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

use crate::visual::Palette;

/// Mood annotation produced for a track by the generative service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAnalysis {
    pub mood: String,
    pub description: String,
    #[serde(default)]
    pub color_palette: Vec<String>,
    pub visual_prompt: String,
}

impl TrackAnalysis {
    /// Record shown whenever no usable analysis is available.
    pub fn fallback() -> Self {
        Self {
            mood: "Atmospheric".into(),
            description: "A mysterious blend of sound and space.".into(),
            color_palette: vec!["#3b82f6".into(), "#8b5cf6".into(), "#ec4899".into()],
            visual_prompt: "Abstract neon waves in deep space".into(),
        }
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text.trim()).context("malformed analysis record")
    }

    pub fn try_load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Never fails: any read or parse error is logged and yields the fallback.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load(&path) {
            Ok(analysis) => {
                info!(mood = %analysis.mood, "loaded track analysis");
                analysis
            }
            Err(e) => {
                error!("analysis unavailable: {e:#}");
                Self::fallback()
            }
        }
    }

    /// Comma-separated mood split into trimmed, non-empty tags.
    pub fn mood_tags(&self) -> Vec<&str> {
        self.mood
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Analysis colors, or the default palette when the service sent none.
    pub fn palette(&self) -> Palette {
        Palette::new(self.color_palette.iter().cloned()).unwrap_or_default()
    }
}
