//! Soundtrack playback

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio playback errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No track loaded")]
    NotLoaded,
}

pub type Result<T> = std::result::Result<T, AudioError>;

/// A player for the crawl soundtrack
pub trait AudioPlayer {
    /// Load `resource` and start playing it from the beginning
    fn play(&mut self, resource: &Path) -> Result<()>;

    fn pause(&mut self);

    /// Continue the loaded track where it was paused
    fn resume(&mut self) -> Result<()>;

    fn is_playing(&self) -> bool;
}

/// A player with no audio output
///
/// Checks that the track can be opened and tracks play state, which is all
/// a headless crawl needs.
#[derive(Debug, Default)]
pub struct HeadlessPlayer {
    track: Option<PathBuf>,
    playing: bool,
}

impl HeadlessPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> Option<&Path> {
        self.track.as_deref()
    }
}

impl AudioPlayer for HeadlessPlayer {
    fn play(&mut self, resource: &Path) -> Result<()> {
        self.track = None;
        self.playing = false;

        File::open(resource).map_err(|source| AudioError::Open {
            path: resource.to_path_buf(),
            source,
        })?;

        tracing::debug!("Playing {}", resource.display());
        self.track = Some(resource.to_path_buf());
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn resume(&mut self) -> Result<()> {
        if self.track.is_none() {
            return Err(AudioError::NotLoaded);
        }
        self.playing = true;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
