//! Level pack loading
//!
//! Levels are read once at startup on a background thread. The result comes
//! back over a channel which the game loop polls every tick.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;

use crate::sim::level::{EXIT_MARKER, LayerKind, LevelPack, SPAWN_MARKER};

/// Startup failures. Any of these is fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error opening file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing level pack: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level pack has no levels")]
    NoLevels,

    #[error("level {level} has grid size {grid_size}")]
    BadGrid { level: usize, grid_size: i32 },

    #[error("level {level} has {count} \"{identifier}\" markers, expected exactly one")]
    Marker {
        level: usize,
        identifier: &'static str,
        count: usize,
    },

    #[error("loader thread exited without a result")]
    Disconnected,
}

/// Parse and validate a level pack from JSON
pub fn parse_pack(json: &str) -> Result<LevelPack, LoadError> {
    let pack: LevelPack = serde_json::from_str(json)?;
    validate(&pack)?;
    Ok(pack)
}

/// Read, parse and validate a level pack file
pub fn load_pack_file(path: impl AsRef<Path>) -> Result<LevelPack, LoadError> {
    let path = path.as_ref();
    log::info!("loading {}", path.display());
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pack(&json)
}

/// Check the invariants the simulation relies on
pub fn validate(pack: &LevelPack) -> Result<(), LoadError> {
    if pack.levels.is_empty() {
        return Err(LoadError::NoLevels);
    }

    for (index, level) in pack.levels.iter().enumerate() {
        if level.grid_size < 1 {
            return Err(LoadError::BadGrid {
                level: index,
                grid_size: level.grid_size,
            });
        }

        for identifier in [SPAWN_MARKER, EXIT_MARKER] {
            let count = level
                .layer(LayerKind::Entities)
                .map(|l| l.entities.iter().filter(|e| e.identifier == identifier).count())
                .unwrap_or(0);
            if count != 1 {
                return Err(LoadError::Marker {
                    level: index,
                    identifier,
                    count,
                });
            }
        }
    }

    Ok(())
}

/// Handle to a level pack being loaded in the background
#[derive(Debug)]
pub struct Loader {
    rx: Receiver<Result<LevelPack, LoadError>>,
}

impl Loader {
    /// Run `load` on its own thread
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<LevelPack, LoadError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            log::info!("Loading game...");
            let result = load();
            // The game may already have quit; nobody to tell
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Load a level pack file in the background
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn(move || load_pack_file(&path))
    }

    /// Non-blocking check; `None` while still loading
    pub fn poll(&self) -> Option<Result<LevelPack, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Disconnected)),
        }
    }

    /// Block until loading finishes
    pub fn wait(self) -> Result<LevelPack, LoadError> {
        self.rx.recv().map_err(|_| LoadError::Disconnected)?
    }
}
