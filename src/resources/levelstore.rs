//! Named storage slots for level documents.
//!
//! A slot holds the text of exactly one level. Writing a slot replaces its
//! previous content; there is no versioning or merge. The [`LevelStorage`]
//! resource wraps whichever [`SlotStorage`] backend the game was built with:
//! a directory of JSON files for the binary, or an in-memory map for tests.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::resources::level::{LevelDocument, decode, encode};

/// Failures of the level persistence and build pipeline.
#[derive(Debug)]
pub enum LevelError {
    /// The slot holds no level.
    NotFound { slot: String },
    /// The stored text is not a valid level document.
    Malformed(String),
    /// The backing store failed to read or write.
    Storage(io::Error),
    /// The document names a tileset the game does not know.
    MissingTileset(String),
    /// More than one goal tile was placed.
    MultipleGoals { count: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::NotFound { slot } => write!(f, "no saved level found in slot '{}'", slot),
            LevelError::Malformed(reason) => write!(f, "failed to decode level: {}", reason),
            LevelError::Storage(e) => write!(f, "level storage error: {}", e),
            LevelError::MissingTileset(name) => write!(f, "tileset '{}' is not available", name),
            LevelError::MultipleGoals { count } => {
                write!(f, "level has {} goal tiles, at most one is allowed", count)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(e: io::Error) -> Self {
        LevelError::Storage(e)
    }
}

/// Backend able to read and write text by slot name.
pub trait SlotStorage: Send + Sync {
    /// Read the slot; `Ok(None)` when it was never written.
    fn read(&self, slot: &str) -> io::Result<Option<String>>;
    /// Replace the slot's content.
    fn write(&mut self, slot: &str, text: &str) -> io::Result<()>;
}

/// Slots stored as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(slot)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, slot: &str, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(slot), text)
    }
}

/// Slots kept in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: FxHashMap<String, String>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw text, bypassing the codec.
    pub fn with_slot(mut self, slot: impl Into<String>, text: impl Into<String>) -> Self {
        self.slots.insert(slot.into(), text.into());
        self
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, text: &str) -> io::Result<()> {
        self.slots.insert(slot.to_string(), text.to_string());
        Ok(())
    }
}

/// The game's level store and the slot it reads and writes.
#[derive(Resource)]
pub struct LevelStorage {
    backend: Box<dyn SlotStorage>,
    slot: String,
}

impl LevelStorage {
    pub fn new(backend: Box<dyn SlotStorage>, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    /// Name of the slot in use.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Encode `document` and overwrite the slot with it.
    pub fn save(&mut self, document: &LevelDocument) -> Result<(), LevelError> {
        let text = encode(document)?;
        self.backend.write(&self.slot, &text)?;
        info!("Level saved to slot '{}'", self.slot);
        Ok(())
    }

    /// Read and decode the slot.
    pub fn load(&self) -> Result<LevelDocument, LevelError> {
        let text = self.backend.read(&self.slot)?.ok_or_else(|| LevelError::NotFound {
            slot: self.slot.clone(),
        })?;
        let document = decode(&text)?;
        debug!(
            "Loaded {}x{} level from slot '{}'",
            document.width, document.height, self.slot
        );
        Ok(document)
    }

    /// Raw text of the slot, if any.
    pub fn raw(&self) -> Result<Option<String>, LevelError> {
        Ok(self.backend.read(&self.slot)?)
    }
}

impl fmt::Debug for LevelStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelStorage")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
