use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::Mmap;

use crate::error::Error;

/// Where the model weights come from.
///
/// Exactly one variant is used per engine load. Memory-based variants are
/// reference-counted so a source can outlive the `start` call that supplied
/// it while the worker still holds the engine built from it.
#[derive(Clone, Debug)]
pub enum ModelSource {
    /// Model file on disk; the loader opens it itself.
    Path(PathBuf),
    /// Model bytes already resident in memory.
    Buffer(Arc<Vec<u8>>),
    /// Memory-mapped model region.
    Mapped(Arc<Mmap>),
}

impl ModelSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn buffer(bytes: Vec<u8>) -> Self {
        Self::Buffer(Arc::new(bytes))
    }

    /// Map `path` into memory and wrap the mapping as a [`ModelSource::Mapped`].
    pub fn map_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::engine_load(format!("cannot open model file {}: {e}", path.display()))
        })?;
        // SAFETY: the mapping is read-only and the file is expected not to be
        // truncated while the engine holds the mapping.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| {
            Error::engine_load(format!("cannot map model file {}: {e}", path.display()))
        })?;
        Ok(Self::Mapped(Arc::new(map)))
    }

    /// True for sources that bypass the model-path argument entirely.
    pub fn is_in_memory(&self) -> bool {
        !matches!(self, Self::Path(_))
    }

    /// The raw model bytes, for memory-based sources.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Path(_) => None,
            Self::Buffer(bytes) => Some(bytes),
            Self::Mapped(map) => Some(&map[..]),
        }
    }
}
