//! The user's current file choices.

use std::path::{Path, PathBuf};

use crate::error::SubmitError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// Handle to a file the user picked. Path-backed handles are read when the
/// request is built, not when they are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    /// Size in bytes, if it can be determined without reading the file.
    pub fn size_hint(&self) -> Option<u64> {
        match &self.source {
            FileSource::Path(path) => std::fs::metadata(path).ok().map(|meta| meta.len()),
            FileSource::Memory(bytes) => Some(bytes.len() as u64),
        }
    }

    pub async fn read(&self) -> Result<Vec<u8>, SubmitError> {
        match &self.source {
            FileSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| SubmitError::ReadFile {
                        name: self.name.clone(),
                        source,
                    })
            }
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub primary: Option<SelectedFile>,
    pub reference: Option<SelectedFile>,
}

impl Selection {
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }
}

/// Owns the [`Selection`]. Slots change only through the setters; nothing
/// clears them behind the user's back.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selection: Selection,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_primary(&mut self, file: SelectedFile) {
        self.selection.primary = Some(file);
    }

    pub fn set_reference(&mut self, file: Option<SelectedFile>) {
        self.selection.reference = file;
    }

    pub fn current(&self) -> &Selection {
        &self.selection
    }
}
