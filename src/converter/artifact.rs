use super::{ConversionArtifacts, GeneratedDocument};
use crate::error::OutputError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Target directories for generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Per-block function block types.
    pub blocks: PathBuf,
    /// The function block network.
    pub network: PathBuf,
    /// Shared data and adapter types.
    pub types: PathBuf,
}

impl ConversionArtifacts {
    /// Writes every generated document, creating the directories as needed.
    /// Returns the written paths in write order.
    pub fn write(&self, dirs: &OutputDirs) -> Result<Vec<PathBuf>, OutputError> {
        let mut written = Vec::new();

        written.push(write_document(&dirs.types, &self.complex_type)?);
        for adapter in &self.adapters {
            written.push(write_document(&dirs.types, adapter)?);
        }
        for fb in &self.function_blocks {
            written.push(write_document(&dirs.blocks, fb)?);
        }
        written.push(write_document(&dirs.network, &self.network_document)?);

        Ok(written)
    }
}

fn write_document(dir: &Path, document: &GeneratedDocument) -> Result<PathBuf, OutputError> {
    let path = dir.join(&document.file_name);
    let io_error = |source| OutputError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    fs::write(&path, &document.content).map_err(io_error)?;

    debug!(path = %path.display(), "Wrote document");
    Ok(path)
}
