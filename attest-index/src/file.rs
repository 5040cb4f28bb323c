use std::path::{Path, PathBuf};

use crate::{Result, TypeIndex};

/// A type-index file with both raw content and parsed index.
pub struct IndexFile {
    path: PathBuf,
    content: String,
    index: TypeIndex,
}

impl IndexFile {
    /// Open and parse a type-index file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let index = TypeIndex::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            index,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed index.
    pub fn index(&self) -> &TypeIndex {
        &self.index
    }
}
