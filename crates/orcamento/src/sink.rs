//! Where a rendered quote is delivered

use crate::{RenderedQuote, SinkError};
use std::cell::RefCell;
#[cfg(feature = "fs")]
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
#[cfg(feature = "fs")]
use tempfile::NamedTempFile;
#[cfg(feature = "fs")]
use tracing::info;

/// Receives the finished document (download, file, ...)
pub trait DocumentSink {
    fn save(&self, quote: &RenderedQuote) -> Result<(), SinkError>;
}

/// Saves documents into a directory under their suggested filename
///
/// The bytes are written to a temporary file in the same directory and
/// persisted under the final name. The temporary file is removed on any
/// failure, so no partial document is left behind.
#[cfg(feature = "fs")]
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

#[cfg(feature = "fs")]
impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(feature = "fs")]
impl DocumentSink for DirectorySink {
    fn save(&self, quote: &RenderedQuote) -> Result<(), SinkError> {
        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(&quote.filename);

        let mut partial = NamedTempFile::new_in(&self.dir)?;
        partial.write_all(&quote.bytes)?;
        partial.as_file().sync_all()?;
        partial
            .persist(&target)
            .map_err(|e| SinkError::IoError(e.error))?;

        info!(path = %target.display(), bytes = quote.bytes.len(), "quote saved");
        Ok(())
    }
}

/// Keeps every saved document in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: RefCell<Vec<RenderedQuote>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents saved so far, oldest first
    pub fn saved(&self) -> Vec<RenderedQuote> {
        self.saved.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.saved.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.borrow().is_empty()
    }
}

impl DocumentSink for MemorySink {
    fn save(&self, quote: &RenderedQuote) -> Result<(), SinkError> {
        self.saved.borrow_mut().push(quote.clone());
        Ok(())
    }
}

impl<S: DocumentSink + ?Sized> DocumentSink for &S {
    fn save(&self, quote: &RenderedQuote) -> Result<(), SinkError> {
        (**self).save(quote)
    }
}
