//! Where the header logo comes from

use crate::LogoError;
#[cfg(feature = "fs")]
use std::path::{Path, PathBuf};

/// Source of the header logo bytes (PNG or JPEG)
///
/// Loading is the only asynchronous step of a render and happens once,
/// before any drawing.
#[allow(async_fn_in_trait)]
pub trait LogoSource {
    async fn load(&self) -> Result<Vec<u8>, LogoError>;
}

/// Logo read from disk
#[cfg(feature = "fs")]
#[derive(Debug, Clone)]
pub struct FileLogo {
    path: PathBuf,
}

#[cfg(feature = "fs")]
impl FileLogo {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "fs")]
impl LogoSource for FileLogo {
    async fn load(&self) -> Result<Vec<u8>, LogoError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| LogoError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// Logo bytes fetched ahead of time
#[derive(Debug, Clone, Default)]
pub struct BytesLogo(pub Vec<u8>);

impl LogoSource for BytesLogo {
    async fn load(&self) -> Result<Vec<u8>, LogoError> {
        if self.0.is_empty() {
            return Err(LogoError::Missing);
        }
        Ok(self.0.clone())
    }
}

/// No logo; the header shows the company name
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLogo;

impl LogoSource for NoLogo {
    async fn load(&self) -> Result<Vec<u8>, LogoError> {
        Err(LogoError::Missing)
    }
}
