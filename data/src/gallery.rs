//! On-disk image gallery.
//!
//! The carousel consumes an ordered list of image paths; this module owns
//! where they live.  Imports are validated (extension allowlist, size cap)
//! and copied into the gallery directory under a collision-free name.
//! A read-only gallery serves its existing images but rejects writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use uuid::Uuid;

/// Image formats the gallery accepts, matched on file extension.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "avif"];

/// Upper bound on a single imported image.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("image is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("gallery is read-only")]
    ReadOnly,
    #[error("no such image: {0}")]
    NotFound(String),
    #[error("invalid image name: {0}")]
    InvalidName(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct Gallery {
    root: PathBuf,
    read_only: bool,
}

impl Gallery {
    /// Open the gallery rooted at `root`.  The directory itself is created
    /// lazily on the first import, so opening never touches the disk.
    pub fn open(root: PathBuf, read_only: bool) -> Self {
        Self { root, read_only }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// All gallery images, sorted by file name.
    ///
    /// Files with unknown extensions are skipped rather than rejected, so
    /// stray artifacts in the directory never break the slideshow.
    pub fn list(&self) -> Result<Vec<PathBuf>, Error> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut images: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_allowed_extension(path))
            .collect();

        images.sort();
        Ok(images)
    }

    /// Validate `source` and copy it into the gallery.
    ///
    /// The stored name keeps a sanitized version of the original stem and
    /// appends a random suffix so repeated imports of the same file never
    /// collide.  Returns the path of the stored copy.
    pub fn import(&self, source: &Path) -> Result<PathBuf, Error> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| Error::UnsupportedFormat(source.display().to_string()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::UnsupportedFormat(extension));
        }

        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }

        let size = fs::metadata(source)?.len();
        if size > MAX_IMAGE_BYTES {
            return Err(Error::TooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }

        let stem = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("img");
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!("{}-{}.{extension}", sanitize(stem), &suffix[..8]);

        let dest = self.root.join(&name);
        fs::copy(source, &dest)?;
        info!("imported {} as {name}", source.display());

        Ok(dest)
    }

    /// Delete an image by its stored file name.
    pub fn remove(&self, name: &str) -> Result<(), Error> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }

        // Names come from the UI but guard against traversal anyway.
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(Error::InvalidName(name.to_string()));
        }

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(Error::NotFound(name.to_string()));
        }

        fs::remove_file(&path)?;
        info!("removed {name}");
        Ok(())
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
