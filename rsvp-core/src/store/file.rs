//! JSON file backend.
//!
//! The whole collection lives in one document holding a JSON array. Appends
//! are whole-document read-modify-write cycles serialized by an exclusive
//! advisory lock on a sidecar `<file>.lock`, so concurrent submissions from
//! any task or process never overwrite each other.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;

use crate::error::{RsvpError, RsvpResult};
use crate::rsvp::Rsvp;
use crate::store::RsvpStore;

const EMPTY_DOCUMENT: &str = "[]";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use the document at `path`, creating it (and its directory) with an
    /// empty array if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> RsvpResult<Self> {
        let store = FileStore { path: path.into() };
        let document = store.document();
        blocking(move || document.ensure_exists()).await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn document(&self) -> Document {
        Document {
            path: self.path.clone(),
        }
    }
}

#[async_trait]
impl RsvpStore for FileStore {
    async fn list_all(&self) -> RsvpResult<Vec<Rsvp>> {
        let document = self.document();
        blocking(move || document.list()).await
    }

    async fn append(&self, rsvp: Rsvp) -> RsvpResult<Rsvp> {
        let document = self.document();
        blocking(move || document.append(rsvp)).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

async fn blocking<T, F>(f: F) -> RsvpResult<T>
where
    F: FnOnce() -> RsvpResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RsvpError::Storage(format!("File storage task failed: {e}")))?
}

/// Synchronous operations on the document. Every method takes the sidecar lock.
struct Document {
    path: PathBuf,
}

impl Document {
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "rsvps.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn lock(&self, exclusive: bool) -> RsvpResult<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.sibling(".lock"))?;

        if exclusive {
            FileExt::lock_exclusive(&file)?;
        } else {
            FileExt::lock_shared(&file)?;
        }
        Ok(file)
    }

    fn ensure_exists(&self) -> RsvpResult<()> {
        let _lock = self.lock(true)?;

        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "creating empty RSVP document");
            self.write_raw(EMPTY_DOCUMENT)?;
        }
        Ok(())
    }

    /// Parsed document, or `None` when the file is absent.
    fn read(&self) -> RsvpResult<Option<Vec<Rsvp>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let rsvps = serde_json::from_str(&content).map_err(|e| {
            RsvpError::Serialization(format!(
                "{} is not a valid RSVP list: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(rsvps))
    }

    fn write(&self, rsvps: &[Rsvp]) -> RsvpResult<()> {
        let content = serde_json::to_string_pretty(rsvps)?;
        self.write_raw(&content)
    }

    fn write_raw(&self, content: &str) -> RsvpResult<()> {
        let temp = self.sibling(".tmp");
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn list(&self) -> RsvpResult<Vec<Rsvp>> {
        {
            let _lock = self.lock(false)?;
            if let Some(rsvps) = self.read()? {
                return Ok(rsvps);
            }
        }

        // Removed after open: start over from an empty document.
        self.ensure_exists()?;
        Ok(Vec::new())
    }

    fn append(&self, rsvp: Rsvp) -> RsvpResult<Rsvp> {
        let _lock = self.lock(true)?;

        let mut rsvps = self.read()?.unwrap_or_default();
        rsvps.push(rsvp.clone());
        self.write(&rsvps)?;

        Ok(rsvp)
    }
}
