use std::path::{Path, PathBuf};

use crate::encode::png::{PNG_MIME, PngExport, SHARE_FILE_NAME};

/// Outcome of handing an export to a sink. Never fatal to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    /// Written to the given location.
    Saved(PathBuf),
    /// Accepted by the platform share target.
    Shared,
    /// The user dismissed the share prompt.
    Cancelled,
    /// No share target able to take a PNG file.
    Unavailable,
    Failed(String),
}

impl ExportStatus {
    /// Only genuine failures count; a cancelled share is a normal outcome.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Destination for finished PNG exports.
pub trait ExportSink {
    fn deliver(&mut self, export: &PngExport) -> ExportStatus;
}

/// Writes exports into a directory under their suggested file name.
#[derive(Clone, Debug)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, export: &PngExport) -> ExportStatus {
        let path = self.dir.join(&export.file_name);
        match std::fs::write(&path, &export.bytes) {
            Ok(()) => {
                tracing::info!(path = %path.display(), bytes = export.bytes.len(), "export saved");
                ExportStatus::Saved(path)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "export write failed");
                ExportStatus::Failed(format!("write {}: {err}", path.display()))
            }
        }
    }
}

/// Keeps every export in memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    exports: Vec<PngExport>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exports(&self) -> &[PngExport] {
        &self.exports
    }
}

impl ExportSink for InMemorySink {
    fn deliver(&mut self, export: &PngExport) -> ExportStatus {
        self.exports.push(export.clone());
        ExportStatus::Saved(PathBuf::from(&export.file_name))
    }
}

/// File handed to a platform share target.
#[derive(Clone, Copy, Debug)]
pub struct SharePayload<'a> {
    pub file_name: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareError {
    /// The user aborted the share sheet.
    Cancelled,
    Rejected(String),
}

/// Host share facility (OS share sheet, messaging bridge, ...).
pub trait ShareTarget {
    fn can_share(&self, mime: &str) -> bool;
    fn share(&mut self, payload: SharePayload<'_>) -> Result<(), ShareError>;
}

/// Sends exports to a [`ShareTarget`] as `quotegenx-masterpiece.png`.
#[derive(Debug)]
pub struct ShareSink<T: ShareTarget> {
    target: T,
}

impl<T: ShareTarget> ShareSink<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: ShareTarget> ExportSink for ShareSink<T> {
    fn deliver(&mut self, export: &PngExport) -> ExportStatus {
        if !self.target.can_share(PNG_MIME) {
            return ExportStatus::Unavailable;
        }
        let payload = SharePayload {
            file_name: SHARE_FILE_NAME,
            mime: PNG_MIME,
            bytes: &export.bytes,
        };
        match self.target.share(payload) {
            Ok(()) => ExportStatus::Shared,
            Err(ShareError::Cancelled) => {
                tracing::debug!("share cancelled by user");
                ExportStatus::Cancelled
            }
            Err(ShareError::Rejected(reason)) => {
                tracing::warn!(%reason, "share rejected");
                ExportStatus::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
