//! Single-image slots that discard decode results for superseded sources.
//!
//! Decoding is front-loaded and may run on any thread: [`AssetSlot::request`] hands out a
//! [`DecodeJob`], the caller runs it wherever it likes, and [`AssetSlot::settle`] accepts the
//! result only if the job's ticket still names the slot's current request.

use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image_lossy};
use crate::foundation::math::Fnv1a64;

/// Identity of an image source (uploaded file, generated payload, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
    /// Content-derived identity.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_u8(b'B');
        hasher.write_bytes(bytes);
        Self(hasher.finish())
    }

    /// Caller-chosen identity, e.g. a file path or payload URL.
    pub fn from_key(key: &str) -> Self {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_u8(b'K');
        hasher.write_bytes(key.as_bytes());
        Self(hasher.finish())
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Names one request made against a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeTicket {
    generation: u64,
    source: SourceId,
}

impl DecodeTicket {
    pub fn source(self) -> SourceId {
        self.source
    }
}

/// Pending decode work for one request.
#[derive(Debug)]
pub struct DecodeJob {
    ticket: DecodeTicket,
    label: &'static str,
    bytes: Vec<u8>,
}

impl DecodeJob {
    pub fn ticket(&self) -> DecodeTicket {
        self.ticket
    }

    /// Decode the bytes. Failures yield an outcome with no image.
    pub fn run(self) -> DecodeOutcome {
        let image = decode_image_lossy(&self.bytes, self.label);
        DecodeOutcome {
            ticket: self.ticket,
            image,
        }
    }
}

/// Finished decode, ready to hand back to [`AssetSlot::settle`].
#[derive(Debug)]
pub struct DecodeOutcome {
    pub ticket: DecodeTicket,
    pub image: Option<PreparedImage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The slot now holds the decoded image.
    Applied,
    /// Decoding failed; the slot is now empty.
    Failed,
    /// The result belongs to a superseded request and was dropped.
    Stale,
}

impl SettleOutcome {
    /// Whether the slot's visible content changed.
    pub fn changed(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

#[derive(Debug)]
pub struct AssetSlot {
    label: &'static str,
    generation: u64,
    requested: Option<SourceId>,
    settled: Option<SourceId>,
    image: Option<Arc<PreparedImage>>,
}

impl AssetSlot {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            generation: 0,
            requested: None,
            settled: None,
            image: None,
        }
    }

    /// Start loading `source`; any earlier request becomes stale.
    pub fn request(&mut self, source: SourceId, bytes: Vec<u8>) -> DecodeJob {
        self.generation += 1;
        self.requested = Some(source);
        DecodeJob {
            ticket: DecodeTicket {
                generation: self.generation,
                source,
            },
            label: self.label,
            bytes,
        }
    }

    /// Drop the current image and cancel any outstanding request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.requested = None;
        self.settled = None;
        self.image = None;
    }

    pub fn settle(&mut self, outcome: DecodeOutcome) -> SettleOutcome {
        let DecodeOutcome { ticket, image } = outcome;
        if ticket.generation != self.generation || self.requested != Some(ticket.source) {
            tracing::debug!(
                slot = self.label,
                source = ticket.source.as_u64(),
                "discarding stale decode result"
            );
            return SettleOutcome::Stale;
        }

        self.settled = Some(ticket.source);
        match image {
            Some(img) => {
                self.image = Some(Arc::new(img));
                SettleOutcome::Applied
            }
            None => {
                self.image = None;
                SettleOutcome::Failed
            }
        }
    }

    pub fn image(&self) -> Option<&PreparedImage> {
        self.image.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.requested.is_some() && self.requested != self.settled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/slot.rs"]
mod tests;
