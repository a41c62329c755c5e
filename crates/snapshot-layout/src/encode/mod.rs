//! Encoder contracts
//!
//! Turning descriptors into a document or deck file format happens outside
//! the layout engine. Encoders are injected so the geometry can be tested
//! without any real file format behind it.

#[cfg(feature = "serde")]
mod manifest;

#[cfg(feature = "serde")]
pub use manifest::*;

use crate::assemble::{Deck, Document};
use crate::types::Result;
use std::path::Path;
use thiserror::Error;

/// Failure reported by an external encoder
#[derive(Error, Debug)]
#[error("{message}")]
pub struct EncodingError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl EncodingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Serializes a paginated document. Takes ownership so image buffers are
/// released as soon as encoding is done with them.
pub trait DocumentEncoder {
    fn encode_document(&self, document: Document) -> std::result::Result<Vec<u8>, EncodingError>;
}

/// Serializes a slide deck
pub trait DeckEncoder {
    fn encode_deck(&self, deck: Deck) -> std::result::Result<Vec<u8>, EncodingError>;
}

/// Encode a document on a blocking task and write it to `path`.
///
/// Returns the number of bytes written.
pub async fn save_document<E>(encoder: E, document: Document, path: impl AsRef<Path>) -> Result<usize>
where
    E: DocumentEncoder + Send + 'static,
{
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || encoder.encode_document(document)).await??;
    tokio::fs::write(&path, &bytes).await?;
    Ok(bytes.len())
}

/// Encode a deck on a blocking task and write it to `path`.
///
/// Returns the number of bytes written.
pub async fn save_deck<E>(encoder: E, deck: Deck, path: impl AsRef<Path>) -> Result<usize>
where
    E: DeckEncoder + Send + 'static,
{
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || encoder.encode_deck(deck)).await??;
    tokio::fs::write(&path, &bytes).await?;
    Ok(bytes.len())
}
