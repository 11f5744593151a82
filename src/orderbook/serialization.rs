//! Pluggable serialization of engine events.
//!
//! [`EventSerializer`] turns [`EngineEvent`]s into byte buffers and back, so a
//! sink processor can forward trades and book snapshots to any transport
//! without caring about the wire format. [`JsonEventSerializer`] is the
//! built-in implementation.

use crate::orderbook::sink::EngineEvent;
use thiserror::Error;

/// Errors that can occur during event serialization or deserialization.
#[derive(Debug, Error)]
#[error("event serialization error: {message}")]
pub struct SerializationError {
    /// Human-readable description of the failure.
    pub message: String,
}

/// A pluggable serializer for engine events.
///
/// Implementations must be `Send + Sync` so they can be shared with a sink
/// processor through an `Arc<dyn EventSerializer>`.
pub trait EventSerializer: Send + Sync + std::fmt::Debug {
    /// Serialize an [`EngineEvent`] into a byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the event cannot be serialized.
    fn serialize_event(&self, event: &EngineEvent) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize an [`EngineEvent`] from a byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the bytes are malformed or
    /// incompatible with the expected format.
    fn deserialize_event(&self, data: &[u8]) -> Result<EngineEvent, SerializationError>;

    /// Returns the MIME-like content type identifier for this format.
    #[must_use]
    fn content_type(&self) -> &'static str;
}

/// JSON event serializer using `serde_json`.
///
/// # Content Type
///
/// `"application/json"`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEventSerializer;

impl JsonEventSerializer {
    /// Create a new JSON event serializer.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl EventSerializer for JsonEventSerializer {
    fn serialize_event(&self, event: &EngineEvent) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(event).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn deserialize_event(&self, data: &[u8]) -> Result<EngineEvent, SerializationError> {
        serde_json::from_slice(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    #[inline]
    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
