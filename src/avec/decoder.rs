//! Frame decoder, dispatching on the type header to a registered layout.

use alloc::string::String;

use thiserror::Error;

use crate::sans::{
    field::FieldError,
    frame::{HEADER_LEN, TypeId},
    units::UnitError,
};

use super::{DecodedMessage, Layout, Registry};

/// Errors occurring while decoding a single frame.
#[derive(Debug, Error)]
pub enum Error {
    /// Frame too short to carry a type header and a body.
    #[error("Short message <4 bytes: {0}.")]
    ShortFrame(String),
    /// Body length differs from the registered layout.
    #[error("mtype=0x{type_id}: Incorrect length {expected} (got {found}) body: {body}")]
    LengthMismatch {
        type_id: TypeId,
        expected: usize,
        found: usize,
        body: String,
    },
    /// Body handed to a layout does not fit its raw structure.
    #[error("Body of {found} bytes does not fit a {expected} byte layout.")]
    Body { expected: usize, found: usize },
    /// Calculated and found checksums do not match.
    #[error("Calculated ({calculated:#04x}) and found ({found:#04x}) checksums do not match.")]
    Checksum { found: u8, calculated: u8 },
    /// Date and time fields do not form a valid instant.
    #[error("Invalid date and time: {0}.")]
    InvalidTime(String),
    /// Field extraction failed.
    #[error(transparent)]
    Field(FieldError),
    /// Implausible physical value.
    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Length {
                type_id,
                expected,
                found,
                body,
            } => Self::LengthMismatch {
                type_id,
                expected,
                found,
                body,
            },
            err => Self::Field(err),
        }
    }
}

/// Decodes frames with the layouts of a registry.
#[derive(Debug, Clone)]
pub struct Decoder {
    registry: Registry,
}

impl Decoder {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decode a frame (type header followed by body, sentinels stripped).
    ///
    /// Returns `None` for frames of a type with no registered layout.
    ///
    /// # Panics
    ///
    /// Panics if a layout accepts a body but extracts no fields from it.
    pub fn decode(&self, frame: &[u8]) -> Result<Option<DecodedMessage>, Error> {
        let (header, body) = frame
            .split_first_chunk::<HEADER_LEN>()
            .filter(|(_, body)| !body.is_empty())
            .ok_or_else(|| Error::ShortFrame(hex::encode(frame)))?;

        // Our usual hex representation, for visual recognition.
        let type_id = TypeId(*header);
        log::trace!("0x{type_id}, {} bytes, body {}", frame.len(), hex::encode(body));

        let Some(kind) = self.registry.get(&type_id) else {
            log::warn!("No handler for {} byte 0x{type_id}", frame.len());
            return Ok(None);
        };

        let body = kind.validate_length(frame)?;
        let fields = kind.extract_fields(body)?;

        assert!(!fields.is_empty(), "layout for 0x{type_id} extracted no fields");

        Ok(Some(DecodedMessage::new(type_id, fields)))
    }
}

impl Default for Decoder {
    /// A decoder for the built-in messages.
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}
