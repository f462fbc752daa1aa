//! Primitives for extracting fields from frame bodies.

use alloc::{string::String, vec::Vec};
use core::fmt;

use thiserror::Error;

use super::frame::{HEADER_LEN, TypeId};

/// An error extracting fields from a body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Integer width other than 8 or 16 bits.
    #[error("Unsupported integer width ({0} bits).")]
    UnsupportedWidth(u32),
    /// Body does not divide into whole windows.
    #[error("Body of {len} bytes does not divide into {width} bit windows.")]
    Misaligned { len: usize, width: u32 },
    /// Body length differs from the layout.
    #[error("mtype=0x{type_id}: Incorrect length {expected} (got {found}) body: {body}")]
    Length {
        type_id: TypeId,
        expected: usize,
        found: usize,
        body: String,
    },
    /// Frame too short to carry a type header.
    #[error("Frame of {0} bytes has no type header.")]
    NoHeader(usize),
}

/// Split a frame into its type header and body, checking the body length.
///
/// Returns the body, with the type header stripped.
pub fn check_length(frame: &[u8], expected: usize) -> Result<&[u8], FieldError> {
    let (header, body) = frame
        .split_first_chunk::<HEADER_LEN>()
        .ok_or(FieldError::NoHeader(frame.len()))?;

    if body.len() != expected {
        Err(FieldError::Length {
            type_id: TypeId(*header),
            expected,
            found: body.len(),
            body: hex::encode(body),
        })?;
    }

    Ok(body)
}

/// A run of integers extracted from a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integers {
    pub width: u32,
    pub values: Vec<i64>,
}

impl fmt::Display for Integers {
    /// Space-separated, zero-padded to the widest unsigned value of the width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = if self.width == 16 { 5 } else { 3 };

        for (i, v) in self.values.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v:0pad$}")?;
        }

        Ok(())
    }
}

/// Decode a body as successive little-endian integers of `width` bits.
///
/// Returns the integers, and the body as hex for reference.
pub fn decode_integers(body: &[u8], width: u32, signed: bool) -> Result<(Integers, String), FieldError> {
    let size = match width {
        8 | 16 => width as usize / 8,
        _ => Err(FieldError::UnsupportedWidth(width))?,
    };

    if body.len() % size != 0 {
        Err(FieldError::Misaligned {
            len: body.len(),
            width,
        })?;
    }

    let values = body
        .chunks_exact(size)
        .map(|w| match (w, signed) {
            ([b], false) => i64::from(*b),
            ([b], true) => i64::from(*b as i8),
            ([lo, hi], false) => i64::from(u16::from_le_bytes([*lo, *hi])),
            ([lo, hi], true) => i64::from(i16::from_le_bytes([*lo, *hi])),
            _ => unreachable!(),
        })
        .collect();

    Ok((Integers { width, values }, hex::encode(body)))
}
