//! Frames, junk spans, and the headers that identify them.

use alloc::vec::Vec;
use core::fmt;

use zerocopy::FromBytes;

/// Delimiter byte marking frame boundaries on the wire.
pub const SENTINEL: u8 = 0x81;

/// Number of bytes in a frame's type header.
pub const HEADER_LEN: usize = 3;

/// The 3-byte message type identifying a frame.
///
/// Displayed as six lowercase hex digits, the form used for lookup and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub [u8; HEADER_LEN]);

#[repr(C, packed)]
#[derive(FromBytes)]
struct TypeHeader {
    message_type: u8,
    payload_len: u8,
    check: u8,
}

impl TypeId {
    /// Parse a type identifier from six hex digits.
    pub fn from_hex(s: impl AsRef<[u8]>) -> Result<Self, hex::FromHexError> {
        let mut r = [0; HEADER_LEN];
        hex::decode_to_slice(s, &mut r)?;
        Ok(Self(r))
    }

    /// The message type byte.
    pub fn message_type(&self) -> u8 {
        let TypeHeader { message_type, .. } = zerocopy::transmute!(self.0);
        message_type
    }

    /// The payload length announced by the header, excluding the body's
    /// trailing checksum byte.
    pub fn payload_len(&self) -> usize {
        let TypeHeader { payload_len, .. } = zerocopy::transmute!(self.0);
        payload_len as usize
    }

    /// Whether the header's check byte matches its first two bytes.
    pub fn is_consistent(&self) -> bool {
        let TypeHeader {
            message_type,
            payload_len,
            check,
        } = zerocopy::transmute!(self.0);

        message_type ^ payload_len == check
    }
}

impl From<[u8; HEADER_LEN]> for TypeId {
    fn from(r: [u8; HEADER_LEN]) -> Self {
        Self(r)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:02x}{b:02x}{c:02x}")
    }
}

/// A type header paired with the body length expected to follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeaderSpec {
    pub header: TypeId,
    pub len: usize,
}

impl FrameHeaderSpec {
    /// The header and body length pairs observed on the bus.
    pub const BUS_DEFAULTS: [FrameHeaderSpec; 2] = [
        FrameHeaderSpec::new([0x01, 0x04, 0x02], 6),
        FrameHeaderSpec::new([0x01, 0x01, 0x06], 10),
    ];

    pub const fn new(header: [u8; HEADER_LEN], len: usize) -> Self {
        Self {
            header: TypeId(header),
            len,
        }
    }

    /// Offset of the trailing sentinel, counted from the leading one.
    pub(crate) fn trailer_offset(&self) -> usize {
        1 + HEADER_LEN + self.len
    }
}

/// A complete frame: type header followed by body, sentinels stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The frame's type header, if it is long enough to carry one.
    pub fn type_id(&self) -> Option<TypeId> {
        let (header, _) = self.0.split_first_chunk::<HEADER_LEN>()?;
        Some(TypeId(*header))
    }

    /// Bytes following the type header.
    pub fn body(&self) -> &[u8] {
        self.0.get(HEADER_LEN..).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Bytes consumed while searching for a frame that matched no header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junk(pub Vec<u8>);

impl Junk {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Junk {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
