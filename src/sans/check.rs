//! Helper for computing frame checksums.
//!
//! Both the type header and the body of a frame carry a trailing XOR of the
//! bytes before it: the third header byte is the XOR of the first two, and the
//! last body byte is the XOR of the payload.

/// Accumulate a slice of bytes into a checksum value.
pub fn compute_xor(init: u8, r: &[u8]) -> u8 {
    r.iter().fold(init, |acc, b| acc ^ b)
}

/// Split a body into its payload and trailing checksum byte, returning the
/// found and calculated checksums alongside the payload.
///
/// Returns `None` for an empty body.
pub fn split_checked(body: &[u8]) -> Option<(&[u8], u8, u8)> {
    let (found, payload) = body.split_last()?;
    Some((payload, *found, compute_xor(0, payload)))
}
