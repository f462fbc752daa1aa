//! Slice-based decoder implementation.

use crate::sans::Synchronizer;

use super::{Decoder, Receiver, publish};

/// Decode a complete capture of a stream, publishing to a receiver.
///
/// Synchronizes on the headers of the decoder's registry. Bytes after the last
/// recognized frame are published as junk.
///
/// This method is also re-exported as `fdx::avec::decode_slice`.
pub fn decode(r: &[u8], decoder: &Decoder, o: &mut impl Receiver) {
    let mut sync = Synchronizer::new(decoder.registry().header_specs());
    sync.push(r);

    while let Some(event) = sync.advance() {
        publish(event, decoder, o);
    }

    while let Some(event) = sync.finish() {
        publish(event, decoder, o);
    }
}
