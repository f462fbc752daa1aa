//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module synchronize on a byte source (a
//! [`Source`](reader::Source) or an in-memory capture), decode every
//! recognized frame with a [`Decoder`], and publish the results to a
//! [`Receiver`].
//!
//! Decoding is driven by a [`Registry`] mapping 3-byte type identifiers to
//! field layouts. [`Registry::builtin`] knows the GPS messages; further
//! layouts are registered with [`Registry::register`].
//!
//! Errors in a single frame never end decoding. They are handed to the
//! receiver and the stream continues with the next frame.

#[cfg(feature = "std")]
pub mod reader;
pub mod decoder;
pub mod message;
pub mod registry;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

pub use decoder::{Decoder, Error};
pub use message::{DecodedMessage, Value};
pub use registry::{Kind, Layout, Registry};

use either::Either::{self, Left, Right};

use crate::sans::frame::{Frame, Junk};

/// Receive the events of a decoded stream.
///
/// The default implementation of each method ignores received values.
#[allow(unused_variables)]
pub trait Receiver {
    /// Add bytes that matched no frame header.
    fn add_junk(&mut self, junk: &[u8]) {}
    /// Add a decoded message.
    fn add_message(&mut self, message: DecodedMessage) {}
    /// Add an error decoding a single frame. The frame is dropped.
    fn add_error(&mut self, frame: &Frame, error: Error) {}
}

/// Decode a synchronizer event, publishing the outcome to a receiver.
///
/// Frames of an unregistered type are logged by the decoder and publish
/// nothing.
pub(crate) fn publish(event: Either<Junk, Frame>, decoder: &Decoder, o: &mut impl Receiver) {
    match event {
        Left(junk) => o.add_junk(junk.as_bytes()),
        Right(frame) => match decoder.decode(frame.as_bytes()) {
            Ok(Some(message)) => o.add_message(message),
            Ok(None) => {}
            Err(err) => o.add_error(&frame, err),
        },
    }
}
