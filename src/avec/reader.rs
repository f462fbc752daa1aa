//! Source-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{self, ErrorKind, Read},
    vec::Vec,
};

use either::Either;

use crate::sans::{
    Synchronizer,
    frame::{Frame, Junk},
};

use super::{Decoder, Receiver, publish};

extern crate std;

/// Number of bytes requested from a source per read, unless configured.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// A transport supplying raw bus bytes on demand.
pub trait Source {
    /// Read up to `n` newly available bytes.
    ///
    /// Returns `None` once the stream has ended. An empty read means no data
    /// is available yet, and is retried.
    fn read(&mut self, n: usize) -> io::Result<Option<Vec<u8>>>;
}

impl<F> Source for F
where
    F: FnMut(usize) -> io::Result<Option<Vec<u8>>>,
{
    fn read(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        self(n)
    }
}

/// Adapts a reader (a file, or a serial port with a read timeout) into a
/// [`Source`].
///
/// A zero-length read ends the stream. Reads that would block or that time out
/// are retried.
#[derive(Debug)]
pub struct ReadSource<R>(pub R);

impl<R: Read> Source for ReadSource<R> {
    fn read(&mut self, n: usize) -> io::Result<Option<Vec<u8>>> {
        let mut buf = alloc::vec![0; n];

        match self.0.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(i) => {
                buf.truncate(i);
                Ok(Some(buf))
            }
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                ) =>
            {
                Ok(Some(Vec::new()))
            }
            Err(err) => Err(err),
        }
    }
}

/// Iterator over the events of a stream read from a source.
///
/// Pulls bytes from the source only when the synchronizer needs more. Once the
/// source ends (or fails), the synchronizer is drained and iteration stops.
#[derive(Debug)]
pub struct Frames<S> {
    source: S,
    sync: Synchronizer,
    chunk_size: usize,
    exhausted: bool,
}

impl<S: Source> Frames<S> {
    pub fn new(source: S, sync: Synchronizer) -> Self {
        Self {
            source,
            sync,
            chunk_size: DEFAULT_CHUNK_SIZE,
            exhausted: false,
        }
    }

    /// Set the number of bytes requested per read.
    pub fn chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n.max(1);
        self
    }

    pub fn into_inner(self) -> (S, Synchronizer) {
        (self.source, self.sync)
    }
}

impl<S: Source> Iterator for Frames<S> {
    type Item = io::Result<Either<Junk, Frame>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.exhausted {
                return self.sync.finish().map(Ok);
            }

            if let Some(event) = self.sync.advance() {
                return Some(Ok(event));
            }

            match self.source.read(self.chunk_size) {
                Ok(Some(bytes)) => self.sync.push(&bytes),
                Ok(None) => self.exhausted = true,
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Decode a stream read from a source, publishing to a receiver.
///
/// Synchronizes on the headers of the decoder's registry, and runs until the
/// source ends. Errors in single frames are published; only source errors end
/// decoding early.
///
/// This method is also re-exported as `fdx::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(source: impl Source, decoder: &Decoder, o: &mut impl Receiver) -> io::Result<()> {
    let sync = Synchronizer::new(decoder.registry().header_specs());

    for event in Frames::new(source, sync) {
        publish(event?, decoder, o);
    }

    Ok(())
}
