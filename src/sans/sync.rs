//! Frame synchronization over an arbitrarily chunked byte stream.

use alloc::vec::Vec;

use either::Either::{self, Left, Right};

use super::frame::{Frame, FrameHeaderSpec, HEADER_LEN, Junk, SENTINEL, TypeId};

/// Default size the buffer may reach, with no frame start in sight, before its
/// head is given up as junk.
pub const DEFAULT_JUNK_LIMIT: usize = 256;

/// Locates frame boundaries in a byte stream.
///
/// A frame start is the sentinel byte immediately followed by one of the
/// registered type headers. Among all starts in the buffer, the one at the
/// lowest offset wins; starts at the same offset are tried in registration
/// order. A start is confirmed once the byte following its body is also the
/// sentinel, otherwise it is skipped as a false positive.
///
/// The closing sentinel of a frame is left in the buffer, as on the wire it is
/// also the opening sentinel of the next frame. Concatenating every emitted
/// [`Junk`] and every [`Frame`] prefixed with one sentinel byte therefore
/// reproduces the input, once [`Synchronizer::finish`] has been drained.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    specs: Vec<FrameHeaderSpec>,
    buf: Vec<u8>,
    pending: Option<Frame>,
    junk_limit: Option<usize>,
}

enum Scan {
    /// A confirmed frame, leading sentinel at `start`, trailing at `end`.
    Found {
        start: usize,
        end: usize,
        header: TypeId,
    },
    /// A frame start whose body has not fully arrived.
    Incomplete,
    /// No frame start anywhere in the buffer.
    Nothing,
}

impl Synchronizer {
    /// Create a synchronizer recognizing the given headers, in priority order.
    pub fn new(specs: impl IntoIterator<Item = FrameHeaderSpec>) -> Self {
        Self {
            specs: specs.into_iter().collect(),
            buf: Vec::new(),
            pending: None,
            junk_limit: Some(DEFAULT_JUNK_LIMIT),
        }
    }

    /// Set how many bytes may be buffered, while no frame start is present,
    /// before all but the last few are emitted as junk. `None` buffers
    /// indefinitely.
    pub fn with_junk_limit(mut self, limit: Option<usize>) -> Self {
        self.junk_limit = limit;
        self
    }

    pub fn specs(&self) -> &[FrameHeaderSpec] {
        &self.specs
    }

    /// Number of received bytes not yet emitted.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Append received bytes to the buffer.
    pub fn push(&mut self, r: &[u8]) {
        self.buf.extend_from_slice(r);
    }

    /// Append received bytes, returning every event they complete.
    pub fn feed(&mut self, r: &[u8]) -> Vec<Either<Junk, Frame>> {
        self.push(r);
        core::iter::from_fn(|| self.advance()).collect()
    }

    /// Produce the next event, if the buffered bytes allow.
    ///
    /// Returns `None` when more bytes are needed.
    pub fn advance(&mut self) -> Option<Either<Junk, Frame>> {
        if let Some(frame) = self.pending.take() {
            return Some(Right(frame));
        }

        match self.scan() {
            Scan::Found { start, end, header } => {
                let mut junk: Vec<u8> = self.buf.drain(..end).collect();
                let frame = Frame::new(junk.split_off(start + 1));
                junk.truncate(start);

                log::debug!("frame {header} after {start} junk bytes");

                if junk.is_empty() {
                    Some(Right(frame))
                } else {
                    self.pending = Some(frame);
                    Some(Left(Junk(junk)))
                }
            }
            Scan::Incomplete => None,
            Scan::Nothing => {
                let limit = self.junk_limit?;
                let keep = HEADER_LEN.min(self.buf.len());

                if self.buf.len() <= limit {
                    return None;
                }

                let junk: Vec<u8> = self.buf.drain(..self.buf.len() - keep).collect();
                log::debug!("gave up {} bytes without a frame start", junk.len());

                Some(Left(Junk(junk)))
            }
        }
    }

    /// Drain the synchronizer once the stream has ended.
    ///
    /// Yields a frame still awaiting emission, then all remaining bytes as
    /// junk. Call repeatedly until `None`.
    pub fn finish(&mut self) -> Option<Either<Junk, Frame>> {
        if let Some(frame) = self.pending.take() {
            return Some(Right(frame));
        }

        if self.buf.is_empty() {
            return None;
        }

        Some(Left(Junk(core::mem::take(&mut self.buf))))
    }

    fn scan(&self) -> Scan {
        let starts = self
            .buf
            .windows(1 + HEADER_LEN)
            .enumerate()
            .filter(|(_, w)| w[0] == SENTINEL);

        for (start, window) in starts {
            let candidates = self.specs.iter().filter(|s| window[1..] == s.header.0);

            for spec in candidates {
                let end = start + spec.trailer_offset();

                match self.buf.get(end) {
                    None => return Scan::Incomplete,
                    Some(&SENTINEL) => {
                        return Scan::Found {
                            start,
                            end,
                            header: spec.header,
                        };
                    }
                    Some(_) => log::trace!("no trailing sentinel for {} at {}", spec.header, start),
                }
            }
        }

        Scan::Nothing
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(FrameHeaderSpec::BUS_DEFAULTS)
    }
}
