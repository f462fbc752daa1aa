//! Synchronization and field primitives, free of any I/O.
//!
//! This module is intended for applications that manage their own transport.
//! See [`crate::avec`] for drivers covering common decoding patterns.
//!
//! # Architecture
//!
//! Bytes are pushed into a [`Synchronizer`] in chunks of any size. Once enough
//! bytes are buffered, calling its `advance` method yields the next event: either
//! a span of [`Junk`](frame::Junk) bytes that matched no known header, or a
//! complete [`Frame`](frame::Frame) with its sentinels stripped. Events are
//! yielded strictly in stream order.
//!
//! Frames are turned into values by a layout built from the primitives in
//! [`field`] and [`units`]. Some areas of the decoding process are not handled
//! here and must be carefully written by an implementation:
//!
//! - Reading bytes from the transport, including retrying when none are ready
//! yet.
//!
//! - Draining the synchronizer with `finish` once the transport is exhausted,
//! so trailing bytes are not lost.
//!
//! Implementers are recommended to begin by studying and modifying a driver from
//! the [`crate::avec`] module.

pub mod check;
pub mod field;
pub mod frame;
pub mod sync;
pub mod units;

/// Entrypoint to the synchronizer.
pub type Synchronizer = sync::Synchronizer;
