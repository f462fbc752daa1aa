#![no_std]

//! A receive-only decoder for the FDX marine instrument bus.
//!
//! The bus multiplexes fixed-format binary messages (GPS position, course and
//! speed over ground, UTC time, ...) onto one serial byte stream. Each message
//! is delimited by the sentinel byte `0x81` and identified by a 3-byte type
//! header:
//!
//! ```text
//! 0x81 <type: 3 bytes> <body: fixed length per type> 0x81
//! ```
//!
//! Most users should begin with the drivers in the [`avec`] module, which
//! synchronize on a byte source and publish decoded messages to a
//! [`Receiver`](avec::Receiver). Applications needing finer control (embedded
//! targets, custom transports) can drive the [`sans`] module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the source-based driver (default).

extern crate alloc;

pub mod avec;
pub mod sans;
