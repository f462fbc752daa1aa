//! Field layouts of known messages, and the registry selecting them.

use alloc::{collections::BTreeMap, sync::Arc, vec, vec::Vec};
use core::fmt::Debug;

use chrono::{TimeZone, Utc};
use zerocopy::FromBytes;

use crate::sans::{
    check::split_checked,
    field::{check_length, decode_integers},
    frame::{FrameHeaderSpec, TypeId},
    units::{decode_course, decode_position},
};

use super::{Error, Value};

/// Named values extracted from a body, in layout order.
pub type Fields = Vec<(&'static str, Value)>;

/// Capabilities of a message's field layout.
pub trait Layout: Debug {
    /// Number of body bytes following the type header.
    fn body_len(&self) -> usize;

    /// Check a frame's body length against the layout, returning the body.
    fn validate_length<'a>(&self, frame: &'a [u8]) -> Result<&'a [u8], Error> {
        Ok(check_length(frame, self.body_len())?)
    }

    /// Extract named values from a body of valid length.
    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error>;
}

/// `24 07 23`: UTC date and time.
pub const GPS_TIME: TypeId = TypeId([0x24, 0x07, 0x23]);
/// `20 08 28`: GPS position.
pub const GPS_POSITION: TypeId = TypeId([0x20, 0x08, 0x28]);
/// `21 04 25`: course and speed over ground.
pub const GPS_COURSE: TypeId = TypeId([0x21, 0x04, 0x25]);

/// Year encoded as zero in time messages.
pub const YEAR_BASE: i32 = 1992;

/// UTC date and time, reported by the GPS.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpsTime;

#[repr(C, packed)]
#[derive(FromBytes)]
struct RawTime {
    hour: u8,
    minute: u8,
    second: u8,
    day: u8,
    month: u8,
    year: u8,
    _reserved: u8,
    _checksum: u8,
}

impl Layout for GpsTime {
    fn body_len(&self) -> usize {
        size_of::<RawTime>()
    }

    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error> {
        let RawTime {
            hour,
            minute,
            second,
            day,
            month,
            year,
            ..
        } = read_checked(body)?;

        let utctime = Utc
            .with_ymd_and_hms(
                YEAR_BASE + i32::from(year),
                month.into(),
                day.into(),
                hour.into(),
                minute.into(),
                second.into(),
            )
            .single()
            .ok_or_else(|| Error::InvalidTime(hex::encode(body)))?;

        Ok(vec![
            ("mdesc", Value::Text("gpstime")),
            ("utctime", Value::Timestamp(utctime)),
        ])
    }
}

/// Latitude and longitude, reported by the GPS.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpsPosition;

#[repr(C, packed)]
#[derive(FromBytes)]
struct RawPosition {
    position: [u8; 6],
    _flags: [u8; 2],
    _checksum: u8,
}

impl Layout for GpsPosition {
    fn body_len(&self) -> usize {
        size_of::<RawPosition>()
    }

    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error> {
        let RawPosition { position, .. } = read_checked(body)?;
        let (lat, lon) = decode_position(position);

        Ok(vec![
            ("mdesc", Value::Text("gpspos")),
            ("lat", Value::Angle(lat)),
            ("lon", Value::Angle(lon)),
        ])
    }
}

/// Course and speed over ground, reported by the GPS.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpsCourse;

#[repr(C, packed)]
#[derive(FromBytes)]
struct RawCourse {
    course: [u8; 4],
    _checksum: u8,
}

impl Layout for GpsCourse {
    fn body_len(&self) -> usize {
        size_of::<RawCourse>()
    }

    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error> {
        let RawCourse { course, .. } = read_checked(body)?;
        let (cog, sog) = decode_course(course);

        Ok(vec![
            ("mdesc", Value::Text("gpscog")),
            ("cog", Value::Angle(cog)),
            ("sog", Value::Float(sog)),
        ])
    }
}

/// A body of raw little-endian integers, for messages not yet understood.
#[derive(Debug, Clone, Copy)]
pub struct RawIntegers {
    pub body_len: usize,
    /// Integer width in bits, 8 or 16.
    pub width: u32,
    pub signed: bool,
}

impl Layout for RawIntegers {
    fn body_len(&self) -> usize {
        self.body_len
    }

    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error> {
        let (ints, strbody) = decode_integers(body, self.width, self.signed)?;

        Ok(vec![
            ("mdesc", Value::Text("ints")),
            ("ints", Value::Integers(ints)),
            ("strbody", Value::Hex(strbody)),
        ])
    }
}

/// A layout of a known kind.
#[derive(Debug, Clone)]
pub enum Kind {
    GpsTime(GpsTime),
    GpsPosition(GpsPosition),
    GpsCourse(GpsCourse),
    Integers(RawIntegers),
    /// A layout supplied by the application.
    Custom(Arc<dyn Layout + Send + Sync>),
}

impl Kind {
    fn layout(&self) -> &dyn Layout {
        match self {
            Self::GpsTime(l) => l,
            Self::GpsPosition(l) => l,
            Self::GpsCourse(l) => l,
            Self::Integers(l) => l,
            Self::Custom(l) => l.as_ref(),
        }
    }
}

impl Layout for Kind {
    fn body_len(&self) -> usize {
        self.layout().body_len()
    }

    fn validate_length<'a>(&self, frame: &'a [u8]) -> Result<&'a [u8], Error> {
        self.layout().validate_length(frame)
    }

    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error> {
        self.layout().extract_fields(body)
    }
}

/// Layouts by message type.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    kinds: BTreeMap<TypeId, Kind>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry of the GPS time, position, and course messages.
    pub fn builtin() -> Self {
        Self::new()
            .with(GPS_TIME, Kind::GpsTime(GpsTime))
            .with(GPS_POSITION, Kind::GpsPosition(GpsPosition))
            .with(GPS_COURSE, Kind::GpsCourse(GpsCourse))
    }

    /// Register a layout, returning the registry.
    pub fn with(mut self, id: impl Into<TypeId>, kind: Kind) -> Self {
        self.register(id, kind);
        self
    }

    /// Register a layout, returning the one it replaces.
    pub fn register(&mut self, id: impl Into<TypeId>, kind: Kind) -> Option<Kind> {
        let id = id.into();
        let replaced = self.kinds.insert(id, kind);

        if replaced.is_some() {
            log::debug!("replaced layout for 0x{id}");
        }

        replaced
    }

    pub fn get(&self, id: &TypeId) -> Option<&Kind> {
        self.kinds.get(id)
    }

    /// Header specifications for synchronizing on the registered messages.
    pub fn header_specs(&self) -> Vec<FrameHeaderSpec> {
        self.kinds
            .iter()
            .map(|(id, kind)| FrameHeaderSpec {
                header: *id,
                len: kind.body_len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Read a raw structure from a body ending in a valid checksum byte.
fn read_checked<T: FromBytes>(body: &[u8]) -> Result<T, Error> {
    let (_, found, calculated) = split_checked(body).ok_or(Error::Body {
        expected: size_of::<T>(),
        found: 0,
    })?;

    if found != calculated {
        Err(Error::Checksum { found, calculated })?;
    }

    T::read_from_bytes(body).map_err(|_| Error::Body {
        expected: size_of::<T>(),
        found: body.len(),
    })
}
