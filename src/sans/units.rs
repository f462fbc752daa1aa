//! Conversions from raw sensor encodings to physical units.

use thiserror::Error;

/// An error converting a value that cannot come from a working sensor.
#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    /// Temperature at or above the plausible sensor range.
    #[error("Implausible temperature ({0} °F).")]
    Implausible(f64),
    /// Negative distance.
    #[error("Negative distance ({0} ft).")]
    Negative(f64),
}

/// Upper bound (exclusive) on temperatures reported by bus sensors, in °F.
pub const MAX_FAHRENHEIT: f64 = 150.0;

pub fn fahrenheit_to_celsius(t: f64) -> Result<f64, UnitError> {
    if !(t < MAX_FAHRENHEIT) {
        Err(UnitError::Implausible(t))?;
    }

    Ok((t - 32.0) * (5.0 / 9.0))
}

pub fn feet_to_meters(feet: f64) -> Result<f64, UnitError> {
    if !(feet >= 0.0) {
        Err(UnitError::Negative(feet))?;
    }

    Ok(feet * 0.3048)
}

/// Decode a raw GPS position into latitude and longitude in decimal degrees.
///
/// Each coordinate is a whole degree byte followed by thousandths of a minute
/// as a little-endian `u16`. An all-zero position means no fix, and decodes to
/// NaN for both coordinates.
pub fn decode_position(r: [u8; 6]) -> (f64, f64) {
    if r == [0; 6] {
        return (f64::NAN, f64::NAN);
    }

    let [lat_deg, lat_lo, lat_hi, lon_deg, lon_lo, lon_hi] = r;

    let coordinate = |deg: u8, milli: [u8; 2]| {
        f64::from(deg) + f64::from(u16::from_le_bytes(milli)) / 60_000.0
    };

    (
        coordinate(lat_deg, [lat_lo, lat_hi]),
        coordinate(lon_deg, [lon_lo, lon_hi]),
    )
}

/// Speed word marking the absence of a fix.
pub const NO_FIX_SPEED: u16 = u16::MAX;

/// Decode a raw course and speed over ground into degrees and knots.
///
/// Speed comes first, as hundredths of a knot; course second, as a fraction of
/// a full circle in 1/65536 steps. A speed of `ff ff` means no fix, and
/// decodes to NaN for both values.
pub fn decode_course(r: [u8; 4]) -> (f64, f64) {
    let [sog_lo, sog_hi, cog_lo, cog_hi] = r;
    let sog = u16::from_le_bytes([sog_lo, sog_hi]);

    if sog == NO_FIX_SPEED {
        return (f64::NAN, f64::NAN);
    }

    let cog = u16::from_le_bytes([cog_lo, cog_hi]);

    (f64::from(cog) * 360.0 / 65_536.0, f64::from(sog) / 100.0)
}
