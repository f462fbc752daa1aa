use std::sync::Arc;

use fdx::{
    avec::{
        Decoder, Error, Kind, Layout, Registry, Value,
        registry::{Fields, GPS_COURSE, GPS_POSITION, GPS_TIME, RawIntegers},
    },
    sans::{
        field::FieldError,
        frame::TypeId,
        units::{UnitError, fahrenheit_to_celsius, feet_to_meters},
    },
};

fn b(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).unwrap()
}

#[test]
fn short_frames() {
    let decoder = Decoder::default();

    for frame in ["", "81", "81 81", "24 07 23"] {
        let err = decoder.decode(&b(frame)).unwrap_err();
        assert!(matches!(err, Error::ShortFrame(_)), "{frame}: {err}");
    }
}

#[test]
fn gps_time() {
    let decoder = Decoder::default();

    let r = decoder.decode(&b("24 07 23 0f 1b 17 11 08 18 00 02")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("gpstime"));
    assert_eq!(r.type_id(), GPS_TIME);

    let utctime = r["utctime"].as_timestamp().unwrap();
    assert_eq!(utctime.to_rfc3339(), "2016-08-17T15:27:23+00:00");
    assert_eq!(r["utctime"].to_string(), "2016-08-17T15:27:23");

    let r = decoder.decode(&b("24 07 23 11 26 1f 0f 08 18 00 37")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("gpstime"));
    assert!(matches!(r["utctime"], Value::Timestamp(_)));
}

#[test]
fn gps_time_out_of_range() {
    // Month 13, checksum adjusted to match.
    let err = Decoder::default()
        .decode(&b("24 07 23 0f 1b 17 11 0d 18 00 07"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTime(_)), "{err}");
}

#[test]
fn gps_position() {
    let decoder = Decoder::default();

    // No lock.
    let r = decoder.decode(&b("20 08 28 00 00 00 00 00 00 10 00 10")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("gpspos"));
    assert!(r["lat"].as_f64().unwrap().is_nan());
    assert!(r["lon"].as_f64().unwrap().is_nan());

    // Position.
    let r = decoder.decode(&b("20 08 28 3b 21 c3 0a ff 8e e0 00 42")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("gpspos"));
    assert!(matches!(r["lat"], Value::Angle(_)));
    assert!((r["lat"].as_f64().unwrap() - 59.83255).abs() < 1e-7);
    assert!((r["lon"].as_f64().unwrap() - 10.6101166667).abs() < 1e-7);
}

#[test]
fn gps_course() {
    let decoder = Decoder::default();

    // No lock.
    let r = decoder.decode(&b("21 04 25 ff ff 00 00 00")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("gpscog"));
    assert!(r["cog"].as_f64().unwrap().is_nan());
    assert!(r["sog"].as_f64().unwrap().is_nan());

    // Steaming ahead.
    let r = decoder.decode(&b("21 04 25 0c 01 66 7e 15")).unwrap().unwrap();
    assert_eq!(r["cog"].as_f64().unwrap() as i64, 177);
    assert_eq!(r["sog"], Value::Float(2.68));
}

#[test]
fn length_mismatch() {
    let decoder = Decoder::default();

    let err = decoder.decode(&b("20 08 28 3b 21 c3 0a ff 8e e0 42")).unwrap_err();
    let Error::LengthMismatch {
        type_id,
        expected,
        found,
        body,
    } = err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(type_id, GPS_POSITION);
    assert_eq!((expected, found), (9, 8));
    assert_eq!(body, "3b21c30aff8ee042");

    let err = decoder.decode(&b("21 04 25 0c 01 66 7e 15 81")).unwrap_err();
    assert!(
        matches!(err, Error::LengthMismatch { expected: 5, found: 6, .. }),
        "{err}"
    );
    assert_eq!(
        err.to_string(),
        "mtype=0x210425: Incorrect length 5 (got 6) body: 0c01667e1581"
    );
}

#[test]
fn checksum_mismatch() {
    let err = Decoder::default()
        .decode(&b("21 04 25 0c 01 66 7e 16"))
        .unwrap_err();
    assert!(
        matches!(err, Error::Checksum { found: 0x16, calculated: 0x15 }),
        "{err}"
    );
}

#[test]
fn no_handler() {
    let decoder = Decoder::default();
    assert_eq!(decoder.decode(&b("22 02 20 05 06 03")).unwrap(), None);

    let decoder = Decoder::new(Registry::new());
    assert_eq!(decoder.decode(&b("21 04 25 0c 01 66 7e 15")).unwrap(), None);
}

#[test]
fn independent_registries() {
    let full = Decoder::default();
    let time_only = Decoder::new(Registry::new().with(GPS_TIME, Kind::GpsTime(Default::default())));

    let frame = b("21 04 25 0c 01 66 7e 15");
    assert!(full.decode(&frame).unwrap().is_some());
    assert!(time_only.decode(&frame).unwrap().is_none());
    assert_eq!(time_only.registry().len(), 1);
}

#[test]
fn raw_integers() {
    let id = TypeId::from_hex("702b5b").unwrap();
    let registry = Registry::new().with(
        id,
        Kind::Integers(RawIntegers {
            body_len: 4,
            width: 16,
            signed: true,
        }),
    );
    let decoder = Decoder::new(registry);

    let r = decoder.decode(&b("70 2b 5b 05 00 fe ff")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("ints"));
    assert_eq!(r["strbody"].as_str(), Some("0500feff"));
    assert_eq!(r["ints"].to_string(), "00005 -0002");

    let Value::Integers(ints) = &r["ints"] else {
        panic!("unexpected value");
    };
    assert_eq!(ints.values, [5, -2]);
}

#[test]
fn raw_integers_unsupported_width() {
    let id = TypeId([0x01, 0x02, 0x03]);
    let registry = Registry::new().with(
        id,
        Kind::Integers(RawIntegers {
            body_len: 4,
            width: 32,
            signed: false,
        }),
    );

    let err = Decoder::new(registry).decode(&b("01 02 03 00 00 00 00")).unwrap_err();
    assert!(
        matches!(err, Error::Field(FieldError::UnsupportedWidth(32))),
        "{err}"
    );
}

/// Water temperature in °F, with depth in feet.
#[derive(Debug)]
struct WaterLayout;

impl Layout for WaterLayout {
    fn body_len(&self) -> usize {
        3
    }

    fn extract_fields(&self, body: &[u8]) -> Result<Fields, Error> {
        let temperature = fahrenheit_to_celsius(f64::from(body[0]))?;
        let depth = feet_to_meters(f64::from(u16::from_le_bytes([body[1], body[2]])) / 10.0)?;

        Ok(vec![
            ("mdesc", Value::Text("water")),
            ("raw", Value::Integer(i64::from(body[0]))),
            ("temperature", Value::Float(temperature)),
            ("depth", Value::Float(depth)),
        ])
    }
}

#[test]
fn custom_layout() {
    let id = TypeId([0x30, 0x03, 0x33]);
    let decoder = Decoder::new(Registry::builtin().with(id, Kind::Custom(Arc::new(WaterLayout))));

    let r = decoder.decode(&b("30 03 33 32 64 00")).unwrap().unwrap();
    assert_eq!(r.mdesc(), Some("water"));
    assert_eq!(r["raw"], Value::Integer(50));
    assert!((r["temperature"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((r["depth"].as_f64().unwrap() - 3.048).abs() < 1e-9);

    let err = decoder.decode(&b("30 03 33 96 64 00")).unwrap_err();
    assert!(matches!(err, Error::Unit(UnitError::Implausible(_))), "{err}");
}

#[derive(Debug)]
struct EmptyLayout;

impl Layout for EmptyLayout {
    fn body_len(&self) -> usize {
        1
    }

    fn extract_fields(&self, _: &[u8]) -> Result<Fields, Error> {
        Ok(vec![])
    }
}

#[test]
#[should_panic(expected = "extracted no fields")]
fn layout_without_fields() {
    let id = TypeId([0x40, 0x00, 0x40]);
    let decoder = Decoder::new(Registry::new().with(id, Kind::Custom(Arc::new(EmptyLayout))));
    let _ = decoder.decode(&b("40 00 40 00"));
}

#[test]
fn header_specs() {
    let specs = Registry::builtin().header_specs();
    let course = specs.iter().find(|s| s.header == GPS_COURSE).unwrap();
    assert_eq!(course.len, 5);
    assert!(specs.iter().all(|s| s.header.is_consistent()));
    assert!(specs.iter().all(|s| s.header.payload_len() + 1 == s.len));
}
