#![cfg(feature = "std")]

use std::{io, path::Path};

use csv::ReaderBuilder;
use fdx::{
    avec::{DecodedMessage, Decoder, Error, Receiver, reader::ReadSource},
    sans::frame::Frame,
};

const PATH: &str = "fixtures/harbour.fdx";

#[test]
fn decode_slice_harbour() {
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fdx::avec::decode_slice(&data, &Decoder::default(), &mut validator);
    validator.finish();
}

#[test]
fn decode_reader_harbour() {
    let file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fdx::avec::decode_reader(ReadSource(file), &Decoder::default(), &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_harbour_trickle() {
    // One byte at a time, with an empty read between each.
    let data = std::fs::read(PATH).unwrap();
    let mut bytes = data.into_iter();
    let mut idle = false;

    let source = move |_: usize| -> io::Result<Option<Vec<u8>>> {
        idle = !idle;
        if idle {
            return Ok(Some(vec![]));
        }
        Ok(bytes.next().map(|b| vec![b]))
    };

    let mut validator = Validator::new(PATH);
    fdx::avec::decode_reader(source, &Decoder::default(), &mut validator).unwrap();
    validator.finish();
}

struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn next_row(&mut self, kind: &str) -> Vec<String> {
        assert!(!self.0.is_empty(), "unexpected {kind}");
        let mut row = self.0.remove(0);
        assert_eq!(row.remove(0), kind);
        row
    }

    fn finish(&self) {
        assert!(self.0.is_empty(), "missing events: {:?}", self.0);
    }
}

impl Receiver for Validator {
    fn add_junk(&mut self, junk: &[u8]) {
        let row = self.next_row("junk");
        assert_eq!(row[0], hex::encode(junk));
    }

    fn add_message(&mut self, message: DecodedMessage) {
        let row = self.next_row("message");
        assert_eq!(row[0], message.type_id().to_string());

        let pairs = &row[1..];
        assert_eq!(pairs.len(), message.len() * 2);

        for pair in pairs.chunks(2) {
            let value = &message[pair[0].as_str()];

            match value.as_f64() {
                Some(v) if pair[1] == "NaN" => assert!(v.is_nan(), "{} = {v}", pair[0]),
                Some(v) => {
                    let expected: f64 = pair[1].parse().unwrap();
                    assert!((v - expected).abs() < 1e-6, "{} = {v}", pair[0]);
                }
                None => assert_eq!(value.to_string(), pair[1]),
            }
        }
    }

    fn add_error(&mut self, frame: &Frame, error: Error) {
        let row = self.next_row("error");
        assert_eq!(row[0], hex::encode(frame.as_bytes()), "{error}");
    }
}
