#![no_main]
//! Differential fuzzing of the in-memory and streaming front ends.
//!
//! Input layout: one option byte, a four-byte chunking seed, then the
//! document. The custom mutator occasionally replaces the document with
//! freshly generated JSON so that deep, valid structure is reached quickly.

use std::{cell::RefCell, io::Read};

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use quickjson::{ParserOptions, parse_reader, parse_str};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde_json::{Map, Number, Value};

const PREFIX: usize = 5;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Padding placed around generated values. The last entries are not JSON
/// whitespace, so they exercise the error paths.
const PADDING: &[&str] = &[" ", "\t", "\n", "\r", "\r\n", "\u{00A0}", "\u{2028}", "\u{3000}"];

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size < PREFIX || (size >= PREFIX && seed % 10 != 0) {
        return fuzzer_mutate(data, size, max_size);
    }
    RNG.with(|cell| {
        let rng = &mut *cell.borrow_mut();
        let prefix: [u8; PREFIX] = rng.random();
        data[..PREFIX].copy_from_slice(&prefix);

        let mut doc = Vec::with_capacity(max_size);
        while doc.len() < size.saturating_sub(PREFIX) {
            let Some(value) = generate(rng, size.max(16)) else {
                break;
            };
            pad(rng, &mut doc);
            serde_json::to_writer(&mut doc, &value.0).ok();
            pad(rng, &mut doc);
        }

        let len = doc.len().min(max_size - PREFIX);
        data[PREFIX..PREFIX + len].copy_from_slice(&doc[..len]);
        PREFIX + len
    })
}

fn pad(rng: &mut SmallRng, doc: &mut Vec<u8>) {
    for _ in 0..rng.random_range(0..4) {
        let piece = PADDING[rng.random_range(0..PADDING.len())];
        doc.extend_from_slice(piece.as_bytes());
    }
}

fn generate(rng: &mut SmallRng, budget: usize) -> Option<GenValue> {
    for _ in 0..8 {
        let len = rng.random_range(budget / 2..=budget * 2);
        let entropy: Vec<u8> = (0..len).map(|_| rng.random()).collect();
        if let Ok(value) = GenValue::arbitrary(&mut Unstructured::new(&entropy)) {
            return Some(value);
        }
    }
    None
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A JSON value drawn from unstructured bytes, weighted towards strings and
/// containers.
#[derive(Debug)]
struct GenValue(Value);

impl<'a> Arbitrary<'a> for GenValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.int_in_range(0..=11u8)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::Number(u.arbitrary::<i64>()?.into()),
            3 => Value::Number(u.arbitrary::<u64>()?.into()),
            4 => Number::from_f64(u.arbitrary()?)
                .map(Value::Number)
                .ok_or(arbitrary::Error::IncorrectFormat)?,
            5..=7 => Value::String(u.arbitrary()?),
            8 | 9 => {
                let items: Vec<GenValue> = u.arbitrary()?;
                Value::Array(items.into_iter().map(|item| item.0).collect())
            }
            _ => {
                let entries: Vec<(String, GenValue)> = u.arbitrary()?;
                Value::Object(entries.into_iter().map(|(k, v)| (k, v.0)).collect::<Map<_, _>>())
            }
        };
        Ok(GenValue(value))
    }
}

/// Hands out the input `step` bytes at a time.
struct Drip<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Drip<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn check(data: &[u8]) {
    let Some((prefix, body)) = data.split_first_chunk::<PREFIX>() else {
        return;
    };
    let options = ParserOptions {
        allow_trailing_commas: prefix[0] & 1 != 0,
        reject_trailing_content: prefix[0] & 2 != 0,
    };
    let chunk_size = usize::from(prefix[1]);
    let step = usize::from(prefix[2]) + 1;

    let text = String::from_utf8_lossy(body);
    let in_memory = parse_str(&text, options);
    let reader = Drip {
        data: text.as_bytes(),
        step,
    };
    let streamed = parse_reader(reader, options, chunk_size, text.len());

    match (&in_memory, &streamed) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "sources disagree on {text:?}"),
        (Err(a), Err(b)) => assert_eq!(
            format!("{:?}", a.kind()),
            format!("{:?}", b.kind()),
            "sources fail differently on {text:?}"
        ),
        _ => panic!("sources disagree on {text:?}: {in_memory:?} vs {streamed:?}"),
    }

    if let Ok(token) = in_memory {
        let rendered = token.to_string();
        let reparsed = parse_str(&rendered, ParserOptions::default())
            .unwrap_or_else(|e| panic!("rendering of {text:?} does not parse: {e}"));
        assert_eq!(reparsed.value(), token.value());
    }
}

fuzz_target!(|data: &[u8]| check(data));
