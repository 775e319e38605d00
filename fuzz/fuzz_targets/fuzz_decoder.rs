#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonfold::{Decoder, NumberMode, ParserOptions, ReplaySource, Value};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::Map;

const HEADER: usize = 1; // option flags

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Insignificant runs the decoder must skip. Comments only count when the
/// flags enable them.
static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r", b"/* c */", b"// c\n"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed % 10 == 0 {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);

        let limit = max_size - HEADER;
        let mut written = HEADER;
        written += append_whitespace(&mut data[written..], limit);
        written += append_value(&mut data[written..], size.max(16), max_size - written);
        written += append_whitespace(&mut data[written..], max_size - written);
        written
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let runs = rng.random_range(0..=4);
        let mut written = 0;
        for _ in 0..runs {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(22)? {
            0 => serde_json::Value::Null,
            1 => serde_json::Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                serde_json::Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => serde_json::Value::from(u.arbitrary::<i64>()?),
            4..=10 => serde_json::Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                serde_json::Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=21 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                serde_json::Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Same nesting, keys, scalar kinds and integers. Floats are only compared by
/// kind since the two number parsers may round differently.
fn same_shape(ours: &Value, theirs: &serde_json::Value) -> bool {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Bool(a), serde_json::Value::Bool(b)) => a == b,
        // serde_json reads `-0` as a float.
        (Value::Int(a), serde_json::Value::Number(b)) => {
            b.as_i64() == Some(*a) || (*a == 0 && b.as_f64() == Some(0.0))
        }
        (Value::Float(_), serde_json::Value::Number(b)) => b.is_f64(),
        (Value::String(a), serde_json::Value::String(b)) => a == b.as_bytes(),
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
        }
        (Value::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| {
                    std::str::from_utf8(k)
                        .ok()
                        .and_then(|k| b.get(k))
                        .is_some_and(|w| same_shape(v, w))
                })
        }
        _ => false,
    }
}

fn decoder(data: &[u8]) {
    if data.len() <= HEADER {
        return;
    }

    let flags = data[0];
    let data = &data[HEADER..];
    let options = ParserOptions {
        number_mode: if flags & 1 != 0 {
            NumberMode::RawText
        } else {
            NumberMode::Typed
        },
        allow_comments: flags & 2 != 0,
        check_utf8: flags & 4 == 0,
    };

    // Stack invariants are asserted after every event (`fuzzing` feature).
    let mut decoder = Decoder::new(options);
    let Ok(value) = decoder.decode(data) else {
        return;
    };

    // Replaying the tree's own events must rebuild it exactly.
    let mut source = ReplaySource::new(value.events());
    let replayed = decoder
        .decode_with(&mut source, b"replay")
        .expect("replaying a decoded tree failed");
    assert_eq!(replayed, value);

    if options.number_mode == NumberMode::Typed {
        if let Ok(theirs) = serde_json::from_slice::<serde_json::Value>(data) {
            assert!(
                same_shape(&value, &theirs),
                "decoded {value:?}, serde_json decoded {theirs:?}"
            );
        }
    }
}

fuzz_target!(|data: &[u8]| decoder(data));
