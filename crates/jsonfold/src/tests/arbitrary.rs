use quickcheck::{Arbitrary, Gen};

use crate::{Array, Object, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 5 {
                0 => Value::Null,
                1 => Value::Bool(bool::arbitrary(g)),
                2 => Value::Int(i64::arbitrary(g)),
                3 => Value::Float(JsonNumber::arbitrary(g).0),
                _ => Value::from(String::arbitrary(g)),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 | 1 => scalar(g),
                2 => {
                    let len = usize::arbitrary(g) % 4;
                    let mut array = Array::new();
                    for _ in 0..len {
                        array.push(gen_val(g, depth - 1));
                    }
                    Value::Array(array)
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut object = Object::new();
                    for _ in 0..len {
                        object.insert(String::arbitrary(g).into(), gen_val(g, depth - 1));
                    }
                    Value::Object(object)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }
}
