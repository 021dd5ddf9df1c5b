use serde_json::{self, Map, Value as JsonValue};

use super::decoder::Decoder;
use crate::error::{Error, Result};
use crate::model::{Mapping, Number, Value};

pub struct JSONDecoder {}

impl Default for JSONDecoder {
    fn default() -> Self {
        Self {}
    }
}

impl JSONDecoder {
    fn decode_object(&self, object: Map<String, JsonValue>) -> Mapping {
        object
            .into_iter()
            .map(|(k, v)| (k, self.decode_value(v)))
            .collect()
    }

    fn decode_value(&self, value: JsonValue) -> Value {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                Value::Number(Number::normalize(n.as_i64(), n.as_u64(), n.as_f64()))
            }
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => {
                Value::Sequence(items.into_iter().map(|v| self.decode_value(v)).collect())
            }
            JsonValue::Object(o) => Value::Mapping(self.decode_object(o)),
        }
    }
}

impl Decoder for JSONDecoder {
    fn decode(&self, text: &str) -> Result<Mapping> {
        match serde_json::from_str::<JsonValue>(text) {
            Ok(JsonValue::Object(o)) => Ok(self.decode_object(o)),
            Ok(other) => Err(Error::decode(&format!(
                "JSON top-level value must be an object, got {}",
                type_name(&other)
            ))),
            Err(e) => Err(("JSON decoding failed", e).into()),
        }
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_decode_object() -> std::result::Result<(), String> {
        let doc = JSONDecoder::default().decode(r#"{"a":1,"b":[1,2]}"#)?;

        let mut expected = Mapping::new();
        expected.insert("a".into(), 1i64.into());
        expected.insert("b".into(), vec![Value::from(1i64), Value::from(2i64)].into());
        assert_eq!(doc, expected);
        Ok(())
    }

    #[test]
    fn test_decode_nested_and_scalars() -> std::result::Result<(), String> {
        let doc = JSONDecoder::default().decode(
            r#"{"s":"x","t":true,"n":null,"f":-0.5,"big":18446744073709551615,"o":{"k":[{}]}}"#,
        )?;

        assert_eq!(doc["s"], Value::from("x"));
        assert_eq!(doc["t"], Value::Bool(true));
        assert_eq!(doc["n"], Value::Null);
        assert_eq!(doc["f"], Value::from(-0.5));
        assert_eq!(doc["big"], Value::Number(Number::UInt(u64::MAX)));
        assert_eq!(
            doc["o"].get("k"),
            Some(&Value::Sequence(vec![Value::Mapping(Mapping::new())]))
        );
        Ok(())
    }

    #[test]
    fn test_decode_malformed() {
        match JSONDecoder::default().decode("not valid json{{{") {
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::Decode);
                assert_eq!(e.message(), "JSON decoding failed");
                assert!(std::error::Error::source(&e).is_some());
            }
            Ok(doc) => panic!("malformed JSON decoded into {:?}", doc),
        }
    }

    #[test]
    fn test_decode_rejects_non_object_top_level() {
        let tests = [
            ("[1,2,3]", "array"),
            ("42", "number"),
            ("\"str\"", "string"),
            ("true", "boolean"),
            ("null", "null"),
        ];

        for (input, found) in &tests {
            match JSONDecoder::default().decode(input) {
                Err(e) => {
                    assert_eq!(e.kind(), ErrorKind::Decode, "while decoding {}", input);
                    assert_eq!(
                        e.message(),
                        format!("JSON top-level value must be an object, got {}", found)
                    );
                }
                Ok(doc) => panic!("{} decoded into {:?}", input, doc),
            }
        }
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(JSONDecoder::default().decode("").is_err());
        assert!(JSONDecoder::default().decode("   ").is_err());
    }
}
