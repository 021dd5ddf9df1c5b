use serde_yaml::{self, Mapping as YamlMapping, Value as YamlValue};

use super::decoder::Decoder;
use crate::error::{Error, Result};
use crate::model::{Mapping, Number, Value};

/// Decodes a single YAML document whose top level is a mapping.
///
/// A document without any content (blank, comments or markers only) decodes
/// to an empty mapping. Any other non-mapping top level, including an
/// explicit `null`, is a decode error. Merge keys (`<<`) are resolved and
/// tags are dropped in favor of the tagged value.
pub struct YAMLDecoder {}

impl Default for YAMLDecoder {
    fn default() -> Self {
        Self {}
    }
}

impl YAMLDecoder {
    fn decode_mapping(&self, mapping: YamlMapping) -> Result<Mapping> {
        let mut out = Mapping::new();
        for (k, v) in mapping {
            let key = key_to_string(k)?;
            let value = self.decode_value(v)?;
            if out.contains_key(&key) {
                return Err(Error::decode(&format!(
                    "YAML mapping has duplicate key '{}' after conversion to string",
                    key
                )));
            }
            out.insert(key, value);
        }
        Ok(out)
    }

    fn decode_value(&self, value: YamlValue) -> Result<Value> {
        Ok(match value {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(b),
            YamlValue::Number(n) => {
                Value::Number(Number::normalize(n.as_i64(), n.as_u64(), n.as_f64()))
            }
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|v| self.decode_value(v))
                    .collect::<Result<_>>()?,
            ),
            YamlValue::Mapping(m) => Value::Mapping(self.decode_mapping(m)?),
            YamlValue::Tagged(tagged) => self.decode_value(tagged.value)?,
        })
    }
}

impl Decoder for YAMLDecoder {
    fn decode(&self, text: &str) -> Result<Mapping> {
        if is_blank_document(text)? {
            return Ok(Mapping::new());
        }

        let mut doc: YamlValue =
            serde_yaml::from_str(text).map_err(|e| Error::from(("YAML decoding failed", e)))?;
        doc.apply_merge()
            .map_err(|e| Error::from(("YAML merge key resolution failed", e)))?;

        match untag(doc) {
            YamlValue::Mapping(m) => self.decode_mapping(m),
            other => Err(Error::decode(&format!(
                "YAML top-level value must be a mapping, got {}",
                type_name(&other)
            ))),
        }
    }
}

fn untag(value: YamlValue) -> YamlValue {
    match value {
        YamlValue::Tagged(tagged) => untag(tagged.value),
        value => value,
    }
}

fn key_to_string(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        other => Err(Error::decode(&format!(
            "YAML mapping keys must be scalars, got {}",
            type_name(&other)
        ))),
    }
}

// Only comments, directives, one `---` start marker and `...` end markers.
// A second start marker opens another document, which is an error.
fn is_blank_document(text: &str) -> Result<bool> {
    let mut started = false;
    for line in text.lines().map(strip_comment) {
        match line {
            "" | "..." => {}
            "---" if started => {
                return Err(Error::decode("YAML input contains more than one document"));
            }
            "---" => started = true,
            _ if line.starts_with('%') && !started => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn strip_comment(line: &str) -> &str {
    let cut = line
        .char_indices()
        .find(|&(i, c)| c == '#' && (i == 0 || line[..i].ends_with(char::is_whitespace)))
        .map_or(line.len(), |(i, _)| i);
    line[..cut].trim()
}

fn type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn decode(text: &str) -> Result<Mapping> {
        YAMLDecoder::default().decode(text)
    }

    fn assert_decode_error(text: &str, message: &str) {
        match decode(text) {
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::Decode, "while decoding {:?}", text);
                assert_eq!(e.message(), message, "while decoding {:?}", text);
            }
            Ok(doc) => panic!("{:?} decoded into {:?}", text, doc),
        }
    }

    #[test]
    fn test_decode_mapping() -> std::result::Result<(), String> {
        let doc = decode("a: 1\nb:\n  - 1\n  - 2\n")?;

        let mut expected = Mapping::new();
        expected.insert("a".into(), 1i64.into());
        expected.insert("b".into(), vec![Value::from(1i64), Value::from(2i64)].into());
        assert_eq!(doc, expected);
        Ok(())
    }

    #[test]
    fn test_decode_scalars() -> std::result::Result<(), String> {
        let doc = decode("s: hello\nq: '42'\nt: true\nn: ~\nf: 1.25\nneg: -3\n")?;

        assert_eq!(doc["s"], Value::from("hello"));
        assert_eq!(doc["q"], Value::from("42"));
        assert_eq!(doc["t"], Value::Bool(true));
        assert_eq!(doc["n"], Value::Null);
        assert_eq!(doc["f"], Value::from(1.25));
        assert_eq!(doc["neg"], Value::from(-3i64));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_non_mapping_top_level() {
        assert_decode_error(
            "- 1\n- 2\n",
            "YAML top-level value must be a mapping, got sequence",
        );
        assert_decode_error("just a string", "YAML top-level value must be a mapping, got string");
        assert_decode_error("42", "YAML top-level value must be a mapping, got number");
        assert_decode_error("~", "YAML top-level value must be a mapping, got null");
        assert_decode_error("null\n", "YAML top-level value must be a mapping, got null");
    }

    #[test]
    fn test_decode_blank_document() -> std::result::Result<(), String> {
        let tests = [
            "",
            "   \n\n",
            "# only a comment\n",
            "---\n...\n",
            "--- # front matter\n",
            "---   # c\n...\n",
            "%YAML 1.2\n---\n",
            "%YAML 1.2\n%TAG ! tag:example.com,2000:\n--- # c\n# more\n...\n",
        ];

        for input in &tests {
            assert_eq!(decode(input)?, Mapping::new(), "while decoding {:?}", input);
        }
        Ok(())
    }

    #[test]
    fn test_decode_malformed() {
        match decode("a: [1, 2\nb: }") {
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::Decode);
                assert_eq!(e.message(), "YAML decoding failed");
                assert!(std::error::Error::source(&e).is_some());
            }
            Ok(doc) => panic!("malformed YAML decoded into {:?}", doc),
        }
    }

    #[test]
    fn test_decode_rejects_multiple_documents() {
        for input in &["a: 1\n---\nb: 2\n", "---\n---\n", "---\n...\n--- # c\n"] {
            match decode(input) {
                Err(e) => assert_eq!(e.kind(), ErrorKind::Decode, "while decoding {:?}", input),
                Ok(doc) => panic!("{:?} decoded into {:?}", input, doc),
            }
        }
    }

    #[test]
    fn test_decode_rejects_keys_colliding_as_text() {
        assert_decode_error(
            "1: a\n'1': b\n",
            "YAML mapping has duplicate key '1' after conversion to string",
        );
        assert_decode_error(
            "true: x\n'true': y\n",
            "YAML mapping has duplicate key 'true' after conversion to string",
        );
        assert_decode_error(
            "outer:\n  ~: a\n  'null': b\n",
            "YAML mapping has duplicate key 'null' after conversion to string",
        );
    }

    #[test]
    fn test_decode_scalar_keys() -> std::result::Result<(), String> {
        let doc = decode("1: one\ntrue: yes\n2.5: half\n")?;

        assert_eq!(doc["1"], Value::from("one"));
        assert_eq!(doc["true"], Value::from("yes"));
        assert_eq!(doc["2.5"], Value::from("half"));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_complex_keys() {
        assert_decode_error(
            "? [a, b]\n: value\n",
            "YAML mapping keys must be scalars, got sequence",
        );
    }

    #[test]
    fn test_decode_merge_keys() -> std::result::Result<(), String> {
        let doc = decode("base: &base\n  x: 1\n  y: 2\nchild:\n  <<: *base\n  y: 3\n")?;

        let mut expected = Mapping::new();
        expected.insert("x".into(), 1i64.into());
        expected.insert("y".into(), 3i64.into());
        assert_eq!(doc["child"], Value::Mapping(expected));
        Ok(())
    }

    #[test]
    fn test_decode_tagged_values() -> std::result::Result<(), String> {
        let doc = decode("a: !custom 5\nb: !!str text\n")?;

        assert_eq!(doc["a"], Value::from(5i64));
        assert_eq!(doc["b"], Value::from("text"));
        Ok(())
    }
}
