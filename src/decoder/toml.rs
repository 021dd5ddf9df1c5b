use ::toml::{self, Table, Value as TomlValue};

use super::decoder::Decoder;
use crate::error::{Error, Result};
use crate::model::{Mapping, Value};

/// TOML documents are tables by definition, so only syntax errors can fail.
/// Datetimes are kept as their RFC 3339 text.
pub struct TOMLDecoder {}

impl Default for TOMLDecoder {
    fn default() -> Self {
        Self {}
    }
}

impl TOMLDecoder {
    fn decode_table(&self, table: Table) -> Mapping {
        table
            .into_iter()
            .map(|(k, v)| (k, self.decode_value(v)))
            .collect()
    }

    fn decode_value(&self, value: TomlValue) -> Value {
        match value {
            TomlValue::String(s) => Value::String(s),
            TomlValue::Integer(i) => Value::from(i),
            TomlValue::Float(f) => Value::from(f),
            TomlValue::Boolean(b) => Value::Bool(b),
            TomlValue::Datetime(dt) => Value::String(dt.to_string()),
            TomlValue::Array(items) => {
                Value::Sequence(items.into_iter().map(|v| self.decode_value(v)).collect())
            }
            TomlValue::Table(t) => Value::Mapping(self.decode_table(t)),
        }
    }
}

impl Decoder for TOMLDecoder {
    fn decode(&self, text: &str) -> Result<Mapping> {
        let table: Table =
            toml::from_str(text).map_err(|e| Error::from(("TOML decoding failed", e)))?;
        Ok(self.decode_table(table))
    }
}
