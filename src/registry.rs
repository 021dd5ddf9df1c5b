use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::decoder::{Decoder, JSONDecoder, TOMLDecoder, YAMLDecoder};
use crate::error::{Error, Result};
use crate::model::Mapping;

/// Maps format identifiers (`json`, `yml`, ...) to decoders.
///
/// Identifiers are matched exactly and case-sensitively. Several identifiers
/// may share one decoder. Registering needs `&mut self` while dispatching
/// only needs `&self`, so a configured registry can be shared between threads
/// (e.g. behind an `Arc`) for concurrent dispatch.
pub struct Registry {
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl Registry {
    /// Creates a registry with the built-in `json`, `toml`, `tml`, `yaml`
    /// and `yml` bindings.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        let json: Arc<dyn Decoder> = Arc::new(JSONDecoder::default());
        let toml: Arc<dyn Decoder> = Arc::new(TOMLDecoder::default());
        let yaml: Arc<dyn Decoder> = Arc::new(YAMLDecoder::default());

        registry.bind("json", json);
        registry.bind("toml", toml.clone());
        registry.bind("tml", toml);
        registry.bind("yaml", yaml.clone());
        registry.bind("yml", yaml);

        registry
    }

    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Binds `decoder` to `format`, replacing any previous binding.
    pub fn register<F, D>(&mut self, format: F, decoder: D)
    where
        F: Into<String>,
        D: Decoder + 'static,
    {
        self.bind(format, Arc::new(decoder));
    }

    /// Binds `alias` to the decoder currently bound to `format`.
    pub fn alias<A: Into<String>>(&mut self, alias: A, format: &str) -> Result<()> {
        let decoder = self
            .decoders
            .get(format)
            .cloned()
            .ok_or_else(|| Error::unknown_format(format))?;
        self.bind(alias, decoder);
        Ok(())
    }

    pub fn resolve(&self, format: &str) -> Option<&dyn Decoder> {
        self.decoders.get(format).map(|d| d.as_ref())
    }

    pub fn contains(&self, format: &str) -> bool {
        self.decoders.contains_key(format)
    }

    /// Registered identifiers in lexicographic order.
    pub fn formats(&self) -> Vec<&str> {
        let mut formats: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        formats.sort_unstable();
        formats
    }

    /// Decodes `text` with the decoder bound to `format`.
    ///
    /// The decoder's result is returned as is. An unbound `format` fails with
    /// an [`ErrorKind::UnknownFormat`](crate::error::ErrorKind) error without
    /// looking at `text`.
    pub fn dispatch(&self, format: &str, text: &str) -> Result<Mapping> {
        match self.resolve(format) {
            Some(decoder) => decoder.decode(text),
            None => Err(Error::unknown_format(format)),
        }
    }

    fn bind<F: Into<String>>(&mut self, format: F, decoder: Arc<dyn Decoder>) {
        self.decoders.insert(format.into(), decoder);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Registry")
            .field("formats", &self.formats())
            .finish()
    }
}
