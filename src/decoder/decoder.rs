use crate::error::Result;
use crate::model::Mapping;

/// Turns raw text of one serialization format into a [`Mapping`].
///
/// Implementations are stateless: the same text always decodes to the same
/// mapping or fails with the same error, and nothing is shared between calls.
/// Plain functions and closures with the matching signature are decoders too.
pub trait Decoder: Send + Sync {
    fn decode(&self, text: &str) -> Result<Mapping>;
}

impl<F> Decoder for F
where
    F: Fn(&str) -> Result<Mapping> + Send + Sync,
{
    fn decode(&self, text: &str) -> Result<Mapping> {
        self(text)
    }
}
