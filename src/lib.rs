pub mod cliopt;
pub mod decoder;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod registry;
pub mod runner;

pub use decoder::Decoder;
pub use error::{Error, ErrorKind, Result};
pub use model::{Mapping, Number, Value};
pub use registry::Registry;
