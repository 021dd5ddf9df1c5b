mod decoder;
mod json;
mod toml;
mod yaml;

pub use self::toml::TOMLDecoder;
pub use decoder::*;
pub use json::JSONDecoder;
pub use yaml::YAMLDecoder;
