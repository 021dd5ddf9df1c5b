use std::path::Path;

use serde_json;
use tracing::debug;

use crate::cliopt::CliOpt;
use crate::error::{Error, Result};
use crate::frontmatter;
use crate::registry::Registry;

// input text
//   -> [front matter block]
//     -> format identifier (--format | delimiter | file extension)
//       -> Registry::dispatch -> Mapping
//         -> JSON line(s)

pub struct Runner {
    registry: Registry,
    format: Option<String>,
    front_matter: bool,
    pretty: bool,
}

impl Runner {
    pub fn new(registry: Registry, opt: &CliOpt) -> Self {
        Self {
            registry,
            format: opt.format.clone(),
            front_matter: opt.front_matter,
            pretty: opt.pretty,
        }
    }

    /// Decodes `text` and encodes the result as JSON. `source` is the input
    /// file, if any, and only serves format detection.
    pub fn run(&self, text: &str, source: Option<&Path>) -> Result<Vec<u8>> {
        let (format, body) = if self.front_matter {
            let fm = frontmatter::extract(text)
                .ok_or_else(|| Error::usage("input does not start with a front matter block"))?;
            debug!(delimited = fm.format, len = fm.body.len(), "found front matter block");
            (self.format.as_deref().unwrap_or(fm.format), fm.body)
        } else {
            let format = self
                .format
                .as_deref()
                .or_else(|| source.and_then(format_from_path))
                .ok_or_else(|| Error::usage("cannot determine input format, use --format"))?;
            (format, text)
        };

        debug!(format, "dispatching input");
        let doc = self.registry.dispatch(format, body)?;
        debug!(keys = doc.len(), "input decoded");

        let mut buf = if self.pretty {
            serde_json::to_vec_pretty(&doc)
        } else {
            serde_json::to_vec(&doc)
        }
        .map_err(|e| Error::from(("JSON serialization failed", e)))?;
        buf.push(b'\n');
        Ok(buf)
    }

    pub fn list_formats(&self) -> Vec<u8> {
        self.registry
            .formats()
            .iter()
            .flat_map(|f| f.bytes().chain(Some(b'\n')))
            .collect()
    }
}

fn format_from_path(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
