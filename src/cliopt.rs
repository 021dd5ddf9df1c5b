use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "polyparse",
    about = "Decode a JSON, YAML or TOML document and print it as JSON"
)]
pub struct CliOpt {
    /// Format identifier (json, yaml, yml, toml, tml). Defaults to the front
    /// matter delimiter or the file extension.
    #[structopt(long = "format", short = "f")]
    pub format: Option<String>,

    /// Decode only the front matter block at the top of the input.
    #[structopt(long = "front-matter", short = "m")]
    pub front_matter: bool,

    /// Indent the JSON output.
    #[structopt(long = "pretty", short = "p")]
    pub pretty: bool,

    /// Log format resolution and decoding steps to stderr.
    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,

    /// Print the registered format identifiers and exit.
    #[structopt(long = "list-formats")]
    pub list_formats: bool,

    /// Input file. Reads stdin when omitted.
    #[structopt(parse(from_os_str))]
    pub file: Option<PathBuf>,
}
