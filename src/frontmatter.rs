use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YAML_BLOCK: Regex =
        Regex::new(r"\A---[ \t]*\r?\n(?s:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap();
    static ref TOML_BLOCK: Regex =
        Regex::new(r"\A\+\+\+[ \t]*\r?\n(?s:(.*?)\r?\n)?\+\+\+[ \t]*(?:\r?\n|\z)").unwrap();
}

/// A metadata block found at the very top of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter<'a> {
    /// Format identifier implied by the delimiter (`yaml` or `toml`).
    pub format: &'static str,
    /// Text between the delimiters.
    pub body: &'a str,
    /// Everything after the closing delimiter.
    pub content: &'a str,
}

/// Splits a `---` (YAML) or `+++` (TOML) delimited block off the top of
/// `text`. Returns `None` when `text` does not start with a complete block.
pub fn extract(text: &str) -> Option<FrontMatter<'_>> {
    let candidates: [(&Regex, &'static str); 2] =
        [(&*YAML_BLOCK, "yaml"), (&*TOML_BLOCK, "toml")];

    candidates.iter().find_map(|&(re, format)| {
        let caps = re.captures(text)?;
        let end = caps.get(0)?.end();
        Some(FrontMatter {
            format,
            body: caps.get(1).map_or("", |m| m.as_str()),
            content: &text[end..],
        })
    })
}
