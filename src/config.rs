//! Conversion options.
//!
//! [`Config`] holds everything that changes how a document is assembled or
//! rendered. Values that arrive as strings (from a CLI flag or a config
//! file) are parsed leniently: an unrecognized value falls back to the
//! default and produces a [`Warning`] instead of an error.

use std::fmt;
use std::str::FromStr;

use crate::error::Warning;

/// Default paragraph width in columns.
pub const DEFAULT_COLUMN_WIDTH: usize = 78;

/// Where link and image targets are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPlacement {
    /// `[text](href "title")` at the point of use.
    #[default]
    Inline,
    /// `[text][1]`, with the reference block after the introducing paragraph.
    Paragraph,
    /// `[text][1]`, with one reference block at the end of the document.
    Endnote,
}

impl LinkPlacement {
    /// Parse a placement name, falling back to [`LinkPlacement::Inline`].
    ///
    /// Returns the warning to record when `value` was not recognized.
    pub fn parse_lenient(value: &str) -> (Self, Option<Warning>) {
        match value.parse() {
            Ok(placement) => (placement, None),
            Err(()) => {
                let warning = Warning::Config(format!(
                    "invalid value for link placement: {value}; using inline"
                ));
                (LinkPlacement::Inline, Some(warning))
            }
        }
    }
}

impl FromStr for LinkPlacement {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(LinkPlacement::Inline),
            "paragraph" => Ok(LinkPlacement::Paragraph),
            "endnote" => Ok(LinkPlacement::Endnote),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LinkPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkPlacement::Inline => "inline",
            LinkPlacement::Paragraph => "paragraph",
            LinkPlacement::Endnote => "endnote",
        };
        f.write_str(name)
    }
}

/// Which token source reads the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum Syntax {
    /// Forgiving HTML tokenizer.
    #[default]
    Html,
    /// Well-formed XML reader; syntax errors are fatal.
    Xhtml,
}

/// Options for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target width for reflowed paragraphs.
    pub column_width: usize,
    pub link_placement: LinkPlacement,
    /// Base for resolving relative `href`/`src` values.
    pub base_url: Option<String>,
    /// Treat `href="#..."` as if the element had no link target.
    pub skip_local_fragments: bool,
    pub syntax: Syntax,
    /// Make HTML tokenizer parse errors fatal.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            link_placement: LinkPlacement::Inline,
            base_url: None,
            skip_local_fragments: false,
            syntax: Syntax::Html,
            strict: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    pub fn with_link_placement(mut self, placement: LinkPlacement) -> Self {
        self.link_placement = placement;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_skip_local_fragments(mut self, skip: bool) -> Self {
        self.skip_local_fragments = skip;
        self
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the link placement from its name, recording a warning for
    /// unknown names.
    pub fn set_link_placement(&mut self, value: &str, warnings: &mut Vec<Warning>) {
        let (placement, warning) = LinkPlacement::parse_lenient(value);
        self.link_placement = placement;
        warnings.extend(warning);
    }

    /// Normalize out-of-range values, returning a warning for each one.
    pub fn validate(&mut self) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if self.column_width == 0 {
            warnings.push(Warning::Config(format!(
                "column width must be positive; using {DEFAULT_COLUMN_WIDTH}"
            )));
            self.column_width = DEFAULT_COLUMN_WIDTH;
        }

        if let Some(base) = &self.base_url
            && let Err(e) = url::Url::parse(base)
        {
            warnings.push(Warning::Config(format!(
                "ignoring base URL {base:?}: {e}"
            )));
            self.base_url = None;
        }

        warnings
    }
}
