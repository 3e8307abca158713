//! # tagdown
//!
//! Convert HTML (or XHTML) into readable Markdown, repairing sloppy markup
//! along the way.
//!
//! ## Features
//!
//! - Forgiving HTML input via html5ever's tokenizer, strict XHTML via
//!   quick-xml
//! - Implied end tags and missing containers are repaired before rendering
//!   (`<p>A<p>B` becomes two paragraphs, a bare `<li>` gets a list)
//! - Paragraphs reflowed to a configurable column width
//! - Links written inline, after each paragraph, or as endnotes
//! - Abbreviation glossary built from `<abbr title="...">`
//!
//! ## Quick Start
//!
//! ```
//! let html = "<h1>Title</h1><p>Lorem <strong>ipsum</strong>.</p>";
//! let markdown = tagdown::to_markdown(html).unwrap();
//! assert_eq!(markdown, "# Title\n\nLorem **ipsum**.\n");
//! ```
//!
//! ## Pipeline
//!
//! A conversion runs three stages, each usable on its own:
//!
//! ```
//! use tagdown::{Assembler, Config, Renderer};
//! use tagdown::token::HtmlTokens;
//!
//! let assembled = Assembler::assemble(HtmlTokens::new("<li>One<li>Two")).unwrap();
//! let config = Config::default();
//! let markdown = Renderer::new(&config).render(&assembled.forest);
//! assert_eq!(markdown, "  * One\n  * Two\n");
//! ```
//!
//! 1. A token source ([`token::HtmlTokens`] or [`token::XmlTokens`]) turns
//!    markup into [`token::Token`]s.
//! 2. The [`Assembler`] repairs nesting and builds a [`Forest`].
//! 3. The [`Renderer`] walks the forest and writes Markdown.

pub mod config;
pub mod dom;
pub mod error;
pub mod markdown;
pub mod token;
pub mod util;

pub use config::{Config, DEFAULT_COLUMN_WIDTH, LinkPlacement, Syntax};
pub use dom::{Assembled, Assembler, Forest, Item, Leaf, Node};
pub use error::{Error, Result, Warning};
pub use markdown::Renderer;

use token::{HtmlTokens, XmlTokens};

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub markdown: String,
    /// Configuration and tokenizer warnings, in that order.
    pub warnings: Vec<Warning>,
}

/// Convert a document with the given options.
///
/// Invalid configuration values are normalized to their defaults and
/// reported as warnings. Tokenizer parse errors are warnings too, unless
/// `config.strict` is set or the input is read as XHTML, in which case
/// they fail the conversion with [`Error::Tokenization`].
///
/// # Examples
///
/// ```
/// use tagdown::{Config, LinkPlacement, convert};
///
/// let config = Config::default().with_link_placement(LinkPlacement::Endnote);
/// let html = r#"<p><a href="http://a">one</a> and <a href="http://a">two</a></p>"#;
/// let conversion = convert(html, &config).unwrap();
/// assert_eq!(conversion.markdown, "[one][1] and [two][1]\n\n[1]: http://a\n");
/// ```
pub fn convert(input: &str, config: &Config) -> Result<Conversion> {
    let mut config = config.clone();
    let mut warnings = config.validate();
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let assembled = match (config.syntax, config.strict) {
        (Syntax::Html, false) => Assembler::assemble(HtmlTokens::new(input))?,
        (Syntax::Html, true) => Assembler::assemble(HtmlTokens::new_strict(input))?,
        (Syntax::Xhtml, _) => Assembler::assemble(XmlTokens::new(input))?,
    };
    warnings.extend(assembled.warnings);

    let markdown = Renderer::new(&config).render(&assembled.forest);
    Ok(Conversion { markdown, warnings })
}

/// Convert an HTML document with the default options.
pub fn to_markdown(html: &str) -> Result<String> {
    convert(html, &Config::default()).map(|conversion| conversion.markdown)
}
