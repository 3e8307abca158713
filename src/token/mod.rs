//! Markup tokens and the sources that produce them.
//!
//! A token source is any iterator of [`Token`]. Two are provided:
//!
//! - [`HtmlTokens`]: the forgiving html5ever tokenizer. Syntax problems are
//!   reported as [`Token::Warning`] (or [`Token::Error`] in strict mode).
//! - [`XmlTokens`]: a quick-xml reader for well-formed XHTML. Any syntax
//!   problem ends the stream with a [`Token::Error`].
//!
//! Sources only report tags in the nesting of the original document;
//! repairing that nesting is the assembler's job.

mod html;
mod xml;

pub use html::HtmlTokens;
pub use xml::XmlTokens;

use crate::dom::{Attributes, Declaration};

/// One classified unit of the markup stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Attributes,
    },
    EndTag(String),
    Text(String),
    CData(String),
    Comment(String),
    Declaration(Declaration),
    /// Non-fatal complaint; the stream continues.
    Warning(String),
    /// Fatal condition; nothing after it is meaningful.
    Error(String),
}

impl Token {
    /// Start tag without attributes.
    pub fn start(name: impl Into<String>) -> Self {
        Token::StartTag {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn start_with<K, V>(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Token::StartTag {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        Token::EndTag(name.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }
}

/// Interpret the payload of a bogus comment that really is a CDATA section
/// or an XML declaration.
///
/// HTML tokenizers report `<![CDATA[x]]>` as the comment `[CDATA[x]]` and
/// `<?xml version="1.0"?>` as the comment `?xml version="1.0"?`.
pub(crate) fn reinterpret_comment(data: &str) -> Token {
    if let Some(inner) = data
        .strip_prefix("[CDATA[")
        .and_then(|rest| rest.strip_suffix("]]"))
    {
        return Token::CData(inner.to_string());
    }

    if let Some(body) = data.strip_prefix("?xml")
        && body.starts_with(|c: char| c.is_ascii_whitespace() || c == '?')
    {
        let body = body.strip_suffix('?').unwrap_or(body);
        return Token::Declaration(Declaration::parse_pseudo_attributes(body));
    }

    Token::Comment(data.to_string())
}
