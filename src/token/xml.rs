//! quick-xml backed token source for well-formed XHTML.

use std::borrow::Cow;
use std::collections::VecDeque;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::Token;
use crate::dom::{Attributes, Declaration};

/// Lazily reads tokens from an XHTML document.
///
/// The first syntax error (including mismatched end tags) is reported as a
/// [`Token::Error`] and ends the stream.
pub struct XmlTokens<'a> {
    reader: Reader<&'a [u8]>,
    pending: VecDeque<Token>,
    text: String,
    done: bool,
}

impl<'a> XmlTokens<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut reader = Reader::from_str(input);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            pending: VecDeque::new(),
            text: String::new(),
            done: false,
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.pending.push_back(Token::Text(std::mem::take(&mut self.text)));
        }
    }

    fn fail(&mut self, message: String) {
        self.flush_text();
        self.pending.push_back(Token::Error(message));
        self.done = true;
    }

    /// Read events until at least one token is queued or input ends.
    fn fill(&mut self) {
        while self.pending.is_empty() && !self.done {
            let position = self.reader.buffer_position();
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.flush_text();
                    let token = start_tag(&e);
                    self.pending.push_back(token);
                }
                Ok(Event::Empty(e)) => {
                    self.flush_text();
                    let token = start_tag(&e);
                    if let Token::StartTag { name, .. } = &token {
                        let end = Token::EndTag(name.clone());
                        self.pending.push_back(token);
                        self.pending.push_back(end);
                    }
                }
                Ok(Event::End(e)) => {
                    self.flush_text();
                    let name = local_name(e.name().as_ref());
                    self.pending.push_back(Token::EndTag(name));
                }
                Ok(Event::Text(e)) => {
                    let raw = String::from_utf8_lossy(&e);
                    match unescape(&raw) {
                        Ok(text) => self.text.push_str(&text),
                        Err(_) => self.text.push_str(&raw),
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    let name = String::from_utf8_lossy(&e);
                    let reference = format!("&{name};");
                    match unescape(&reference) {
                        Ok(text) => self.text.push_str(&text),
                        Err(_) => {
                            self.pending
                                .push_back(Token::Warning(format!("unknown entity {reference}")));
                            self.text.push_str(&reference);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    self.flush_text();
                    let data = String::from_utf8_lossy(&e).into_owned();
                    self.pending.push_back(Token::CData(data));
                }
                Ok(Event::Comment(e)) => {
                    self.flush_text();
                    let data = String::from_utf8_lossy(&e).into_owned();
                    self.pending.push_back(Token::Comment(data));
                }
                Ok(Event::Decl(e)) => {
                    self.flush_text();
                    let decl = Declaration {
                        version: e.version().ok().map(lossy),
                        encoding: e.encoding().and_then(Result::ok).map(lossy),
                        standalone: e.standalone().and_then(Result::ok).map(lossy),
                    };
                    self.pending.push_back(Token::Declaration(decl));
                }
                Ok(Event::Eof) => {
                    self.flush_text();
                    self.done = true;
                }
                // Processing instructions and doctypes carry no content.
                Ok(_) => {}
                Err(e) => self.fail(format!("{e} (at byte {position})")),
            }
        }
    }
}

impl Iterator for XmlTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.fill();
        self.pending.pop_front()
    }
}

fn start_tag(e: &BytesStart<'_>) -> Token {
    let name = local_name(e.name().as_ref());
    let mut attributes = Attributes::new();
    for attr in e.attributes().flatten() {
        let key = local_name(attr.key.as_ref());
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw).map(|v| v.into_owned()).unwrap_or_else(|_| raw.into_owned());
        attributes.entry(key).or_insert(value);
    }
    Token::StartTag { name, attributes }
}

fn lossy(bytes: Cow<'_, [u8]>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Lowercase local part of a possibly prefixed name.
fn local_name(name: &[u8]) -> String {
    let local = match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    };
    String::from_utf8_lossy(local).to_ascii_lowercase()
}
