//! html5ever-backed token source.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as RawToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

use super::{Token, reinterpret_comment};
use crate::dom::Attributes;

/// Tokens of an HTML document, in document order.
///
/// The html5ever tokenizer pushes into a sink, so the whole document is
/// tokenized up front and then handed out one token at a time.
#[derive(Debug)]
pub struct HtmlTokens {
    inner: std::vec::IntoIter<Token>,
}

impl HtmlTokens {
    /// Tokenize `input`, reporting parse errors as warnings.
    pub fn new(input: &str) -> Self {
        Self::tokenize(input, false)
    }

    /// Tokenize `input`, reporting parse errors as fatal errors.
    pub fn new_strict(input: &str) -> Self {
        Self::tokenize(input, true)
    }

    fn tokenize(input: &str, strict: bool) -> Self {
        let sink = BufferingSink {
            state: RefCell::new(SinkState::default()),
            strict,
        };
        let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from_slice(input));
        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        let tokens = tokenizer.sink.state.into_inner().finish();
        Self {
            inner: tokens.into_iter(),
        }
    }
}

impl Iterator for HtmlTokens {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[derive(Default)]
struct SinkState {
    tokens: Vec<Token>,
    pending_text: String,
}

impl SinkState {
    /// Emit buffered character data as a single text token.
    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let text = std::mem::take(&mut self.pending_text);
            self.tokens.push(Token::Text(text));
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_text();
        self.tokens
    }
}

/// Collects tokenizer output.
///
/// Uses interior mutability because html5ever's TokenSink trait takes
/// `&self`.
struct BufferingSink {
    state: RefCell<SinkState>,
    strict: bool,
}

impl TokenSink for BufferingSink {
    type Handle = ();

    fn process_token(&self, token: RawToken, _line_number: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();

        match token {
            RawToken::CharacterTokens(text) => state.pending_text.push_str(&text),
            RawToken::NullCharacterToken => {}
            RawToken::TagToken(tag) => {
                state.flush_text();
                let name = tag.name.as_ref().to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let mut attributes = Attributes::new();
                        for attr in tag.attrs {
                            attributes
                                .entry(attr.name.local.as_ref().to_string())
                                .or_insert_with(|| attr.value.to_string());
                        }
                        let next_state = content_state_after(&name);
                        state.tokens.push(Token::StartTag { name, attributes });
                        return next_state;
                    }
                    TagKind::EndTag => state.tokens.push(Token::EndTag(name)),
                }
            }
            RawToken::CommentToken(data) => {
                state.flush_text();
                state.tokens.push(reinterpret_comment(&data));
            }
            RawToken::DoctypeToken(_) => state.flush_text(),
            RawToken::ParseError(msg) => {
                let message = msg.into_owned();
                if self.strict {
                    state.flush_text();
                    state.tokens.push(Token::Error(message));
                } else {
                    state.tokens.push(Token::Warning(message));
                }
            }
            RawToken::EOFToken => state.flush_text(),
        }

        TokenSinkResult::Continue
    }
}

/// Tokenizer state needed after a start tag, as a tree builder would
/// request it.
fn content_state_after(tag: &str) -> TokenSinkResult<()> {
    match tag {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}
