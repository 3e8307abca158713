//! Stack machine that turns a token stream into a well-nested forest.
//!
//! The assembler keeps the path of currently open elements on a stack.
//! Every start tag is compared against the top of the stack to decide
//! whether the open element has to be closed first (the markup forgot an
//! end tag) or whether the new element nests inside it. Closing an element
//! seals it and appends it to its parent, or to the forest when nothing is
//! left open.
//!
//! Repairs performed along the way:
//!
//! - Text outside any element gets an implicit `p`.
//! - An inline element outside any element gets an implicit `p`.
//! - `li` outside a list gets an implicit `ul`; `dt`/`dd` outside a
//!   definition list get an implicit `dl`.
//! - A start tag that cannot nest in the open element closes it, e.g. the
//!   second `p` in `<p>A<p>B`.
//! - An end tag closes every element opened after its match; an end tag
//!   without a match closes everything.

use log::{debug, warn};

use super::node::{Attributes, Forest, Item, Leaf, Node};
use crate::error::{Error, Result, Warning};
use crate::token::Token;

/// Output of a completed assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembled {
    pub forest: Forest,
    /// Non-fatal tokenizer complaints, in stream order.
    pub warnings: Vec<Warning>,
}

/// What to do with the open element when a new one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Seal the open element and look at its parent.
    Close,
    /// Open the new element inside the current one.
    Nest,
}

/// Single-pass tree builder.
#[derive(Debug, Default)]
pub struct Assembler {
    stack: Vec<Node>,
    forest: Forest,
    warnings: Vec<Warning>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a whole token source and return the completed forest.
    ///
    /// Stops at the first [`Token::Error`] and returns it as
    /// [`Error::Tokenization`]; no partial forest is produced.
    pub fn assemble<I>(tokens: I) -> Result<Assembled>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut assembler = Self::new();
        for token in tokens {
            assembler.push(token)?;
        }
        Ok(assembler.finish())
    }

    /// Currently open elements, outermost first.
    pub fn stack(&self) -> &[Node] {
        &self.stack
    }

    /// Items completed so far.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Feed one token.
    pub fn push(&mut self, token: Token) -> Result<()> {
        match token {
            Token::StartTag { name, attributes } => self.start_tag(name, attributes),
            Token::EndTag(name) => self.end_tag(&name),
            Token::Text(text) => {
                if self.keeps_text(&text) {
                    self.push_leaf(Leaf::Text(text));
                }
            }
            Token::CData(data) => self.push_leaf(Leaf::CData(data)),
            Token::Comment(data) => self.push_leaf(Leaf::Comment(data)),
            Token::Declaration(decl) => match self.stack.last_mut() {
                Some(top) => top.append(Leaf::Declaration(decl)),
                None => self.forest.push(Item::Declaration(decl)),
            },
            Token::Warning(message) => {
                warn!("tokenizer: {message}");
                self.warnings.push(Warning::Tokenizer(message));
            }
            Token::Error(message) => return Err(Error::Tokenization { message }),
        }
        Ok(())
    }

    /// Close everything still open and return the result.
    pub fn finish(mut self) -> Assembled {
        while !self.stack.is_empty() {
            self.pop();
        }
        Assembled {
            forest: self.forest,
            warnings: self.warnings,
        }
    }

    fn start_tag(&mut self, name: String, attributes: Attributes) {
        match name.as_str() {
            "html" => return,
            "body" => {
                if self.stack.iter().any(|n| n.tag() == "head") {
                    self.pop_until("head");
                }
                return;
            }
            _ => {}
        }

        let candidate = Node::with_attributes(name, attributes);
        self.close_for(&candidate);
        self.open_implicit_container(&candidate);

        let is_void = candidate.is_void();
        self.stack.push(candidate);
        if is_void {
            self.pop();
        }
    }

    fn end_tag(&mut self, name: &str) {
        if matches!(name, "html" | "body") {
            return;
        }
        // Void elements were sealed when they started.
        if super::taxonomy::is_void(name) {
            return;
        }
        self.pop_until(name);
    }

    /// Pop open elements that cannot hold `candidate`.
    fn close_for(&mut self, candidate: &Node) {
        while let Some(top) = self.stack.last() {
            match placement(top, candidate) {
                Placement::Nest => break,
                Placement::Close => {
                    debug!(
                        "implicitly closing <{}> before <{}>",
                        top.tag(),
                        candidate.tag()
                    );
                    self.pop();
                }
            }
        }
    }

    fn open_implicit_container(&mut self, candidate: &Node) {
        let container = match self.stack.last() {
            None if candidate.is_list_item() => Some("ul"),
            None if candidate.is_definition_item() => Some("dl"),
            None if candidate.is_inline() => Some("p"),
            None => None,
            Some(top) if candidate.is_list_item() && !top.is_list_container() => Some("ul"),
            Some(top) if candidate.is_definition_item() && !top.is_definition_container() => {
                Some("dl")
            }
            Some(_) => None,
        };

        if let Some(tag) = container {
            debug!("opening implicit <{tag}> for <{}>", candidate.tag());
            self.stack.push(Node::new(tag));
        }
    }

    fn push_leaf(&mut self, leaf: Leaf) {
        if self.stack.is_empty() {
            debug!("opening implicit <p> for bare content");
            self.stack.push(Node::new("p"));
        }
        if let Some(top) = self.stack.last_mut() {
            top.append(leaf);
        }
    }

    /// Whitespace-only text is kept inside `pre` and inside elements whose
    /// content model allows character data.
    fn keeps_text(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        if !text.chars().all(char::is_whitespace) {
            return true;
        }
        if self.stack.iter().any(Node::is_preformatted) {
            return true;
        }
        self.stack.last().is_some_and(|top| !top.is_element_only())
    }

    /// Seal the top of the stack into its parent or the forest.
    fn pop(&mut self) {
        let Some(node) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.append(node),
            None => self.forest.push(Item::Node(node)),
        }
    }

    /// Pop until an element named `name` has been sealed or the stack is
    /// empty.
    fn pop_until(&mut self, name: &str) {
        while let Some(top) = self.stack.last() {
            let matched = top.tag() == name;
            if !matched {
                debug!("closing unclosed <{}> for </{name}>", top.tag());
            }
            self.pop();
            if matched {
                break;
            }
        }
    }
}

/// Decide whether `candidate` nests inside `top` or closes it.
fn placement(top: &Node, candidate: &Node) -> Placement {
    if top.is_sibling_of(candidate) {
        Placement::Close
    } else if top.can_contain(candidate.tag()) {
        Placement::Nest
    } else if top.is_inline() && !candidate.is_inline() {
        // An inline element cannot stay open across a block boundary.
        Placement::Close
    } else if top.is_definition_container() && !candidate.is_definition_item() {
        Placement::Close
    } else if top.is_list_container() && !candidate.is_list_item() {
        Placement::Close
    } else if top.is_block() && candidate.is_block() {
        Placement::Close
    } else {
        // Inline candidates nest in unclassified containers; anything else
        // stops here as well.
        Placement::Nest
    }
}
