//! Document tree model and the assembler that builds it.
//!
//! - [`taxonomy`]: static classification of HTML elements (inline, block,
//!   void, content model).
//! - [`node`]: the `Node`/`Leaf` tree and top-level [`Forest`].
//! - [`assembler`]: repairs a token stream into a well-nested forest.

mod assembler;
mod node;
pub mod taxonomy;

pub use assembler::{Assembled, Assembler};
pub use node::{Attributes, Child, Declaration, Forest, Item, Leaf, Node};
