//! Markdown generation from an assembled forest.
//!
//! - [`escape`]: pure string escaping for text outside code blocks
//! - [`wrap`]: whitespace collapsing and paragraph reflow
//! - [`references`]: numbered link targets and the abbreviation glossary
//! - [`render`]: the per-tag rendering rules
//!
//! ## Output conventions
//!
//! - Headings are ATX style (`# Title`), rules are `* * *`.
//! - Lists are tight: `  * item` for unordered, `1.  item` for ordered, with
//!   continuation lines aligned under the item text.
//! - Preformatted text becomes an indented code block.
//! - Links are written inline, or as numbered references collected after
//!   each top-level block or at the end of the document.
//! - Abbreviations with a `title` are listed once at the end as
//!   `  *[abbr]: definition`.

mod escape;
mod references;
mod render;
mod wrap;

pub use escape::{calculate_inline_code_ticks, escape_inline, escape_markdown, escape_ordinal};
pub use references::{Glossary, Reference, ReferenceTable};
pub use render::Renderer;
pub use wrap::{MIN_WIDTH, collapse_whitespace, fill};
