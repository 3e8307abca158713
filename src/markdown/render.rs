//! Forest → Markdown rendering.
//!
//! Rendering is compositional: every element is rendered from the already
//! rendered text of its children. Consecutive inline content (text leaves
//! and inline elements) forms a run that is reflowed by the paragraph
//! formatter; block elements are rendered on their own and joined with
//! blank lines, or single newlines inside list items and definitions.
//!
//! Widths shrink by 2 columns per enclosing blockquote and 4 per enclosing
//! list item or definition description, never below [`MIN_WIDTH`](super::wrap::MIN_WIDTH).

use log::debug;
use url::Url;

use super::escape::{calculate_inline_code_ticks, escape_inline, escape_markdown};
use super::references::{Glossary, ReferenceTable, quote_title};
use super::wrap::{HARD_BREAK, collapse_whitespace, fill, hang, indented};
use crate::config::{Config, DEFAULT_COLUMN_WIDTH, LinkPlacement};
use crate::dom::{Child, Forest, Item, Leaf, Node, taxonomy};

/// Renders forests according to a [`Config`].
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    config: &'a Config,
    base: Option<Url>,
}

impl<'a> Renderer<'a> {
    /// An unparseable `base_url` is ignored; [`Config::validate`] reports it.
    pub fn new(config: &'a Config) -> Self {
        let base = config
            .base_url
            .as_deref()
            .and_then(|base| Url::parse(base).ok());
        Self { config, base }
    }

    /// Render a complete document.
    ///
    /// The result ends with exactly one newline, or is empty when the forest
    /// has no visible content.
    pub fn render(&self, forest: &Forest) -> String {
        RenderContext::new(self.config, self.base.as_ref()).render(forest)
    }
}

/// Per-document rendering state.
struct RenderContext<'a> {
    config: &'a Config,
    base: Option<&'a Url>,
    references: ReferenceTable,
    glossary: Glossary,
    /// Enclosing blockquotes, lists and definition lists.
    nesting: usize,
}

impl<'a> RenderContext<'a> {
    fn new(config: &'a Config, base: Option<&'a Url>) -> Self {
        Self {
            config,
            base,
            references: ReferenceTable::new(),
            glossary: Glossary::new(),
            nesting: 0,
        }
    }

    fn render(mut self, forest: &Forest) -> String {
        let width = match self.config.column_width {
            0 => DEFAULT_COLUMN_WIDTH,
            width => width,
        };
        let placement = self.config.link_placement;

        let mut blocks = Vec::new();
        for item in forest {
            // Declarations have no rendering.
            let Item::Node(node) = item else {
                continue;
            };
            let text = self.render_piece(node, width);
            if !text.is_empty() {
                blocks.push(text);
            }
            if placement == LinkPlacement::Paragraph
                && let Some(references) = self.references.take_pending()
            {
                blocks.push(references);
            }
        }

        if placement == LinkPlacement::Endnote
            && let Some(references) = self.references.take_pending()
        {
            blocks.push(references);
        }
        if let Some(glossary) = self.glossary.render() {
            blocks.push(glossary);
        }

        if blocks.is_empty() {
            return String::new();
        }
        let mut output = blocks.join("\n\n");
        output.push('\n');
        output
    }

    /// Render a node standing on its own, whatever its kind.
    fn render_piece(&mut self, node: &Node, width: usize) -> String {
        if is_block_level(node) {
            self.render_block(node, width)
        } else {
            fill(&self.render_inline(node), width)
        }
    }

    fn render_block(&mut self, node: &Node, width: usize) -> String {
        match node.tag() {
            "head" | "style" | "script" | "title" | "template" => String::new(),
            tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let level = usize::from(tag.as_bytes()[1] - b'0');
                self.render_heading(node, level)
            }
            "hr" => "* * *".to_string(),
            "pre" => render_preformatted(node),
            "blockquote" => self.render_blockquote(node, width),
            "ul" | "menu" | "dir" => self.nested(|ctx| ctx.render_list(node, width, false)),
            "ol" => self.nested(|ctx| ctx.render_list(node, width, true)),
            "dl" => self.nested(|ctx| ctx.render_definitions(node, width)),
            "dd" => self.nested(|ctx| ctx.render_description(node, width)),
            "li" | "dt" | "tr" => self.render_flow(node.children(), width, "\n"),
            _ => self.render_flow(node.children(), width, "\n\n"),
        }
    }

    /// Render mixed content: inline runs are reflowed, blocks are rendered
    /// separately, and the pieces are joined with `separator`.
    ///
    /// In paragraph placement, a flow of blank-line separated pieces outside
    /// any quote or list gets a reference block after every piece that
    /// introduced new references.
    fn render_flow(&mut self, children: &[Child], width: usize, separator: &str) -> String {
        let interleave = self.config.link_placement == LinkPlacement::Paragraph
            && self.nesting == 0
            && separator == "\n\n";
        let mut pieces = Vec::new();
        let mut run = String::new();

        for child in children {
            match child {
                Child::Node(node) if is_block_level(node) => {
                    let filled = take_run(&mut run, width);
                    self.push_piece(filled, &mut pieces, interleave);
                    let block = self.render_block(node, width);
                    self.push_piece(block, &mut pieces, interleave);
                }
                Child::Node(node) => {
                    let inline = self.render_inline(node);
                    push_inline(&mut run, &inline);
                }
                Child::Leaf(leaf) => push_inline(&mut run, &render_leaf(leaf)),
            }
        }
        let filled = take_run(&mut run, width);
        self.push_piece(filled, &mut pieces, interleave);

        pieces.join(separator)
    }

    fn push_piece(&mut self, piece: String, pieces: &mut Vec<String>, interleave: bool) {
        if !piece.is_empty() {
            pieces.push(piece);
        }
        if interleave && let Some(references) = self.references.take_pending() {
            pieces.push(references);
        }
    }

    /// Render the body of a quote or list; references found inside are
    /// listed after the outermost one.
    fn nested<T>(&mut self, render: impl FnOnce(&mut Self) -> T) -> T {
        self.nesting += 1;
        let out = render(self);
        self.nesting -= 1;
        out
    }

    fn render_inline(&mut self, node: &Node) -> String {
        match node.tag() {
            "br" => HARD_BREAK.to_string(),
            "script" | "style" => String::new(),
            "em" | "i" | "u" => {
                let content = self.render_children(node);
                emphasize(&content, "_")
            }
            "strong" | "b" => {
                let content = self.render_children(node);
                emphasize(&content, "**")
            }
            "code" => code_span(&node.text_content()),
            "a" => self.render_link(node),
            "img" => self.render_image(node),
            "abbr" => self.render_abbr(node),
            _ => self.render_children(node),
        }
    }

    /// Concatenate the inline rendering of every child.
    fn render_children(&mut self, node: &Node) -> String {
        let mut out = String::new();
        for child in node.children() {
            match child {
                Child::Node(child) => {
                    let inline = self.render_inline(child);
                    push_inline(&mut out, &inline);
                }
                Child::Leaf(leaf) => push_inline(&mut out, &render_leaf(leaf)),
            }
        }
        out
    }

    fn render_heading(&mut self, node: &Node, level: usize) -> String {
        let content = self.render_children(node).replace(HARD_BREAK, " ");
        let text = collapse_whitespace(&content);
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }
        format!("{} {text}", "#".repeat(level))
    }

    fn render_blockquote(&mut self, node: &Node, width: usize) -> String {
        let width = indented(width, 2);
        let body = self.nested(|ctx| ctx.render_flow(node.children(), width, "\n\n"));
        if body.is_empty() {
            return body;
        }
        body.split('\n')
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_list(&mut self, node: &Node, width: usize, ordered: bool) -> String {
        let inner = indented(width, 4);
        let mut items = Vec::new();

        for child in node.children() {
            let body = match child {
                Child::Node(item) if item.is_list_item() => {
                    self.render_flow(item.children(), inner, "\n")
                }
                Child::Node(other) => self.render_piece(other, inner),
                Child::Leaf(leaf) => fill(&render_leaf(leaf), inner),
            };
            if body.trim().is_empty() {
                continue;
            }

            let marker = if ordered {
                ordinal_marker(items.len() + 1)
            } else {
                "  * ".to_string()
            };
            let continuation = " ".repeat(marker.len());
            items.push(hang(&body, &marker, &continuation));
        }

        items.join("\n")
    }

    fn render_definitions(&mut self, node: &Node, width: usize) -> String {
        let mut items = Vec::new();
        for child in node.children() {
            let text = match child {
                Child::Node(term) if term.tag() == "dt" => {
                    self.render_flow(term.children(), width, "\n")
                }
                Child::Node(description) if description.tag() == "dd" => {
                    self.render_description(description, width)
                }
                Child::Node(other) => self.render_piece(other, width),
                Child::Leaf(leaf) => fill(&render_leaf(leaf), width),
            };
            if !text.trim().is_empty() {
                items.push(text);
            }
        }
        items.join("\n")
    }

    fn render_description(&mut self, node: &Node, width: usize) -> String {
        let body = self.render_flow(node.children(), indented(width, 4), "\n");
        if body.is_empty() {
            return body;
        }
        hang(&body, ":   ", "    ")
    }

    fn render_link(&mut self, node: &Node) -> String {
        let content = self.render_children(node);
        let Some(href) = self.link_target(node.attribute("href"), true) else {
            return content;
        };
        let title = non_empty_attribute(node, "title");

        let (lead, text, trail) = split_padding(&content);
        let text = if text.is_empty() {
            escape_markdown(&href).into_owned()
        } else {
            text.to_string()
        };
        let link = self.link_markup("", &text, &href, title.as_deref());
        format!("{lead}{link}{trail}")
    }

    fn render_image(&mut self, node: &Node) -> String {
        let alt = match node.attribute("alt") {
            Some(alt) => escape_markdown(collapse_whitespace(alt).trim()).into_owned(),
            None => self.render_children(node).trim().to_string(),
        };
        let Some(src) = self.link_target(node.attribute("src"), false) else {
            return alt;
        };
        let title = non_empty_attribute(node, "title");
        self.link_markup("!", &alt, &src, title.as_deref())
    }

    fn render_abbr(&mut self, node: &Node) -> String {
        let content = self.render_children(node);
        let abbr = collapse_whitespace(&node.text_content()).trim().to_string();
        if let Some(title) = non_empty_attribute(node, "title")
            && !abbr.is_empty()
        {
            self.glossary.define(&abbr, &title);
        }
        content
    }

    /// Write a link per the configured placement.
    fn link_markup(&mut self, prefix: &str, text: &str, href: &str, title: Option<&str>) -> String {
        match self.config.link_placement {
            LinkPlacement::Inline => match title {
                Some(title) => format!("{prefix}[{text}]({href} {})", quote_title(title)),
                None => format!("{prefix}[{text}]({href})"),
            },
            LinkPlacement::Paragraph | LinkPlacement::Endnote => {
                let id = self.references.intern(href, title);
                format!("{prefix}[{text}][{id}]")
            }
        }
    }

    /// Usable link destination for an `href`/`src` value.
    ///
    /// Empty values yield `None`, as do local fragments when
    /// `skip_local_fragments` is set and `is_href` is true.
    fn link_target(&self, raw: Option<&str>, is_href: bool) -> Option<String> {
        let raw = collapse_whitespace(raw?.trim());
        if raw.is_empty() {
            return None;
        }
        if is_href && self.config.skip_local_fragments && raw.starts_with('#') {
            debug!("skipping local fragment link {raw}");
            return None;
        }
        Some(encode_destination(&self.resolve(&raw)))
    }

    /// Resolve a relative reference against the base URL, if any.
    fn resolve(&self, href: &str) -> String {
        match self.base {
            Some(base) if Url::parse(href).is_err() => match base.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    debug!("cannot resolve {href} against {base}: {e}");
                    href.to_string()
                }
            },
            _ => href.to_string(),
        }
    }
}

/// Whether a node renders as a block.
///
/// Elements outside the taxonomy are blocks when any descendant is a
/// block.
fn is_block_level(node: &Node) -> bool {
    match taxonomy::describe(node.tag()) {
        Some(description) => !description.inline,
        None => node
            .children()
            .iter()
            .any(|child| matches!(child, Child::Node(n) if is_block_level(n))),
    }
}

fn render_leaf(leaf: &Leaf) -> String {
    match leaf {
        Leaf::Text(text) | Leaf::CData(text) => {
            escape_inline(&collapse_whitespace(text)).into_owned()
        }
        Leaf::Comment(_) | Leaf::Declaration(_) => String::new(),
    }
}

fn take_run(run: &mut String, width: usize) -> String {
    let filled = fill(run, width);
    run.clear();
    filled
}

/// Append inline markup to a run. Adjacent code spans get a space between
/// them, since their fences would otherwise read as one span.
fn push_inline(run: &mut String, inline: &str) {
    if run.ends_with('`') && inline.starts_with('`') {
        run.push(' ');
    }
    run.push_str(inline);
}

/// Split leading and trailing whitespace off `s`.
fn split_padding(s: &str) -> (&str, &str, &str) {
    let start = s.len() - s.trim_start().len();
    let trimmed = s.trim();
    let end = start + trimmed.len();
    (&s[..start], trimmed, &s[end..])
}

/// Wrap content in emphasis markers, keeping surrounding whitespace outside
/// them.
fn emphasize(content: &str, marker: &str) -> String {
    let (lead, text, trail) = split_padding(content);
    if text.is_empty() {
        return content.to_string();
    }
    format!("{lead}{marker}{text}{marker}{trail}")
}

fn code_span(content: &str) -> String {
    let content = collapse_whitespace(content);
    if content.is_empty() {
        return String::new();
    }
    let fence = "`".repeat(calculate_inline_code_ticks(&content));
    let pad = if content.starts_with('`') || content.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{content}{pad}{fence}")
}

/// `pre` content verbatim, indented as a code block.
fn render_preformatted(node: &Node) -> String {
    let mut content = String::new();
    collect_preformatted(node, &mut content);

    let content = content
        .strip_prefix("\r\n")
        .or_else(|| content.strip_prefix('\n'))
        .unwrap_or(&content);
    let content = content.strip_suffix('\n').unwrap_or(content);
    if content.trim().is_empty() {
        return String::new();
    }

    content
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_preformatted(node: &Node, out: &mut String) {
    for child in node.children() {
        match child {
            Child::Leaf(Leaf::Text(text) | Leaf::CData(text)) => out.push_str(text),
            Child::Leaf(Leaf::Comment(_) | Leaf::Declaration(_)) => {}
            Child::Node(child) => match child.tag() {
                "br" => out.push('\n'),
                "script" | "style" => {}
                _ => collect_preformatted(child, out),
            },
        }
    }
}

/// `1.  `, `2.  `, …, `10. `: the text starts on column 4 or later.
fn ordinal_marker(n: usize) -> String {
    let marker = format!("{n}.");
    let width = (marker.len() + 1).max(4);
    format!("{marker:<width$}")
}

/// Percent-encode characters that cannot appear in an unbracketed link
/// destination.
fn encode_destination(href: &str) -> String {
    if !href.contains([' ', '(', ')']) {
        return href.to_string();
    }
    href.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// An attribute value on a single line, if it has any visible content.
fn non_empty_attribute(node: &Node, name: &str) -> Option<String> {
    let value = collapse_whitespace(node.attribute(name)?.trim()).into_owned();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attributes, Declaration};
    use crate::markdown::wrap::MIN_WIDTH;

    fn el(tag: &str, attributes: &[(&str, &str)]) -> Node {
        let attributes: Attributes = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Node::with_attributes(tag, attributes)
    }

    fn node(tag: &str) -> Node {
        Node::new(tag)
    }

    fn render_with(config: &Config, nodes: Vec<Node>) -> String {
        let forest: Forest = nodes.into_iter().map(Item::Node).collect();
        Renderer::new(config).render(&forest)
    }

    fn render(nodes: Vec<Node>) -> String {
        render_with(&Config::default(), nodes)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let out = render(vec![
            node("h1").text("Title"),
            node("p")
                .text("Lorem ")
                .child(node("strong").text("ipsum"))
                .text("."),
        ]);
        assert_eq!(out, "# Title\n\nLorem **ipsum**.\n");
    }

    #[test]
    fn test_heading_levels_and_whitespace() {
        let out = render(vec![node("h3").text("  Deep \n  heading ")]);
        assert_eq!(out, "### Deep heading\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(vec![]), "");
        assert_eq!(
            render(vec![node("p").child(Leaf::Comment("note".into()))]),
            ""
        );
    }

    #[test]
    fn test_declaration_renders_nothing() {
        let forest = vec![
            Item::Declaration(Declaration::default()),
            Item::Node(node("p").text("x")),
        ];
        assert_eq!(Renderer::new(&Config::default()).render(&forest), "x\n");
    }

    #[test]
    fn test_unordered_list() {
        let out = render(vec![
            node("ul")
                .child(node("li").text("One"))
                .child(node("li").text("Two")),
        ]);
        assert_eq!(out, "  * One\n  * Two\n");
    }

    #[test]
    fn test_ordered_list_markers() {
        let mut list = node("ol");
        for i in 1..=10 {
            list.append(node("li").text(format!("i{i}")));
        }
        let out = render(vec![list]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "1.  i1");
        assert_eq!(lines[8], "9.  i9");
        assert_eq!(lines[9], "10. i10");
    }

    #[test]
    fn test_blank_items_skipped() {
        let out = render(vec![
            node("ol")
                .child(node("li").text("a"))
                .child(node("li").text("  "))
                .child(node("li").text("b")),
        ]);
        assert_eq!(out, "1.  a\n2.  b\n");
    }

    #[test]
    fn test_nested_list() {
        let out = render(vec![node("ul").child(
            node("li")
                .text("One")
                .child(node("ol").child(node("li").text("Sub"))),
        )]);
        assert_eq!(out, "  * One\n    1.  Sub\n");
    }

    #[test]
    fn test_list_item_wraps_under_text() {
        let config = Config::default().with_column_width(24);
        let out = render_with(
            &config,
            vec![node("ul").child(node("li").text("aaaa bbbb cccc dddd eeee"))],
        );
        assert_eq!(out, "  * aaaa bbbb cccc dddd\n    eeee\n");
    }

    #[test]
    fn test_emphasis_moves_whitespace_outside() {
        let out = render(vec![
            node("p")
                .text("a")
                .child(node("em").text(" b "))
                .text("c")
                .child(node("i").text(" "))
                .child(node("b").text("")),
        ]);
        assert_eq!(out, "a _b_ c\n");
    }

    #[test]
    fn test_blockquote() {
        let out = render(vec![
            node("blockquote")
                .child(node("p").text("a"))
                .child(node("p").text("b")),
        ]);
        assert_eq!(out, "> a\n>\n> b\n");
    }

    #[test]
    fn test_blockquote_narrows_width() {
        let text = "aaaa bbbb cccc dddd eeee ffff";
        let config = Config::default().with_column_width(30);
        assert_eq!(render_with(&config, vec![node("p").text(text)]), format!("{text}\n"));
        assert_eq!(
            render_with(&config, vec![node("blockquote").child(node("p").text(text))]),
            "> aaaa bbbb cccc dddd eeee\n> ffff\n"
        );
    }

    #[test]
    fn test_preformatted() {
        let out = render(vec![
            node("pre").child(node("code").text("\n  code *x*\n\nend\n")),
        ]);
        assert_eq!(out, "      code *x*\n\n    end\n");
    }

    #[test]
    fn test_inline_code() {
        let out = render(vec![
            node("p")
                .child(node("code").text("a*b"))
                .text(" ")
                .child(node("code").text("a`b"))
                .text(" ")
                .child(node("code").text("`x")),
        ]);
        assert_eq!(out, "`a*b` ``a`b`` `` `x ``\n");
    }

    #[test]
    fn test_adjacent_code_spans_stay_apart() {
        let out = render(vec![
            node("p")
                .child(node("code").text("x"))
                .child(node("span").child(node("code").text("y"))),
        ]);
        assert_eq!(out, "`x` `y`\n");

        let out = render(vec![
            node("p")
                .child(node("code").text("x"))
                .child(node("code").text("y")),
        ]);
        assert_eq!(out, "`x` `y`\n");
    }

    #[test]
    fn test_numbers_inside_a_line_not_escaped() {
        let out = render(vec![
            node("p")
                .text("see ")
                .child(node("em").text("x"))
                .text("1. foo"),
        ]);
        assert_eq!(out, "see _x_1. foo\n");
    }

    #[test]
    fn test_text_escaping() {
        let out = render(vec![node("p").text("*a* _b_ `c`")]);
        assert_eq!(out, "\\*a\\* \\_b\\_ \\`c\\`\n");
        let out = render(vec![node("p").text("1. Not a list")]);
        assert_eq!(out, "1\\. Not a list\n");
    }

    #[test]
    fn test_hard_break_and_rule() {
        let out = render(vec![
            node("p").text("one").child(node("br")).text("two"),
            node("hr"),
            node("p").text("three"),
        ]);
        assert_eq!(out, "one  \ntwo\n\n* * *\n\nthree\n");
    }

    #[test]
    fn test_head_suppressed() {
        let out = render(vec![
            node("head").child(node("title").text("T")),
            node("p")
                .text("x")
                .child(node("script").text("alert(1)")),
        ]);
        assert_eq!(out, "x\n");
    }

    #[test]
    fn test_inline_links() {
        let out = render(vec![
            node("p")
                .child(el("a", &[("href", "http://a"), ("title", "T")]).text("x"))
                .text(" ")
                .child(el("a", &[("href", "http://b")]).text(" y "))
                .text(" ")
                .child(el("a", &[("name", "anchor")]).text("z")),
        ]);
        assert_eq!(out, "[x](http://a \"T\") [y](http://b) z\n");
    }

    #[test]
    fn test_link_without_text_uses_href() {
        let out = render(vec![node("p").child(el("a", &[("href", "http://a/x_y")]))]);
        assert_eq!(out, "[http://a/x\\_y](http://a/x_y)\n");
    }

    #[test]
    fn test_endnote_links_deduplicated() {
        let config = Config::default().with_link_placement(LinkPlacement::Endnote);
        let out = render_with(
            &config,
            vec![
                node("p")
                    .child(el("a", &[("href", "http://a")]).text("one"))
                    .text(" and ")
                    .child(el("a", &[("href", "http://a")]).text("two")),
                node("p").child(el("a", &[("href", "http://b"), ("title", "B")]).text("three")),
            ],
        );
        assert_eq!(
            out,
            "[one][1] and [two][1]\n\n[three][2]\n\n[1]: http://a\n[2]: http://b \"B\"\n"
        );
    }

    #[test]
    fn test_paragraph_links_flushed_per_block() {
        let config = Config::default().with_link_placement(LinkPlacement::Paragraph);
        let out = render_with(
            &config,
            vec![
                node("p").child(el("a", &[("href", "http://a")]).text("one")),
                node("p").child(el("a", &[("href", "http://a")]).text("again")),
                node("p").child(el("a", &[("href", "http://b")]).text("two")),
            ],
        );
        assert_eq!(
            out,
            "[one][1]\n\n[1]: http://a\n\n[again][1]\n\n[two][2]\n\n[2]: http://b\n"
        );
    }

    #[test]
    fn test_paragraph_links_inside_wrapper() {
        let config = Config::default().with_link_placement(LinkPlacement::Paragraph);
        let out = render_with(
            &config,
            vec![
                node("div")
                    .child(node("p").child(el("a", &[("href", "http://a")]).text("one")))
                    .child(node("p").text("middle"))
                    .child(
                        node("section")
                            .child(node("p").child(el("a", &[("href", "http://b")]).text("two"))),
                    ),
            ],
        );
        assert_eq!(
            out,
            "[one][1]\n\n[1]: http://a\n\nmiddle\n\n[two][2]\n\n[2]: http://b\n"
        );
    }

    #[test]
    fn test_paragraph_links_after_enclosing_quote_and_list() {
        let config = Config::default().with_link_placement(LinkPlacement::Paragraph);
        let link = |href: &str, text: &str| el("a", &[("href", href)]).text(text);
        let out = render_with(
            &config,
            vec![
                node("article")
                    .child(
                        node("blockquote")
                            .child(node("p").child(link("http://q", "quoted")))
                            .child(node("p").text("more")),
                    )
                    .child(
                        node("ul")
                            .child(node("li").child(link("http://l", "item")))
                            .child(node("li").text("plain")),
                    )
                    .child(node("p").text("after")),
            ],
        );
        assert_eq!(
            out,
            "> [quoted][1]\n>\n> more\n\n[1]: http://q\n\n  * [item][2]\n  * plain\n\n\
             [2]: http://l\n\nafter\n"
        );
    }

    #[test]
    fn test_multiline_attributes_flattened() {
        let out = render(vec![
            node("p").child(
                el("a", &[("href", "http://a/\n  x"), ("title", "first\n   second")]).text("t"),
            ),
        ]);
        assert_eq!(out, "[t](http://a/%20x \"first second\")\n");

        let out = render(vec![
            node("p").child(el("abbr", &[("title", "Line\none")]).text("L")),
        ]);
        assert_eq!(out, "L\n\n  *[L]: Line one\n");
    }

    #[test]
    fn test_skip_local_fragments() {
        let p = || node("p").child(el("a", &[("href", "#top")]).text("Top"));
        assert_eq!(render(vec![p()]), "[Top](#top)\n");

        let config = Config::default().with_skip_local_fragments(true);
        assert_eq!(render_with(&config, vec![p()]), "Top\n");
    }

    #[test]
    fn test_base_url_resolution() {
        let config = Config::default().with_base_url("http://example.org/docs/");
        let out = render_with(
            &config,
            vec![
                node("p")
                    .child(el("a", &[("href", "page.html")]).text("P"))
                    .text(" ")
                    .child(el("a", &[("href", "https://other.org/x")]).text("O")),
            ],
        );
        assert_eq!(
            out,
            "[P](http://example.org/docs/page.html) [O](https://other.org/x)\n"
        );
    }

    #[test]
    fn test_destination_with_spaces_encoded() {
        let out = render(vec![node("p").child(el("a", &[("href", "my file (1).txt")]).text("f"))]);
        assert_eq!(out, "[f](my%20file%20%281%29.txt)\n");
    }

    #[test]
    fn test_images() {
        let out = render(vec![
            node("p")
                .child(el("img", &[("src", "a.png"), ("alt", "A *b*")]))
                .text(" ")
                .child(el("img", &[("alt", "Pic")])),
        ]);
        assert_eq!(out, "![A \\*b\\*](a.png) Pic\n");

        let config = Config::default().with_link_placement(LinkPlacement::Endnote);
        let out = render_with(&config, vec![node("p").child(el("img", &[("src", "a.png")]))]);
        assert_eq!(out, "![][1]\n\n[1]: a.png\n");
    }

    #[test]
    fn test_abbreviation_glossary() {
        let out = render(vec![
            node("p")
                .child(el("abbr", &[("title", "HyperText Markup Language")]).text("HTML"))
                .text(" and ")
                .child(el("abbr", &[("title", "Cascading Style Sheets")]).text("CSS"))
                .text(" and ")
                .child(node("abbr").text("XML")),
        ]);
        assert_eq!(
            out,
            "HTML and CSS and XML\n\n  *[HTML]: HyperText Markup Language\n  *[CSS]: Cascading Style Sheets\n"
        );
    }

    #[test]
    fn test_glossary_follows_endnotes() {
        let config = Config::default().with_link_placement(LinkPlacement::Endnote);
        let out = render_with(
            &config,
            vec![
                node("p")
                    .child(el("abbr", &[("title", "World Wide Web")]).text("WWW"))
                    .text(" ")
                    .child(el("a", &[("href", "http://w3.org")]).text("site")),
            ],
        );
        assert_eq!(
            out,
            "WWW [site][1]\n\n[1]: http://w3.org\n\n  *[WWW]: World Wide Web\n"
        );
    }

    #[test]
    fn test_definition_list() {
        let out = render(vec![
            node("dl")
                .child(node("dt").text("Term"))
                .child(node("dd").text("Meaning"))
                .child(node("dt").text("Other")),
        ]);
        assert_eq!(out, "Term\n:   Meaning\nOther\n");
    }

    #[test]
    fn test_table_rows_and_cells() {
        let out = render(vec![
            node("table")
                .child(
                    node("tr")
                        .child(node("td").text("a"))
                        .child(node("td").text("b")),
                )
                .child(node("tr").child(node("td").text("c"))),
        ]);
        assert_eq!(out, "a\nb\n\nc\n");
    }

    #[test]
    fn test_unknown_elements() {
        let out = render(vec![
            node("custom")
                .child(node("p").text("a"))
                .child(node("p").text("b")),
            node("p").text("x ").child(node("custom").text("y")),
        ]);
        assert_eq!(out, "a\n\nb\n\nx y\n");
    }

    #[test]
    fn test_div_separates_blocks() {
        let out = render(vec![
            node("div")
                .text("intro ")
                .child(node("em").text("text"))
                .text("\n")
                .child(node("p").text("para"))
                .text("\n  "),
        ]);
        assert_eq!(out, "intro _text_\n\npara\n");
    }

    #[test]
    fn test_ordinal_marker() {
        assert_eq!(ordinal_marker(1), "1.  ");
        assert_eq!(ordinal_marker(10), "10. ");
        assert_eq!(ordinal_marker(100), "100. ");
    }

    #[test]
    fn test_min_width_constant() {
        assert_eq!(indented(MIN_WIDTH, 4), MIN_WIDTH);
    }
}
