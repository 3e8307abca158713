//! Static element descriptions.
//!
//! The table follows the HTML 4 element descriptions (inline flag, empty
//! flag, allowed sub-elements) plus a handful of common HTML5 sectioning and
//! phrasing elements. Tags that are not in the table have no description
//! and every predicate answers `false` for them.

/// Groups of tag names an element may contain.
type Children = &'static [&'static [&'static str]];

/// Classification data for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDescription {
    pub name: &'static str,
    /// Phrasing element that may sit inside a line of text.
    pub inline: bool,
    /// Element that never has content or an end tag.
    pub void: bool,
    /// Element whose content model has no character data.
    pub element_only: bool,
    children: Children,
}

impl ElementDescription {
    /// Whether `tag` is a legal direct child.
    pub fn can_contain(&self, tag: &str) -> bool {
        self.children
            .iter()
            .any(|group| group.iter().any(|child| *child == tag))
    }

    /// Iterate over the legal child tag names.
    pub fn sub_elements(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.children.iter().flat_map(|group| group.iter().copied())
    }
}

/// Look up the description for a lowercase tag name.
pub fn describe(tag: &str) -> Option<&'static ElementDescription> {
    DESCRIPTIONS.iter().find(|d| d.name == tag)
}

pub fn is_inline(tag: &str) -> bool {
    describe(tag).is_some_and(|d| d.inline)
}

pub fn is_block(tag: &str) -> bool {
    describe(tag).is_some_and(|d| !d.inline)
}

pub fn is_void(tag: &str) -> bool {
    describe(tag).is_some_and(|d| d.void)
}

pub fn is_element_only(tag: &str) -> bool {
    describe(tag).is_some_and(|d| d.element_only)
}

pub fn can_contain(parent: &str, child: &str) -> bool {
    describe(parent).is_some_and(|d| d.can_contain(child))
}

const INLINE: &[&str] = &[
    "a", "abbr", "acronym", "applet", "b", "basefont", "bdo", "big", "br", "button", "cite",
    "code", "del", "dfn", "em", "font", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "map", "mark", "object", "q", "s", "samp", "script", "select", "small", "span", "strike",
    "strong", "sub", "sup", "textarea", "time", "tt", "u", "var",
];

const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dir", "div", "dl", "fieldset",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "isindex",
    "main", "menu", "nav", "noframes", "noscript", "ol", "p", "pre", "section", "table", "ul",
];

const PRE_CONTENT: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdo", "br", "button", "cite", "code", "del", "dfn", "em",
    "font", "i", "input", "ins", "kbd", "label", "map", "mark", "q", "s", "samp", "script",
    "select", "span", "strike", "strong", "textarea", "time", "tt", "u", "var",
];

const NONE: Children = &[];
const PHRASING: Children = &[INLINE];
const FLOW: Children = &[BLOCK, INLINE];

const fn inline(name: &'static str, children: Children) -> ElementDescription {
    ElementDescription {
        name,
        inline: true,
        void: false,
        element_only: false,
        children,
    }
}

/// Inline element holding only the listed sub-elements.
const fn inline_container(name: &'static str, children: Children) -> ElementDescription {
    ElementDescription {
        name,
        inline: true,
        void: false,
        element_only: true,
        children,
    }
}

const fn block(name: &'static str, children: Children) -> ElementDescription {
    ElementDescription {
        name,
        inline: false,
        void: false,
        element_only: false,
        children,
    }
}

const fn container(name: &'static str, children: Children) -> ElementDescription {
    ElementDescription {
        name,
        inline: false,
        void: false,
        element_only: true,
        children,
    }
}

const fn void(name: &'static str, is_inline: bool) -> ElementDescription {
    ElementDescription {
        name,
        inline: is_inline,
        void: true,
        element_only: true,
        children: NONE,
    }
}

static DESCRIPTIONS: &[ElementDescription] = &[
    // Phrasing
    inline("a", PHRASING),
    inline("abbr", PHRASING),
    inline("acronym", PHRASING),
    inline("applet", &[&["param"], BLOCK, INLINE]),
    inline("b", PHRASING),
    void("basefont", true),
    inline("bdo", PHRASING),
    inline("big", PHRASING),
    void("br", true),
    inline("button", FLOW),
    inline("cite", PHRASING),
    inline("code", PHRASING),
    inline("del", FLOW),
    inline("dfn", PHRASING),
    inline("em", PHRASING),
    inline("font", PHRASING),
    inline("i", PHRASING),
    inline("iframe", FLOW),
    void("img", true),
    void("input", true),
    inline("ins", FLOW),
    inline("kbd", PHRASING),
    inline("label", PHRASING),
    inline_container("map", &[&["area"], BLOCK]),
    inline("mark", PHRASING),
    inline("object", &[&["param"], BLOCK, INLINE]),
    inline("q", PHRASING),
    inline("s", PHRASING),
    inline("samp", PHRASING),
    inline("script", NONE),
    inline_container("select", &[&["optgroup", "option"]]),
    inline("small", PHRASING),
    inline("span", PHRASING),
    inline("strike", PHRASING),
    inline("strong", PHRASING),
    inline("sub", PHRASING),
    inline("sup", PHRASING),
    inline("textarea", NONE),
    inline("time", PHRASING),
    inline("tt", PHRASING),
    inline("u", PHRASING),
    inline("var", PHRASING),
    // Text blocks
    block("address", &[INLINE, &["p"]]),
    block("caption", PHRASING),
    block("dt", PHRASING),
    block("h1", PHRASING),
    block("h2", PHRASING),
    block("h3", PHRASING),
    block("h4", PHRASING),
    block("h5", PHRASING),
    block("h6", PHRASING),
    block("legend", PHRASING),
    block("p", PHRASING),
    block("pre", &[PRE_CONTENT]),
    // Flow containers
    block("article", FLOW),
    block("aside", FLOW),
    block("blockquote", FLOW),
    block("body", &[BLOCK, INLINE, &["ins", "del"]]),
    block("center", FLOW),
    block("dd", FLOW),
    block("div", FLOW),
    block("fieldset", &[&["legend"], BLOCK, INLINE]),
    block("figcaption", FLOW),
    block("figure", &[&["figcaption"], BLOCK, INLINE]),
    block("footer", FLOW),
    block("form", FLOW),
    block("header", FLOW),
    block("li", FLOW),
    block("main", FLOW),
    block("nav", FLOW),
    block("noframes", FLOW),
    block("noscript", FLOW),
    block("option", NONE),
    block("section", FLOW),
    block("style", NONE),
    block("td", FLOW),
    block("th", FLOW),
    block("title", NONE),
    // Structural containers
    container("colgroup", &[&["col"]]),
    container("dir", &[&["li"]]),
    container("dl", &[&["dt", "dd"]]),
    container("frameset", &[&["frameset", "frame", "noframes"]]),
    container(
        "head",
        &[&[
            "title", "isindex", "base", "script", "style", "meta", "link", "object",
        ]],
    ),
    container("html", &[&["head", "body", "frameset"]]),
    container("menu", &[&["li"]]),
    container("ol", &[&["li"]]),
    container("optgroup", &[&["option"]]),
    container("table", &[&["caption", "col", "colgroup", "thead", "tfoot", "tbody", "tr"]]),
    container("tbody", &[&["tr"]]),
    container("tfoot", &[&["tr"]]),
    container("thead", &[&["tr"]]),
    container("tr", &[&["th", "td"]]),
    container("ul", &[&["li"]]),
    // Empty
    void("area", false),
    void("base", false),
    void("col", false),
    void("frame", false),
    void("hr", false),
    void("isindex", false),
    void("link", false),
    void("meta", false),
    void("param", false),
];
