//! The fixed set of recognized HTML tags.
//!
//! The parser drops any tag outside this set entirely: no node is created
//! and nesting is unaffected, though the tag's text content still attaches
//! to the enclosing element.

/// A recognized HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Html,
    Head,
    Body,
    Title,
    H1,
    H2,
    H3,
    P,
    A,
    Ul,
    Li,
    B,
    I,
    Br,
    Hr,
    Img,
    Pre,
    Code,
    Div,
    Span,
}

impl TagKind {
    /// Look up an already-lowercased tag name. Unknown names return `None`.
    ///
    /// `strong` and `em` are aliases for `b` and `i`; they fold onto the
    /// same variants and lose their spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "html" => Some(Self::Html),
            "head" => Some(Self::Head),
            "body" => Some(Self::Body),
            "title" => Some(Self::Title),
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "p" => Some(Self::P),
            "a" => Some(Self::A),
            "ul" => Some(Self::Ul),
            "li" => Some(Self::Li),
            "b" | "strong" => Some(Self::B),
            "i" | "em" => Some(Self::I),
            "br" => Some(Self::Br),
            "hr" => Some(Self::Hr),
            "img" => Some(Self::Img),
            "pre" => Some(Self::Pre),
            "code" => Some(Self::Code),
            "div" => Some(Self::Div),
            "span" => Some(Self::Span),
            _ => None,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Title => "title",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::P => "p",
            Self::A => "a",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::B => "b",
            Self::I => "i",
            Self::Br => "br",
            Self::Hr => "hr",
            Self::Img => "img",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Div => "div",
            Self::Span => "span",
        }
    }

    /// Void elements never take children and are never explicitly closed.
    pub fn is_void(self) -> bool {
        matches!(self, Self::Br | Self::Hr | Self::Img)
    }
}
