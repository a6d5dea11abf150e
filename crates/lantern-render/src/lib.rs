//! Style-aware text renderer.
//!
//! Walks the DOM depth-first, pre-order, applying per-tag pre/post hooks
//! and emitting positioned, colored characters to a [`TextDisplay`]. Style
//! state (indent, bold, italic, link, color) is saved on each element's
//! call frame and restored after its children render, so nesting depth of
//! saved state exactly tracks tree depth and siblings never leak style
//! into each other. The cursor is NOT restored -- output position flows
//! through the whole pass.
//!
//! Rendering never fails. Rows past the bottom margin are silently
//! dropped; there is no scrolling in this core.

use log::debug;

use lantern_html::{Document, NodeId, NodeKind, TagKind};
use lantern_types::backend::{TextDisplay, SCREEN_COLS};
use lantern_types::color::TextAttr;

/// First content row; rows above are reserved for chrome (header).
pub const TOP_MARGIN: usize = 2;

/// First row below the content area, reserved for chrome (status).
pub const BOTTOM_MARGIN: usize = 24;

/// Mutable traversal state. One instance lives for the whole pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderState {
    /// Cursor column.
    pub x: usize,
    /// Cursor row.
    pub y: usize,
    /// Wrap width in columns.
    pub width: usize,
    /// Column that wrapped lines restart at.
    pub indent: usize,
    pub bold: bool,
    pub italic: bool,
    pub link: bool,
    /// Active color; hooks swap it per tag.
    pub color: TextAttr,
}

impl RenderState {
    fn initial() -> Self {
        Self {
            x: 0,
            y: TOP_MARGIN,
            width: SCREEN_COLS,
            indent: 0,
            bold: false,
            italic: false,
            link: false,
            color: TextAttr::DEFAULT,
        }
    }
}

/// What a render pass produced besides the grid itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Text of the first text child of `<title>`, when one exists.
    pub title: Option<String>,
    /// Cursor position after the last emitted character.
    pub end_cursor: (usize, usize),
}

/// Render a document onto a display surface.
pub fn render(doc: &Document, display: &mut dyn TextDisplay) -> RenderedPage {
    let mut renderer = Renderer {
        doc,
        display,
        state: RenderState::initial(),
        title: None,
    };
    renderer.node(doc.root());
    debug!(
        "render pass done at ({}, {})",
        renderer.state.x, renderer.state.y
    );
    RenderedPage {
        title: renderer.title,
        end_cursor: (renderer.state.x, renderer.state.y),
    }
}

struct Renderer<'a> {
    doc: &'a Document,
    display: &'a mut dyn TextDisplay,
    state: RenderState,
    title: Option<String>,
}

impl Renderer<'_> {
    fn node(&mut self, id: NodeId) {
        match &self.doc.get(id).kind {
            NodeKind::Document => self.children(id),
            NodeKind::Text(s) => self.emit(s),
            NodeKind::Element(data) => self.element(id, data.tag),
        }
    }

    fn children(&mut self, id: NodeId) {
        for &child in &self.doc.get(id).children {
            self.node(child);
        }
    }

    fn element(&mut self, id: NodeId, tag: TagKind) {
        let saved = self.state;

        match tag {
            TagKind::Title => {
                // Capture the first text child; children are not rendered.
                self.title = self
                    .doc
                    .get(id)
                    .children
                    .iter()
                    .find_map(|&c| match &self.doc.get(c).kind {
                        NodeKind::Text(s) => Some(s.clone()),
                        _ => None,
                    });
                return;
            }
            TagKind::H1 | TagKind::H2 | TagKind::H3 => {
                self.newline();
                self.state.bold = true;
                // Each level keeps its own color: yellow, cyan, white.
                self.state.color = match tag {
                    TagKind::H1 => TextAttr::HEADING_1,
                    TagKind::H2 => TextAttr::HEADING_2,
                    _ => TextAttr::HEADING,
                };
            }
            TagKind::P => {
                self.newline();
                self.newline();
            }
            TagKind::A => {
                self.state.link = true;
                self.state.color = TextAttr::LINK;
                self.emit("[");
            }
            TagKind::Ul => {
                self.state.indent += 2;
            }
            TagKind::Li => {
                self.newline();
                self.emit("* ");
            }
            TagKind::B => {
                self.state.bold = true;
                self.state.color = TextAttr::DEFAULT;
            }
            TagKind::I => {
                self.state.italic = true;
                self.state.color = TextAttr::DIM;
            }
            TagKind::Hr => {
                self.newline();
                let dashes = self.state.width.saturating_sub(self.state.indent);
                self.emit(&"-".repeat(dashes));
                self.newline();
            }
            TagKind::Br => {
                self.newline();
            }
            TagKind::Pre | TagKind::Code => {
                self.state.color = TextAttr::MONO;
            }
            TagKind::Img => {
                let src = self
                    .doc
                    .element(id)
                    .and_then(|d| d.src.clone())
                    .unwrap_or_default();
                self.emit(&format!("[IMG: {src}]"));
            }
            // Structural tags produce no output of their own.
            TagKind::Html | TagKind::Head | TagKind::Body | TagKind::Div | TagKind::Span => {}
        }

        self.children(id);

        match tag {
            TagKind::H1 | TagKind::H2 | TagKind::H3 => self.newline(),
            TagKind::A => self.emit("]"),
            _ => {}
        }

        // Restore style; the cursor keeps flowing.
        let (x, y) = (self.state.x, self.state.y);
        self.state = saved;
        self.state.x = x;
        self.state.y = y;
    }

    /// Emit text at the cursor, wrapping at the field width and dropping
    /// rows past the bottom margin.
    fn emit(&mut self, text: &str) {
        for ch in text.chars() {
            if self.state.x >= self.state.width {
                self.state.x = self.state.indent;
                self.state.y += 1;
            }
            if self.state.y < BOTTOM_MARGIN {
                self.display.set_cursor(self.state.x, self.state.y);
                self.display.set_color(self.attr());
                let mut buf = [0u8; 4];
                self.display.write(ch.encode_utf8(&mut buf));
            }
            self.state.x += 1;
        }
    }

    fn newline(&mut self) {
        self.state.x = self.state.indent;
        self.state.y += 1;
    }

    /// Effective attribute: bold brightens the active foreground.
    fn attr(&self) -> TextAttr {
        if self.state.bold {
            self.state.color.intensified()
        } else {
            self.state.color
        }
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_html::parse;
    use lantern_types::backend::TextSurface;

    fn render_markup(markup: &str) -> (RenderedPage, TextSurface) {
        let doc = parse(markup);
        let mut surface = TextSurface::new();
        let page = render(&doc, &mut surface);
        (page, surface)
    }

    #[test]
    fn plain_text_starts_at_top_margin() {
        let (page, surface) = render_markup("hello");
        assert_eq!(surface.row_text(TOP_MARGIN), "hello");
        assert_eq!(surface.row_text(0), "");
        assert_eq!(page.end_cursor, (5, TOP_MARGIN));
    }

    #[test]
    fn bold_style_does_not_leak_to_siblings() {
        let (_, surface) = render_markup("<p><b>bold</b>plain</p>");
        // p: two newlines from row 2 land content on row 4.
        assert_eq!(surface.row_text(4), "boldplain");
        let bold_attr = surface.cell(0, 4).unwrap().attr;
        let plain_attr = surface.cell(4, 4).unwrap().attr;
        assert_eq!(bold_attr, TextAttr::DEFAULT.intensified());
        assert_eq!(plain_attr, TextAttr::DEFAULT);
    }

    #[test]
    fn inline_spacing_survives_bold_boundary() {
        let (_, surface) = render_markup("<p>Hi <b>there</b></p>");
        assert_eq!(surface.row_text(4), "Hi there");
        assert_eq!(surface.cell(0, 4).unwrap().attr, TextAttr::DEFAULT);
        assert_eq!(surface.cell(2, 4).unwrap().ch, ' ');
        assert_eq!(
            surface.cell(3, 4).unwrap().attr,
            TextAttr::DEFAULT.intensified()
        );
    }

    #[test]
    fn paragraphs_are_separated_by_blank_rows() {
        let (_, surface) = render_markup("<p>a</p><p>b</p>");
        assert_eq!(surface.cell(0, 4).unwrap().ch, 'a');
        assert_eq!(surface.cell(0, 6).unwrap().ch, 'b');
        assert_eq!(surface.row_text(5), "");
    }

    #[test]
    fn title_is_captured_not_rendered() {
        let (page, surface) =
            render_markup("<html><head><title>My Page</title></head><body>text</body></html>");
        assert_eq!(page.title.as_deref(), Some("My Page"));
        assert!(!surface.contains("My Page"));
        assert_eq!(surface.row_text(TOP_MARGIN), "text");
    }

    #[test]
    fn missing_title_is_none() {
        let (page, _) = render_markup("<p>no title</p>");
        assert_eq!(page.title, None);
    }

    #[test]
    fn heading_is_bright_on_its_own_line() {
        let (_, surface) = render_markup("<h1>Head</h1>after");
        assert_eq!(surface.row_text(3), "Head");
        assert_eq!(surface.cell(0, 3).unwrap().attr, TextAttr::HEADING_1);
        // Post-hook newline pushes following text down.
        assert_eq!(surface.row_text(4), "after");
    }

    #[test]
    fn heading_levels_have_distinct_colors() {
        let (_, surface) = render_markup("<h1>one</h1><h2>two</h2><h3>three</h3>");
        assert_eq!(surface.row_text(3), "one");
        assert_eq!(surface.row_text(5), "two");
        assert_eq!(surface.row_text(7), "three");
        assert_eq!(surface.cell(0, 3).unwrap().attr, TextAttr::HEADING_1);
        assert_eq!(surface.cell(0, 5).unwrap().attr, TextAttr::HEADING_2);
        assert_eq!(surface.cell(0, 7).unwrap().attr, TextAttr::HEADING);
    }

    #[test]
    fn link_renders_bracketed_in_link_color() {
        let (_, surface) = render_markup("<a href=\"/x\">link</a>");
        assert_eq!(surface.row_text(TOP_MARGIN), "[link]");
        for x in 0..6 {
            assert_eq!(surface.cell(x, TOP_MARGIN).unwrap().attr, TextAttr::LINK);
        }
    }

    #[test]
    fn list_indent_restores_at_every_depth() {
        let (_, surface) = render_markup(
            "<ul><li>a<ul><li>b<ul><li>c<ul><li>d</li></ul></li></ul></li></ul></li></ul><br>done",
        );
        assert_eq!(surface.row_text(3), "  * a");
        assert_eq!(surface.row_text(4), "    * b");
        assert_eq!(surface.row_text(5), "      * c");
        assert_eq!(surface.row_text(6), "        * d");
        // After all four lists close, indent is back to zero.
        assert_eq!(surface.row_text(7), "done");
    }

    #[test]
    fn sibling_lists_start_at_the_same_indent() {
        let (_, surface) = render_markup("<ul><li>one</li></ul><ul><li>two</li></ul>");
        assert_eq!(surface.row_text(3), "  * one");
        assert_eq!(surface.row_text(4), "  * two");
    }

    #[test]
    fn hr_draws_full_width_rule() {
        let (_, surface) = render_markup("<hr>");
        assert_eq!(surface.row_text(3), "-".repeat(SCREEN_COLS));
    }

    #[test]
    fn br_breaks_the_line() {
        let (_, surface) = render_markup("one<br>two");
        assert_eq!(surface.row_text(2), "one");
        assert_eq!(surface.row_text(3), "two");
    }

    #[test]
    fn italic_renders_dim() {
        let (_, surface) = render_markup("<i>soft</i>");
        assert_eq!(surface.cell(0, TOP_MARGIN).unwrap().attr, TextAttr::DIM);
    }

    #[test]
    fn code_renders_mono_color() {
        let (_, surface) = render_markup("<code>x + y</code>");
        assert_eq!(surface.cell(0, TOP_MARGIN).unwrap().attr, TextAttr::MONO);
    }

    #[test]
    fn image_placeholder_includes_src() {
        let (_, surface) = render_markup("<img src=\"cat.png\">");
        assert_eq!(surface.row_text(TOP_MARGIN), "[IMG: cat.png]");
    }

    #[test]
    fn image_without_src_renders_empty_placeholder() {
        let (_, surface) = render_markup("<img>");
        assert_eq!(surface.row_text(TOP_MARGIN), "[IMG: ]");
    }

    #[test]
    fn long_text_wraps_at_field_width() {
        let long = "x".repeat(100);
        let (_, surface) = render_markup(&long);
        assert_eq!(surface.row_text(2), "x".repeat(SCREEN_COLS));
        assert_eq!(surface.row_text(3), "x".repeat(20));
    }

    #[test]
    fn wrapped_lines_restart_at_list_indent() {
        let long = format!("<ul><li>{}</li></ul>", "y".repeat(90));
        let (_, surface) = render_markup(&long);
        // "* " plus 76 chars fill row 3 to the width.
        assert!(surface.row_text(3).starts_with("  * yyy"));
        // Continuation row starts at the indent column.
        assert_eq!(surface.cell(1, 4).unwrap().ch, ' ');
        assert_eq!(surface.cell(2, 4).unwrap().ch, 'y');
    }

    #[test]
    fn rows_past_bottom_margin_are_dropped() {
        let markup = format!("{}hidden", "<br>".repeat(30));
        let (page, surface) = render_markup(&markup);
        assert!(!surface.contains("hidden"));
        // The cursor kept advancing logically.
        assert!(page.end_cursor.1 >= BOTTOM_MARGIN);
    }

    #[test]
    fn head_children_render_but_head_is_silent() {
        let (_, surface) = render_markup("<head>visible</head>");
        assert_eq!(surface.row_text(TOP_MARGIN), "visible");
    }
}
