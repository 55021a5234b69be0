//! Markdown → ratatui `Text` renderer.
//!
//! Converts `pulldown_cmark` events into styled `Line`/`Span` values for the
//! content pane: headings, emphasis, inline code, fenced code blocks (with
//! syntect highlighting and a boxed border carrying the language tag),
//! lists, blockquotes, and links.
//!
//! Section bodies are the only markdown this program renders; the corpus
//! itself never parses them.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::config::DEFAULT_CODE_THEME;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const BORDER: Style = Style::new().fg(Color::DarkGray);

/// Render a section body into styled text. `code_theme` names a syntect
/// theme; unknown names fall back to the default theme.
pub fn render(body: &str, code_theme: &str) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = MdWriter::new(code_theme);
    for event in Parser::new_ext(body, opts) {
        writer.handle(event);
    }
    writer.out
}

struct MdWriter {
    out: Text<'static>,
    theme: String,
    /// Inline style stack; styles compose via `patch` so nested
    /// bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote bar, code box edge).
    prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_stack: Vec<Option<u64>>,
    /// Active highlighter while inside a fenced code block.
    highlighter: Option<HighlightLines<'static>>,
    /// Inside a code block that syntect has no syntax for.
    plain_code: bool,
    /// Link target, emitted after the link text closes.
    pending_link: Option<String>,
    /// Separate the next block element with a blank line.
    want_gap: bool,
}

impl MdWriter {
    fn new(theme: &str) -> Self {
        Self {
            out: Text::default(),
            theme: theme.to_string(),
            styles: vec![],
            prefixes: vec![],
            list_stack: vec![],
            highlighter: None,
            plain_code: false,
            pending_link: None,
            want_gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn emit_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.out.lines.push(out);
    }

    fn emit_span(&mut self, span: Span<'static>) {
        match self.out.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.emit_line(Line::from(vec![span])),
        }
    }

    fn gap(&mut self) {
        if self.want_gap {
            self.emit_line(Line::default());
            self.want_gap = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => {
                let style = Style::default().fg(Color::White).bg(Color::DarkGray);
                self.emit_span(Span::styled(c.to_string(), style));
            }
            Event::SoftBreak => self.emit_span(Span::raw(" ")),
            Event::HardBreak => self.emit_line(Line::default()),
            Event::Rule => {
                self.gap();
                self.emit_line(Line::from(Span::styled("─".repeat(40), BORDER)));
                self.want_gap = true;
            }
            Event::TaskListMarker(checked) => {
                self.emit_span(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            _ => {} // HTML, footnotes, math — skip
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.gap();
                self.emit_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.gap();
                // Headings are rendered as styled prose, not with `#` marks.
                self.emit_line(Line::default());
                self.push_style(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.gap();
                self.prefixes.push(Span::styled("┃ ", BORDER));
                self.push_style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                if !self.out.lines.is_empty() {
                    self.emit_line(Line::default());
                }
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                self.emit_line(code_box_top(lang));
                self.prefixes.push(Span::styled("│ ", BORDER));

                if !lang.is_empty()
                    && let Some(syntax) = SYNTAX_SET.find_syntax_by_token(lang)
                {
                    let theme = THEME_SET
                        .themes
                        .get(&self.theme)
                        .unwrap_or(&THEME_SET.themes[DEFAULT_CODE_THEME]);
                    self.highlighter = Some(HighlightLines::new(syntax, theme));
                }
                self.plain_code = self.highlighter.is_none();
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.gap();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.emit_line(Line::default());
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                if let Some(counter) = self.list_stack.last_mut() {
                    let marker = match counter {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let m = format!("{indent}{n}. ");
                            *n += 1;
                            m
                        }
                    };
                    self.emit_span(Span::styled(marker, BORDER));
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT));
            }
            Tag::Link { dest_url, .. } => {
                self.pending_link = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // tables, images, definitions — skip
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::List(_) => {
                if matches!(tag, TagEnd::List(_)) {
                    self.list_stack.pop();
                }
                self.want_gap = true;
            }
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.want_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.prefixes.pop();
                self.styles.pop();
                self.want_gap = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.plain_code = false;
                self.prefixes.pop(); // drop the │ edge before the bottom border
                self.emit_line(Line::from(Span::styled("└──", BORDER)));
                self.want_gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.pending_link.take() {
                    self.emit_span(Span::raw(" ("));
                    self.emit_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.emit_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width; expand up front.
        let text = cow.replace('\t', "    ");

        if self.highlighter.is_some() {
            // Take the highlighter out so highlight_line and emit_line don't
            // both need &mut self.
            let mut hl = self.highlighter.take().unwrap();
            for line in LinesWithEndings::from(&text) {
                if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(hs, frag)| {
                            let content = frag.trim_end_matches('\n').to_string();
                            if content.is_empty() {
                                return None;
                            }
                            let fg =
                                Color::Rgb(hs.foreground.r, hs.foreground.g, hs.foreground.b);
                            Some(Span::styled(content, Style::default().fg(fg)))
                        })
                        .collect();
                    self.emit_line(Line::from(spans));
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        if self.plain_code {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.emit_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return;
        }

        let style = self.style();
        self.emit_span(Span::styled(text, style));
    }
}

/// Top edge of a code box: `┌── lang ──` or bare `┌──`.
fn code_box_top(lang: &str) -> Line<'static> {
    if lang.is_empty() {
        Line::from(Span::styled("┌──", BORDER))
    } else {
        Line::from(vec![
            Span::styled("┌── ", BORDER),
            Span::styled(lang.to_owned(), BORDER.add_modifier(Modifier::BOLD)),
            Span::styled(" ──", BORDER),
        ])
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::new()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        _ => Style::new().add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}
