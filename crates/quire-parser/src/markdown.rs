//! Markdown renderer using pulldown-cmark.
//!
//! Rendering is a pure function of the input text: the same Markdown always
//! produces byte-identical HTML. The event stream from pulldown-cmark goes
//! through a few rewriting passes before being handed to `push_html`:
//!
//! 1. headings get unique anchor ids and are collected into a table of contents
//! 2. raw HTML is demoted to text so it is escaped, never passed through
//! 3. link and image targets with script-capable schemes are neutralized
//! 4. fenced code blocks with a language are replaced by highlighted HTML

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use quire_core::{TocEntry, frontmatter::split_frontmatter};

use crate::syntax::SyntaxHighlighter;

/// Markdown renderer with syntax highlighting support.
#[derive(Debug)]
pub struct MarkdownRenderer {
    highlighter: SyntaxHighlighter,
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self {
            highlighter: SyntaxHighlighter::default(),
            options,
        }
    }

    /// Create a renderer with a custom syntax theme.
    pub fn with_theme(theme: &str) -> Self {
        let mut renderer = Self::new();
        renderer.highlighter.set_theme(theme);
        renderer
    }

    /// Render a Markdown body to an HTML fragment.
    pub fn render(&self, markdown: &str) -> String {
        self.render_with_toc(markdown).0
    }

    /// Render a Markdown body and collect its headings.
    ///
    /// A metadata header at the very start of the input is dropped. Thematic
    /// breaks later in the body are rendered as usual.
    pub fn render_with_toc(&self, markdown: &str) -> (String, Vec<TocEntry>) {
        let markdown = strip_leading_header(markdown);
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.options).collect();

        let (events, toc) = assign_heading_ids(events);
        let events = events.into_iter().map(escape_raw_html).map(neutralize_urls);
        let events = self.highlight_code_blocks(events);

        let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut output, events.into_iter());
        (output, toc)
    }

    fn highlight_code_blocks<'a>(&self, events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        let mut fence: Option<(String, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                    if !lang.trim().is_empty() =>
                {
                    fence = Some((lang.trim().to_string(), String::new()));
                }
                Event::Text(ref text) if fence.is_some() => {
                    if let Some((_, code)) = fence.as_mut() {
                        code.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if fence.is_some() => {
                    if let Some((lang, code)) = fence.take() {
                        let highlighted = self.highlighter.highlight(&code, Some(&lang));
                        out.push(Event::Html(highlighted.into()));
                    }
                }
                other => out.push(other),
            }
        }

        out
    }
}

/// Give every heading a unique id and record it in the table of contents.
///
/// Explicit `{#id}` attributes are kept; otherwise the id is derived from the
/// heading text. Repeats get `-1`, `-2`, ... suffixes in document order.
fn assign_heading_ids(mut events: Vec<Event<'_>>) -> (Vec<Event<'_>>, Vec<TocEntry>) {
    let mut toc = Vec::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut open: Option<(usize, String)> = None;

    for i in 0..events.len() {
        let closed_level = match &events[i] {
            Event::Start(Tag::Heading { .. }) => {
                open = Some((i, String::new()));
                None
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, heading)) = open.as_mut() {
                    heading.push_str(text);
                }
                None
            }
            Event::End(TagEnd::Heading(level)) => Some(*level as u8),
            _ => None,
        };

        if let Some(level) = closed_level {
            if let Some((start, text)) = open.take() {
                if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                    let base = match id.as_deref() {
                        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
                        _ => anchor_id(&text),
                    };
                    let unique = unique_id(base, &mut used);
                    *id = Some(CowStr::from(unique.clone()));
                    toc.push(TocEntry {
                        level,
                        text,
                        id: unique,
                    });
                }
            }
        }
    }

    (events, toc)
}

/// `base`, or the first free `base-N`. Every id handed out is recorded, so a
/// suffixed id never collides with a heading whose own text produces it.
fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    if used.insert(base.clone()) {
        return base;
    }

    let mut n = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Drop a `---`/`+++` header at the start of `markdown`.
///
/// Only a block whose first line reads like a `key: value` or `key = value`
/// pair counts, so a body opening with a thematic break is left alone.
fn strip_leading_header(markdown: &str) -> &str {
    match split_frontmatter(markdown) {
        Some((_, header, body)) if looks_like_header(header) => body,
        _ => markdown,
    }
}

fn looks_like_header(header: &str) -> bool {
    header
        .lines()
        .next()
        .and_then(|line| line.split_once([':', '=']))
        .is_some_and(|(key, _)| {
            let key = key.trim();
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

/// Raw HTML is rendered as visible, escaped text.
fn escape_raw_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

fn neutralize_urls(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_unsafe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_unsafe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    }
}

fn is_unsafe_url(url: &str) -> bool {
    let scheme: String = url
        .trim_start()
        .chars()
        .take_while(|c| *c != ':')
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    url.contains(':') && matches!(scheme.as_str(), "javascript" | "vbscript" | "data")
}

/// Convert heading text to an anchor id.
fn anchor_id(text: &str) -> String {
    let id = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if id.is_empty() {
        "section".to_string()
    } else {
        id
    }
}
