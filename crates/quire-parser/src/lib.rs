//! Quire Parser Library
//!
//! Markdown body rendering with syntax-highlighted code blocks. The renderer
//! knows nothing about documents, routes or the collection: it maps Markdown
//! text to an HTML fragment.

pub mod markdown;
pub mod syntax;

use std::sync::LazyLock;

pub use markdown::MarkdownRenderer;
pub use syntax::SyntaxHighlighter;

static DEFAULT_RENDERER: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::new);

/// Render Markdown with the default theme.
///
/// Loading syntax definitions is expensive, so the default renderer is built
/// once and shared.
pub fn render(markdown: &str) -> String {
    DEFAULT_RENDERER.render(markdown)
}
