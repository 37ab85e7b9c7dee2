//! Syntax highlighting for code blocks.

use syntect::{highlighting::ThemeSet, html::highlighted_html_for_string, parsing::SyntaxSet};
use tracing::warn;

/// Syntax highlighter using syntect.
#[derive(Debug)]
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    default_theme: String,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new("base16-ocean.dark")
    }
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the specified theme.
    pub fn new(theme: &str) -> Self {
        let mut highlighter = Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            default_theme: "base16-ocean.dark".to_string(),
        };
        highlighter.set_theme(theme);
        highlighter
    }

    /// Get available theme names, sorted.
    pub fn available_themes(&self) -> Vec<&str> {
        let mut themes: Vec<_> = self.theme_set.themes.keys().map(|s| s.as_str()).collect();
        themes.sort_unstable();
        themes
    }

    /// Name of the theme used for highlighting.
    pub fn theme(&self) -> &str {
        &self.default_theme
    }

    /// Highlight code with the given language.
    ///
    /// Recognized languages produce inline-styled spans inside a
    /// `<pre class="language-{lang}">`. Unknown languages fall back to an
    /// escaped `<pre><code class="language-{lang}">` block.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let Some(lang) = lang.map(language_token).filter(|l| !l.is_empty()) else {
            return fallback_highlight(code, None);
        };

        let syntax = self.syntax_set.find_syntax_by_token(lang);
        let theme = self
            .theme_set
            .themes
            .get(&self.default_theme)
            .or_else(|| self.theme_set.themes.values().next());

        match (syntax, theme) {
            (Some(syntax), Some(theme)) => {
                match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
                    Ok(html) => html.replacen(
                        "<pre",
                        &format!("<pre class=\"language-{}\"", html_escape(lang)),
                        1,
                    ),
                    Err(_) => fallback_highlight(code, Some(lang)),
                }
            }
            _ => fallback_highlight(code, Some(lang)),
        }
    }

    /// Set the default theme. Unknown themes are ignored.
    pub fn set_theme(&mut self, theme: &str) {
        if self.theme_set.themes.contains_key(theme) {
            self.default_theme = theme.to_string();
        } else {
            warn!(theme, fallback = %self.default_theme, "unknown syntax theme");
        }
    }
}

/// First word of a fence info string (`rust,ignore` -> `rust`).
fn language_token(info: &str) -> &str {
    info.split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or_default()
}

/// Plain block used when no highlighting is available.
fn fallback_highlight(code: &str, lang: Option<&str>) -> String {
    let escaped = html_escape(code);
    let lang_class = lang
        .map(|l| format!(" class=\"language-{}\"", html_escape(l)))
        .unwrap_or_default();
    format!("<pre><code{lang_class}>{escaped}</code></pre>\n")
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust() {
        let highlighter = SyntaxHighlighter::default();
        let code = "fn main() {\n    println!(\"Hello\");\n}";
        let html = highlighter.highlight(code, Some("rust"));

        assert!(html.starts_with("<pre class=\"language-rust\""));
        assert!(html.contains("<span"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_highlight_info_string_with_attributes() {
        let highlighter = SyntaxHighlighter::default();
        let html = highlighter.highlight("let x = 1;", Some("rust,ignore"));
        assert!(html.starts_with("<pre class=\"language-rust\""));
    }

    #[test]
    fn test_highlight_unknown_language() {
        let highlighter = SyntaxHighlighter::default();
        let html = highlighter.highlight("a < b", Some("unknown_lang_xyz"));

        assert_eq!(
            html,
            "<pre><code class=\"language-unknown_lang_xyz\">a &lt; b</code></pre>\n"
        );
    }

    #[test]
    fn test_highlight_no_language() {
        let highlighter = SyntaxHighlighter::default();
        let html = highlighter.highlight("plain text", None);

        assert_eq!(html, "<pre><code>plain text</code></pre>\n");
    }

    #[test]
    fn test_highlight_is_deterministic() {
        let highlighter = SyntaxHighlighter::default();
        let code = "fn add(a: i32, b: i32) -> i32 { a + b }";
        assert_eq!(
            highlighter.highlight(code, Some("rust")),
            highlighter.highlight(code, Some("rust"))
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_available_themes() {
        let highlighter = SyntaxHighlighter::default();
        let themes = highlighter.available_themes();

        assert!(!themes.is_empty());
        assert!(themes.contains(&"base16-ocean.dark"));
    }

    #[test]
    fn test_unknown_theme_keeps_default() {
        let highlighter = SyntaxHighlighter::new("no-such-theme");
        assert_eq!(highlighter.theme(), "base16-ocean.dark");

        let highlighter = SyntaxHighlighter::new("InspiredGitHub");
        assert_eq!(highlighter.theme(), "InspiredGitHub");
    }
}
