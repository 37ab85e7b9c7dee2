//! Show command - render a single document

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use quire_parser::MarkdownRenderer;

use super::load_site;

/// Print the rendered detail view of one document.
pub fn run(config_path: &Path, slug: &str, toc: bool) -> Result<()> {
    let site = load_site(config_path)?;
    let renderer = MarkdownRenderer::with_theme(&site.config().build.syntax_theme);

    let Some(doc) = site.rendered(slug, &renderer) else {
        bail!("Document not found: {slug}");
    };

    let summary = &doc.summary;
    println!("<!-- {} -->", comment_text(summary.title()));
    println!(
        "<!-- {} · {} · {} -->",
        summary.display_date(),
        summary.reading_time_text,
        comment_text(&summary.frontmatter.author.name)
    );

    if toc {
        for entry in &doc.toc {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            println!(
                "<!-- {indent}- {} (#{}) -->",
                comment_text(&entry.text),
                comment_text(&entry.id)
            );
        }
    }

    print!("{}", doc.html);
    Ok(())
}

/// Make `text` safe inside an HTML comment: no `--` runs, no leading `>`,
/// no trailing `-`.
fn comment_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    if text.starts_with('>') {
        out.push(' ');
    }

    let mut prev = '\0';
    for c in text.chars() {
        if c == '-' && prev == '-' {
            out.push(' ');
        }
        out.push(c);
        prev = c;
    }

    if out.ends_with('-') {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text_breaks_dash_runs() {
        assert_eq!(comment_text("Before -- after"), "Before - - after");
        assert_eq!(comment_text("a--->b"), "a- - ->b");
        assert!(!comment_text("x-->").contains("--"));
    }

    #[test]
    fn test_comment_text_edges() {
        assert_eq!(comment_text(">quoted"), " >quoted");
        assert_eq!(comment_text("dash-"), "dash- ");
        assert_eq!(comment_text("Plain title"), "Plain title");
    }
}
