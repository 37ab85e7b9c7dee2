//! Slug normalization for taxonomy terms and routes.

/// Convert a term to a route-safe slug.
///
/// Rules, applied in order:
/// - trim surrounding whitespace
/// - lowercase (Unicode case mapping, no locale)
/// - drop everything except `a-z`, `0-9`, whitespace and `-`
/// - replace each whitespace run with a single `-`
/// - collapse `-` runs into a single `-`
///
/// Category and tag pages are looked up by re-slugifying the stored term, so
/// this must stay the single slug function used for routing.
///
/// # Examples
///
/// ```
/// use quire_core::slugify;
///
/// assert_eq!(slugify("Dev Notes"), "dev-notes");
/// assert_eq!(slugify("  Rust & Safety "), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(term: &str) -> String {
    let mut slug = String::with_capacity(term.len());
    let mut pending_hyphen = false;

    for c in term.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    if pending_hyphen {
        slug.push('-');
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Dev Notes"), "dev-notes");
        assert_eq!(slugify("rust"), "rust");
    }

    #[test]
    fn test_unicode_lowercasing() {
        assert_eq!(slugify("\u{212A}elvin"), "kelvin");
        assert_eq!(slugify("Über"), "ber");
    }

    #[test]
    fn test_strips_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
        assert_eq!(slugify("Ben & Jerry's"), "ben-jerrys");
    }

    #[test]
    fn test_collapses_whitespace_and_hyphens() {
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
        assert_eq!(slugify("double--hyphen"), "double-hyphen");
    }

    #[test]
    fn test_keeps_edge_hyphens_after_trim() {
        assert_eq!(slugify("  -edge- "), "-edge-");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(slugify("Café Culture"), "caf-culture");
        assert_eq!(slugify("你好"), "");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for term in ["Dev Notes", "C++ & Rust", "  spaced  out  ", "already-slugged"] {
            let once = slugify(term);
            assert_eq!(slugify(&once), once);
        }
    }
}
