//! Frontmatter parsing and validation for content files.
//!
//! Headers are parsed in two steps. The header text is first deserialized into
//! [`RawFrontmatter`], where every field is optional, and then
//! [`RawFrontmatter::validate`] turns it into a [`Frontmatter`] or fails with a
//! [`CoreError::Validation`] naming the offending field.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Document author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,

    /// Short biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Validated frontmatter metadata for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    /// Document title.
    pub title: String,

    /// Route slug, unique across the collection.
    pub slug: String,

    /// Short summary used in listings, feeds and search.
    pub excerpt: String,

    /// Publication date as written in the source.
    pub date: String,

    /// Parsed publication timestamp.
    pub published: DateTime<Utc>,

    /// Last updated date as written in the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Parsed last updated timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Cover image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Tags in source order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Category name.
    pub category: String,

    /// Author.
    pub author: Author,
}

/// Author block as it appears in the header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,
}

/// Unvalidated header fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFrontmatter {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub updated: Option<String>,

    #[serde(default, alias = "cover_image")]
    pub cover_image: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub author: Option<RawAuthor>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// The opening and closing delimiters must each sit on a line of their own.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();
    let (first_line, rest) = content.split_once('\n')?;
    if first_line.trim_end() != delimiter {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = rest[..offset].trim();
            let body = rest[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse the metadata header of a document.
///
/// Returns the unvalidated header and the body. A missing or unterminated
/// header, or one that does not deserialize, is a [`CoreError::Parse`].
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(RawFrontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Err(CoreError::parse(path, "missing or unterminated metadata header"));
    };

    if fm_str.is_empty() {
        return Ok((RawFrontmatter::default(), body.to_string()));
    }

    let frontmatter: RawFrontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::parse(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::parse(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

/// Parse a date string into a UTC timestamp.
///
/// Accepts RFC 3339 timestamps, naive date-times (read as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl RawFrontmatter {
    /// Validate the header, producing typed frontmatter.
    ///
    /// A missing slug falls back to the file name without its extension. A
    /// missing author name falls back to `default_author`.
    pub fn validate(self, path: &Path, default_author: &str) -> Result<Frontmatter> {
        let title = required(self.title, "title", path)?;
        let excerpt = required(self.excerpt, "excerpt", path)?;
        let date = required(self.date, "date", path)?;
        let category = required(self.category, "category", path)?;

        let published = parse_date(&date).ok_or_else(|| {
            CoreError::validation(path, "date", format!("is not a valid date: '{date}'"))
        })?;

        let updated = optional(self.updated);
        let updated_at = match &updated {
            Some(value) => Some(parse_date(value).ok_or_else(|| {
                CoreError::validation(path, "updated", format!("is not a valid date: '{value}'"))
            })?),
            None => None,
        };

        let slug = match optional(self.slug) {
            Some(slug) => slug,
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .filter(|stem| !stem.is_empty())
                .ok_or_else(|| {
                    CoreError::validation(path, "slug", "cannot be derived from the file name")
                })?,
        };

        let mut tags = Vec::new();
        for tag in self.tags.unwrap_or_default() {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(CoreError::validation(
                    path,
                    "tags",
                    "must not contain empty entries",
                ));
            }
            tags.push(tag.to_string());
        }

        let raw_author = self.author.unwrap_or_default();
        let name = optional(raw_author.name).unwrap_or_else(|| default_author.trim().to_string());
        if name.is_empty() {
            return Err(CoreError::validation(path, "author.name", "is required"));
        }

        Ok(Frontmatter {
            title,
            slug,
            excerpt,
            date,
            published,
            updated,
            updated_at,
            cover_image: optional(self.cover_image),
            tags,
            category,
            author: Author {
                name,
                bio: optional(raw_author.bio),
            },
        })
    }
}

/// Trimmed, non-empty required field.
fn required(value: Option<String>, field: &str, path: &Path) -> Result<String> {
    optional(value).ok_or_else(|| CoreError::validation(path, field, "is required"))
}

/// Trimmed optional field; blank counts as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
