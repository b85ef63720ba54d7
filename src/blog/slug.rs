//! URL slugs of the form `title-slug-<id>` and the page metadata derived from posts.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
static REPEATED_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Default maximum length of a meta description.
pub const META_DESCRIPTION_MAX: usize = 160;

/// Lowercase, hyphen-separated, ASCII word characters only.
pub fn create_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(lowered.trim(), "-");
    let cleaned = NON_SLUG_CHARS.replace_all(&hyphenated, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_owned()
}

/// Reads the numeric id at the end of a slug.
///
/// Takes the leading digits of the last hyphen-separated segment, so
/// `intro-42` and `intro-42abc` both yield 42.
pub fn extract_id_from_slug(slug: &str) -> Option<u64> {
    let last = slug.rsplit('-').next()?.trim_start();
    let last = last.strip_prefix('+').unwrap_or(last);

    let digits: &str = last
        .find(|c: char| !c.is_ascii_digit())
        .map_or(last, |end| &last[..end]);

    digits.parse().ok()
}

/// `title-slug-<id>`.
pub fn create_full_slug(title: &str, id: u64) -> String {
    format!("{}-{id}", create_slug(title))
}

/// True when the slug ends in a positive id.
pub fn is_valid_slug(slug: &str) -> bool {
    extract_id_from_slug(slug).is_some_and(|id| id > 0)
}

/// Page title for a post.
pub fn meta_title(title: &str, site_name: &str) -> String {
    format!("{title} | {site_name}")
}

/// Excerpt cut to `max_len` characters at a word boundary, with `...` appended when cut.
pub fn meta_description(excerpt: &str, max_len: usize) -> String {
    if excerpt.chars().count() <= max_len {
        return excerpt.to_owned();
    }

    let truncated: String = excerpt.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(space) if space > 0 => format!("{}...", &truncated[..space]),
        _ => format!("{truncated}..."),
    }
}
