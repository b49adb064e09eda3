//! Fluid sizing for inline images.
//!
//! Legacy posts were authored in a desktop editor that pinned images with
//! `style="max-width: 640px"` and `width="640" height="480"` attributes. Both
//! break narrow viewports, so this pass:
//! - replaces any inline style carrying a fixed pixel `max-width` with
//!   [`FLUID_IMAGE_STYLE`]
//! - strips numeric `width`/`height` attributes from every start tag
//!
//! Only start tags are rewritten; text content passes through untouched.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Style applied in place of a fixed-width inline style
pub const FLUID_IMAGE_STYLE: &str =
    "max-width: 100%; height: auto; display: block; margin: 1.5rem auto; border-radius: 8px;";

// Quoted attribute values may contain `>`
static START_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[A-Za-z](?:[^<>"']|"[^"]*"|'[^']*')*>"#)
        .expect("START_TAG_RE: hardcoded regex is valid")
});

// One attribute with its leading whitespace; the value keeps its quotes
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<lead>\s+)(?P<name>[^\s"'<>/=]+)(?:\s*=\s*(?P<value>"[^"]*"|'[^']*'|[^\s"'<>`]+))?"#,
    )
    .expect("ATTRIBUTE_RE: hardcoded regex is valid")
});

static FIXED_MAX_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)max-width\s*:\s*\d+(?:\.\d+)?px")
        .expect("FIXED_MAX_WIDTH_RE: hardcoded regex is valid")
});

/// Rewrite fixed image dimensions so content scales with the viewport
///
/// # Examples
/// ```
/// # use gic_site::content_normalizer::image_sizing::relax_fixed_dimensions;
/// let html = r#"<img src="a.png" width="640" height="480">"#;
/// assert_eq!(relax_fixed_dimensions(html), r#"<img src="a.png">"#);
/// ```
pub fn relax_fixed_dimensions(html: &str) -> Cow<'_, str> {
    if !html.contains('<') {
        return Cow::Borrowed(html);
    }

    START_TAG_RE.replace_all(html, |caps: &Captures| rewrite_start_tag(&caps[0]))
}

fn rewrite_start_tag(tag: &str) -> String {
    ATTRIBUTE_RE
        .replace_all(tag, |caps: &Captures| {
            let name = &caps["name"];
            let value = caps.name("value").map(|value| unquote(value.as_str()));

            let is_dimension =
                name.eq_ignore_ascii_case("width") || name.eq_ignore_ascii_case("height");
            if is_dimension && value.is_some_and(is_pixel_count) {
                return String::new();
            }

            if name.eq_ignore_ascii_case("style")
                && value.is_some_and(|style| FIXED_MAX_WIDTH_RE.is_match(style))
            {
                return format!("{}style=\"{FLUID_IMAGE_STYLE}\"", &caps["lead"]);
            }

            caps[0].to_string()
        })
        .into_owned()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

/// `"640"`, `" 640 "`; not `"100%"` or `"auto"`
fn is_pixel_count(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
