//! Text transforms applied to a fetched thread.
//!
//! The archive page is reduced to its diff lines in two steps:
//!
//! 1. [`strip_tags`] removes anything that looks like an HTML tag.
//! 2. [`markup_diff`] keeps only lines that start with a diff marker and wraps
//!    each one in a `<pre>` block styled by its [`LineKind`].
//!
//! Both steps are deliberately naive. Tag stripping is a single regex pass with
//! no entity decoding, and surviving lines are emitted verbatim so that
//! entities such as `&gt;` are decoded by the browser.

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching an opening or closing tag: `<` up to the next `>`.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<[^>]+>").expect("tag regex should compile"));

/// Role of a diff line, keyed by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `d`: demarcation such as `diff --git`.
    Demarcation,
    /// `i`: informational lines such as `index abc..def`.
    Info,
    /// `@`: hunk header.
    Hunk,
    /// `-`: removed line.
    Removed,
    /// `+`: added line.
    Added,
    /// ` `: unchanged context.
    Context,
}

impl LineKind {
    /// Look up the kind for a leading marker character.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'd' => Some(Self::Demarcation),
            'i' => Some(Self::Info),
            '@' => Some(Self::Hunk),
            '-' => Some(Self::Removed),
            '+' => Some(Self::Added),
            ' ' => Some(Self::Context),
            _ => None,
        }
    }

    /// Classify a whole line.
    ///
    /// Returns `None` for empty lines, lines without a known marker, and lines
    /// that are blank once trimmed.
    pub fn classify(line: &str) -> Option<Self> {
        let kind = line.chars().next().and_then(Self::from_marker)?;
        if is_blank(line) {
            return None;
        }
        Some(kind)
    }

    /// Inline style attribute value for this kind.
    ///
    /// Context lines carry the literal `context`, which browsers ignore.
    pub fn style(self) -> &'static str {
        match self {
            Self::Demarcation => "font-weight: bold; border-top: 1px solid black; margin-top: 40px;",
            Self::Info => "color: #aaa",
            Self::Hunk => "color: #a0b;",
            Self::Removed => "background-color: #fdd",
            Self::Added => "background-color: #dfd;",
            Self::Context => "context",
        }
    }
}

/// Whether `line` is empty once whitespace is trimmed.
///
/// A byte order mark counts as whitespace, as archive text occasionally
/// carries stray U+FEFF characters.
fn is_blank(line: &str) -> bool {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}').is_empty()
}

/// Remove every `<...>` substring from `html`.
pub fn strip_tags(html: &str) -> String {
    TAG_REGEX.replace_all(html, "").into_owned()
}

/// Wrap each diff line in a styled `<pre>` block, dropping everything else.
///
/// Order is preserved and blocks are joined with `\n`.
pub fn markup_diff<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            LineKind::classify(line)
                .map(|kind| format!("<pre style='{}'>{}</pre>", kind.style(), line))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip tags from a fetched body and mark up its diff lines.
pub fn prettify(body: &str) -> String {
    let stripped = strip_tags(body);
    markup_diff(stripped.split('\n'))
}
