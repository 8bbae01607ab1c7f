//! Named rewrite stages of the markup normalization pipeline
//!
//! Each stage takes the output of the previous one. Order matters: emphasis
//! and link unwrapping run before the catch-all tag stripper so their text
//! survives, and entities are decoded only after every tag is gone so an
//! encoded `&lt;` can never be mistaken for markup.

use crate::error::NormalizeError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

type Pattern = Lazy<Result<Regex, regex::Error>>;

/// Signature shared by every stage
pub type StageFn = fn(&str) -> Result<String, NormalizeError>;

/// One named step of the pipeline
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    /// Stage name, used in logs and errors
    pub name: &'static str,

    /// Rewrite applied to the running text
    pub apply: StageFn,
}

impl Stage {
    /// Create a stage
    pub const fn new(name: &'static str, apply: StageFn) -> Self {
        Self { name, apply }
    }

    /// Apply the stage to its input
    pub fn run(&self, input: &str) -> Result<String, NormalizeError> {
        (self.apply)(input)
    }
}

/// The standard pipeline, in application order
pub const STANDARD_STAGES: [Stage; 9] = [
    Stage::new("strip_preamble", strip_preamble),
    Stage::new("strip_root", strip_root),
    Stage::new("convert_lists", convert_lists),
    Stage::new("convert_blocks", convert_blocks),
    Stage::new("convert_emphasis", convert_emphasis),
    Stage::new("unwrap_links", unwrap_links),
    Stage::new("strip_tags", strip_tags),
    Stage::new("decode_entities", decode_entities),
    Stage::new("normalize_whitespace", normalize_whitespace),
];

const BULLET: &str = "• ";

static PREAMBLE_RE: Pattern = Lazy::new(|| Regex::new(r"(?is)<\?xml.*?\?>|<!DOCTYPE[^>]*>"));
static ROOT_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)</?en-note\b[^>]*>"));

static LIST_OPEN_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)<(?:ul|ol)\b[^>]*>"));
static LIST_CLOSE_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)</(?:ul|ol)\s*>"));
static ITEM_OPEN_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>"));
static ITEM_CLOSE_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)</li\s*>"));

static BREAK_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>"));
static PARAGRAPH_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)</?p\b[^>]*>"));
static BLOCK_OPEN_RE: Pattern =
    Lazy::new(|| Regex::new(r"(?i)<(?:div|blockquote|h[1-6]|pre|section|table|tr)\b[^>]*>"));
static BLOCK_CLOSE_RE: Pattern =
    Lazy::new(|| Regex::new(r"(?i)</(?:div|blockquote|h[1-6]|pre|section|table|tr)\s*>"));
static CELL_CLOSE_RE: Pattern = Lazy::new(|| Regex::new(r"(?i)</(?:td|th)\s*>"));

static BOLD_RE: Pattern = Lazy::new(|| Regex::new(r"(?is)<b\b[^>]*>(.*?)</b\s*>"));
static STRONG_RE: Pattern = Lazy::new(|| Regex::new(r"(?is)<strong\b[^>]*>(.*?)</strong\s*>"));
static ITALIC_RE: Pattern = Lazy::new(|| Regex::new(r"(?is)<i\b[^>]*>(.*?)</i\s*>"));
static EM_RE: Pattern = Lazy::new(|| Regex::new(r"(?is)<em\b[^>]*>(.*?)</em\s*>"));

static LINK_RE: Pattern = Lazy::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a\s*>"));

static TAG_RE: Pattern = Lazy::new(|| Regex::new(r"<[^>]+>"));

static ENTITY_RE: Pattern = Lazy::new(|| Regex::new(r"&(?:lt|gt|amp|quot|#39);"));

static BLANK_RUN_RE: Pattern = Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n){2,}"));
static HORIZONTAL_RE: Pattern = Lazy::new(|| Regex::new(r"[ \t]+"));
static LINE_END_RE: Pattern = Lazy::new(|| Regex::new(r" \n"));

fn compiled(stage: &'static str, pattern: &'static Pattern) -> Result<&'static Regex, NormalizeError> {
    Lazy::force(pattern)
        .as_ref()
        .map_err(|e| NormalizeError::Pattern {
            stage,
            reason: e.to_string(),
        })
}

/// Apply `(pattern, replacement)` pairs in order
fn rewrite_all(
    stage: &'static str,
    input: &str,
    rules: &[(&'static Pattern, &str)],
) -> Result<String, NormalizeError> {
    let mut text = input.to_string();
    for &(pattern, replacement) in rules {
        let re = compiled(stage, pattern)?;
        text = re.replace_all(&text, replacement).into_owned();
    }
    Ok(text)
}

/// Delete XML declarations and doctype markers
pub fn strip_preamble(input: &str) -> Result<String, NormalizeError> {
    rewrite_all("strip_preamble", input, &[(&PREAMBLE_RE, "")])
}

/// Delete the document root wrapper tags
pub fn strip_root(input: &str) -> Result<String, NormalizeError> {
    rewrite_all("strip_root", input, &[(&ROOT_RE, "")])
}

/// Turn list markup into bullet lines
pub fn convert_lists(input: &str) -> Result<String, NormalizeError> {
    rewrite_all(
        "convert_lists",
        input,
        &[
            (&LIST_OPEN_RE, ""),
            (&LIST_CLOSE_RE, "\n"),
            (&ITEM_OPEN_RE, BULLET),
            (&ITEM_CLOSE_RE, "\n"),
        ],
    )
}

/// Turn block, paragraph and line-break tags into newlines
///
/// Table rows become lines and each closing cell leaves a space, so cells
/// of one row stay apart.
pub fn convert_blocks(input: &str) -> Result<String, NormalizeError> {
    rewrite_all(
        "convert_blocks",
        input,
        &[
            (&BREAK_RE, "\n"),
            (&PARAGRAPH_RE, "\n"),
            (&BLOCK_OPEN_RE, "\n"),
            (&BLOCK_CLOSE_RE, ""),
            (&CELL_CLOSE_RE, " "),
        ],
    )
}

/// Replace bold and italic spans with asterisk markers
///
/// One non-greedy pass per tag kind, left to right. Mixed nesting converts
/// both kinds; same-kind nesting pairs the outer opener with the first
/// closer and leaves the orphaned tags for [`strip_tags`].
pub fn convert_emphasis(input: &str) -> Result<String, NormalizeError> {
    let passes: [(&'static Pattern, &str); 4] = [
        (&BOLD_RE, "**"),
        (&STRONG_RE, "**"),
        (&ITALIC_RE, "*"),
        (&EM_RE, "*"),
    ];

    let mut text = input.to_string();
    for (pattern, marker) in passes {
        let re = compiled("convert_emphasis", pattern)?;
        text = re
            .replace_all(&text, |caps: &Captures| format!("{marker}{}{marker}", &caps[1]))
            .into_owned();
    }
    Ok(text)
}

/// Replace anchors with their text, dropping the target
pub fn unwrap_links(input: &str) -> Result<String, NormalizeError> {
    rewrite_all("unwrap_links", input, &[(&LINK_RE, "${1}")])
}

/// Delete every remaining tag
pub fn strip_tags(input: &str) -> Result<String, NormalizeError> {
    rewrite_all("strip_tags", input, &[(&TAG_RE, "")])
}

/// Decode the five basic named entities in a single pass
///
/// Numeric references and other named entities are left as they are, and
/// decoded text is never decoded again (`&amp;lt;` becomes `&lt;`).
pub fn decode_entities(input: &str) -> Result<String, NormalizeError> {
    let re = compiled("decode_entities", &ENTITY_RE)?;
    let decoded = re.replace_all(input, |caps: &Captures| {
        match &caps[0] {
            "&lt;" => "<",
            "&gt;" => ">",
            "&amp;" => "&",
            "&quot;" => "\"",
            _ => "'",
        }
        .to_string()
    });
    Ok(decoded.into_owned())
}

/// Collapse blank-line runs and horizontal whitespace, drop trailing
/// spaces on each line, then trim
pub fn normalize_whitespace(input: &str) -> Result<String, NormalizeError> {
    let text = rewrite_all(
        "normalize_whitespace",
        input,
        &[
            (&BLANK_RUN_RE, "\n\n"),
            (&HORIZONTAL_RE, " "),
            (&LINE_END_RE, "\n"),
        ],
    )?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_preamble() {
        let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n<en-note>x</en-note>";
        assert_eq!(strip_preamble(input).unwrap(), "\n\n<en-note>x</en-note>");
    }

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("<en-note style=\"a\">x</en-note>").unwrap(), "x");
        assert_eq!(strip_root("<en-note/>").unwrap(), "");
    }

    #[test]
    fn test_convert_lists() {
        let out = convert_lists("<ul><li>one</li><li>two</li></ul>").unwrap();
        assert_eq!(out, "• one\n• two\n\n");
    }

    #[test]
    fn test_convert_lists_ordered_with_attributes() {
        let out = convert_lists("<ol start=\"3\"><li style=\"x\">a</li></ol>").unwrap();
        assert_eq!(out, "• a\n\n");
    }

    #[test]
    fn test_convert_blocks() {
        assert_eq!(convert_blocks("<div>a</div><div>b</div>").unwrap(), "\na\nb");
        assert_eq!(convert_blocks("a<br/>b<br>c<br />d").unwrap(), "a\nb\nc\nd");
        assert_eq!(convert_blocks("<p>a</p>").unwrap(), "\na\n");
    }

    #[test]
    fn test_convert_blocks_separates_table_cells() {
        let out = convert_blocks("<table><tr><td>Name</td><th>Qty</th></tr></table>").unwrap();
        assert_eq!(out, "\n\n<td>Name <th>Qty ");
    }

    #[test]
    fn test_convert_blocks_leaves_inline_tags() {
        // <b> is not a break and <param> is not a paragraph
        let out = convert_blocks("<b>x</b><param>").unwrap();
        assert_eq!(out, "<b>x</b><param>");
    }

    #[test]
    fn test_convert_emphasis() {
        let out = convert_emphasis("<b>bold</b> and <i>ital</i>").unwrap();
        assert_eq!(out, "**bold** and *ital*");

        let out = convert_emphasis("<strong>s</strong> <em>e</em>").unwrap();
        assert_eq!(out, "**s** *e*");
    }

    #[test]
    fn test_convert_emphasis_spans_newlines() {
        let out = convert_emphasis("<b>two\nlines</b>").unwrap();
        assert_eq!(out, "**two\nlines**");
    }

    #[test]
    fn test_convert_emphasis_mixed_nesting() {
        let out = convert_emphasis("<b>a <i>b</i></b>").unwrap();
        assert_eq!(out, "**a *b***");
    }

    #[test]
    fn test_convert_emphasis_same_kind_nesting() {
        let out = convert_emphasis("<b>a <b>b</b> c</b>").unwrap();
        assert_eq!(out, "**a <b>b** c</b>");
        assert_eq!(strip_tags(&out).unwrap(), "**a b** c");
    }

    #[test]
    fn test_convert_emphasis_is_non_greedy() {
        let out = convert_emphasis("<i>a</i> b <i>c</i>").unwrap();
        assert_eq!(out, "*a* b *c*");
    }

    #[test]
    fn test_unwrap_links() {
        let out = unwrap_links("<a href=\"https://x\">click</a>").unwrap();
        assert_eq!(out, "click");
    }

    #[test]
    fn test_unwrap_links_does_not_touch_abbr() {
        let out = unwrap_links("<abbr>x</abbr>").unwrap();
        assert_eq!(out, "<abbr>x</abbr>");
    }

    #[test]
    fn test_strip_tags() {
        let out = strip_tags("<span style=\"c\">a</span><img src=\"x\"/>b<en-media hash=\"1\"/>").unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_decode_entities_scope() {
        let out = decode_entities("&amp;&lt;&gt;&quot;&#39;&copy;").unwrap();
        assert_eq!(out, "&<>\"'&copy;");
    }

    #[test]
    fn test_decode_entities_single_pass() {
        assert_eq!(decode_entities("&amp;lt;").unwrap(), "&lt;");
        assert_eq!(decode_entities("&#60;&nbsp;").unwrap(), "&#60;&nbsp;");
    }

    #[test]
    fn test_normalize_whitespace_collapses_blank_runs() {
        assert_eq!(normalize_whitespace("a\n\n\n\nb").unwrap(), "a\n\nb");
        assert_eq!(normalize_whitespace("a\n \n\t\n  \nb").unwrap(), "a\n\nb");
    }

    #[test]
    fn test_normalize_whitespace_keeps_single_blank_line() {
        assert_eq!(normalize_whitespace("a\n\nb").unwrap(), "a\n\nb");
        assert_eq!(normalize_whitespace("a\nb").unwrap(), "a\nb");
    }

    #[test]
    fn test_normalize_whitespace_horizontal() {
        assert_eq!(normalize_whitespace("  a \t  b  ").unwrap(), "a b");
    }

    #[test]
    fn test_normalize_whitespace_drops_trailing_spaces() {
        assert_eq!(normalize_whitespace("a \t\nb  \n\nc").unwrap(), "a\nb\n\nc");
    }

    #[test]
    fn test_standard_stage_order() {
        let names: Vec<&str> = STANDARD_STAGES.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "strip_preamble",
                "strip_root",
                "convert_lists",
                "convert_blocks",
                "convert_emphasis",
                "unwrap_links",
                "strip_tags",
                "decode_entities",
                "normalize_whitespace",
            ]
        );
    }
}
