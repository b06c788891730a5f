//! Wikilink parsing and rendering.
//!
//! A wikilink is an inline `[[Title]]` occurrence inside a node's content.
//! The title is everything between the brackets, verbatim — no trimming, no
//! normalization, and no escape mechanism for literal brackets. Parsing is
//! a pure function over the text; occurrences are derived fresh on every
//! parse and never persisted.

use regex::Regex;
use std::sync::OnceLock;

/// `[[` + one or more non-bracket characters + `]]`. The excluded-character
/// class keeps occurrences non-overlapping and non-nested, so `[[a]][[b]]`
/// is two links and an unmatched `[[` matches nothing.
fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[\[([^\[\]]+)\]\]").unwrap())
}

/// A single wikilink occurrence in a node's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Title between the brackets, verbatim (internal whitespace kept).
    pub title: String,
    /// Half-open byte range of the whole `[[...]]` construct, brackets
    /// included. Used only for rendering substitution.
    pub span: (usize, usize),
}

/// Extracts every wikilink occurrence from `content`, in left-to-right
/// order of appearance.
///
/// Malformed link syntax is never an error; it simply does not match.
pub fn parse_links(content: &str) -> Vec<Link> {
    link_pattern()
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            Link {
                title: caps[1].to_string(),
                span: (whole.start(), whole.end()),
            }
        })
        .collect()
}

/// One piece of a node's content after link substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text between (or around) link occurrences.
    Text(&'a str),
    /// A link occurrence, reduced to its title. `selected` marks the one
    /// occurrence the navigation cursor currently points at.
    Link { title: &'a str, selected: bool },
}

/// Splits `content` into plain-text gaps and link titles.
///
/// `links` must come from [`parse_links`] on the same `content` (ascending,
/// non-overlapping spans). `selected` out of range, or `None`, just means
/// no occurrence is marked selected. Empty text segments are dropped.
pub fn link_segments<'a>(
    content: &'a str,
    links: &[Link],
    selected: Option<usize>,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut last_end = 0;
    for (i, link) in links.iter().enumerate() {
        let (start, end) = link.span;
        if start > last_end {
            segments.push(Segment::Text(&content[last_end..start]));
        }
        segments.push(Segment::Link {
            title: &content[start + 2..end - 2],
            selected: selected == Some(i),
        });
        last_end = end;
    }
    if last_end < content.len() {
        segments.push(Segment::Text(&content[last_end..]));
    }
    segments
}

/// Reconstitutes `content` with each link's span replaced by
/// `mark(title, selected)`. The visual marking itself is the caller's
/// concern; this function only decides which occurrence is the current one.
///
/// Returns `content` unchanged when `links` is empty.
pub fn render_content(
    content: &str,
    links: &[Link],
    selected: Option<usize>,
    mark: impl Fn(&str, bool) -> String,
) -> String {
    if links.is_empty() {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len());
    for segment in link_segments(content, links, selected) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Link { title, selected } => out.push_str(&mark(title, selected)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_links_in_order() {
        let links = parse_links("see [[B]] and [[C]]");
        assert_eq!(
            links,
            vec![
                Link { title: "B".to_string(), span: (4, 9) },
                Link { title: "C".to_string(), span: (14, 19) },
            ]
        );
    }

    #[test]
    fn test_span_bounds_the_whole_bracket_pair() {
        let content = "Refer to [[Background]].";
        let links = parse_links(content);
        assert_eq!(links.len(), 1);
        let (start, end) = links[0].span;
        assert_eq!(&content[start..end], "[[Background]]");
    }

    #[test]
    fn test_title_kept_verbatim_with_whitespace() {
        let links = parse_links("x [[ padded title ]] y");
        assert_eq!(links[0].title, " padded title ");
    }

    #[test]
    fn test_adjacent_links_are_two_occurrences() {
        let links = parse_links("[[a]][[b]]");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].span, (0, 5));
        assert_eq!(links[1].span, (5, 10));
    }

    #[test]
    fn test_malformed_syntax_yields_no_links() {
        assert!(parse_links("unmatched [[dangling").is_empty());
        assert!(parse_links("[[]]").is_empty());
        assert!(parse_links("no links here").is_empty());
        assert!(parse_links("[single] brackets").is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let content = "a [[x]] b [[y]] c";
        assert_eq!(parse_links(content), parse_links(content));
    }

    #[test]
    fn test_render_round_trips_with_identity_mark() {
        let content = "see [[B]] and [[C]], done";
        let links = parse_links(content);
        let rendered = render_content(content, &links, None, |title, _| format!("[[{title}]]"));
        assert_eq!(rendered, content);
    }

    #[test]
    fn test_render_marks_only_the_selected_link() {
        let content = "see [[B]] and [[C]]";
        let links = parse_links(content);
        let rendered = render_content(content, &links, Some(1), |title, selected| {
            if selected {
                format!(">{title}<")
            } else {
                title.to_string()
            }
        });
        assert_eq!(rendered, "see B and >C<");
    }

    #[test]
    fn test_render_selection_out_of_range_is_not_an_error() {
        let content = "see [[B]]";
        let links = parse_links(content);
        let rendered = render_content(content, &links, Some(9), |title, selected| {
            assert!(!selected);
            title.to_string()
        });
        assert_eq!(rendered, "see B");
    }

    #[test]
    fn test_render_without_links_returns_content_unchanged() {
        let rendered = render_content("plain", &[], Some(0), |_, _| unreachable!());
        assert_eq!(rendered, "plain");
    }

    #[test]
    fn test_segments_cover_gaps_and_titles() {
        let content = "a [[x]] b";
        let links = parse_links(content);
        let segments = link_segments(content, &links, Some(0));
        assert_eq!(
            segments,
            vec![
                Segment::Text("a "),
                Segment::Link { title: "x", selected: true },
                Segment::Text(" b"),
            ]
        );
    }
}
