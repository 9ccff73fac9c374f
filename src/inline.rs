use std::sync::OnceLock;

use regex::Regex;

use crate::block::Span;

fn bold_regex() -> &'static Regex {
    // Non-greedy, so `**a** and **b**` yields two bold runs
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"))
}

/// Split a line of text into plain and bold spans.
///
/// Every `**...**` pair becomes a [`Span::Bold`] with the markers stripped;
/// the text between pairs becomes [`Span::Plain`]. Empty plain gaps are
/// dropped. A `**` with no partner stays in the plain text, so joining the
/// span texts always gives back the input minus the matched markers.
pub fn split_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in bold_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::plain(&text[last..whole.start()]));
        }
        spans.push(Span::bold(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }

    spans
}
