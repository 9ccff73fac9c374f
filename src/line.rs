/// Structural category of one trimmed report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// `level` is the raw `#` count; clamping happens when the block is built.
    Header { level: usize, text: &'a str },
    /// Start of a pipe table run.
    TableRow { cells: Vec<&'a str> },
    List { text: &'a str },
    Plain { text: &'a str },
}

/// Marker the next line must contain for a line with an inner `|` to open a table.
const SEPARATOR_MARKER: &str = "---";

/// Classify a line, peeking at the following line for table detection.
///
/// Both lines are trimmed here. Categories are tried in the order headers,
/// tables, list items, so `# a | b` is a header and `- a | b` above a
/// `|---|` line is a table.
pub fn classify<'a>(line: &'a str, next: Option<&str>) -> LineKind<'a> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with('#') {
        let text = line.trim_start_matches('#');
        let level = line.len() - text.len();
        return LineKind::Header {
            level,
            text: text.trim_start(),
        };
    }

    if starts_table(line, next) {
        return LineKind::TableRow {
            cells: split_cells(line),
        };
    }

    if let Some(text) = line.strip_prefix("- ") {
        return LineKind::List { text };
    }

    LineKind::Plain { text: line }
}

/// A table run opens on a line starting with `|`, or on any line with a `|`
/// when the next line carries a dash separator.
pub fn starts_table(line: &str, next: Option<&str>) -> bool {
    line.starts_with('|')
        || (line.contains('|') && next.is_some_and(|n| n.trim().contains(SEPARATOR_MARKER)))
}

/// Whether a line can extend a table run that is already open.
pub fn continues_table(line: &str) -> bool {
    // Every line starting with `|` also contains one
    line.trim().contains('|')
}

/// Split a table line on `|`, trimming cells and dropping empty ones.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// A `|---|:--:|` style separator row.
pub fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", LineKind::Blank)]
    #[case("   \t", LineKind::Blank)]
    #[case("# Title", LineKind::Header { level: 1, text: "Title" })]
    #[case("###Outlook", LineKind::Header { level: 3, text: "Outlook" })]
    #[case("#####   Deep", LineKind::Header { level: 5, text: "Deep" })]
    #[case("#", LineKind::Header { level: 1, text: "" })]
    #[case("- Apply early", LineKind::List { text: "Apply early" })]
    #[case("  - Closing Rank: 120  ", LineKind::List { text: "Closing Rank: 120" })]
    #[case("-no space", LineKind::Plain { text: "-no space" })]
    #[case("---", LineKind::Plain { text: "---" })]
    #[case("Just text", LineKind::Plain { text: "Just text" })]
    fn classifies_without_lookahead(#[case] line: &str, #[case] expected: LineKind<'_>) {
        assert_eq!(classify(line, None), expected);
    }

    #[test]
    fn pipe_start_is_table() {
        assert_eq!(
            classify("| IIT | Rank |", None),
            LineKind::TableRow {
                cells: vec!["IIT", "Rank"]
            }
        );
    }

    #[test]
    fn inner_pipe_needs_separator_below() {
        assert_eq!(
            classify("IIT | Rank", Some("----|-----")),
            LineKind::TableRow {
                cells: vec!["IIT", "Rank"]
            }
        );
        assert_eq!(
            classify("IIT | Rank", Some("IIT Bombay | 120")),
            LineKind::Plain { text: "IIT | Rank" }
        );
        assert_eq!(classify("IIT | Rank", None), LineKind::Plain { text: "IIT | Rank" });
    }

    #[test]
    fn header_wins_over_table() {
        assert_eq!(
            classify("## A | B", Some("|---|---|")),
            LineKind::Header { level: 2, text: "A | B" }
        );
    }

    #[test]
    fn table_wins_over_list() {
        assert!(matches!(
            classify("- a | b", Some("---|---")),
            LineKind::TableRow { .. }
        ));
    }

    #[rstest]
    #[case("| a | b |", vec!["a", "b"])]
    #[case("a|b", vec!["a", "b"])]
    #[case("| a | | b |", vec!["a", "b"])]
    #[case("| | |", vec![])]
    fn splits_cells(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_cells(line), expected);
    }

    #[rstest]
    #[case("|---|---|", true)]
    #[case("| :--- | ---: |", true)]
    #[case("---", true)]
    #[case("| IIT Bombay | 120 |", false)]
    #[case("| | |", false)]
    fn detects_separator_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_separator_row(line), expected);
    }
}
